#![cfg_attr(docsrs, feature(doc_cfg))]
//! geocoder-cli — terminal front end for `geocoder-core`
//!
//! Drives the headless search control from a shell: the dropdown is printed
//! as a numbered list and the "map" is a log of camera moves and markers.
//!
//! Usage examples
//! --------------
//! ```bash
//! # Forward geocode and select the best match
//! geocoder search "Brandenburger Tor"
//!
//! # Reverse geocode a coordinate (lat, lon)
//! geocoder reverse 52.5163 13.3777
//!
//! # Offline, against a local gazetteer
//! geocoder --local-only --places places.geojson.gz search zurich
//!
//! # Interactive: type, pick a row with :N, clear with :clear
//! geocoder repl --while-typing
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=geocoder_core=debug`).

pub mod terminal;

pub use terminal::{locale_from_env, TerminalMap, TerminalView};
