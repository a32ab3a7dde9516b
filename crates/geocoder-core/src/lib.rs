// crates/geocoder-core/src/lib.rs

//! geocoder-core — a headless map geocoder control
//!
//! The control behind a map search box: it debounces what the user types,
//! asks a pluggable geocoding backend for candidates, merges them with local
//! results, renders the dropdown and moves the map to the chosen place.
//!
//! It owns no DOM and no map. Hosts implement two traits:
//!
//! - [`View`]: text field, dropdown, clear button, loading indicator
//! - [`MapHost`]: camera moves, markers and popups
//!
//! and the backend implements [`GeocoderApi`].
//!
//! Quick start
//! -----------
//! ```no_run
//! use geocoder_core::prelude::*;
//! # async fn demo(api: impl GeocoderApi + 'static) {
//! let geocoder = Geocoder::new(api, ControlOptions::default());
//! geocoder.on(EventKind::Result, |event| {
//!     if let GeocoderEvent::Result { result } = event {
//!         println!("selected {}", result.place_name);
//!     }
//! });
//! geocoder.query("Berlin").await;
//! # }
//! ```
//!
//! Input flow
//! ----------
//! The host forwards DOM-ish events: [`Geocoder::on_input`] returns a
//! [`DebounceTicket`]; the host sleeps for `ticket.delay` and passes it to
//! [`Geocoder::on_debounce_elapsed`]. Superseded tickets are ignored, and a
//! response that resolves after a newer request was issued is discarded.
//!
//! Features
//! --------
//! - `nominatim` (default): [`backend::Nominatim`], an OSM Nominatim adapter
//! - `compact`: read gzipped gazetteers in [`LocalIndex::load`]

pub mod api;
pub mod backend;
pub mod control;
pub mod error;
pub mod events;
pub mod hooks;
pub mod host;
pub mod input;
pub mod local;
pub mod localize;
pub mod model;
pub mod options;
pub mod prelude;
pub mod query;
pub mod render;
pub mod text;

pub use crate::api::{ApiConfig, ApiQuery, GeocoderApi, Request};
pub use crate::control::{Geocoder, GeocoderBuilder, QueryOutcome};
pub use crate::error::{GeocoderError, Result};
pub use crate::events::{EventEmitter, EventKind, GeocoderEvent, ListenerId};
pub use crate::hooks::{ExternalGeocoder, Hooks, LocalGeocoder};
pub use crate::host::{Container, MapHost, MarkerId, MessageKind, MountTarget, NullView, View};
pub use crate::input::{DebounceTicket, Key};
pub use crate::local::LocalIndex;
pub use crate::model::{
    Bbox, Feature, FeatureCollection, Geometry, LngLat, Proximity, ResultItem, ResultSet,
    Suggestion,
};
pub use crate::options::{
    CameraOptions, ControlOptions, MarkerOptions, PopupOptions, ReverseMode, Toggle,
};
pub use crate::render::{Markup, RenderedItem};
