// crates/geocoder-core/src/backend/mod.rs

//! Ready-made [`GeocoderApi`](crate::GeocoderApi) adapters.

#[cfg(feature = "nominatim")]
pub mod nominatim;

#[cfg(feature = "nominatim")]
pub use nominatim::Nominatim;
