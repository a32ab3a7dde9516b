// crates/geocoder-core/src/error.rs
use thiserror::Error;

/// Errors surfaced by the geocoder control and its adapters.
///
/// Adapter failures never escape [`Geocoder::query`](crate::Geocoder::query)
/// or the input handlers: they are converted into an
/// [`GeocoderEvent::Error`](crate::GeocoderEvent::Error). The variants are
/// still returned directly from setup calls such as
/// [`Geocoder::add_to`](crate::Geocoder::add_to).
#[derive(Debug, Error)]
pub enum GeocoderError {
    /// Input looked like a coordinate pair but was out of range or unparsable.
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// The configured adapter does not implement the requested operation.
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    /// The geocoding backend reported a failure.
    #[error("Geocoding API error: {0}")]
    Api(String),

    /// `add_to` was given a mount target the view could not resolve.
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "nominatim")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl GeocoderError {
    /// Convenience constructor used by adapters wrapping foreign error types.
    pub fn api(msg: impl std::fmt::Display) -> Self {
        GeocoderError::Api(msg.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GeocoderError>;
