//! geocoder-core prelude: the types a host needs to embed the control.

pub use crate::api::{ApiConfig, GeocoderApi};
pub use crate::control::{Geocoder, QueryOutcome};
pub use crate::error::{GeocoderError, Result};
pub use crate::events::{EventKind, GeocoderEvent};
pub use crate::hooks::{ExternalGeocoder, LocalGeocoder};
pub use crate::host::{Container, MapHost, MarkerId, MessageKind, MountTarget, View};
pub use crate::input::{DebounceTicket, Key};
pub use crate::local::LocalIndex;
pub use crate::model::{Bbox, Feature, FeatureCollection, LngLat, ResultItem, Suggestion};
pub use crate::options::{CameraOptions, ControlOptions, MarkerOptions, PopupOptions};
pub use crate::render::{Markup, RenderedItem};
pub use crate::text::fold_key;

#[cfg(feature = "nominatim")]
pub use crate::backend::Nominatim;
