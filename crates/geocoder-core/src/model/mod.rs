// crates/geocoder-core/src/model/mod.rs
pub mod feature;
pub mod geo;
pub mod results;

pub use feature::{Feature, Geometry};
pub use geo::{Bbox, LngLat, Proximity};
pub use results::{FeatureCollection, ResultItem, ResultSet, Suggestion};
