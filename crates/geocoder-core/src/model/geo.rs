// crates/geocoder-core/src/model/geo.rs
use serde::{Deserialize, Serialize};

/// A longitude/latitude pair. Serialized as a GeoJSON position `[lng, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// `true` when latitude lies in [-90, 90] and longitude in [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<[f64; 2]> for LngLat {
    fn from(v: [f64; 2]) -> Self {
        Self { lng: v[0], lat: v[1] }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(v: LngLat) -> Self {
        [v.lng, v.lat]
    }
}

/// A bounding box `[min_x, min_y, max_x, max_y]` in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Bbox {
    pub min: LngLat,
    pub max: LngLat,
}

impl Bbox {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: LngLat::new(min_x, min_y),
            max: LngLat::new(max_x, max_y),
        }
    }

    /// Smallest box containing every point; `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LngLat>,
    {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut bbox = Bbox {
            min: first,
            max: first,
        };
        for p in it {
            bbox.extend(p);
        }
        Some(bbox)
    }

    pub fn extend(&mut self, p: LngLat) {
        self.min.lng = self.min.lng.min(p.lng);
        self.min.lat = self.min.lat.min(p.lat);
        self.max.lng = self.max.lng.max(p.lng);
        self.max.lat = self.max.lat.max(p.lat);
    }

    pub fn to_array(self) -> [f64; 4] {
        self.into()
    }
}

impl From<[f64; 4]> for Bbox {
    fn from(v: [f64; 4]) -> Self {
        Bbox::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Bbox> for [f64; 4] {
    fn from(b: Bbox) -> Self {
        [b.min.lng, b.min.lat, b.max.lng, b.max.lat]
    }
}

/// Proximity bias point, as exposed by `set_proximity` / `get_proximity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    pub longitude: f64,
    pub latitude: f64,
}

impl From<Proximity> for LngLat {
    fn from(p: Proximity) -> Self {
        LngLat::new(p.longitude, p.latitude)
    }
}

impl From<LngLat> for Proximity {
    fn from(p: LngLat) -> Self {
        Proximity {
            longitude: p.lng,
            latitude: p.lat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lnglat_serializes_as_position() {
        let p = LngLat::new(13.4, 52.5);
        assert_eq!(serde_json::to_string(&p).unwrap(), "[13.4,52.5]");
        let back: LngLat = serde_json::from_str("[13.4,52.5]").unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn bbox_from_points_covers_all() {
        let b = Bbox::from_points([
            LngLat::new(1.0, 5.0),
            LngLat::new(-2.0, 3.0),
            LngLat::new(4.0, -1.0),
        ])
        .unwrap();
        assert_eq!(b.to_array(), [-2.0, -1.0, 4.0, 5.0]);
        assert!(Bbox::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn validity_bounds_are_inclusive() {
        assert!(LngLat::new(180.0, -90.0).is_valid());
        assert!(!LngLat::new(180.1, 0.0).is_valid());
        assert!(!LngLat::new(0.0, 90.5).is_valid());
    }
}
