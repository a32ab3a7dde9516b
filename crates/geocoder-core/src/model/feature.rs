// crates/geocoder-core/src/model/feature.rs
use super::geo::{Bbox, LngLat};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// GeoJSON geometry as delivered by the backend.
///
/// Only points are interpreted by the control; other geometry kinds are
/// carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    pub fn point(at: LngLat) -> Self {
        Geometry {
            kind: "Point".to_owned(),
            coordinates: serde_json::json!([at.lng, at.lat]),
        }
    }

    /// The position of a `Point` geometry.
    pub fn as_point(&self) -> Option<LngLat> {
        if self.kind != "Point" {
            return None;
        }
        let arr = self.coordinates.as_array()?;
        match (arr.first()?.as_f64(), arr.get(1)?.as_f64()) {
            (Some(lng), Some(lat)) => Some(LngLat::new(lng, lat)),
            _ => None,
        }
    }
}

/// A Carmen GeoJSON feature: one geocoding result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Short display text, e.g. "Austin".
    pub text: String,
    /// Full result hierarchy, e.g. "Austin, Texas, United States".
    pub place_name: String,
    #[serde(default)]
    pub place_type: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Bbox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<LngLat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub properties: Value,
}

impl Feature {
    /// Minimal point feature; handy for local gazetteers and tests.
    pub fn point(id: impl Into<String>, text: impl Into<String>, at: LngLat) -> Self {
        let text = text.into();
        Feature {
            id: id.into(),
            place_name: text.clone(),
            text,
            place_type: Vec::new(),
            bbox: None,
            center: Some(at),
            language: None,
            geometry: Some(Geometry::point(at)),
            properties: Value::Null,
        }
    }

    pub fn with_place_name(mut self, place_name: impl Into<String>) -> Self {
        self.place_name = place_name.into();
        self
    }

    pub fn with_place_type(mut self, place_type: impl Into<String>) -> Self {
        self.place_type.push(place_type.into());
        self
    }

    pub fn with_bbox(mut self, bbox: Bbox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// `center` if present, else the point geometry.
    pub fn location(&self) -> Option<LngLat> {
        self.center
            .or_else(|| self.geometry.as_ref().and_then(Geometry::as_point))
    }

    /// `properties.short_code`, lowercased (e.g. `"us"`).
    pub fn short_code(&self) -> Option<String> {
        self.properties
            .get("short_code")
            .and_then(Value::as_str)
            .map(str::to_ascii_lowercase)
    }
}

fn string_or_number<'de, D>(de: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(de)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "feature id must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_carmen_feature() {
        let raw = r#"{
            "type": "Feature",
            "id": "place.123",
            "text": "Austin",
            "place_name": "Austin, Texas, United States",
            "place_type": ["place"],
            "bbox": [-98.0, 30.0, -97.5, 30.5],
            "center": [-97.74, 30.27],
            "geometry": {"type": "Point", "coordinates": [-97.74, 30.27]},
            "properties": {"short_code": "US-TX"}
        }"#;
        let f: Feature = serde_json::from_str(raw).unwrap();
        assert_eq!(f.id, "place.123");
        assert_eq!(f.bbox.unwrap().to_array(), [-98.0, 30.0, -97.5, 30.5]);
        assert_eq!(f.location(), Some(LngLat::new(-97.74, 30.27)));
        assert_eq!(f.short_code().as_deref(), Some("us-tx"));
    }

    #[test]
    fn numeric_ids_become_strings() {
        let raw = r#"{"id": 42, "text": "x", "place_name": "x"}"#;
        let f: Feature = serde_json::from_str(raw).unwrap();
        assert_eq!(f.id, "42");
        assert!(f.place_type.is_empty());
        assert!(f.location().is_none());
    }

    #[test]
    fn location_falls_back_to_point_geometry() {
        let mut f = Feature::point("a", "A", LngLat::new(1.0, 2.0));
        f.center = None;
        assert_eq!(f.location(), Some(LngLat::new(1.0, 2.0)));

        f.geometry = Some(Geometry {
            kind: "LineString".into(),
            coordinates: serde_json::json!([[0.0, 0.0], [1.0, 1.0]]),
        });
        assert_eq!(f.location(), None);
    }
}
