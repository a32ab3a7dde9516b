// crates/geocoder-core/src/model/results.rs
use super::feature::Feature;
use serde::{Deserialize, Serialize};

/// The `{ "type": "FeatureCollection", "features": [...] }` envelope.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl From<Vec<Feature>> for FeatureCollection {
    fn from(features: Vec<Feature>) -> Self {
        FeatureCollection { features }
    }
}

/// An autocomplete suggestion; selecting it triggers a second lookup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    #[serde(rename = "placeId", default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

/// What a backend returned for one request.
///
/// The variant is fixed by the adapter method that was invoked, never by
/// inspecting the payload.
#[derive(Clone, Debug, PartialEq)]
pub enum ResultSet {
    Features(Vec<Feature>),
    Suggestions(Vec<Suggestion>),
    Place(Feature),
}

impl ResultSet {
    /// Features carried by this set (empty for suggestions).
    pub fn features(&self) -> &[Feature] {
        match self {
            ResultSet::Features(f) => f,
            ResultSet::Place(p) => std::slice::from_ref(p),
            ResultSet::Suggestions(_) => &[],
        }
    }

    pub fn into_items(self) -> Vec<ResultItem> {
        match self {
            ResultSet::Features(f) => f.into_iter().map(ResultItem::Feature).collect(),
            ResultSet::Place(p) => vec![ResultItem::Feature(p)],
            ResultSet::Suggestions(s) => s.into_iter().map(ResultItem::Suggestion).collect(),
        }
    }
}

/// One row of the dropdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultItem {
    Feature(Feature),
    Suggestion(Suggestion),
}

impl ResultItem {
    pub fn as_feature(&self) -> Option<&Feature> {
        match self {
            ResultItem::Feature(f) => Some(f),
            ResultItem::Suggestion(_) => None,
        }
    }

    /// Text shown for the row when no render hook applies.
    pub fn label(&self) -> &str {
        match self {
            ResultItem::Feature(f) => &f.place_name,
            ResultItem::Suggestion(s) => &s.text,
        }
    }
}
