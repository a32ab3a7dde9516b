// crates/geocoder-core/src/local.rs

//! # Local gazetteer
//!
//! [`LocalIndex`] is a small in-memory feature list that plugs in as the
//! control's `local_geocoder`. Matching is accent- and case-insensitive on
//! `text` and `place_name`; hits rank exact before prefix before substring,
//! ties keep file order.

use crate::error::Result;
use crate::hooks::LocalGeocoder;
use crate::model::{Feature, FeatureCollection};
use crate::text::fold_key;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

struct Entry {
    text: String,
    place_name: String,
    feature: Feature,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Exact,
    Prefix,
    Contains,
}

#[derive(Default)]
pub struct LocalIndex {
    entries: Vec<Entry>,
    limit: Option<usize>,
}

impl LocalIndex {
    pub fn new(features: impl IntoIterator<Item = Feature>) -> Self {
        let entries = features
            .into_iter()
            .map(|feature| Entry {
                text: fold_key(&feature.text),
                place_name: fold_key(&feature.place_name),
                feature,
            })
            .collect();
        LocalIndex {
            entries,
            limit: None,
        }
    }

    /// Cap the number of hits returned per search.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Read a GeoJSON `FeatureCollection`.
    pub fn from_geojson_reader(reader: impl Read) -> Result<Self> {
        let collection: FeatureCollection = serde_json::from_reader(reader)?;
        Ok(Self::new(collection.features))
    }

    /// Load a `.geojson` file; `.gz` files are decompressed when the
    /// `compact` feature is enabled.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let index = if is_gzip(path) {
            #[cfg(feature = "compact")]
            {
                Self::from_geojson_reader(GzDecoder::new(reader))?
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(crate::GeocoderError::Unsupported("gzip gazetteer"));
            }
        } else {
            Self::from_geojson_reader(reader)?
        };
        tracing::debug!(path = %path.display(), features = index.len(), "loaded local gazetteer");
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, query: &str) -> Vec<Feature> {
        let q = fold_key(query.trim());
        if q.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(Rank, usize)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| rank(e, &q).map(|r| (r, i)))
            .collect();
        hits.sort();

        let take = self.limit.unwrap_or(usize::MAX);
        hits.into_iter()
            .take(take)
            .map(|(_, i)| self.entries[i].feature.clone())
            .collect()
    }
}

fn rank(entry: &Entry, q: &str) -> Option<Rank> {
    if entry.text == q || entry.place_name == q {
        Some(Rank::Exact)
    } else if entry.text.starts_with(q) || entry.place_name.starts_with(q) {
        Some(Rank::Prefix)
    } else if entry.text.contains(q) || entry.place_name.contains(q) {
        Some(Rank::Contains)
    } else {
        None
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

impl LocalGeocoder for LocalIndex {
    fn search(&self, query: &str) -> Vec<Feature> {
        self.find(query)
    }
}

impl std::fmt::Debug for LocalIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalIndex")
            .field("features", &self.entries.len())
            .field("limit", &self.limit)
            .finish()
    }
}
