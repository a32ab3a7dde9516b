// crates/geocoder-core/src/api.rs

//! # Geocoding API adapter
//!
//! [`GeocoderApi`] is the seam to the caller-supplied backend. Only
//! `forward_geocode` is mandatory; the optional operations advertise
//! themselves through the `supports_*` probes, which the orchestrator
//! consults before routing a request.

use crate::error::{GeocoderError, Result};
use crate::model::{Bbox, Feature, FeatureCollection, LngLat, ResultSet, Suggestion};
use crate::options::ReverseMode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Search text, or a `[lng, lat]` position for reverse lookups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiQuery {
    Text(String),
    Coordinates(LngLat),
}

/// Per-request parameters, built fresh from the control options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<ApiQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Bbox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity: Option<LngLat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse_mode: Option<ReverseMode>,
}

impl ApiConfig {
    pub fn query_text(&self) -> Option<&str> {
        match &self.query {
            Some(ApiQuery::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn query_position(&self) -> Option<LngLat> {
        match &self.query {
            Some(ApiQuery::Coordinates(p)) => Some(*p),
            _ => None,
        }
    }
}

/// A geocoding backend.
///
/// Futures are not required to be `Send`: the control runs on a single
/// UI thread and browser-backed adapters hold `JsValue`s.
#[async_trait(?Send)]
pub trait GeocoderApi {
    /// Text query to features.
    async fn forward_geocode(&self, config: &ApiConfig) -> Result<FeatureCollection>;

    /// Position to nearby features.
    async fn reverse_geocode(&self, _config: &ApiConfig) -> Result<FeatureCollection> {
        Err(GeocoderError::Unsupported("reverseGeocode"))
    }

    /// Autocomplete suggestions for partial text.
    async fn get_suggestions(&self, _config: &ApiConfig) -> Result<Vec<Suggestion>> {
        Err(GeocoderError::Unsupported("getSuggestions"))
    }

    /// Resolve a suggestion's place id; the id travels as the text query.
    async fn search_by_place_id(&self, _config: &ApiConfig) -> Result<Feature> {
        Err(GeocoderError::Unsupported("searchByPlaceId"))
    }

    fn supports_reverse(&self) -> bool {
        false
    }

    fn supports_suggestions(&self) -> bool {
        false
    }

    fn supports_place_lookup(&self) -> bool {
        false
    }
}

/// Which adapter operation a request goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    Forward,
    Reverse,
    Suggestions,
    PlaceLookup,
}

/// Invoke the adapter and tag the response by the operation used.
pub async fn dispatch(
    api: &dyn GeocoderApi,
    request: Request,
    config: &ApiConfig,
) -> Result<ResultSet> {
    tracing::debug!(?request, "dispatching geocoder request");
    match request {
        Request::Forward => Ok(ResultSet::Features(api.forward_geocode(config).await?.features)),
        Request::Reverse => Ok(ResultSet::Features(api.reverse_geocode(config).await?.features)),
        Request::Suggestions => Ok(ResultSet::Suggestions(api.get_suggestions(config).await?)),
        Request::PlaceLookup => Ok(ResultSet::Place(api.search_by_place_id(config).await?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ForwardOnly;

    #[async_trait(?Send)]
    impl GeocoderApi for ForwardOnly {
        async fn forward_geocode(&self, config: &ApiConfig) -> Result<FeatureCollection> {
            let text = config.query_text().unwrap_or_default();
            Ok(vec![Feature::point("1", text, LngLat::new(0.0, 0.0))].into())
        }
    }

    #[test]
    fn config_serializes_camel_case_without_empty_keys() {
        let config = ApiConfig {
            query: Some(ApiQuery::Coordinates(LngLat::new(1.0, 2.0))),
            reverse_mode: Some(ReverseMode::Distance),
            limit: Some(1),
            ..ApiConfig::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"query": [1.0, 2.0], "limit": 1, "reverseMode": "distance"})
        );
    }

    #[test]
    fn dispatch_tags_by_operation() {
        let config = ApiConfig {
            query: Some(ApiQuery::Text("Berlin".into())),
            ..ApiConfig::default()
        };
        let set = futures::executor::block_on(dispatch(&ForwardOnly, Request::Forward, &config))
            .unwrap();
        assert_eq!(set.features()[0].text, "Berlin");

        let err = futures::executor::block_on(dispatch(&ForwardOnly, Request::Reverse, &config))
            .unwrap_err();
        assert!(matches!(err, GeocoderError::Unsupported("reverseGeocode")));
        assert!(!ForwardOnly.supports_suggestions());
    }
}
