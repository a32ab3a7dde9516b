// crates/geocoder-core/src/backend/nominatim.rs

//! # Nominatim adapter
//!
//! Forward and reverse geocoding against an OSM Nominatim server using its
//! GeoJSON output. Nominatim has no proximity bias, so `proximity` is not
//! sent; `bbox` becomes a bounded `viewbox`.

use crate::api::{ApiConfig, GeocoderApi};
use crate::error::{GeocoderError, Result};
use crate::model::{Bbox, Feature, FeatureCollection, Geometry, LngLat};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = concat!("geocoder-rs/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct Nominatim {
    client: reqwest::Client,
    base_url: String,
}

impl Nominatim {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()?;
        Ok(Nominatim {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Vec<Feature>> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(%url, ?params, "nominatim request");

        let response = self.client.get(&url).query(params).send().await?;
        if !response.status().is_success() {
            return Err(GeocoderError::api(format!(
                "nominatim responded with {}",
                response.status()
            )));
        }
        let body: Value = response.json().await?;
        parse_response(body)
    }
}

fn common_params(config: &ApiConfig) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("format", "geojson".to_owned()),
        ("addressdetails", "1".to_owned()),
    ];
    if let Some(language) = &config.language {
        params.push(("accept-language", language.join(",")));
    }
    params
}

/// Query parameters for `/search`.
pub fn search_params(config: &ApiConfig) -> Vec<(&'static str, String)> {
    let mut params = common_params(config);
    params.push(("q", config.query_text().unwrap_or_default().to_owned()));
    if let Some(limit) = config.limit {
        params.push(("limit", limit.to_string()));
    }
    if let Some(countries) = &config.countries {
        params.push(("countrycodes", countries.join(",")));
    }
    if let Some(bbox) = config.bbox {
        let [min_x, min_y, max_x, max_y] = bbox.to_array();
        params.push(("viewbox", format!("{min_x},{min_y},{max_x},{max_y}")));
        params.push(("bounded", "1".to_owned()));
    }
    if let Some(types) = &config.types {
        if let Some(kind) = types.iter().find_map(|t| feature_type_param(t)) {
            params.push(("featureType", kind.to_owned()));
        }
    }
    params
}

/// Query parameters for `/reverse`.
pub fn reverse_params(config: &ApiConfig, at: LngLat) -> Vec<(&'static str, String)> {
    let mut params = common_params(config);
    params.push(("lat", at.lat.to_string()));
    params.push(("lon", at.lng.to_string()));
    let zoom = config
        .types
        .as_ref()
        .and_then(|t| t.first())
        .map_or(18, |t| reverse_zoom(t));
    params.push(("zoom", zoom.to_string()));
    params
}

/// Nominatim's `featureType` covers only the administrative levels.
fn feature_type_param(place_type: &str) -> Option<&'static str> {
    match place_type {
        "country" => Some("country"),
        "region" | "state" => Some("state"),
        "place" | "city" | "locality" => Some("city"),
        "settlement" => Some("settlement"),
        _ => None,
    }
}

/// Detail level of a reverse lookup for a requested place type.
fn reverse_zoom(place_type: &str) -> u8 {
    match place_type {
        "country" => 3,
        "region" | "state" => 5,
        "district" => 8,
        "place" | "city" => 10,
        "locality" | "neighborhood" => 14,
        "postcode" | "street" => 16,
        _ => 18,
    }
}

#[derive(Deserialize)]
struct WireCollection {
    #[serde(default)]
    features: Vec<WireFeature>,
}

#[derive(Deserialize)]
struct WireFeature {
    #[serde(default)]
    properties: Value,
    #[serde(default)]
    bbox: Option<Bbox>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

/// Decode a Nominatim GeoJSON body. `{"error": ...}` (nothing found on
/// reverse) decodes to no features.
pub fn parse_response(body: Value) -> Result<Vec<Feature>> {
    if let Some(message) = body.get("error") {
        tracing::debug!(%message, "nominatim returned no match");
        return Ok(Vec::new());
    }
    let collection: WireCollection = serde_json::from_value(body)?;
    Ok(collection.features.into_iter().map(into_feature).collect())
}

fn into_feature(wire: WireFeature) -> Feature {
    let props = &wire.properties;
    let str_prop = |key: &str| props.get(key).and_then(Value::as_str);

    let place_name = str_prop("display_name").unwrap_or_default().to_owned();
    let text = str_prop("name")
        .filter(|n| !n.is_empty())
        .or_else(|| place_name.split(',').next())
        .unwrap_or_default()
        .trim()
        .to_owned();
    let id = match (str_prop("osm_type"), props.get("osm_id")) {
        (Some(kind), Some(osm_id)) => format!("{kind}/{osm_id}"),
        _ => props
            .get("place_id")
            .map(|v| v.to_string())
            .unwrap_or_else(|| place_name.clone()),
    };
    let place_type: Vec<String> = str_prop("addresstype")
        .or_else(|| str_prop("type"))
        .map(|t| vec![t.to_owned()])
        .unwrap_or_default();

    let mut properties = props.clone();
    let is_country = place_type.iter().any(|t| t == "country");
    let country_code = props
        .get("address")
        .and_then(|a| a.get("country_code"))
        .and_then(Value::as_str);
    if let (true, Some(code), Some(map)) = (is_country, country_code, properties.as_object_mut()) {
        map.insert("short_code".to_owned(), json!(code));
    }

    let center = wire.geometry.as_ref().and_then(Geometry::as_point);
    Feature {
        id,
        text,
        place_name,
        place_type,
        bbox: wire.bbox,
        center,
        language: None,
        geometry: wire.geometry,
        properties,
    }
}

#[async_trait(?Send)]
impl GeocoderApi for Nominatim {
    async fn forward_geocode(&self, config: &ApiConfig) -> Result<FeatureCollection> {
        let features = self.fetch("search", &search_params(config)).await?;
        Ok(features.into())
    }

    async fn reverse_geocode(&self, config: &ApiConfig) -> Result<FeatureCollection> {
        let at = config.query_position().ok_or_else(|| {
            GeocoderError::InvalidCoordinates("reverse lookup without a position".to_owned())
        })?;
        let features = self.fetch("reverse", &reverse_params(config, at)).await?;
        Ok(features.into())
    }

    fn supports_reverse(&self) -> bool {
        true
    }
}
