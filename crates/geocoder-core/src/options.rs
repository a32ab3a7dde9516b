// crates/geocoder-core/src/options.rs

//! # Control Options
//!
//! Plain-data configuration of a [`Geocoder`](crate::Geocoder). Everything
//! here is `serde`-deserializable with the camelCase keys the JavaScript
//! control accepts, so the same options object can come from a JSON file
//! (CLI) or a JS object (WASM). Function-valued options live in
//! [`Hooks`](crate::hooks::Hooks).

use crate::model::{Bbox, Proximity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A `bool | T` option: `false` disables, `true` uses `T::default()`,
/// an object customizes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Toggle<T> {
    Flag(bool),
    Custom(T),
}

impl<T: Clone + Default> Toggle<T> {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Toggle::Flag(false))
    }

    /// The effective settings, or `None` when disabled.
    pub fn resolve(&self) -> Option<T> {
        match self {
            Toggle::Flag(false) => None,
            Toggle::Flag(true) => Some(T::default()),
            Toggle::Custom(t) => Some(t.clone()),
        }
    }
}

impl<T> From<bool> for Toggle<T> {
    fn from(b: bool) -> Self {
        Toggle::Flag(b)
    }
}

/// Animation parameters handed to the map host for `flyTo` / `fitBounds`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<f64>,
    /// Milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub essential: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    pub draggable: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PopupOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_button: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

/// How a reverse geocoder orders nearby results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReverseMode {
    Distance,
    Score,
}

pub const DEFAULT_ZOOM: f64 = 16.0;
pub const DEFAULT_MIN_LENGTH: usize = 2;
pub const DEFAULT_LIMIT: usize = 5;
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;
pub const DEFAULT_PROXIMITY_MIN_ZOOM: f64 = 9.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControlOptions {
    /// Zoom used when the selected feature has no bbox.
    pub zoom: f64,
    pub fly_to: Toggle<CameraOptions>,
    /// Follow the map center (above `proximity_min_zoom`) on move end.
    pub track_proximity: bool,
    /// `false`: search only on Enter.
    pub show_results_while_typing: bool,
    pub min_length: usize,
    /// Interpret `lat, lon` input as a reverse geocode.
    pub reverse_geocode: bool,
    pub limit: usize,
    pub marker: Toggle<MarkerOptions>,
    pub popup: Toggle<PopupOptions>,
    pub show_result_markers: Toggle<MarkerOptions>,
    pub collapsed: bool,
    pub clear_and_blur_on_esc: bool,
    pub clear_on_blur: bool,
    pub local_geocoder_only: bool,
    /// Debounce delay in milliseconds.
    pub debounce_search: u64,
    pub language: Option<String>,
    pub placeholder: Option<String>,
    pub proximity: Option<Proximity>,
    /// Comma separated.
    pub types: Option<String>,
    /// Comma separated ISO country codes.
    pub countries: Option<String>,
    pub bbox: Option<Bbox>,
    pub reverse_mode: Option<ReverseMode>,
    pub proximity_min_zoom: f64,
    /// Drop responses that resolve after a newer request was issued.
    pub discard_stale_responses: bool,
}

impl Default for ControlOptions {
    fn default() -> Self {
        ControlOptions {
            zoom: DEFAULT_ZOOM,
            fly_to: Toggle::Flag(true),
            track_proximity: true,
            show_results_while_typing: false,
            min_length: DEFAULT_MIN_LENGTH,
            reverse_geocode: false,
            limit: DEFAULT_LIMIT,
            marker: Toggle::Flag(true),
            popup: Toggle::Flag(false),
            show_result_markers: Toggle::Flag(true),
            collapsed: false,
            clear_and_blur_on_esc: false,
            clear_on_blur: false,
            local_geocoder_only: false,
            debounce_search: DEFAULT_DEBOUNCE_MS,
            language: None,
            placeholder: None,
            proximity: None,
            types: None,
            countries: None,
            bbox: None,
            reverse_mode: None,
            proximity_min_zoom: DEFAULT_PROXIMITY_MIN_ZOOM,
            discard_stale_responses: true,
        }
    }
}

impl ControlOptions {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_search)
    }

    /// Parse a JSON options object; missing keys take their defaults.
    pub fn from_json(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
