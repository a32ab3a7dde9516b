// crates/geocoder-wasm/src/adapter.rs

//! JavaScript-supplied adapters: the geocoding API object and the
//! function-valued options (`render`, `filter`, `localGeocoder`, ...).

use crate::bindings::JsApi;
use async_trait::async_trait;
use geocoder_core::hooks::{FilterFn, Hooks, ItemValueFn, RenderFn};
use geocoder_core::{
    ApiConfig, Bbox, ExternalGeocoder, Feature, FeatureCollection, GeocoderApi, GeocoderError,
    GeocoderEvent, LocalGeocoder, Markup, ResultItem, Suggestion,
};
use js_sys::{Array, Function, Promise, Reflect};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

// -----------------------------------------------------------------------------
// CONVERSIONS
// -----------------------------------------------------------------------------

/// Serialize to plain JS objects (not `Map`s).
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(Into::into)
}

pub fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(Into::into)
}

/// Render a thrown JS value as text.
pub fn js_error_text(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn api_error(err: JsValue) -> GeocoderError {
    GeocoderError::api(js_error_text(&err))
}

/// Await `value` if it is a thenable, else take it as is.
async fn settle(value: JsValue) -> Result<JsValue, JsValue> {
    JsFuture::from(Promise::resolve(&value)).await
}

/// `obj[name]` when it is a function.
pub fn method(obj: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(obj, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
}

// -----------------------------------------------------------------------------
// GEOCODER API
// -----------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum SuggestionsReply {
    Wrapped { suggestions: Vec<Suggestion> },
    Bare(Vec<Suggestion>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlaceReply {
    Wrapped { place: Feature },
    Bare(Feature),
}

/// A [`GeocoderApi`] backed by a JS object with `forwardGeocode` and
/// optionally `reverseGeocode`, `getSuggestions` and `searchByPlaceId`.
pub struct JsGeocoderApi {
    api: JsApi,
}

impl JsGeocoderApi {
    pub fn new(api: JsValue) -> Result<Self, JsValue> {
        if method(&api, "forwardGeocode").is_none() {
            return Err(JsValue::from_str("geocoderApi.forwardGeocode is required"));
        }
        Ok(JsGeocoderApi {
            api: api.unchecked_into(),
        })
    }

    pub fn as_js(&self) -> &JsValue {
        self.api.as_ref()
    }

    fn has(&self, name: &str) -> bool {
        method(self.api.as_ref(), name).is_some()
    }

    async fn call<T: DeserializeOwned>(
        &self,
        config: &ApiConfig,
        invoke: impl FnOnce(&JsApi, &JsValue) -> Result<JsValue, JsValue>,
    ) -> geocoder_core::Result<T> {
        let config = to_js(config).map_err(api_error)?;
        let pending = invoke(&self.api, &config).map_err(api_error)?;
        let reply = settle(pending).await.map_err(api_error)?;
        from_js(reply).map_err(api_error)
    }
}

#[async_trait(?Send)]
impl GeocoderApi for JsGeocoderApi {
    async fn forward_geocode(&self, config: &ApiConfig) -> geocoder_core::Result<FeatureCollection> {
        self.call(config, JsApi::forward_geocode).await
    }

    async fn reverse_geocode(&self, config: &ApiConfig) -> geocoder_core::Result<FeatureCollection> {
        if !self.supports_reverse() {
            return Err(GeocoderError::Unsupported("reverseGeocode"));
        }
        self.call(config, JsApi::reverse_geocode).await
    }

    async fn get_suggestions(&self, config: &ApiConfig) -> geocoder_core::Result<Vec<Suggestion>> {
        if !self.supports_suggestions() {
            return Err(GeocoderError::Unsupported("getSuggestions"));
        }
        let reply: SuggestionsReply = self.call(config, JsApi::get_suggestions).await?;
        Ok(match reply {
            SuggestionsReply::Wrapped { suggestions } | SuggestionsReply::Bare(suggestions) => {
                suggestions
            }
        })
    }

    async fn search_by_place_id(&self, config: &ApiConfig) -> geocoder_core::Result<Feature> {
        if !self.supports_place_lookup() {
            return Err(GeocoderError::Unsupported("searchByPlaceId"));
        }
        let reply: PlaceReply = self.call(config, JsApi::search_by_place_id).await?;
        Ok(match reply {
            PlaceReply::Wrapped { place } | PlaceReply::Bare(place) => place,
        })
    }

    fn supports_reverse(&self) -> bool {
        self.has("reverseGeocode")
    }

    fn supports_suggestions(&self) -> bool {
        self.has("getSuggestions")
    }

    fn supports_place_lookup(&self) -> bool {
        self.has("searchByPlaceId")
    }
}

// -----------------------------------------------------------------------------
// HOOKS
// -----------------------------------------------------------------------------

/// Call `f(feature)`; a throw or unconvertible feature yields `None`.
fn call_with_feature(f: &Function, feature: &Feature) -> Option<JsValue> {
    let arg = to_js(feature).ok()?;
    match f.call1(&JsValue::NULL, &arg) {
        Ok(v) => Some(v),
        Err(e) => {
            web_sys::console::warn_1(&e);
            None
        }
    }
}

/// JS `render` / `popupRender` return HTML strings.
pub fn render_fn(f: Function) -> RenderFn {
    Rc::new(move |feature: &Feature| {
        let html = call_with_feature(&f, feature)
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        Markup::html(html)
    })
}

pub fn item_value_fn(f: Function) -> ItemValueFn {
    Rc::new(move |feature: &Feature| {
        call_with_feature(&f, feature)
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| feature.place_name.clone())
    })
}

pub fn filter_fn(f: Function) -> FilterFn {
    Rc::new(move |feature: &Feature| {
        call_with_feature(&f, feature).is_some_and(|v| v.is_truthy())
    })
}

/// `localGeocoder(query) => Feature[]`, synchronous.
pub struct JsLocalGeocoder(pub Function);

impl LocalGeocoder for JsLocalGeocoder {
    fn search(&self, query: &str) -> Vec<Feature> {
        let reply = match self.0.call1(&JsValue::NULL, &JsValue::from_str(query)) {
            Ok(v) => v,
            Err(e) => {
                web_sys::console::warn_1(&e);
                return Vec::new();
            }
        };
        from_js(reply).unwrap_or_default()
    }
}

/// `externalGeocoder(query, features, config) => Promise<Feature[]>`.
pub struct JsExternalGeocoder(pub Function);

#[async_trait(?Send)]
impl ExternalGeocoder for JsExternalGeocoder {
    async fn search(
        &self,
        query: &str,
        features: &[Feature],
        config: &ApiConfig,
    ) -> geocoder_core::Result<Vec<Feature>> {
        let features = to_js(features).map_err(api_error)?;
        let config = to_js(config).map_err(api_error)?;
        let pending = self
            .0
            .call3(&JsValue::NULL, &JsValue::from_str(query), &features, &config)
            .map_err(api_error)?;
        let reply = settle(pending).await.map_err(api_error)?;
        if reply.is_undefined() || reply.is_null() {
            return Ok(Vec::new());
        }
        from_js(reply).map_err(api_error)
    }
}

/// Collect the function-valued options from the constructor's options object.
pub fn hooks_from_options(options: &JsValue) -> Hooks {
    Hooks {
        render: method(options, "render").map(render_fn),
        popup_render: method(options, "popupRender").map(render_fn),
        get_item_value: method(options, "getItemValue").map(item_value_fn),
        filter: method(options, "filter").map(filter_fn),
        local_geocoder: method(options, "localGeocoder")
            .map(|f| Rc::new(JsLocalGeocoder(f)) as Rc<dyn LocalGeocoder>),
        external_geocoder: method(options, "externalGeocoder")
            .map(|f| Rc::new(JsExternalGeocoder(f)) as Rc<dyn ExternalGeocoder>),
    }
}

// -----------------------------------------------------------------------------
// EVENTS
// -----------------------------------------------------------------------------

#[derive(Serialize)]
struct ResultsPayload<'a> {
    query: &'a str,
    config: &'a ApiConfig,
    features: Vec<&'a Feature>,
    suggestions: Vec<&'a Suggestion>,
}

/// The payload a JS listener receives for `event`.
pub fn event_payload(event: &GeocoderEvent) -> JsValue {
    let payload = match event {
        GeocoderEvent::Clear => Ok(JsValue::UNDEFINED),
        GeocoderEvent::Loading { query } => to_js(&serde_json::json!({ "query": query })),
        GeocoderEvent::Results {
            query,
            config,
            results,
        } => to_js(&ResultsPayload {
            query,
            config,
            features: results.iter().filter_map(ResultItem::as_feature).collect(),
            suggestions: results
                .iter()
                .filter_map(|item| match item {
                    ResultItem::Suggestion(s) => Some(s),
                    ResultItem::Feature(_) => None,
                })
                .collect(),
        }),
        GeocoderEvent::Result { result } => to_js(&serde_json::json!({ "result": result })),
        GeocoderEvent::Error { error } => Ok(js_sys::Error::new(&error.to_string()).into()),
    };
    payload.unwrap_or(JsValue::UNDEFINED)
}

/// `[[west, south], [east, north]]`, as `fitBounds` expects.
pub fn bounds_to_js(bbox: Bbox) -> JsValue {
    let [west, south, east, north] = bbox.to_array();
    let corner = |lng: f64, lat: f64| Array::of2(&lng.into(), &lat.into());
    Array::of2(&corner(west, south), &corner(east, north)).into()
}
