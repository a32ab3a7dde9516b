// crates/geocoder-wasm/src/bindings.rs

//! Structural bindings to the JavaScript objects the control talks to:
//! a MapLibre map, the `maplibregl.Marker` / `maplibregl.Popup` classes and
//! a caller-supplied geocoding adapter.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Anything shaped like `maplibregl.Map`.
    pub type MapLike;

    #[wasm_bindgen(method, js_name = getZoom)]
    pub fn get_zoom(this: &MapLike) -> f64;

    #[wasm_bindgen(method, js_name = getCenter)]
    pub fn get_center(this: &MapLike) -> JsLngLat;

    #[wasm_bindgen(method, js_name = flyTo)]
    pub fn fly_to(this: &MapLike, options: &JsValue);

    #[wasm_bindgen(method, js_name = fitBounds)]
    pub fn fit_bounds(this: &MapLike, bounds: &JsValue, options: &JsValue);

    #[wasm_bindgen(method)]
    pub fn on(this: &MapLike, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method)]
    pub fn off(this: &MapLike, event: &str, listener: &js_sys::Function);

    pub type JsLngLat;

    #[wasm_bindgen(method, getter)]
    pub fn lng(this: &JsLngLat) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn lat(this: &JsLngLat) -> f64;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = maplibregl)]
    pub type Marker;

    #[wasm_bindgen(constructor, js_namespace = maplibregl)]
    pub fn new(options: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = setLngLat)]
    pub fn set_lng_lat(this: &Marker, at: &JsValue) -> Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Marker, map: &MapLike) -> Marker;

    #[wasm_bindgen(method, js_name = setPopup)]
    pub fn set_popup(this: &Marker, popup: &Popup) -> Marker;

    #[wasm_bindgen(method, js_name = getElement)]
    pub fn get_element(this: &Marker) -> web_sys::HtmlElement;

    #[wasm_bindgen(method)]
    pub fn remove(this: &Marker);
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = maplibregl)]
    pub type Popup;

    #[wasm_bindgen(constructor, js_namespace = maplibregl)]
    pub fn new(options: &JsValue) -> Popup;

    #[wasm_bindgen(method, js_name = setHTML)]
    pub fn set_html(this: &Popup, html: &str) -> Popup;
}

#[wasm_bindgen]
extern "C" {
    /// The `geocoderApi` object passed to the constructor. Each method may
    /// return a value or a Promise of one.
    pub type JsApi;

    #[wasm_bindgen(method, catch, js_name = forwardGeocode)]
    pub fn forward_geocode(this: &JsApi, config: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = reverseGeocode)]
    pub fn reverse_geocode(this: &JsApi, config: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getSuggestions)]
    pub fn get_suggestions(this: &JsApi, config: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = searchByPlaceId)]
    pub fn search_by_place_id(this: &JsApi, config: &JsValue) -> Result<JsValue, JsValue>;
}
