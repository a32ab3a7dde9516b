//! geocoder-wasm — MapLibre GL geocoder control for the browser
//!
//! Wraps the headless `geocoder-core` control in a `maplibregl.IControl`:
//! it builds the search box markup, forwards DOM events, drives the map
//! through `maplibregl.Map` / `Marker` / `Popup`, and calls a JavaScript
//! geocoding adapter.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { MaplibreGeocoder } from 'geocoder-wasm';
//!
//! await init();
//! const geocoderApi = {
//!   forwardGeocode: async (config) => {
//!     const url = `https://nominatim.openstreetmap.org/search?q=${config.query}&format=geojson`;
//!     return (await fetch(url)).json();
//!   },
//! };
//! const geocoder = new MaplibreGeocoder(geocoderApi, { limit: 3, showResultsWhileTyping: true });
//! map.addControl(geocoder);
//! geocoder.on('result', (e) => console.log(e.result.place_name));
//! ```
//!
//! Notes
//! -----
//! - Options are the camelCase names of `ControlOptions`; `render`,
//!   `popupRender`, `getItemValue`, `filter`, `localGeocoder` and
//!   `externalGeocoder` may be functions.
//! - Adapter methods may return values or Promises. `reverseGeocode`,
//!   `getSuggestions` and `searchByPlaceId` are optional.
//! - `maplibregl` must be a global for markers and popups.

mod adapter;
mod bindings;
mod dom;
mod map;

use adapter::{event_payload, from_js, hooks_from_options, method, to_js, JsGeocoderApi};
use dom::{DomListeners, DomView};
use geocoder_core::{
    Bbox, CameraOptions, Container, ControlOptions, EventKind, Geocoder, GeocoderError,
    ListenerId, MarkerId, Proximity, Toggle,
};
use js_sys::{Function, Object, Promise};
use map::JsMapHost;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

fn js_error(e: GeocoderError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

fn event_kind(name: &str) -> Result<EventKind, JsValue> {
    EventKind::parse(name).ok_or_else(|| JsValue::from_str(&format!("unknown event type {name:?}")))
}

/* --------------------------------------------------------------------------
   Control
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub struct MaplibreGeocoder {
    geocoder: Geocoder,
    view: Rc<DomView>,
    api: RefCell<JsValue>,
    map: RefCell<Option<Rc<JsMapHost>>>,
    move_end: RefCell<Option<Closure<dyn FnMut()>>>,
    listeners: RefCell<Vec<(EventKind, Function, ListenerId)>>,
    render: RefCell<Option<Function>>,
    filter: RefCell<Option<Function>>,
    _dom: DomListeners,
}

#[wasm_bindgen]
impl MaplibreGeocoder {
    #[wasm_bindgen(constructor)]
    pub fn new(geocoder_api: JsValue, options: JsValue) -> Result<MaplibreGeocoder, JsValue> {
        let api = JsGeocoderApi::new(geocoder_api.clone())?;
        let (control_options, hooks) = if options.is_object() {
            (from_js(options.clone())?, hooks_from_options(&options))
        } else {
            (ControlOptions::default(), Default::default())
        };
        let view = Rc::new(DomView::new()?);
        let geocoder = Geocoder::builder(Rc::new(api))
            .options(control_options)
            .hooks(hooks)
            .view(view.clone())
            .build();
        let dom = DomListeners::bind(&view, &geocoder)?;

        Ok(MaplibreGeocoder {
            geocoder,
            view,
            api: RefCell::new(geocoder_api),
            map: RefCell::new(None),
            move_end: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            render: RefCell::new(method(&options, "render")),
            filter: RefCell::new(method(&options, "filter")),
            _dom: dom,
        })
    }

    /// `IControl.onAdd`: returns the element the map places in its corner.
    #[wasm_bindgen(js_name = onAdd)]
    pub fn on_add(&self, map: JsValue) -> Result<web_sys::HtmlElement, JsValue> {
        let host = Rc::new(JsMapHost::new(map));
        let g = self.geocoder.clone();
        host.set_marker_click_handler(Some(Rc::new(move |marker: MarkerId| {
            g.on_result_marker_click(marker);
        })));
        self.geocoder.on_add(host.clone()).map_err(js_error)?;

        let g = self.geocoder.clone();
        let move_end = Closure::<dyn FnMut()>::new(move || g.update_proximity());
        host.map().on("moveend", move_end.as_ref().unchecked_ref());
        *self.move_end.borrow_mut() = Some(move_end);
        *self.map.borrow_mut() = Some(host);

        Ok(self.view.root().clone())
    }

    /// `IControl.onRemove`.
    #[wasm_bindgen(js_name = onRemove)]
    pub fn on_remove(&self) {
        let host = self.map.borrow_mut().take();
        let move_end = self.move_end.borrow_mut().take();
        if let Some(host) = &host {
            if let Some(move_end) = &move_end {
                host.map().off("moveend", move_end.as_ref().unchecked_ref());
            }
            host.set_marker_click_handler(None);
        }
        self.geocoder.on_remove();
    }

    /// Attach to a CSS selector, or to a map object (placed top right).
    #[wasm_bindgen(js_name = addTo)]
    pub fn add_to(&self, container: JsValue) -> Result<(), JsValue> {
        if let Some(selector) = container.as_string() {
            return self
                .geocoder
                .add_to(Container::Selector(&selector))
                .map_err(js_error);
        }
        let Some(get_container) = method(&container, "getContainer") else {
            return Err(JsValue::from_str("addTo expects a selector or a map"));
        };
        let root = self.on_add(container.clone())?;
        let corner = get_container
            .call0(&container)?
            .dyn_into::<web_sys::Element>()?
            .query_selector(".maplibregl-ctrl-top-right")?;
        if let Some(corner) = corner {
            corner.append_child(&root)?;
        }
        Ok(())
    }

    /* ----------------------------------------------------------------------
       Queries
    ---------------------------------------------------------------------- */

    /// Search for `text` and select the first result. Resolves to the
    /// selected feature, or `undefined`.
    pub fn query(&self, text: String) -> Promise {
        let g = self.geocoder.clone();
        future_to_promise(async move {
            match g.query(&text).await {
                Some(feature) => to_js(&feature),
                None => Ok(JsValue::UNDEFINED),
            }
        })
    }

    /// Put `text` in the box and search without selecting.
    #[wasm_bindgen(js_name = setInput)]
    pub fn set_input(&self, text: String) -> Promise {
        let g = self.geocoder.clone();
        future_to_promise(async move {
            g.set_input(&text).await;
            Ok(JsValue::UNDEFINED)
        })
    }

    pub fn clear(&self) {
        self.geocoder.clear();
    }

    /* ----------------------------------------------------------------------
       Events
    ---------------------------------------------------------------------- */

    pub fn on(&self, kind: &str, listener: Function) -> Result<(), JsValue> {
        let kind = event_kind(kind)?;
        let f = listener.clone();
        let id = self.geocoder.on(kind, move |event| {
            if let Err(e) = f.call1(&JsValue::NULL, &event_payload(event)) {
                web_sys::console::error_1(&e);
            }
        });
        self.listeners.borrow_mut().push((kind, listener, id));
        Ok(())
    }

    pub fn off(&self, kind: &str, listener: &Function) -> Result<(), JsValue> {
        let kind = event_kind(kind)?;
        let found = {
            let mut listeners = self.listeners.borrow_mut();
            let pos = listeners
                .iter()
                .position(|(k, f, _)| *k == kind && Object::is(f, listener));
            pos.map(|i| listeners.remove(i).2)
        };
        if let Some(id) = found {
            self.geocoder.off(kind, id);
        }
        Ok(())
    }

    /// Resolves with the payload of the next `kind` event.
    pub fn once(&self, kind: &str) -> Result<Promise, JsValue> {
        let next = self.geocoder.once(event_kind(kind)?);
        Ok(future_to_promise(async move {
            Ok(next
                .await
                .map(|event| event_payload(&event))
                .unwrap_or(JsValue::UNDEFINED))
        }))
    }

    /* ----------------------------------------------------------------------
       Accessors
    ---------------------------------------------------------------------- */

    #[wasm_bindgen(js_name = getProximity)]
    pub fn proximity(&self) -> Result<JsValue, JsValue> {
        to_js(&self.geocoder.proximity())
    }

    #[wasm_bindgen(js_name = setProximity)]
    pub fn set_proximity(&self, proximity: JsValue) -> Result<(), JsValue> {
        let proximity: Option<Proximity> = from_js(proximity)?;
        self.geocoder.set_proximity(proximity);
        Ok(())
    }

    #[wasm_bindgen(js_name = getRenderFunction)]
    pub fn render_function(&self) -> Option<Function> {
        self.render.borrow().clone()
    }

    #[wasm_bindgen(js_name = setRenderFunction)]
    pub fn set_render_function(&self, render: Option<Function>) {
        self.geocoder
            .set_render_function(render.clone().map(adapter::render_fn));
        *self.render.borrow_mut() = render;
    }

    #[wasm_bindgen(js_name = getLanguage)]
    pub fn language(&self) -> Option<String> {
        self.geocoder.language()
    }

    #[wasm_bindgen(js_name = setLanguage)]
    pub fn set_language(&self, language: Option<String>) {
        self.geocoder.set_language(language);
    }

    #[wasm_bindgen(js_name = getZoom)]
    pub fn zoom(&self) -> f64 {
        self.geocoder.zoom()
    }

    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&self, zoom: f64) {
        self.geocoder.set_zoom(zoom);
    }

    #[wasm_bindgen(js_name = getFlyTo)]
    pub fn fly_to(&self) -> Result<JsValue, JsValue> {
        to_js(&self.geocoder.fly_to())
    }

    /// `true`, `false` or camera options.
    #[wasm_bindgen(js_name = setFlyTo)]
    pub fn set_fly_to(&self, fly_to: JsValue) -> Result<(), JsValue> {
        let fly_to: Toggle<CameraOptions> = from_js(fly_to)?;
        self.geocoder.set_fly_to(fly_to);
        Ok(())
    }

    #[wasm_bindgen(js_name = getPlaceholder)]
    pub fn placeholder(&self) -> String {
        self.geocoder.placeholder()
    }

    #[wasm_bindgen(js_name = setPlaceholder)]
    pub fn set_placeholder(&self, placeholder: Option<String>) {
        self.geocoder.set_placeholder(placeholder);
    }

    #[wasm_bindgen(js_name = getBbox)]
    pub fn bbox(&self) -> Result<JsValue, JsValue> {
        to_js(&self.geocoder.bbox())
    }

    #[wasm_bindgen(js_name = setBbox)]
    pub fn set_bbox(&self, bbox: JsValue) -> Result<(), JsValue> {
        let bbox: Option<Bbox> = from_js(bbox)?;
        self.geocoder.set_bbox(bbox);
        Ok(())
    }

    #[wasm_bindgen(js_name = getCountries)]
    pub fn countries(&self) -> Option<String> {
        self.geocoder.countries()
    }

    #[wasm_bindgen(js_name = setCountries)]
    pub fn set_countries(&self, countries: Option<String>) {
        self.geocoder.set_countries(countries);
    }

    #[wasm_bindgen(js_name = getTypes)]
    pub fn types(&self) -> Option<String> {
        self.geocoder.types()
    }

    #[wasm_bindgen(js_name = setTypes)]
    pub fn set_types(&self, types: Option<String>) {
        self.geocoder.set_types(types);
    }

    #[wasm_bindgen(js_name = getMinLength)]
    pub fn min_length(&self) -> usize {
        self.geocoder.min_length()
    }

    #[wasm_bindgen(js_name = setMinLength)]
    pub fn set_min_length(&self, min_length: usize) {
        self.geocoder.set_min_length(min_length);
    }

    #[wasm_bindgen(js_name = getLimit)]
    pub fn limit(&self) -> usize {
        self.geocoder.limit()
    }

    #[wasm_bindgen(js_name = setLimit)]
    pub fn set_limit(&self, limit: usize) {
        self.geocoder.set_limit(limit);
    }

    #[wasm_bindgen(js_name = getFilter)]
    pub fn filter(&self) -> Option<Function> {
        self.filter.borrow().clone()
    }

    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&self, filter: Option<Function>) {
        self.geocoder
            .set_filter(filter.clone().map(adapter::filter_fn));
        *self.filter.borrow_mut() = filter;
    }

    #[wasm_bindgen(js_name = getGeocoderApi)]
    pub fn geocoder_api(&self) -> JsValue {
        self.api.borrow().clone()
    }

    #[wasm_bindgen(js_name = setGeocoderApi)]
    pub fn set_geocoder_api(&self, geocoder_api: JsValue) -> Result<(), JsValue> {
        let api = JsGeocoderApi::new(geocoder_api.clone())?;
        self.geocoder.set_geocoder_api(Rc::new(api));
        *self.api.borrow_mut() = geocoder_api;
        Ok(())
    }
}
