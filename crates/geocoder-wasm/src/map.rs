// crates/geocoder-wasm/src/map.rs

//! [`MapHost`] over a live `maplibregl.Map`.

use crate::adapter::{bounds_to_js, to_js};
use crate::bindings::{MapLike, Marker, Popup};
use geocoder_core::{
    Bbox, CameraOptions, LngLat, MapHost, MarkerId, MarkerOptions, PopupOptions,
};
use js_sys::{Array, Object};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type MarkerClick = Rc<dyn Fn(MarkerId)>;

pub struct JsMapHost {
    map: MapLike,
    markers: RefCell<HashMap<MarkerId, (Marker, Option<Closure<dyn FnMut()>>)>>,
    next_marker: Cell<u64>,
    on_marker_click: RefCell<Option<MarkerClick>>,
}

impl JsMapHost {
    pub fn new(map: JsValue) -> Self {
        JsMapHost {
            map: map.unchecked_into(),
            markers: RefCell::new(HashMap::new()),
            next_marker: Cell::new(1),
            on_marker_click: RefCell::new(None),
        }
    }

    pub fn map(&self) -> &MapLike {
        &self.map
    }

    /// Markers created after this call report clicks to `handler`.
    pub fn set_marker_click_handler(&self, handler: Option<MarkerClick>) {
        *self.on_marker_click.borrow_mut() = handler;
    }
}

fn position(at: LngLat) -> JsValue {
    Array::of2(&at.lng.into(), &at.lat.into()).into()
}

fn options_or_empty<T: serde::Serialize>(options: &T) -> JsValue {
    to_js(options).unwrap_or_else(|_| Object::new().into())
}

impl MapHost for JsMapHost {
    fn zoom(&self) -> f64 {
        self.map.get_zoom()
    }

    fn center(&self) -> LngLat {
        let c = self.map.get_center();
        LngLat::new(c.lng(), c.lat())
    }

    fn fly_to(&self, center: LngLat, options: &CameraOptions) {
        let opts = options_or_empty(options);
        let _ = js_sys::Reflect::set(&opts, &"center".into(), &position(center));
        self.map.fly_to(&opts);
    }

    fn fit_bounds(&self, bounds: Bbox, options: &CameraOptions) {
        self.map
            .fit_bounds(&bounds_to_js(bounds), &options_or_empty(options));
    }

    fn add_marker(&self, at: LngLat, options: &MarkerOptions) -> MarkerId {
        let id = MarkerId(self.next_marker.get());
        self.next_marker.set(id.0 + 1);

        let marker = Marker::new(&options_or_empty(options));
        marker.set_lng_lat(&position(at));
        marker.add_to(&self.map);

        let handler = self.on_marker_click.borrow().clone();
        let click = handler.map(|handler| {
            // Deferred: the handler may remove this marker and drop the closure.
            let click = Closure::<dyn FnMut()>::new(move || {
                let handler = handler.clone();
                wasm_bindgen_futures::spawn_local(async move { handler(id) });
            });
            let _ = marker
                .get_element()
                .add_event_listener_with_callback("click", click.as_ref().unchecked_ref());
            click
        });
        self.markers.borrow_mut().insert(id, (marker, click));
        id
    }

    fn remove_marker(&self, marker: MarkerId) {
        let removed = self.markers.borrow_mut().remove(&marker);
        if let Some((marker, _click)) = removed {
            marker.remove();
        }
    }

    fn attach_popup(&self, marker: MarkerId, html: &str, options: &PopupOptions) {
        let markers = self.markers.borrow();
        if let Some((marker, _)) = markers.get(&marker) {
            let popup = Popup::new(&options_or_empty(options));
            popup.set_html(html);
            marker.set_popup(&popup);
        }
    }
}
