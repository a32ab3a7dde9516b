use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

use geocoder_wasm::MaplibreGeocoder;

wasm_bindgen_test_configure!(run_in_browser);

const BERLIN: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "id": "place.berlin",
        "type": "Feature",
        "text": "Berlin",
        "place_name": "Berlin, Germany",
        "place_type": ["place"],
        "center": [13.4, 52.5],
        "geometry": { "type": "Point", "coordinates": [13.4, 52.5] },
        "properties": {}
    }]
}"#;

fn api() -> JsValue {
    let api = Object::new();
    let forward = Function::new_with_args(
        "config",
        &format!("return Promise.resolve({BERLIN});"),
    );
    Reflect::set(&api, &"forwardGeocode".into(), &forward).unwrap();
    api.into()
}

fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &key.into()).unwrap()
}

#[wasm_bindgen_test]
async fn query_selects_the_first_feature() {
    #[cfg(target_arch = "wasm32")]
    geocoder_wasm::start();

    let geocoder = MaplibreGeocoder::new(api(), JsValue::UNDEFINED).unwrap();
    let selected = JsFuture::from(geocoder.query("Berlin".into())).await.unwrap();
    assert_eq!(get(&selected, "place_name").as_string().as_deref(), Some("Berlin, Germany"));
}

#[wasm_bindgen_test]
async fn results_listener_receives_features() {
    let options = Object::new();
    Reflect::set(&options, &"showResultsWhileTyping".into(), &true.into()).unwrap();
    let geocoder = MaplibreGeocoder::new(api(), options.into()).unwrap();
    let next = geocoder.once("results").unwrap();
    let _ = JsFuture::from(geocoder.set_input("Berlin".into())).await.unwrap();
    let payload = JsFuture::from(next).await.unwrap();
    let features: js_sys::Array = get(&payload, "features").into();
    assert_eq!(features.length(), 1);
}

#[wasm_bindgen_test]
fn missing_forward_geocode_is_rejected() {
    let empty: JsValue = Object::new().into();
    assert!(MaplibreGeocoder::new(empty, JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn unknown_container_is_an_error() {
    let geocoder = MaplibreGeocoder::new(api(), JsValue::UNDEFINED).unwrap();
    assert!(geocoder.add_to("#no-such-element".into()).is_err());
}

#[wasm_bindgen_test]
fn options_object_configures_the_control() {
    let options = Object::new();
    Reflect::set(&options, &"limit".into(), &3.into()).unwrap();
    Reflect::set(&options, &"placeholder".into(), &"Find a place".into()).unwrap();
    let geocoder = MaplibreGeocoder::new(api(), options.into()).unwrap();
    assert_eq!(geocoder.limit(), 3);
    assert_eq!(geocoder.placeholder(), "Find a place");
}

#[wasm_bindgen_test]
fn unknown_event_type_is_rejected() {
    let geocoder = MaplibreGeocoder::new(api(), JsValue::UNDEFINED).unwrap();
    let noop = Function::new_no_args("");
    assert!(geocoder.on("resultz", noop).is_err());
}
