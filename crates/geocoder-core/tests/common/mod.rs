// crates/geocoder-core/tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use futures::channel::oneshot;
use geocoder_core::prelude::*;
use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

pub fn feature(id: &str, text: &str, lng: f64, lat: f64) -> Feature {
    Feature::point(id, text, LngLat::new(lng, lat)).with_place_name(format!("{text}, Testland"))
}

pub fn berlin() -> Feature {
    feature("place.berlin", "Berlin", 13.4, 52.5)
}

pub fn bremen() -> Feature {
    feature("place.bremen", "Bremen", 8.8, 53.1)
}

// -----------------------------------------------------------------------------
// API
// -----------------------------------------------------------------------------

/// Scriptable backend that records every call.
#[derive(Default)]
pub struct MockApi {
    pub features: RefCell<Vec<Feature>>,
    pub suggestions: RefCell<Vec<Suggestion>>,
    pub place: RefCell<Option<Feature>>,
    pub fail: Cell<bool>,
    pub reverse: bool,
    pub suggest: bool,
    pub calls: RefCell<Vec<(&'static str, ApiConfig)>>,
    /// When non-empty, forward calls wait on the next gate instead of
    /// answering from `features`.
    pub gates: RefCell<VecDeque<oneshot::Receiver<Vec<Feature>>>>,
}

impl MockApi {
    pub fn with_features(features: Vec<Feature>) -> Self {
        MockApi {
            features: RefCell::new(features),
            ..MockApi::default()
        }
    }

    pub fn gate(&self) -> oneshot::Sender<Vec<Feature>> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().push_back(rx);
        tx
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls.borrow().iter().map(|(name, _)| *name).collect()
    }

    fn record(&self, name: &'static str, config: &ApiConfig) -> Result<()> {
        self.calls.borrow_mut().push((name, config.clone()));
        if self.fail.get() {
            return Err(GeocoderError::api("backend unavailable"));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl GeocoderApi for MockApi {
    async fn forward_geocode(&self, config: &ApiConfig) -> Result<FeatureCollection> {
        self.record("forward", config)?;
        let gate = self.gates.borrow_mut().pop_front();
        match gate {
            Some(rx) => Ok(rx.await.unwrap_or_default().into()),
            None => Ok(self.features.borrow().clone().into()),
        }
    }

    async fn reverse_geocode(&self, config: &ApiConfig) -> Result<FeatureCollection> {
        self.record("reverse", config)?;
        Ok(self.features.borrow().clone().into())
    }

    async fn get_suggestions(&self, config: &ApiConfig) -> Result<Vec<Suggestion>> {
        self.record("suggestions", config)?;
        Ok(self.suggestions.borrow().clone())
    }

    async fn search_by_place_id(&self, config: &ApiConfig) -> Result<Feature> {
        self.record("place", config)?;
        self.place
            .borrow()
            .clone()
            .ok_or_else(|| GeocoderError::api("unknown place"))
    }

    fn supports_reverse(&self) -> bool {
        self.reverse
    }

    fn supports_suggestions(&self) -> bool {
        self.suggest
    }

    fn supports_place_lookup(&self) -> bool {
        self.suggest
    }
}

// -----------------------------------------------------------------------------
// VIEW
// -----------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum ViewCall {
    Mount(String),
    Unmount,
    InputValue(String),
    Placeholder(String),
    ClearButton(bool),
    Loading(bool),
    Collapsed(bool),
    Items(Vec<String>, Option<usize>),
    Message(MessageKind, String),
    Hide,
    Focus,
    Blur,
}

#[derive(Default)]
pub struct RecordingView {
    pub calls: RefCell<Vec<ViewCall>>,
    pub locale: Option<String>,
}

impl RecordingView {
    pub fn last_items(&self) -> Option<Vec<String>> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            ViewCall::Items(rows, _) => Some(rows.clone()),
            _ => None,
        })
    }

    pub fn last_message(&self) -> Option<(MessageKind, String)> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            ViewCall::Message(kind, text) => Some((*kind, text.clone())),
            _ => None,
        })
    }

    pub fn last_input(&self) -> Option<String> {
        self.calls.borrow().iter().rev().find_map(|c| match c {
            ViewCall::InputValue(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn count(&self, call: &ViewCall) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    fn push(&self, call: ViewCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl View for RecordingView {
    fn mount(&self, target: MountTarget<'_>) -> Result<()> {
        match target {
            MountTarget::Selector(s) if s.starts_with("#missing") => {
                Err(GeocoderError::ContainerNotFound(s.to_owned()))
            }
            MountTarget::Selector(s) => {
                self.push(ViewCall::Mount(s.to_owned()));
                Ok(())
            }
            MountTarget::MapControl => {
                self.push(ViewCall::Mount("map".to_owned()));
                Ok(())
            }
        }
    }
    fn unmount(&self) {
        self.push(ViewCall::Unmount);
    }
    fn set_input_value(&self, value: &str) {
        self.push(ViewCall::InputValue(value.to_owned()));
    }
    fn set_placeholder(&self, text: &str) {
        self.push(ViewCall::Placeholder(text.to_owned()));
    }
    fn set_clear_button_visible(&self, visible: bool) {
        self.push(ViewCall::ClearButton(visible));
    }
    fn set_loading(&self, loading: bool) {
        self.push(ViewCall::Loading(loading));
    }
    fn show_items(&self, items: &[RenderedItem], highlighted: Option<usize>) {
        let rows = items.iter().map(|i| i.html.clone()).collect();
        self.push(ViewCall::Items(rows, highlighted));
    }
    fn show_message(&self, kind: MessageKind, text: &str) {
        self.push(ViewCall::Message(kind, text.to_owned()));
    }
    fn hide_dropdown(&self) {
        self.push(ViewCall::Hide);
    }
    fn set_collapsed(&self, collapsed: bool) {
        self.push(ViewCall::Collapsed(collapsed));
    }
    fn focus(&self) {
        self.push(ViewCall::Focus);
    }
    fn blur(&self) {
        self.push(ViewCall::Blur);
    }
    fn locale(&self) -> Option<String> {
        self.locale.clone()
    }
}

// -----------------------------------------------------------------------------
// MAP
// -----------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum MapCall {
    FlyTo(LngLat, CameraOptions),
    FitBounds(Bbox, CameraOptions),
    AddMarker(MarkerId, LngLat),
    RemoveMarker(MarkerId),
    Popup(MarkerId, String),
}

pub struct RecordingMap {
    pub zoom: Cell<f64>,
    pub center: Cell<LngLat>,
    pub calls: RefCell<Vec<MapCall>>,
    next_marker: Cell<u64>,
}

impl RecordingMap {
    pub fn new(zoom: f64, center: LngLat) -> Self {
        RecordingMap {
            zoom: Cell::new(zoom),
            center: Cell::new(center),
            calls: RefCell::new(Vec::new()),
            next_marker: Cell::new(1),
        }
    }

    /// Markers added and not yet removed.
    pub fn live_markers(&self) -> HashSet<MarkerId> {
        let mut live = HashSet::new();
        for call in self.calls.borrow().iter() {
            match call {
                MapCall::AddMarker(id, _) => {
                    live.insert(*id);
                }
                MapCall::RemoveMarker(id) => {
                    live.remove(id);
                }
                _ => {}
            }
        }
        live
    }

    pub fn last_camera(&self) -> Option<MapCall> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find(|c| matches!(c, MapCall::FlyTo(..) | MapCall::FitBounds(..)))
            .cloned()
    }

    pub fn markers_added(&self) -> Vec<(MarkerId, LngLat)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                MapCall::AddMarker(id, at) => Some((*id, *at)),
                _ => None,
            })
            .collect()
    }
}

impl MapHost for RecordingMap {
    fn zoom(&self) -> f64 {
        self.zoom.get()
    }
    fn center(&self) -> LngLat {
        self.center.get()
    }
    fn fly_to(&self, center: LngLat, options: &CameraOptions) {
        self.calls
            .borrow_mut()
            .push(MapCall::FlyTo(center, options.clone()));
    }
    fn fit_bounds(&self, bounds: Bbox, options: &CameraOptions) {
        self.calls
            .borrow_mut()
            .push(MapCall::FitBounds(bounds, options.clone()));
    }
    fn add_marker(&self, at: LngLat, _options: &MarkerOptions) -> MarkerId {
        let id = MarkerId(self.next_marker.get());
        self.next_marker.set(id.0 + 1);
        self.calls.borrow_mut().push(MapCall::AddMarker(id, at));
        id
    }
    fn remove_marker(&self, marker: MarkerId) {
        self.calls.borrow_mut().push(MapCall::RemoveMarker(marker));
    }
    fn attach_popup(&self, marker: MarkerId, html: &str, _options: &PopupOptions) {
        self.calls
            .borrow_mut()
            .push(MapCall::Popup(marker, html.to_owned()));
    }
}

// -----------------------------------------------------------------------------
// EVENTS
// -----------------------------------------------------------------------------

/// Collects every event of the given kinds.
pub fn record_events(geocoder: &Geocoder, kinds: &[EventKind]) -> Rc<RefCell<Vec<GeocoderEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    for kind in kinds {
        let log = log.clone();
        geocoder.on(*kind, move |event| log.borrow_mut().push(event.clone()));
    }
    log
}

pub const ALL_EVENTS: [EventKind; 5] = [
    EventKind::Clear,
    EventKind::Loading,
    EventKind::Results,
    EventKind::Result,
    EventKind::Error,
];

pub fn kinds(log: &RefCell<Vec<GeocoderEvent>>) -> Vec<EventKind> {
    log.borrow().iter().map(GeocoderEvent::kind).collect()
}

/// A control wired to recording hosts, attached to the map.
pub struct Harness {
    pub api: Rc<MockApi>,
    pub view: Rc<RecordingView>,
    pub map: Rc<RecordingMap>,
    pub geocoder: Geocoder,
}

impl Harness {
    pub fn new(api: MockApi, options: ControlOptions) -> Self {
        Self::with_builder(api, |b| b.options(options))
    }

    pub fn with_builder(
        api: MockApi,
        configure: impl FnOnce(geocoder_core::GeocoderBuilder) -> geocoder_core::GeocoderBuilder,
    ) -> Self {
        let api = Rc::new(api);
        let view = Rc::new(RecordingView::default());
        let map = Rc::new(RecordingMap::new(12.0, LngLat::new(13.0, 52.0)));
        let builder = Geocoder::builder(api.clone()).view(view.clone());
        let geocoder = configure(builder).build();
        geocoder
            .add_to(Container::Map(map.clone()))
            .expect("attach to map");
        Harness {
            api,
            view,
            map,
            geocoder,
        }
    }
}
