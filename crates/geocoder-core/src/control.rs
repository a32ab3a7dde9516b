// crates/geocoder-core/src/control.rs

//! # The geocoder control
//!
//! [`Geocoder`] owns the per-instance UI state and wires the pieces
//! together: input events come in through the `on_*` handlers, requests are
//! planned by [`query`](crate::query), dispatched to the [`GeocoderApi`],
//! reconciled, then pushed out to the [`View`], the [`MapHost`] and the
//! event listeners.
//!
//! The handle is a cheap `Rc` clone and is not `Send`. Internal state lives
//! in `RefCell`s; no borrow is held across an `.await` or while a host or
//! listener is being called, so hosts may re-enter the control.

use crate::api::{dispatch, ApiConfig, GeocoderApi};
use crate::error::{GeocoderError, Result};
use crate::events::{EventEmitter, EventKind, GeocoderEvent, ListenerId};
use crate::hooks::{ExternalGeocoder, FilterFn, Hooks, ItemValueFn, LocalGeocoder, RenderFn};
use crate::host::{Container, MapHost, MarkerId, MessageKind, MountTarget, NullView, View};
use crate::input::{DebounceTicket, Debouncer, Highlight, Key};
use crate::localize::{strings_for, UiStrings};
use crate::model::{Bbox, Feature, Proximity, ResultItem, ResultSet};
use crate::options::{CameraOptions, ControlOptions, Toggle};
use crate::query::{forward_config, plan_request, reconcile};
use crate::render::{camera_for_results, camera_for_selection, render_items, CameraMove};
use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

/// What one `geocode` call produced.
#[derive(Clone, Debug)]
pub struct QueryOutcome {
    pub query: String,
    pub config: ApiConfig,
    /// The rows shown in the dropdown, after merge, filter and limit.
    pub items: Vec<ResultItem>,
    /// Set when the request was rejected locally or the adapter failed.
    pub error: Option<Rc<GeocoderError>>,
}

impl QueryOutcome {
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.items.iter().filter_map(ResultItem::as_feature)
    }
}

#[derive(Default)]
struct State {
    value: String,
    debouncer: Debouncer,
    highlight: Highlight,
    items: Vec<ResultItem>,
    last_selected: Option<Feature>,
    selected_marker: Option<MarkerId>,
    result_markers: Vec<(MarkerId, Feature)>,
    latest_request: u64,
    focused: bool,
    hovered: bool,
    mounted: bool,
}

struct Inner {
    options: RefCell<ControlOptions>,
    hooks: RefCell<Hooks>,
    api: RefCell<Rc<dyn GeocoderApi>>,
    view: Rc<dyn View>,
    map: RefCell<Option<Rc<dyn MapHost>>>,
    state: RefCell<State>,
    events: EventEmitter,
}

/// A geocoder control instance.
#[derive(Clone)]
pub struct Geocoder {
    inner: Rc<Inner>,
}

// -----------------------------------------------------------------------------
// CONSTRUCTION
// -----------------------------------------------------------------------------

/// Configures a [`Geocoder`] before any host sees it.
pub struct GeocoderBuilder {
    api: Rc<dyn GeocoderApi>,
    options: ControlOptions,
    hooks: Hooks,
    view: Rc<dyn View>,
}

impl GeocoderBuilder {
    pub fn options(mut self, options: ControlOptions) -> Self {
        self.options = options;
        self
    }

    pub fn view(mut self, view: Rc<dyn View>) -> Self {
        self.view = view;
        self
    }

    pub fn hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn render(mut self, f: RenderFn) -> Self {
        self.hooks.render = Some(f);
        self
    }

    pub fn popup_render(mut self, f: RenderFn) -> Self {
        self.hooks.popup_render = Some(f);
        self
    }

    pub fn item_value(mut self, f: ItemValueFn) -> Self {
        self.hooks.get_item_value = Some(f);
        self
    }

    pub fn filter(mut self, f: FilterFn) -> Self {
        self.hooks.filter = Some(f);
        self
    }

    pub fn local_geocoder(mut self, g: Rc<dyn LocalGeocoder>) -> Self {
        self.hooks.local_geocoder = Some(g);
        self
    }

    pub fn external_geocoder(mut self, g: Rc<dyn ExternalGeocoder>) -> Self {
        self.hooks.external_geocoder = Some(g);
        self
    }

    pub fn build(self) -> Geocoder {
        Geocoder {
            inner: Rc::new(Inner {
                options: RefCell::new(self.options),
                hooks: RefCell::new(self.hooks),
                api: RefCell::new(self.api),
                view: self.view,
                map: RefCell::new(None),
                state: RefCell::new(State::default()),
                events: EventEmitter::new(),
            }),
        }
    }
}

impl Geocoder {
    /// A control without UI, using `options` and no hooks.
    pub fn new(api: impl GeocoderApi + 'static, options: ControlOptions) -> Self {
        Self::builder(Rc::new(api)).options(options).build()
    }

    pub fn builder(api: Rc<dyn GeocoderApi>) -> GeocoderBuilder {
        GeocoderBuilder {
            api,
            options: ControlOptions::default(),
            hooks: Hooks::default(),
            view: Rc::new(NullView),
        }
    }

    // -------------------------------------------------------------------------
    // LIFECYCLE
    // -------------------------------------------------------------------------

    /// Attach to a map, or mount the view at a selector without a map.
    pub fn add_to(&self, container: Container<'_>) -> Result<()> {
        match container {
            Container::Map(map) => self.on_add(map),
            Container::Selector(selector) => self.attach(MountTarget::Selector(selector)),
        }
    }

    /// Host control protocol: the map is adding this control.
    pub fn on_add(&self, map: Rc<dyn MapHost>) -> Result<()> {
        *self.inner.map.borrow_mut() = Some(map);
        self.attach(MountTarget::MapControl)?;
        if self.inner.options.borrow().track_proximity {
            self.update_proximity();
        }
        Ok(())
    }

    fn attach(&self, target: MountTarget<'_>) -> Result<()> {
        self.inner.view.mount(target)?;
        self.inner.state.borrow_mut().mounted = true;
        self.inner.view.set_placeholder(&self.placeholder());
        self.collapse();
        tracing::info!(?target, "geocoder mounted");
        Ok(())
    }

    /// Host control protocol: tear down UI, markers and pending work.
    pub fn on_remove(&self) {
        let (selected, results) = {
            let mut state = self.inner.state.borrow_mut();
            state.debouncer.cancel();
            state.latest_request += 1;
            state.mounted = false;
            state.items.clear();
            state.highlight.reset();
            (
                state.selected_marker.take(),
                std::mem::take(&mut state.result_markers),
            )
        };
        let map = self.inner.map.borrow_mut().take();
        if let Some(map) = map {
            selected
                .into_iter()
                .chain(results.into_iter().map(|(id, _)| id))
                .for_each(|id| map.remove_marker(id));
        }
        self.inner.view.unmount();
        tracing::info!("geocoder removed");
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.state.borrow().mounted
    }

    /// Follow the map center; call on the map's move end.
    pub fn update_proximity(&self) {
        let Some(map) = self.map() else { return };
        let min_zoom = {
            let options = self.inner.options.borrow();
            if !options.track_proximity {
                return;
            }
            options.proximity_min_zoom
        };
        let proximity = (map.zoom() > min_zoom).then(|| Proximity::from(map.center()));
        self.inner.options.borrow_mut().proximity = proximity;
    }

    // -------------------------------------------------------------------------
    // INPUT HANDLERS
    // -------------------------------------------------------------------------

    /// The text field changed. Returns a ticket the host must arm when the
    /// value is long enough to search.
    pub fn on_input(&self, value: &str) -> Option<DebounceTicket> {
        if value.is_empty() {
            self.reset();
            return None;
        }
        let (min_length, delay) = {
            let options = self.inner.options.borrow();
            (options.min_length, options.debounce())
        };
        let ticket = {
            let mut state = self.inner.state.borrow_mut();
            state.value = value.to_owned();
            state.debouncer.cancel();
            (value.chars().count() >= min_length).then(|| state.debouncer.restart(delay))
        };
        self.inner.view.set_clear_button_visible(true);
        ticket
    }

    pub fn on_paste(&self, text: &str) -> Option<DebounceTicket> {
        self.on_input(text)
    }

    /// The host's timer for `ticket` fired.
    pub async fn on_debounce_elapsed(&self, ticket: DebounceTicket) -> Option<QueryOutcome> {
        let value = {
            let state = self.inner.state.borrow();
            if !state.debouncer.is_current(&ticket) {
                return None;
            }
            state.value.clone()
        };
        if !self.inner.options.borrow().show_results_while_typing {
            return None;
        }
        self.geocode(&value, false, false).await
    }

    /// Returns `true` when the key was consumed (the host should prevent
    /// its default action).
    pub async fn on_key(&self, key: Key) -> bool {
        match key {
            Key::Enter => self.on_enter().await,
            Key::Escape => {
                self.reset();
                if self.inner.options.borrow().clear_and_blur_on_esc {
                    self.inner.view.blur();
                }
                true
            }
            Key::ArrowDown | Key::ArrowUp => {
                let (items, highlighted) = {
                    let mut state = self.inner.state.borrow_mut();
                    let len = state.items.len();
                    if len == 0 {
                        return false;
                    }
                    if key == Key::ArrowDown {
                        state.highlight.next(len);
                    } else {
                        state.highlight.prev(len);
                    }
                    (state.items.clone(), state.highlight.index())
                };
                let rows = render_items(&items, &self.hooks());
                self.inner.view.show_items(&rows, highlighted);
                true
            }
            Key::Tab | Key::ArrowLeft | Key::ArrowRight | Key::Other => false,
        }
    }

    async fn on_enter(&self) -> bool {
        let (highlighted, value) = {
            let state = self.inner.state.borrow();
            (state.highlight.index(), state.value.clone())
        };
        if let Some(index) = highlighted {
            self.select(index).await;
            return true;
        }
        let (typing, min_length) = {
            let options = self.inner.options.borrow();
            (options.show_results_while_typing, options.min_length)
        };
        if typing || value.chars().count() < min_length {
            return false;
        }
        self.inner.state.borrow_mut().debouncer.cancel();
        self.geocode(&value, false, false).await;
        true
    }

    /// `focus_moved` is `true` when focus went to another element (not
    /// merely the window losing focus).
    pub fn on_blur(&self, focus_moved: bool) {
        self.inner.state.borrow_mut().focused = false;
        if focus_moved && self.inner.options.borrow().clear_on_blur {
            self.reset();
        }
        self.collapse();
    }

    pub fn on_focus(&self) {
        self.inner.state.borrow_mut().focused = true;
        self.uncollapse();
    }

    pub fn on_hover(&self, hovered: bool) {
        self.inner.state.borrow_mut().hovered = hovered;
        if hovered {
            self.uncollapse();
        } else {
            self.collapse();
        }
    }

    fn collapse(&self) {
        if !self.inner.options.borrow().collapsed {
            return;
        }
        let idle = {
            let state = self.inner.state.borrow();
            state.value.is_empty() && !state.focused && !state.hovered
        };
        if idle {
            self.inner.view.set_collapsed(true);
        }
    }

    fn uncollapse(&self) {
        if self.inner.options.borrow().collapsed {
            self.inner.view.set_collapsed(false);
        }
    }

    /// A result marker placed by this control was clicked.
    pub fn on_result_marker_click(&self, marker: MarkerId) -> bool {
        let feature = self
            .inner
            .state
            .borrow()
            .result_markers
            .iter()
            .find(|(id, _)| *id == marker)
            .map(|(_, f)| f.clone());
        match feature {
            Some(feature) => {
                self.select_feature(feature);
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // QUERIES
    // -------------------------------------------------------------------------

    /// Run one search for `input` and render the outcome.
    ///
    /// Returns `None` when a newer request superseded this one before it
    /// resolved; nothing is rendered or emitted in that case.
    pub async fn geocode(
        &self,
        input: &str,
        is_suggestion: bool,
        is_place_id: bool,
    ) -> Option<QueryOutcome> {
        let options = self.options();
        let hooks = self.hooks();
        let api = self.geocoder_api();
        let map_zoom = self.map().map(|m| m.zoom());
        let request_id = {
            let mut state = self.inner.state.borrow_mut();
            state.latest_request += 1;
            state.latest_request
        };

        let plan = match plan_request(
            &options,
            api.as_ref(),
            input,
            is_suggestion,
            is_place_id,
            map_zoom,
        ) {
            Ok(plan) => plan,
            Err(err) => {
                tracing::warn!(%err, input, "geocode request rejected");
                return Some(self.reject(input, forward_config(&options, map_zoom), err));
            }
        };

        self.inner.view.set_loading(true);
        self.emit(GeocoderEvent::Loading {
            query: input.to_owned(),
        });

        let local = hooks
            .local_geocoder
            .as_ref()
            .map(|g| g.search(input))
            .unwrap_or_default();

        let response = match plan.request {
            Some(request) => dispatch(api.as_ref(), request, &plan.config)
                .await
                .map(Some),
            None => Ok(None),
        };
        if self.is_stale(request_id, &options) {
            return None;
        }

        let (set, error) = match response {
            Ok(set) => (set, None),
            Err(err) => {
                tracing::warn!(%err, input, "geocoder api failed");
                (None, Some(Rc::new(err)))
            }
        };

        let external = match (&hooks.external_geocoder, &error) {
            (Some(external), None) => {
                let features = set.as_ref().map(ResultSet::features).unwrap_or(&[]);
                match external.search(input, features, &plan.config).await {
                    Ok(found) => found,
                    Err(err) => {
                        tracing::warn!(%err, "external geocoder failed");
                        Vec::new()
                    }
                }
            }
            _ => Vec::new(),
        };
        if self.is_stale(request_id, &options) {
            return None;
        }

        let items = reconcile(local, external, set, &hooks, options.limit);
        tracing::debug!(input, results = items.len(), "geocode resolved");
        self.inner.view.set_loading(false);
        {
            let mut state = self.inner.state.borrow_mut();
            state.items = items.clone();
            state.highlight.reset();
        }

        match &error {
            Some(err) if items.is_empty() => {
                self.remove_result_markers();
                let strings = self.strings();
                self.inner
                    .view
                    .show_message(MessageKind::Error, strings.error_connection_failed);
                self.emit(GeocoderEvent::Error { error: err.clone() });
            }
            _ => {
                self.emit(GeocoderEvent::Results {
                    query: input.to_owned(),
                    config: plan.config.clone(),
                    results: items.clone(),
                });
                self.show_dropdown(&items, &hooks);
                self.draw_result_markers(&items, &options);
                if let Some(err) = &error {
                    self.emit(GeocoderEvent::Error { error: err.clone() });
                }
            }
        }

        Some(QueryOutcome {
            query: input.to_owned(),
            config: plan.config,
            items,
            error,
        })
    }

    fn reject(&self, input: &str, config: ApiConfig, err: GeocoderError) -> QueryOutcome {
        let message = err.to_string();
        let error = Rc::new(err);
        {
            let mut state = self.inner.state.borrow_mut();
            state.items.clear();
            state.highlight.reset();
        }
        self.remove_result_markers();
        self.inner.view.set_loading(false);
        self.inner.view.show_message(MessageKind::Error, &message);
        self.emit(GeocoderEvent::Error {
            error: error.clone(),
        });
        QueryOutcome {
            query: input.to_owned(),
            config,
            items: Vec::new(),
            error: Some(error),
        }
    }

    fn is_stale(&self, request_id: u64, options: &ControlOptions) -> bool {
        let latest = self.inner.state.borrow().latest_request;
        let stale = options.discard_stale_responses && latest != request_id;
        if stale {
            tracing::debug!(request_id, latest, "discarding stale response");
        }
        stale
    }

    /// Set the input to `text`, search forward and select the first feature.
    pub async fn query(&self, text: &str) -> Option<Feature> {
        {
            let mut state = self.inner.state.borrow_mut();
            state.value = text.to_owned();
            state.debouncer.cancel();
        }
        self.inner.view.set_input_value(text);
        self.inner.view.set_clear_button_visible(!text.is_empty());

        let outcome = self.geocode(text, true, false).await?;
        let first = outcome.features().next().cloned()?;
        self.select_feature(first.clone());
        Some(first)
    }

    /// Replace the input text; searches when typing results are on and the
    /// text is long enough.
    pub async fn set_input(&self, text: &str) -> Option<QueryOutcome> {
        {
            let mut state = self.inner.state.borrow_mut();
            state.value = text.to_owned();
            state.last_selected = None;
            state.items.clear();
            state.highlight.reset();
            state.debouncer.cancel();
        }
        self.inner.view.set_input_value(text);
        self.inner.view.set_clear_button_visible(!text.is_empty());
        self.inner.view.hide_dropdown();

        let (typing, min_length) = {
            let options = self.inner.options.borrow();
            (options.show_results_while_typing, options.min_length)
        };
        if typing && text.chars().count() >= min_length {
            self.geocode(text, false, false).await
        } else {
            None
        }
    }

    // -------------------------------------------------------------------------
    // SELECTION
    // -------------------------------------------------------------------------

    /// Choose dropdown row `index`. Suggestions are resolved first, then
    /// their first feature is selected.
    pub async fn select(&self, index: usize) -> Option<Feature> {
        let item = self.inner.state.borrow().items.get(index).cloned()?;
        match item {
            ResultItem::Feature(feature) => {
                self.select_feature(feature.clone());
                Some(feature)
            }
            ResultItem::Suggestion(suggestion) => {
                {
                    let mut state = self.inner.state.borrow_mut();
                    state.value = suggestion.text.clone();
                    state.highlight.reset();
                }
                self.inner.view.set_input_value(&suggestion.text);
                let outcome = match &suggestion.place_id {
                    Some(id) => self.geocode(id, true, true).await?,
                    None => self.geocode(&suggestion.text, true, false).await?,
                };
                let first = outcome.features().next().cloned()?;
                self.select_feature(first.clone());
                Some(first)
            }
        }
    }

    /// Select `feature`: update the input, move the camera, place the
    /// marker and emit `result`. Re-selecting the current feature only
    /// restores the input and closes the dropdown.
    pub fn select_feature(&self, feature: Feature) {
        let options = self.options();
        let hooks = self.hooks();
        let value = hooks.item_value(&feature);
        let reselected = {
            let mut state = self.inner.state.borrow_mut();
            state.value = value.clone();
            state.highlight.reset();
            state.debouncer.cancel();
            let reselected = state.last_selected.as_ref() == Some(&feature);
            state.last_selected = Some(feature.clone());
            reselected
        };

        self.inner.view.set_input_value(&value);
        self.inner.view.hide_dropdown();
        self.inner.view.set_clear_button_visible(true);
        self.remove_result_markers();

        if reselected {
            tracing::debug!(id = %feature.id, "feature already selected");
            return;
        }

        if let Some(map) = self.map() {
            if let Some(camera) = camera_for_selection(&feature, &options) {
                apply_camera(map.as_ref(), camera);
            }
            self.place_selected_marker(map.as_ref(), &feature, &options, &hooks);
        }

        tracing::info!(id = %feature.id, place = %feature.place_name, "result selected");
        self.inner.view.focus();
        self.emit(GeocoderEvent::Result { result: feature });
    }

    fn place_selected_marker(
        &self,
        map: &dyn MapHost,
        feature: &Feature,
        options: &ControlOptions,
        hooks: &Hooks,
    ) {
        let previous = self.inner.state.borrow_mut().selected_marker.take();
        if let Some(id) = previous {
            map.remove_marker(id);
        }
        let (Some(marker), Some(at)) = (options.marker.resolve(), feature.location()) else {
            return;
        };
        let id = map.add_marker(at, &marker);
        if let Some(popup) = options.popup.resolve() {
            map.attach_popup(id, &hooks.popup_render(feature).to_html(), &popup);
        }
        self.inner.state.borrow_mut().selected_marker = Some(id);
    }

    fn show_dropdown(&self, items: &[ResultItem], hooks: &Hooks) {
        if items.is_empty() {
            let strings = self.strings();
            self.inner
                .view
                .show_message(MessageKind::NoResults, strings.error_no_results);
        } else {
            self.inner.view.show_items(&render_items(items, hooks), None);
        }
    }

    fn draw_result_markers(&self, items: &[ResultItem], options: &ControlOptions) {
        self.remove_result_markers();
        let (Some(map), Some(marker)) = (self.map(), options.show_result_markers.resolve()) else {
            return;
        };
        let features: Vec<Feature> = items
            .iter()
            .filter_map(ResultItem::as_feature)
            .cloned()
            .collect();
        let placed: Vec<(MarkerId, Feature)> = features
            .iter()
            .filter_map(|f| Some((map.add_marker(f.location()?, &marker), f.clone())))
            .collect();
        self.inner.state.borrow_mut().result_markers = placed;
        if let Some(camera) = camera_for_results(&features, options) {
            apply_camera(map.as_ref(), camera);
        }
    }

    fn remove_result_markers(&self) {
        let markers = std::mem::take(&mut self.inner.state.borrow_mut().result_markers);
        if let Some(map) = self.map() {
            for (id, _) in markers {
                map.remove_marker(id);
            }
        }
    }

    // -------------------------------------------------------------------------
    // CLEARING
    // -------------------------------------------------------------------------

    /// Empty the input, drop markers and results, emit `clear`, refocus.
    pub fn clear(&self) {
        self.reset();
        self.inner.view.focus();
    }

    fn reset(&self) {
        let selected = {
            let mut state = self.inner.state.borrow_mut();
            state.value.clear();
            state.debouncer.cancel();
            state.highlight.reset();
            state.items.clear();
            state.last_selected = None;
            state.latest_request += 1;
            state.selected_marker.take()
        };
        if let (Some(map), Some(id)) = (self.map(), selected) {
            map.remove_marker(id);
        }
        self.remove_result_markers();

        let view = &self.inner.view;
        view.set_input_value("");
        view.set_clear_button_visible(false);
        view.set_loading(false);
        view.hide_dropdown();
        self.emit(GeocoderEvent::Clear);
    }

    // -------------------------------------------------------------------------
    // EVENTS
    // -------------------------------------------------------------------------

    pub fn on<F>(&self, kind: EventKind, listener: F) -> ListenerId
    where
        F: Fn(&GeocoderEvent) + 'static,
    {
        self.inner.events.on(kind, listener)
    }

    pub fn once(&self, kind: EventKind) -> impl Future<Output = Option<GeocoderEvent>> + 'static {
        self.inner.events.once(kind)
    }

    pub fn off(&self, kind: EventKind, id: ListenerId) -> bool {
        self.inner.events.off(kind, id)
    }

    fn emit(&self, event: GeocoderEvent) {
        self.inner.events.emit(&event);
    }

    // -------------------------------------------------------------------------
    // ACCESSORS
    // -------------------------------------------------------------------------

    /// Snapshot of the current options.
    pub fn options(&self) -> ControlOptions {
        self.inner.options.borrow().clone()
    }

    fn hooks(&self) -> Hooks {
        self.inner.hooks.borrow().clone()
    }

    pub fn map(&self) -> Option<Rc<dyn MapHost>> {
        self.inner.map.borrow().clone()
    }

    /// Current input text.
    pub fn value(&self) -> String {
        self.inner.state.borrow().value.clone()
    }

    /// Rows currently held for the dropdown.
    pub fn results(&self) -> Vec<ResultItem> {
        self.inner.state.borrow().items.clone()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.inner.state.borrow().highlight.index()
    }

    pub fn selected(&self) -> Option<Feature> {
        self.inner.state.borrow().last_selected.clone()
    }

    fn strings(&self) -> &'static UiStrings {
        strings_for(self.language().as_deref())
    }

    pub fn proximity(&self) -> Option<Proximity> {
        self.inner.options.borrow().proximity
    }

    pub fn set_proximity(&self, proximity: Option<Proximity>) -> &Self {
        self.inner.options.borrow_mut().proximity = proximity;
        self
    }

    pub fn render_function(&self) -> Option<RenderFn> {
        self.inner.hooks.borrow().render.clone()
    }

    pub fn set_render_function(&self, render: Option<RenderFn>) -> &Self {
        self.inner.hooks.borrow_mut().render = render;
        self
    }

    /// The configured language, else the view's locale.
    pub fn language(&self) -> Option<String> {
        let configured = self.inner.options.borrow().language.clone();
        configured.or_else(|| self.inner.view.locale())
    }

    /// `None` falls back to the view's locale.
    pub fn set_language(&self, language: Option<String>) -> &Self {
        let language = language.or_else(|| self.inner.view.locale());
        self.inner.options.borrow_mut().language = language;
        if self.is_mounted() {
            self.inner.view.set_placeholder(&self.placeholder());
        }
        self
    }

    pub fn zoom(&self) -> f64 {
        self.inner.options.borrow().zoom
    }

    pub fn set_zoom(&self, zoom: f64) -> &Self {
        self.inner.options.borrow_mut().zoom = zoom;
        self
    }

    pub fn fly_to(&self) -> Toggle<CameraOptions> {
        self.inner.options.borrow().fly_to.clone()
    }

    pub fn set_fly_to(&self, fly_to: Toggle<CameraOptions>) -> &Self {
        self.inner.options.borrow_mut().fly_to = fly_to;
        self
    }

    /// The configured placeholder, else the localized default.
    pub fn placeholder(&self) -> String {
        let configured = self.inner.options.borrow().placeholder.clone();
        configured.unwrap_or_else(|| self.strings().placeholder.to_owned())
    }

    pub fn set_placeholder(&self, placeholder: Option<String>) -> &Self {
        self.inner.options.borrow_mut().placeholder = placeholder;
        self.inner.view.set_placeholder(&self.placeholder());
        self
    }

    pub fn bbox(&self) -> Option<Bbox> {
        self.inner.options.borrow().bbox
    }

    pub fn set_bbox(&self, bbox: Option<Bbox>) -> &Self {
        self.inner.options.borrow_mut().bbox = bbox;
        self
    }

    pub fn countries(&self) -> Option<String> {
        self.inner.options.borrow().countries.clone()
    }

    pub fn set_countries(&self, countries: Option<String>) -> &Self {
        self.inner.options.borrow_mut().countries = countries;
        self
    }

    pub fn types(&self) -> Option<String> {
        self.inner.options.borrow().types.clone()
    }

    pub fn set_types(&self, types: Option<String>) -> &Self {
        self.inner.options.borrow_mut().types = types;
        self
    }

    pub fn min_length(&self) -> usize {
        self.inner.options.borrow().min_length
    }

    pub fn set_min_length(&self, min_length: usize) -> &Self {
        self.inner.options.borrow_mut().min_length = min_length;
        self
    }

    pub fn limit(&self) -> usize {
        self.inner.options.borrow().limit
    }

    pub fn set_limit(&self, limit: usize) -> &Self {
        self.inner.options.borrow_mut().limit = limit;
        self
    }

    pub fn filter(&self) -> Option<FilterFn> {
        self.inner.hooks.borrow().filter.clone()
    }

    pub fn set_filter(&self, filter: Option<FilterFn>) -> &Self {
        self.inner.hooks.borrow_mut().filter = filter;
        self
    }

    pub fn geocoder_api(&self) -> Rc<dyn GeocoderApi> {
        self.inner.api.borrow().clone()
    }

    pub fn set_geocoder_api(&self, api: Rc<dyn GeocoderApi>) -> &Self {
        *self.inner.api.borrow_mut() = api;
        self
    }
}

fn apply_camera(map: &dyn MapHost, camera: CameraMove) {
    match camera {
        CameraMove::FitBounds { bounds, options } => map.fit_bounds(bounds, &options),
        CameraMove::FlyTo { center, options } => map.fly_to(center, &options),
    }
}

impl fmt::Debug for Geocoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Geocoder")
            .field("value", &state.value)
            .field("results", &state.items.len())
            .field("mounted", &state.mounted)
            .field("map", &self.inner.map.borrow().is_some())
            .field("events", &self.inner.events)
            .finish()
    }
}
