// crates/geocoder-wasm/src/dom.rs

//! The DOM side of the control: a [`View`] that builds the MapLibre
//! geocoder markup, and the listeners that feed browser events back into
//! the [`Geocoder`].

use geocoder_core::render::escape_html;
use geocoder_core::{
    DebounceTicket, Geocoder, GeocoderError, Key, MessageKind, MountTarget, RenderedItem, View,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, FocusEvent, HtmlElement, HtmlInputElement, KeyboardEvent};

const ROOT_CLASS: &str = "maplibregl-ctrl-geocoder maplibregl-ctrl";
const COLLAPSED_CLASS: &str = "maplibregl-ctrl-geocoder--collapsed";

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn create<T: JsCast>(doc: &Document, tag: &str, class: &str) -> Result<T, JsValue> {
    let el = doc.create_element(tag)?;
    el.set_class_name(class);
    el.dyn_into::<T>().map_err(|_| JsValue::from_str(tag))
}

fn set_shown(el: &HtmlElement, shown: bool) {
    let _ = el
        .style()
        .set_property("display", if shown { "block" } else { "none" });
}

// -----------------------------------------------------------------------------
// VIEW
// -----------------------------------------------------------------------------

pub struct DomView {
    root: HtmlElement,
    input: HtmlInputElement,
    clear_button: HtmlElement,
    loading: HtmlElement,
    list: HtmlElement,
}

impl DomView {
    pub fn new() -> Result<Self, JsValue> {
        let doc = document()?;
        let root: HtmlElement = create(&doc, "div", ROOT_CLASS)?;

        let input: HtmlInputElement = create(&doc, "input", "maplibregl-ctrl-geocoder--input")?;
        input.set_type("text");

        let pin: HtmlElement = create(&doc, "div", "maplibregl-ctrl-geocoder--pin-right")?;
        let clear_button: HtmlElement = create(&doc, "button", "maplibregl-ctrl-geocoder--button")?;
        clear_button.set_attribute("aria-label", "Clear")?;
        clear_button.set_inner_html("&times;");
        let loading: HtmlElement = create(&doc, "span", "maplibregl-ctrl-geocoder--icon-loading")?;
        set_shown(&clear_button, false);
        set_shown(&loading, false);
        pin.append_child(&clear_button)?;
        pin.append_child(&loading)?;

        let list: HtmlElement = create(&doc, "ul", "suggestions")?;
        set_shown(&list, false);

        root.append_child(&input)?;
        root.append_child(&pin)?;
        root.append_child(&list)?;

        Ok(DomView {
            root,
            input,
            clear_button,
            loading,
            list,
        })
    }

    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    pub fn input(&self) -> &HtmlInputElement {
        &self.input
    }

    fn show_list(&self, html: &str) {
        self.list.set_inner_html(html);
        set_shown(&self.list, true);
    }
}

impl View for DomView {
    fn mount(&self, target: MountTarget<'_>) -> geocoder_core::Result<()> {
        match target {
            // `onAdd` hands the root element to the map itself.
            MountTarget::MapControl => Ok(()),
            MountTarget::Selector(selector) => {
                let parent: Option<Element> = document()
                    .ok()
                    .and_then(|doc| doc.query_selector(selector).ok().flatten());
                let parent =
                    parent.ok_or_else(|| GeocoderError::ContainerNotFound(selector.to_owned()))?;
                parent
                    .append_child(&self.root)
                    .map_err(|_| GeocoderError::ContainerNotFound(selector.to_owned()))?;
                Ok(())
            }
        }
    }

    fn unmount(&self) {
        self.root.remove();
    }

    fn set_input_value(&self, value: &str) {
        self.input.set_value(value);
    }

    fn set_placeholder(&self, text: &str) {
        self.input.set_placeholder(text);
        let _ = self.input.set_attribute("aria-label", text);
    }

    fn set_clear_button_visible(&self, visible: bool) {
        set_shown(&self.clear_button, visible);
    }

    fn set_loading(&self, loading: bool) {
        set_shown(&self.loading, loading);
    }

    fn show_items(&self, items: &[RenderedItem], highlighted: Option<usize>) {
        let html: String = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let class = if Some(i) == highlighted { " class=\"active\"" } else { "" };
                format!("<li data-index=\"{i}\"{class}><a>{}</a></li>", item.html)
            })
            .collect();
        self.show_list(&html);
    }

    fn show_message(&self, kind: MessageKind, text: &str) {
        let class = match kind {
            MessageKind::NoResults => "maplibre-ctrl-geocoder--no-results",
            MessageKind::Error => "maplibre-ctrl-geocoder--error",
        };
        self.show_list(&format!("<li class=\"{class}\">{}</li>", escape_html(text)));
    }

    fn hide_dropdown(&self) {
        set_shown(&self.list, false);
        self.list.set_inner_html("");
    }

    fn set_collapsed(&self, collapsed: bool) {
        let _ = self
            .root
            .class_list()
            .toggle_with_force(COLLAPSED_CLASS, collapsed);
    }

    fn focus(&self) {
        let _ = self.input.focus();
    }

    fn blur(&self) {
        let _ = self.input.blur();
    }

    fn locale(&self) -> Option<String> {
        web_sys::window()?.navigator().language()
    }
}

// -----------------------------------------------------------------------------
// LISTENERS
// -----------------------------------------------------------------------------

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Browser listeners wired to one control. Detached on drop.
#[derive(Default)]
pub struct DomListeners(Vec<Listener>);

impl DomListeners {
    fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.0.push(Listener {
            target: target.clone(),
            event,
            closure,
        });
        Ok(())
    }

    /// Forward input, keyboard, focus, hover and click events.
    pub fn bind(view: &DomView, geocoder: &Geocoder) -> Result<Self, JsValue> {
        let mut listeners = DomListeners::default();

        let g = geocoder.clone();
        let input = view.input.clone();
        listeners.listen(&view.input, "input", move |_| {
            if let Some(ticket) = g.on_input(&input.value()) {
                arm_debounce(&g, ticket);
            }
        })?;

        let g = geocoder.clone();
        listeners.listen(&view.input, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = Key::from_dom(&event.key());
            if matches!(key, Key::Enter | Key::ArrowUp | Key::ArrowDown) {
                event.prevent_default();
            }
            let g = g.clone();
            wasm_bindgen_futures::spawn_local(async move {
                g.on_key(key).await;
            });
        })?;

        let g = geocoder.clone();
        listeners.listen(&view.input, "blur", move |event| {
            // Focus left for another element of the page, not another window.
            let focus_moved = event
                .dyn_ref::<FocusEvent>()
                .is_some_and(|e| e.related_target().is_some())
                || document().is_ok_and(|doc| doc.has_focus().unwrap_or(false));
            g.on_blur(focus_moved);
        })?;

        let g = geocoder.clone();
        listeners.listen(&view.input, "focus", move |_| g.on_focus())?;

        let g = geocoder.clone();
        listeners.listen(&view.root, "mouseenter", move |_| g.on_hover(true))?;
        let g = geocoder.clone();
        listeners.listen(&view.root, "mouseleave", move |_| g.on_hover(false))?;

        let g = geocoder.clone();
        listeners.listen(&view.clear_button, "click", move |_| g.clear())?;

        // mousedown, so the input keeps focus while a row is picked.
        let g = geocoder.clone();
        listeners.listen(&view.list, "mousedown", move |event| {
            let Some(index) = row_index(&event) else {
                return;
            };
            event.prevent_default();
            let g = g.clone();
            wasm_bindgen_futures::spawn_local(async move {
                g.select(index).await;
            });
        })?;

        Ok(listeners)
    }
}

impl Drop for DomListeners {
    fn drop(&mut self) {
        for l in &self.0 {
            let _ = l
                .target
                .remove_event_listener_with_callback(l.event, l.closure.as_ref().unchecked_ref());
        }
    }
}

fn row_index(event: &Event) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let row = target.closest("li[data-index]").ok().flatten()?;
    row.get_attribute("data-index")?.parse().ok()
}

/// Hand `ticket` back to the control once its delay has passed.
fn arm_debounce(geocoder: &Geocoder, ticket: DebounceTicket) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let g = geocoder.clone();
    let fire = Closure::once_into_js(move || {
        wasm_bindgen_futures::spawn_local(async move {
            g.on_debounce_elapsed(ticket).await;
        });
    });
    let delay = i32::try_from(ticket.delay.as_millis()).unwrap_or(i32::MAX);
    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(fire.unchecked_ref(), delay)
    {
        web_sys::console::warn_1(&e);
    }
}
