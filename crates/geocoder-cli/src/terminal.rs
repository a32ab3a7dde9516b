// crates/geocoder-cli/src/terminal.rs

//! Line-oriented [`View`] and [`MapHost`] implementations.

use geocoder_core::prelude::*;
use std::cell::{Cell, Ref, RefCell};
use std::io::{self, Stdout, Write};

/// Prints the search box state as plain lines.
pub struct TerminalView<W: Write = Stdout> {
    out: RefCell<W>,
    locale: Option<String>,
}

impl TerminalView<Stdout> {
    pub fn stdout(locale: Option<String>) -> Self {
        Self::with_writer(io::stdout(), locale)
    }
}

impl<W: Write> TerminalView<W> {
    pub fn with_writer(out: W, locale: Option<String>) -> Self {
        TerminalView {
            out: RefCell::new(out),
            locale,
        }
    }

    pub fn writer(&self) -> Ref<'_, W> {
        self.out.borrow()
    }

    fn line(&self, text: &str) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = writeln!(out, "{text}") {
            tracing::warn!("terminal write failed: {e}");
        }
    }
}

impl<W: Write> View for TerminalView<W> {
    fn mount(&self, target: MountTarget<'_>) -> Result<()> {
        tracing::debug!(?target, "terminal view mounted");
        Ok(())
    }

    fn unmount(&self) {}

    fn set_input_value(&self, value: &str) {
        self.line(&format!("> {value}"));
    }

    fn set_placeholder(&self, text: &str) {
        tracing::debug!(placeholder = text);
    }

    fn set_clear_button_visible(&self, _visible: bool) {}

    fn set_loading(&self, loading: bool) {
        if loading {
            self.line("...");
        }
    }

    fn show_items(&self, items: &[RenderedItem], highlighted: Option<usize>) {
        for (i, item) in items.iter().enumerate() {
            let mark = if Some(i) == highlighted { '*' } else { ' ' };
            self.line(&format!("{mark}{:>2}. {}", i + 1, item.value));
        }
    }

    fn show_message(&self, kind: MessageKind, text: &str) {
        match kind {
            MessageKind::NoResults => self.line(&format!("   {text}")),
            MessageKind::Error => self.line(&format!("!! {text}")),
        }
    }

    fn hide_dropdown(&self) {}

    fn locale(&self) -> Option<String> {
        self.locale.clone()
    }
}

/// A pretend map: keeps a camera and reports what the control asks of it.
pub struct TerminalMap<W: Write = Stdout> {
    out: RefCell<W>,
    zoom: Cell<f64>,
    center: Cell<LngLat>,
    next_marker: Cell<u64>,
}

impl TerminalMap<Stdout> {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> TerminalMap<W> {
    pub fn with_writer(out: W) -> Self {
        TerminalMap {
            out: RefCell::new(out),
            zoom: Cell::new(1.0),
            center: Cell::new(LngLat::new(0.0, 0.0)),
            next_marker: Cell::new(1),
        }
    }

    pub fn writer(&self) -> Ref<'_, W> {
        self.out.borrow()
    }

    fn line(&self, text: &str) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = writeln!(out, "{text}") {
            tracing::warn!("terminal write failed: {e}");
        }
    }
}

impl<W: Write> MapHost for TerminalMap<W> {
    fn zoom(&self) -> f64 {
        self.zoom.get()
    }

    fn center(&self) -> LngLat {
        self.center.get()
    }

    fn fly_to(&self, center: LngLat, options: &CameraOptions) {
        if let Some(zoom) = options.zoom {
            self.zoom.set(zoom);
        }
        self.center.set(center);
        self.line(&format!(
            "[map] fly to {:.5}, {:.5} @ z{:.1}",
            center.lat,
            center.lng,
            self.zoom.get()
        ));
    }

    fn fit_bounds(&self, bounds: Bbox, _options: &CameraOptions) {
        let [west, south, east, north] = bounds.to_array();
        self.center
            .set(LngLat::new((west + east) / 2.0, (south + north) / 2.0));
        self.line(&format!(
            "[map] fit {south:.4},{west:.4} .. {north:.4},{east:.4}"
        ));
    }

    fn add_marker(&self, at: LngLat, _options: &MarkerOptions) -> MarkerId {
        let id = MarkerId(self.next_marker.get());
        self.next_marker.set(id.0 + 1);
        tracing::debug!(marker = id.0, lat = at.lat, lng = at.lng, "marker added");
        id
    }

    fn remove_marker(&self, marker: MarkerId) {
        tracing::debug!(marker = marker.0, "marker removed");
    }

    fn attach_popup(&self, marker: MarkerId, html: &str, _options: &PopupOptions) {
        self.line(&format!("[map] popup #{}: {}", marker.0, strip_tags(html)));
    }
}

/// Collapse markup to its text content.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                text.push(' ');
            }
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Language tag from the POSIX locale variables (`de_DE.UTF-8` -> `de-DE`).
pub fn locale_from_env() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|v| !v.is_empty())
        .and_then(|v| posix_to_bcp47(&v))
}

fn posix_to_bcp47(locale: &str) -> Option<String> {
    let base = locale.split(['.', '@']).next()?;
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(view: &TerminalView<Vec<u8>>) -> String {
        String::from_utf8(view.writer().clone()).unwrap()
    }

    #[test]
    fn rows_are_numbered_and_highlighted() {
        let view = TerminalView::with_writer(Vec::new(), None);
        let rows = vec![
            RenderedItem {
                html: "<b>Berlin</b>".into(),
                value: "Berlin, Germany".into(),
            },
            RenderedItem {
                html: "<b>Bern</b>".into(),
                value: "Bern, Switzerland".into(),
            },
        ];
        view.show_items(&rows, Some(1));
        assert_eq!(text(&view), "  1. Berlin, Germany\n* 2. Bern, Switzerland\n");
    }

    #[test]
    fn errors_are_flagged() {
        let view = TerminalView::with_writer(Vec::new(), None);
        view.show_message(MessageKind::Error, "offline");
        assert_eq!(text(&view), "!! offline\n");
    }

    #[test]
    fn fly_to_moves_the_camera() {
        let map = TerminalMap::with_writer(Vec::new());
        let options = CameraOptions {
            zoom: Some(14.0),
            ..CameraOptions::default()
        };
        map.fly_to(LngLat::new(13.4, 52.5), &options);
        assert_eq!(map.zoom(), 14.0);
        assert_eq!(map.center(), LngLat::new(13.4, 52.5));
    }

    #[test]
    fn markers_get_fresh_ids() {
        let map = TerminalMap::with_writer(Vec::new());
        let a = map.add_marker(LngLat::new(0.0, 0.0), &MarkerOptions::default());
        let b = map.add_marker(LngLat::new(1.0, 1.0), &MarkerOptions::default());
        assert_ne!(a, b);
    }

    #[test]
    fn popup_markup_is_flattened() {
        assert_eq!(
            strip_tags("<div><b>A &amp; B</b><span>Main St</span></div>"),
            "A & B Main St"
        );
    }

    #[test]
    fn posix_locales_map_to_language_tags() {
        assert_eq!(posix_to_bcp47("de_DE.UTF-8").as_deref(), Some("de-DE"));
        assert_eq!(posix_to_bcp47("fr_CH@euro").as_deref(), Some("fr-CH"));
        assert_eq!(posix_to_bcp47("C.UTF-8"), None);
        assert_eq!(posix_to_bcp47("POSIX"), None);
    }
}
