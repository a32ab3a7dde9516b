// crates/geocoder-core/src/host.rs

//! Seams to the outside world: the interactive map and the on-screen view.
//!
//! The control never holds an internal borrow while calling into a host, so
//! implementations may synchronously re-enter the control (a DOM `focus()`
//! firing the focus handler, for instance).

use crate::error::Result;
use crate::model::{Bbox, LngLat};
use crate::options::{CameraOptions, MarkerOptions, PopupOptions};
use crate::render::RenderedItem;
use std::rc::Rc;

/// Opaque handle for a marker placed on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// The interactive map the control is attached to.
pub trait MapHost {
    fn zoom(&self) -> f64;
    fn center(&self) -> LngLat;
    /// `options.zoom` is always set by the control.
    fn fly_to(&self, center: LngLat, options: &CameraOptions);
    fn fit_bounds(&self, bounds: Bbox, options: &CameraOptions);
    fn add_marker(&self, at: LngLat, options: &MarkerOptions) -> MarkerId;
    fn remove_marker(&self, marker: MarkerId);
    fn attach_popup(&self, marker: MarkerId, html: &str, options: &PopupOptions);
}

/// Where the view should mount itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountTarget<'a> {
    /// Inside the map's control area.
    MapControl,
    /// A host-specific selector (a CSS selector in the browser).
    Selector(&'a str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    NoResults,
    Error,
}

/// The control's visual surface: text field, dropdown, clear button and
/// loading indicator.
pub trait View {
    /// Fails with [`GeocoderError::ContainerNotFound`](crate::GeocoderError::ContainerNotFound)
    /// when the selector does not resolve.
    fn mount(&self, target: MountTarget<'_>) -> Result<()>;
    fn unmount(&self);
    fn set_input_value(&self, value: &str);
    fn set_placeholder(&self, text: &str);
    fn set_clear_button_visible(&self, visible: bool);
    fn set_loading(&self, loading: bool);
    fn show_items(&self, items: &[RenderedItem], highlighted: Option<usize>);
    fn show_message(&self, kind: MessageKind, text: &str);
    fn hide_dropdown(&self);

    fn set_collapsed(&self, _collapsed: bool) {}
    fn focus(&self) {}
    fn blur(&self) {}
    /// Preferred UI language of the environment, e.g. `navigator.language`.
    fn locale(&self) -> Option<String> {
        None
    }
}

/// A view that renders nothing; for programmatic use without UI.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl View for NullView {
    fn mount(&self, _target: MountTarget<'_>) -> Result<()> {
        Ok(())
    }
    fn unmount(&self) {}
    fn set_input_value(&self, _value: &str) {}
    fn set_placeholder(&self, _text: &str) {}
    fn set_clear_button_visible(&self, _visible: bool) {}
    fn set_loading(&self, _loading: bool) {}
    fn show_items(&self, _items: &[RenderedItem], _highlighted: Option<usize>) {}
    fn show_message(&self, _kind: MessageKind, _text: &str) {}
    fn hide_dropdown(&self) {}
}

/// Argument of [`Geocoder::add_to`](crate::Geocoder::add_to).
#[derive(Clone)]
pub enum Container<'a> {
    Map(Rc<dyn MapHost>),
    Selector(&'a str),
}

impl std::fmt::Debug for Container<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Container::Map(_) => f.write_str("Container::Map(..)"),
            Container::Selector(s) => f.debug_tuple("Container::Selector").field(s).finish(),
        }
    }
}
