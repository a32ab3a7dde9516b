// crates/geocoder-core/src/hooks.rs
use crate::api::ApiConfig;
use crate::error::Result;
use crate::model::Feature;
use crate::render::Markup;
use async_trait::async_trait;
use std::fmt;
use std::rc::Rc;

/// Renders a feature as a dropdown row or popup body.
pub type RenderFn = Rc<dyn Fn(&Feature) -> Markup>;
/// Text written into the input when a feature is selected.
pub type ItemValueFn = Rc<dyn Fn(&Feature) -> String>;
/// Return `true` to keep a feature.
pub type FilterFn = Rc<dyn Fn(&Feature) -> bool>;

/// Synchronous, in-process search that supplements backend results.
/// Its features are ranked ahead of the backend's.
pub trait LocalGeocoder {
    fn search(&self, query: &str) -> Vec<Feature>;
}

impl<F> LocalGeocoder for F
where
    F: Fn(&str) -> Vec<Feature>,
{
    fn search(&self, query: &str) -> Vec<Feature> {
        self(query)
    }
}

/// Asynchronous supplementary search, given the backend's features.
///
/// A failure is logged and treated as "no extra results".
#[async_trait(?Send)]
pub trait ExternalGeocoder {
    async fn search(
        &self,
        query: &str,
        features: &[Feature],
        config: &ApiConfig,
    ) -> Result<Vec<Feature>>;
}

/// Function-valued options of the control.
#[derive(Clone, Default)]
pub struct Hooks {
    pub render: Option<RenderFn>,
    pub popup_render: Option<RenderFn>,
    pub get_item_value: Option<ItemValueFn>,
    pub filter: Option<FilterFn>,
    pub local_geocoder: Option<Rc<dyn LocalGeocoder>>,
    pub external_geocoder: Option<Rc<dyn ExternalGeocoder>>,
}

impl Hooks {
    pub fn render(&self, feature: &Feature) -> Markup {
        match &self.render {
            Some(f) => f(feature),
            None => crate::render::default_render(feature),
        }
    }

    pub fn popup_render(&self, feature: &Feature) -> Markup {
        match &self.popup_render {
            Some(f) => f(feature),
            None => crate::render::default_popup_render(feature),
        }
    }

    pub fn item_value(&self, feature: &Feature) -> String {
        match &self.get_item_value {
            Some(f) => f(feature),
            None => feature.place_name.clone(),
        }
    }

    pub fn keep(&self, feature: &Feature) -> bool {
        self.filter.as_ref().map_or(true, |f| f(feature))
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("render", &self.render.is_some())
            .field("popup_render", &self.popup_render.is_some())
            .field("get_item_value", &self.get_item_value.is_some())
            .field("filter", &self.filter.is_some())
            .field("local_geocoder", &self.local_geocoder.is_some())
            .field("external_geocoder", &self.external_geocoder.is_some())
            .finish()
    }
}
