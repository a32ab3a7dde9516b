// crates/geocoder-core/src/render.rs

//! # Renderer
//!
//! Turns result rows into markup and decides camera moves.
//!
//! Render hooks return [`Markup`]: `Markup::Text` is escaped before it
//! reaches the view, `Markup::Html` is passed through untouched and must be
//! chosen explicitly by the hook author.

use crate::hooks::Hooks;
use crate::model::{Bbox, Feature, LngLat, ResultItem};
use crate::options::{CameraOptions, ControlOptions};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Output of a render hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Markup {
    /// Plain text; escaped on output.
    Text(String),
    /// Trusted markup; emitted verbatim.
    Html(String),
}

impl Markup {
    pub fn text(s: impl Into<String>) -> Self {
        Markup::Text(s.into())
    }

    pub fn html(s: impl Into<String>) -> Self {
        Markup::Html(s.into())
    }

    /// Final HTML for the view.
    pub fn to_html(&self) -> String {
        match self {
            Markup::Text(s) => escape_html(s),
            Markup::Html(s) => s.clone(),
        }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Title and the remainder of `place_name` after its first comma.
fn title_and_address(feature: &Feature) -> (String, String) {
    let place_name = feature.place_name.as_str();
    match place_name.split_once(',') {
        Some((head, rest)) => {
            let title = if feature.text.is_empty() {
                head
            } else {
                feature.text.as_str()
            };
            (title.trim().to_owned(), rest.trim().to_owned())
        }
        None => {
            let title = if feature.text.is_empty() {
                place_name
            } else {
                feature.text.as_str()
            };
            (title.to_owned(), String::new())
        }
    }
}

pub fn default_render(feature: &Feature) -> Markup {
    let (title, address) = title_and_address(feature);
    Markup::Html(format!(
        "<div class=\"maplibregl-ctrl-geocoder--suggestion\">\
         <div class=\"maplibregl-ctrl-geocoder--suggestion-title\">{}</div>\
         <div class=\"maplibregl-ctrl-geocoder--suggestion-address\">{}</div>\
         </div>",
        escape_html(&title),
        escape_html(&address)
    ))
}

pub fn default_popup_render(feature: &Feature) -> Markup {
    let (title, address) = title_and_address(feature);
    Markup::Html(format!(
        "<div class=\"maplibregl-ctrl-geocoder--result\">\
         <div class=\"maplibregl-ctrl-geocoder--result-title\">{}</div>\
         <div class=\"maplibregl-ctrl-geocoder--result-address\">{}</div>\
         </div>",
        escape_html(&title),
        escape_html(&address)
    ))
}

/// A dropdown row ready for the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedItem {
    pub html: String,
    /// What the input shows if this row is chosen.
    pub value: String,
}

pub fn render_items(items: &[ResultItem], hooks: &Hooks) -> Vec<RenderedItem> {
    items
        .iter()
        .map(|item| match item {
            ResultItem::Feature(f) => RenderedItem {
                html: hooks.render(f).to_html(),
                value: hooks.item_value(f),
            },
            ResultItem::Suggestion(s) => RenderedItem {
                html: escape_html(&s.text),
                value: s.text.clone(),
            },
        })
        .collect()
}

// -----------------------------------------------------------------------------
// CAMERA
// -----------------------------------------------------------------------------

/// Padding applied when fitting the map to all result markers.
pub const RESULTS_PADDING: f64 = 100.0;

#[derive(Clone, Debug, PartialEq)]
pub enum CameraMove {
    FitBounds {
        bounds: Bbox,
        options: CameraOptions,
    },
    FlyTo {
        center: LngLat,
        options: CameraOptions,
    },
}

/// Countries whose reported bbox spans the antimeridian or overseas
/// territories; fitting to these gives a usable view instead.
static BBOX_EXCEPTIONS: Lazy<HashMap<&'static str, Bbox>> = Lazy::new(|| {
    HashMap::from([
        ("fr", Bbox::new(-4.59235, 41.380007, 9.560016, 51.148506)),
        ("us", Bbox::new(-171.791111, 18.91619, -66.96466, 71.357764)),
        ("ru", Bbox::new(19.66064, 41.151416, 190.10042, 81.2504)),
        ("ca", Bbox::new(-140.99778, 41.675105, -52.648099, 83.23324)),
    ])
});

pub fn bbox_exception(short_code: &str) -> Option<Bbox> {
    BBOX_EXCEPTIONS.get(short_code).copied()
}

/// Where to move the map when `feature` is selected; `None` when flying is
/// disabled or the feature has no usable location.
pub fn camera_for_selection(feature: &Feature, options: &ControlOptions) -> Option<CameraMove> {
    let fly = options.fly_to.resolve()?;

    if let Some(bounds) = feature.short_code().as_deref().and_then(bbox_exception) {
        return Some(CameraMove::FitBounds {
            bounds,
            options: fly,
        });
    }
    if let Some(bounds) = feature.bbox {
        return Some(CameraMove::FitBounds {
            bounds,
            options: fly,
        });
    }

    let center = feature.location()?;
    let options = CameraOptions {
        zoom: Some(fly.zoom.unwrap_or(options.zoom)),
        ..fly
    };
    Some(CameraMove::FlyTo { center, options })
}

/// Frame every result that has a location.
pub fn camera_for_results(features: &[Feature], options: &ControlOptions) -> Option<CameraMove> {
    let fly = options.fly_to.resolve()?;
    let points: Vec<LngLat> = features.iter().filter_map(Feature::location).collect();
    match points.as_slice() {
        [] => None,
        [single] => Some(CameraMove::FlyTo {
            center: *single,
            options: CameraOptions {
                zoom: Some(fly.zoom.unwrap_or(options.zoom)),
                ..fly
            },
        }),
        _ => Some(CameraMove::FitBounds {
            bounds: Bbox::from_points(points.iter().copied())?,
            options: CameraOptions {
                padding: Some(fly.padding.unwrap_or(RESULTS_PADDING)),
                ..fly
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Suggestion;
    use crate::options::Toggle;
    use std::rc::Rc;

    fn berlin() -> Feature {
        Feature::point("place.1", "Berlin", LngLat::new(13.4, 52.5))
            .with_place_name("Berlin, Germany")
    }

    #[test]
    fn text_markup_is_escaped() {
        assert_eq!(
            Markup::text("<b>Tom & Jerry</b>").to_html(),
            "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"
        );
        assert_eq!(Markup::html("<b>x</b>").to_html(), "<b>x</b>");
    }

    #[test]
    fn default_render_escapes_feature_text() {
        let f = Feature::point("x", "<script>", LngLat::new(0.0, 0.0))
            .with_place_name("<script>, Evil & Co");
        let html = default_render(&f).to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Evil &amp; Co"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn render_items_uses_hooks() {
        let hooks = Hooks {
            render: Some(Rc::new(|f: &Feature| Markup::text(format!("<{}>", f.text)))),
            get_item_value: Some(Rc::new(|f: &Feature| f.text.to_uppercase())),
            ..Hooks::default()
        };
        let rows = render_items(
            &[
                ResultItem::Feature(berlin()),
                ResultItem::Suggestion(Suggestion {
                    text: "B&B".into(),
                    place_id: None,
                }),
            ],
            &hooks,
        );
        assert_eq!(rows[0].html, "&lt;Berlin&gt;");
        assert_eq!(rows[0].value, "BERLIN");
        assert_eq!(rows[1].html, "B&amp;B");
        assert_eq!(rows[1].value, "B&B");
    }

    #[test]
    fn selection_with_bbox_fits_bounds() {
        let bbox = Bbox::new(13.0, 52.3, 13.8, 52.7);
        let f = berlin().with_bbox(bbox);
        match camera_for_selection(&f, &ControlOptions::default()) {
            Some(CameraMove::FitBounds { bounds, .. }) => assert_eq!(bounds, bbox),
            other => panic!("expected fit, got {other:?}"),
        }
    }

    #[test]
    fn selection_without_bbox_flies_at_configured_zoom() {
        let options = ControlOptions {
            zoom: 11.0,
            ..ControlOptions::default()
        };
        match camera_for_selection(&berlin(), &options) {
            Some(CameraMove::FlyTo { center, options }) => {
                assert_eq!(center, LngLat::new(13.4, 52.5));
                assert_eq!(options.zoom, Some(11.0));
            }
            other => panic!("expected fly, got {other:?}"),
        }
    }

    #[test]
    fn fly_options_override_zoom_but_not_center() {
        let options = ControlOptions {
            fly_to: Toggle::Custom(CameraOptions {
                zoom: Some(5.0),
                speed: Some(2.0),
                ..CameraOptions::default()
            }),
            ..ControlOptions::default()
        };
        let Some(CameraMove::FlyTo { center, options }) = camera_for_selection(&berlin(), &options)
        else {
            panic!("expected fly");
        };
        assert_eq!(center, LngLat::new(13.4, 52.5));
        assert_eq!(options.zoom, Some(5.0));
        assert_eq!(options.speed, Some(2.0));
    }

    #[test]
    fn country_exceptions_win_over_feature_bbox() {
        let mut f = berlin().with_bbox(Bbox::new(-180.0, -90.0, 180.0, 90.0));
        f.properties = serde_json::json!({"short_code": "US"});
        let Some(CameraMove::FitBounds { bounds, .. }) =
            camera_for_selection(&f, &ControlOptions::default())
        else {
            panic!("expected fit");
        };
        assert_eq!(bounds, bbox_exception("us").unwrap());
    }

    #[test]
    fn disabled_fly_to_never_moves() {
        let options = ControlOptions {
            fly_to: Toggle::Flag(false),
            ..ControlOptions::default()
        };
        assert!(camera_for_selection(&berlin(), &options).is_none());
        assert!(camera_for_results(&[berlin()], &options).is_none());
    }

    #[test]
    fn results_camera_pads_bounds() {
        let a = Feature::point("a", "A", LngLat::new(0.0, 0.0));
        let b = Feature::point("b", "B", LngLat::new(2.0, 4.0));
        let Some(CameraMove::FitBounds { bounds, options }) =
            camera_for_results(&[a, b], &ControlOptions::default())
        else {
            panic!("expected fit");
        };
        assert_eq!(bounds.to_array(), [0.0, 0.0, 2.0, 4.0]);
        assert_eq!(options.padding, Some(RESULTS_PADDING));
    }
}
