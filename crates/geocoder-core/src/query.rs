// crates/geocoder-core/src/query.rs

//! Request planning and response reconciliation.
//!
//! Everything here is pure: the [`Geocoder`](crate::Geocoder) snapshots its
//! options, calls [`plan_request`], awaits the adapter, then hands the
//! pieces to [`reconcile`].

use crate::api::{ApiConfig, ApiQuery, GeocoderApi, Request};
use crate::error::{GeocoderError, Result};
use crate::hooks::Hooks;
use crate::model::{Feature, LngLat, ResultItem, ResultSet};
use crate::options::ControlOptions;
use std::collections::HashSet;

// -----------------------------------------------------------------------------
// COORDINATE INPUT
// -----------------------------------------------------------------------------

/// Interpret `"lat, lon"` / `"lat lon"` input.
///
/// Returns `None` when the text is not shaped like a coordinate pair (it is
/// then a normal forward query), `Some(Err)` when it is shaped like one but
/// out of range.
pub fn parse_coordinates(input: &str) -> Option<Result<LngLat>> {
    let tokens: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    let [lat, lon] = tokens.as_slice() else {
        return None;
    };
    let lat = parse_decimal(lat)?;
    let lon = parse_decimal(lon)?;

    let at = LngLat::new(lon, lat);
    if at.is_valid() {
        Some(Ok(at))
    } else {
        Some(Err(GeocoderError::InvalidCoordinates(format!(
            "latitude {lat} / longitude {lon} out of range"
        ))))
    }
}

/// Plain decimal only: no exponents, `inf` or `NaN`.
fn parse_decimal(token: &str) -> Option<f64> {
    let ok = token
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+');
    if !ok || !token.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse::<f64>().ok()
}

// -----------------------------------------------------------------------------
// CONFIG
// -----------------------------------------------------------------------------

/// Split a comma/space separated option into its entries.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

fn non_empty_list(s: Option<&str>) -> Option<Vec<String>> {
    let list = split_list(s?);
    (!list.is_empty()).then_some(list)
}

/// Forward-geocode parameters from the current options (no query yet).
///
/// `map_zoom` is the attached map's zoom; proximity is only sent above
/// `proximity_min_zoom`, or always when no map is attached.
pub fn forward_config(options: &ControlOptions, map_zoom: Option<f64>) -> ApiConfig {
    let proximity_allowed = map_zoom.map_or(true, |z| z > options.proximity_min_zoom);
    ApiConfig {
        query: None,
        countries: non_empty_list(options.countries.as_deref()),
        types: non_empty_list(options.types.as_deref()),
        language: non_empty_list(options.language.as_deref()),
        bbox: options.bbox,
        limit: (options.limit > 0).then_some(options.limit),
        proximity: options
            .proximity
            .filter(|_| proximity_allowed)
            .map(LngLat::from),
        reverse_mode: options.reverse_mode,
    }
}

/// Narrow a forward config to what reverse lookups accept.
pub fn reverse_config(mut config: ApiConfig, at: LngLat) -> ApiConfig {
    config.query = Some(ApiQuery::Coordinates(at));
    config.limit = Some(1);
    config.types = config
        .types
        .and_then(|t| t.into_iter().next())
        .map(|first| vec![first]);
    config.proximity = None;
    config.bbox = None;
    config
}

/// A decided request: which operation (if any) with which parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan {
    /// `None` when only the local geocoder is consulted.
    pub request: Option<Request>,
    pub config: ApiConfig,
}

/// Decide reverse vs forward and which adapter operation serves `input`.
pub fn plan_request(
    options: &ControlOptions,
    api: &dyn GeocoderApi,
    input: &str,
    is_suggestion: bool,
    is_place_id: bool,
    map_zoom: Option<f64>,
) -> Result<Plan> {
    let mut config = forward_config(options, map_zoom);

    if options.local_geocoder_only {
        config.query = Some(ApiQuery::Text(input.to_owned()));
        return Ok(Plan {
            request: None,
            config,
        });
    }

    if options.reverse_geocode {
        if let Some(parsed) = parse_coordinates(input) {
            let at = parsed?;
            if !api.supports_reverse() {
                return Err(GeocoderError::Unsupported("reverseGeocode"));
            }
            return Ok(Plan {
                request: Some(Request::Reverse),
                config: reverse_config(config, at),
            });
        }
    }

    config.query = Some(ApiQuery::Text(input.to_owned()));
    let request = if !api.supports_suggestions() {
        Request::Forward
    } else if is_suggestion {
        if is_place_id && api.supports_place_lookup() {
            Request::PlaceLookup
        } else {
            Request::Forward
        }
    } else {
        Request::Suggestions
    };
    Ok(Plan {
        request: Some(request),
        config,
    })
}

// -----------------------------------------------------------------------------
// RECONCILIATION
// -----------------------------------------------------------------------------

/// Merge local, external and backend results into the dropdown rows.
///
/// Order: local, external, backend. Features are deduplicated by id
/// (first wins), filtered with `hooks.filter` preserving order, and the
/// whole list is truncated to `limit` (0 means unlimited).
pub fn reconcile(
    local: Vec<Feature>,
    external: Vec<Feature>,
    api: Option<ResultSet>,
    hooks: &Hooks,
    limit: usize,
) -> Vec<ResultItem> {
    let mut seen: HashSet<String> = HashSet::new();
    let backend = api.map(ResultSet::into_items).unwrap_or_default();

    let mut out: Vec<ResultItem> = local
        .into_iter()
        .chain(external)
        .map(ResultItem::Feature)
        .chain(backend)
        .filter(|item| match item {
            ResultItem::Feature(f) => hooks.keep(f) && seen.insert(f.id.clone()),
            ResultItem::Suggestion(_) => true,
        })
        .collect();

    if limit > 0 {
        out.truncate(limit);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use crate::model::{FeatureCollection, Suggestion};
    use crate::options::ReverseMode;
    use async_trait::async_trait;
    use std::rc::Rc;

    fn f(id: &str) -> Feature {
        Feature::point(id, id, LngLat::new(0.0, 0.0))
    }

    struct Caps {
        reverse: bool,
        suggestions: bool,
        place: bool,
    }

    #[async_trait(?Send)]
    impl GeocoderApi for Caps {
        async fn forward_geocode(&self, _config: &ApiConfig) -> Result<FeatureCollection> {
            Ok(FeatureCollection::default())
        }
        fn supports_reverse(&self) -> bool {
            self.reverse
        }
        fn supports_suggestions(&self) -> bool {
            self.suggestions
        }
        fn supports_place_lookup(&self) -> bool {
            self.place
        }
    }

    const FULL: Caps = Caps {
        reverse: true,
        suggestions: true,
        place: true,
    };
    const BASIC: Caps = Caps {
        reverse: false,
        suggestions: false,
        place: false,
    };

    #[test]
    fn coordinates_parse_as_lat_lon() {
        let at = parse_coordinates("52.52, 13.405").unwrap().unwrap();
        assert_eq!(at, LngLat::new(13.405, 52.52));
        let at = parse_coordinates(" -33.86   151.2 ").unwrap().unwrap();
        assert_eq!(at, LngLat::new(151.2, -33.86));
    }

    #[test]
    fn non_coordinate_text_is_not_rejected() {
        assert!(parse_coordinates("Berlin").is_none());
        assert!(parse_coordinates("Route 66").is_none());
        assert!(parse_coordinates("1, 2, 3").is_none());
        assert!(parse_coordinates("inf, 2").is_none());
        assert!(parse_coordinates("1e3, 2").is_none());
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let err = parse_coordinates("91, 10").unwrap().unwrap_err();
        assert!(matches!(err, GeocoderError::InvalidCoordinates(_)));
        assert!(parse_coordinates("10, -180.5").unwrap().is_err());
    }

    #[test]
    fn forward_config_splits_lists_and_gates_proximity() {
        let options = ControlOptions {
            countries: Some("de, at ch".into()),
            types: Some("place,poi".into()),
            language: Some("de".into()),
            proximity: Some(crate::model::Proximity {
                longitude: 1.0,
                latitude: 2.0,
            }),
            reverse_mode: Some(ReverseMode::Score),
            ..ControlOptions::default()
        };
        let config = forward_config(&options, Some(12.0));
        assert_eq!(config.countries.unwrap(), vec!["de", "at", "ch"]);
        assert_eq!(config.types.unwrap(), vec!["place", "poi"]);
        assert_eq!(config.language.unwrap(), vec!["de"]);
        assert_eq!(config.limit, Some(5));
        assert_eq!(config.proximity, Some(LngLat::new(1.0, 2.0)));

        let zoomed_out = forward_config(&options, Some(4.0));
        assert_eq!(zoomed_out.proximity, None);
        let no_map = forward_config(&options, None);
        assert!(no_map.proximity.is_some());
    }

    #[test]
    fn reverse_plan_builds_position_query() {
        let options = ControlOptions {
            reverse_geocode: true,
            types: Some("poi,address".into()),
            bbox: Some(crate::model::Bbox::new(0.0, 0.0, 1.0, 1.0)),
            ..ControlOptions::default()
        };
        let plan = plan_request(&options, &FULL, "48.85, 2.35", false, false, None).unwrap();
        assert_eq!(plan.request, Some(Request::Reverse));
        assert_eq!(plan.config.query_position(), Some(LngLat::new(2.35, 48.85)));
        assert_eq!(plan.config.limit, Some(1));
        assert_eq!(plan.config.types, Some(vec!["poi".to_owned()]));
        assert_eq!(plan.config.bbox, None);
    }

    #[test]
    fn reverse_without_adapter_support_is_rejected() {
        let options = ControlOptions {
            reverse_geocode: true,
            ..ControlOptions::default()
        };
        let err = plan_request(&options, &BASIC, "48.85, 2.35", false, false, None).unwrap_err();
        assert!(matches!(err, GeocoderError::Unsupported(_)));
    }

    #[test]
    fn coordinates_are_plain_text_when_reverse_disabled() {
        let plan = plan_request(
            &ControlOptions::default(),
            &FULL,
            "48.85, 2.35",
            false,
            false,
            None,
        )
        .unwrap();
        assert_eq!(plan.config.query_text(), Some("48.85, 2.35"));
    }

    #[test]
    fn routing_follows_capabilities() {
        let o = ControlOptions::default();
        let route = |api: &dyn GeocoderApi, sugg, pid| {
            plan_request(&o, api, "ber", sugg, pid, None)
                .unwrap()
                .request
        };
        assert_eq!(route(&BASIC, false, false), Some(Request::Forward));
        assert_eq!(route(&FULL, false, false), Some(Request::Suggestions));
        assert_eq!(route(&FULL, true, false), Some(Request::Forward));
        assert_eq!(route(&FULL, true, true), Some(Request::PlaceLookup));

        let local_only = ControlOptions {
            local_geocoder_only: true,
            ..ControlOptions::default()
        };
        let plan = plan_request(&local_only, &FULL, "ber", false, false, None).unwrap();
        assert_eq!(plan.request, None);
    }

    #[test]
    fn reconcile_ranks_local_first_and_dedupes() {
        let items = reconcile(
            vec![f("a"), f("b")],
            vec![f("c"), f("a")],
            Some(ResultSet::Features(vec![f("b"), f("d")])),
            &Hooks::default(),
            0,
        );
        let ids: Vec<_> = items
            .iter()
            .filter_map(ResultItem::as_feature)
            .map(|f| f.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn reconcile_filters_then_limits() {
        let hooks = Hooks {
            filter: Some(Rc::new(|f: &Feature| f.id != "b")),
            ..Hooks::default()
        };
        let items = reconcile(
            vec![],
            vec![],
            Some(ResultSet::Features(vec![f("a"), f("b"), f("c"), f("d")])),
            &hooks,
            2,
        );
        let ids: Vec<_> = items.iter().map(ResultItem::label).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn suggestions_follow_local_features() {
        let items = reconcile(
            vec![f("home")],
            vec![],
            Some(ResultSet::Suggestions(vec![Suggestion {
                text: "Berlin".into(),
                place_id: None,
            }])),
            &Hooks::default(),
            5,
        );
        assert_eq!(items.len(), 2);
        assert!(matches!(items[1], ResultItem::Suggestion(_)));
    }
}
