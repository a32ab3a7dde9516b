//! Basic usage example for geocoder-rs
//!
//! Runs the control headless against an in-memory backend and a local
//! gazetteer, printing the events it emits.

use async_trait::async_trait;
use futures::executor::block_on;
use geocoder_core::prelude::*;
use std::rc::Rc;

/// A backend that knows three cities.
struct Cities(Vec<Feature>);

#[async_trait(?Send)]
impl GeocoderApi for Cities {
    async fn forward_geocode(&self, config: &ApiConfig) -> Result<FeatureCollection> {
        let query = fold_key(config.query_text().unwrap_or_default());
        let limit = config.limit.unwrap_or(usize::MAX);
        Ok(self
            .0
            .iter()
            .filter(|f| fold_key(&f.place_name).contains(&query))
            .take(limit)
            .cloned()
            .collect::<Vec<_>>()
            .into())
    }
}

fn city(id: &str, text: &str, country: &str, lng: f64, lat: f64) -> Feature {
    Feature::point(id, text, LngLat::new(lng, lat))
        .with_place_name(format!("{text}, {country}"))
        .with_place_type("place")
}

fn main() -> Result<()> {
    println!("=== geocoder-rs Basic Usage ===\n");

    let api = Cities(vec![
        city("place.1", "Zürich", "Switzerland", 8.54, 47.37),
        city("place.2", "Zug", "Switzerland", 8.52, 47.17),
        city("place.3", "Zagreb", "Croatia", 15.98, 45.81),
    ]);
    let gazetteer = LocalIndex::new(vec![city("poi.1", "Zürichsee", "Switzerland", 8.67, 47.25)]);

    let geocoder = Geocoder::builder(Rc::new(api))
        .options(ControlOptions {
            limit: 3,
            ..ControlOptions::default()
        })
        .local_geocoder(Rc::new(gazetteer))
        .build();

    geocoder.on(EventKind::Results, |event| {
        if let GeocoderEvent::Results { query, results, .. } = event {
            println!("results for {query:?}:");
            for (i, item) in results.iter().enumerate() {
                println!("  {}. {}", i + 1, item.label());
            }
        }
    });
    geocoder.on(EventKind::Result, |event| {
        if let GeocoderEvent::Result { result } = event {
            println!("selected: {}", result.place_name);
        }
    });

    // --- Example 1: search and pick the best match ---
    println!("--- Example 1: query(\"zurich\") ---");
    block_on(geocoder.query("zurich"));
    println!();

    // --- Example 2: search without selecting, then pick a row ---
    println!("--- Example 2: Enter, then row 2 ---");
    geocoder.clear();
    let _ = geocoder.on_input("z");
    let _ = geocoder.on_input("zu");
    block_on(geocoder.on_key(Key::Enter));
    block_on(geocoder.select(1));
    println!();

    // --- Example 3: reverse input without a reverse-capable backend ---
    println!("--- Example 3: coordinates ---");
    let mut options = geocoder.options();
    options.reverse_geocode = true;
    let reverse = Geocoder::builder(geocoder.geocoder_api())
        .options(options)
        .build();
    reverse.on(EventKind::Error, |event| {
        if let GeocoderEvent::Error { error } = event {
            println!("error: {error}");
        }
    });
    block_on(reverse.query("47.37, 8.54"));

    Ok(())
}
