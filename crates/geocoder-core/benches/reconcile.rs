// crates/geocoder-core/benches/reconcile.rs
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use geocoder_core::hooks::Hooks;
use geocoder_core::query::reconcile;
use geocoder_core::{Feature, LngLat, LocalIndex, ResultSet};
use std::hint::black_box;
use std::rc::Rc;

fn features(prefix: &str, n: usize) -> Vec<Feature> {
    (0..n)
        .map(|i| {
            Feature::point(
                format!("{prefix}.{i}"),
                format!("Place {i}"),
                LngLat::new(i as f64 * 0.01, 45.0),
            )
            .with_place_name(format!("Place {i}, Region {}, Country", i % 7))
        })
        .collect()
}

fn bench_reconcile(c: &mut Criterion) {
    let local = features("local", 20);
    // half the backend ids collide with local ones
    let mut backend = features("local", 10);
    backend.extend(features("api", 200));
    let hooks = Hooks {
        filter: Some(Rc::new(|f: &Feature| !f.id.ends_with('3'))),
        ..Hooks::default()
    };

    c.bench_function("reconcile_220_limit_5", |b| {
        b.iter_batched(
            || (local.clone(), backend.clone()),
            |(local, backend)| {
                black_box(reconcile(
                    local,
                    Vec::new(),
                    Some(ResultSet::Features(backend)),
                    &hooks,
                    5,
                ))
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("reconcile_220_unlimited", |b| {
        b.iter_batched(
            || (local.clone(), backend.clone()),
            |(local, backend)| {
                black_box(reconcile(
                    local,
                    Vec::new(),
                    Some(ResultSet::Features(backend)),
                    &Hooks::default(),
                    0,
                ))
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_local_index(c: &mut Criterion) {
    let index = LocalIndex::new(features("gaz", 5_000));
    c.bench_function("local_index_prefix", |b| {
        b.iter(|| black_box(index.find(black_box("place 12"))))
    });
}

criterion_group!(benches, bench_reconcile, bench_local_index);
criterion_main!(benches);
