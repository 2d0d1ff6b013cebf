use criterion::{Criterion, criterion_group, criterion_main};
use opsboard::api::{MapCard, MapCardConfig};
use opsboard::core::{ChartProps, ChartSeries, GeoPoint, place};
use opsboard::render::NullMapSurface;
use std::hint::black_box;

fn generated_points(count: usize, distinct: usize) -> Vec<GeoPoint> {
    (0..count)
        .map(|i| {
            let slot = (i % distinct) as f64;
            GeoPoint::new(24.0 + slot * 0.01, 54.0 + slot * 0.02).with_status("validated")
        })
        .collect()
}

fn bench_place_10k_spread(c: &mut Criterion) {
    let points = generated_points(10_000, 10_000);

    c.bench_function("place_10k_spread", |b| {
        b.iter(|| {
            let _ = place(black_box(&points));
        })
    });
}

fn bench_place_10k_stacked(c: &mut Criterion) {
    let points = generated_points(10_000, 50);

    c.bench_function("place_10k_stacked", |b| {
        b.iter(|| {
            let _ = place(black_box(&points));
        })
    });
}

fn bench_map_card_input_2k(c: &mut Criterion) {
    let points = generated_points(2_000, 200);
    let mut card: MapCard<NullMapSurface> =
        MapCard::new("Search Locations", Vec::new(), MapCardConfig::default())
            .expect("map card");
    card.initialize(Some(NullMapSurface::default()))
        .expect("initialize");

    c.bench_function("map_card_input_2k", |b| {
        b.iter(|| {
            card.on_input(black_box(points.clone()))
                .expect("input should render");
        })
    });
}

fn bench_chart_series_fallback(c: &mut Criterion) {
    let props = ChartProps::new("bar", "Validation Logs").with_counters(3.0, 1.0, 2.0, 6.0);

    c.bench_function("chart_series_fallback", |b| {
        b.iter(|| {
            let _ = ChartSeries::from_props(black_box(&props));
        })
    });
}

criterion_group!(
    benches,
    bench_place_10k_spread,
    bench_place_10k_stacked,
    bench_map_card_input_2k,
    bench_chart_series_fallback
);
criterion_main!(benches);
