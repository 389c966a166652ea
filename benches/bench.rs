// Criterion benchmarks for Alimenta Assist

use alimenta_assist::core::{distance::{bounding_box, haversine_distance}, Assistant, Locator};
use alimenta_assist::models::{
    Coordinates, EntityKind, FoodDetails, LocateQuery, LocationDetails, MapLocation,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn make_location(id: usize, lat: f64, lon: f64) -> MapLocation {
    MapLocation {
        id: id.to_string(),
        kind: EntityKind::Food,
        title: format!("Mercado {}", id),
        description: "5 kg - Granos".to_string(),
        latitude: Some(lat),
        longitude: Some(lon),
        address: format!("Calle {} #10-20", id),
        date: None,
        details: LocationDetails::Food(FoodDetails {
            quantity: 5.0,
            unit: "kg".to_string(),
            expiry_date: None,
            donor_name: None,
            category: Some("Granos".to_string()),
        }),
    }
}

fn make_snapshot(count: usize) -> Vec<MapLocation> {
    (0..count)
        .map(|i| {
            let lat_offset = (i as f64 * 0.001) % 0.5;
            let lon_offset = (i as f64 * 0.001) % 0.5;
            make_location(i, 4.61 + lat_offset, -74.08 + lon_offset)
        })
        .collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(4.7110),
                black_box(-74.0721),
                black_box(6.2442),
                black_box(-75.5812),
            )
        });
    });
}

fn bench_bounding_box(c: &mut Criterion) {
    c.bench_function("bounding_box_calculation", |b| {
        b.iter(|| bounding_box(black_box(4.7110), black_box(-74.0721), black_box(25.0)));
    });
}

fn bench_assistant_reply(c: &mut Criterion) {
    let assistant = Assistant::with_default_rules();

    c.bench_function("assistant_reply_match", |b| {
        b.iter(|| assistant.reply(black_box("Quisiera donar alimentos esta semana")));
    });

    c.bench_function("assistant_reply_fallback", |b| {
        b.iter(|| assistant.reply(black_box("mensaje sin ninguna palabra clave útil")));
    });
}

fn bench_locate(c: &mut Criterion) {
    let locator = Locator::new();
    let query = LocateQuery {
        search: "mercado".to_string(),
        kind: Some(EntityKind::Food),
        origin: Some(Coordinates { latitude: 4.61, longitude: -74.08 }),
        radius_km: None,
        limit: 20,
    };

    let mut group = c.benchmark_group("locate");

    for snapshot_size in [10, 50, 100, 500, 1000].iter() {
        let snapshot = make_snapshot(*snapshot_size);

        group.bench_with_input(
            BenchmarkId::new("filter_and_sort", snapshot_size),
            snapshot_size,
            |b, _| {
                b.iter(|| locator.locate(black_box(&query), black_box(snapshot.clone())));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_bounding_box,
    bench_assistant_reply,
    bench_locate
);

criterion_main!(benches);
