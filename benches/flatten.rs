//! Benchmarks for turning database snapshots into table rows and menu
//! sections.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use menu_tui::state::{flatten_items, menu_sections};
use menu_tui::store::items_from_snapshot;
use serde_json::{json, Value};

fn snapshot(items: usize) -> Value {
    let mut map = serde_json::Map::new();
    for i in 0..items {
        map.insert(
            format!("-N{:05}", i),
            json!({
                "category": format!("Category {}", i % 8),
                "name": format!("Item {}", i),
                "is_single_sized": false,
                "sizes": [
                    { "type": "Small", "price": 40, "cost": 15, "stocks": 12 },
                    { "type": "Medium", "price": 50, "cost": 18, "stocks": 7 },
                    { "type": "Large", "price": 60, "cost": 20, "stocks": 3 }
                ]
            }),
        );
    }
    Value::Object(map)
}

fn bench_items_from_snapshot(c: &mut Criterion) {
    let value = snapshot(500);
    c.bench_function("items_from_snapshot_500", |b| {
        b.iter(|| items_from_snapshot(black_box(&value)))
    });
}

fn bench_flatten_items(c: &mut Criterion) {
    let items = items_from_snapshot(&snapshot(500));
    c.bench_function("flatten_items_500", |b| {
        b.iter(|| flatten_items(black_box(&items)))
    });
}

fn bench_menu_sections(c: &mut Criterion) {
    let items = items_from_snapshot(&snapshot(500));
    c.bench_function("menu_sections_500", |b| {
        b.iter(|| menu_sections(black_box(&items)))
    });
}

criterion_group!(
    benches,
    bench_items_from_snapshot,
    bench_flatten_items,
    bench_menu_sections
);
criterion_main!(benches);
