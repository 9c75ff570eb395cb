use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};

use stowage_core::container::Container;
use stowage_core::geometry::Dimensions;
use stowage_core::ids::{ContainerId, ItemId};
use stowage_core::item::{ExpiryDate, Item};
use stowage_core::Core;

fn build_core(containers: usize, items: usize) -> (Core, Vec<ItemId>) {
    let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let mut core = Core::new(today);
    for c in 0..containers {
        let id = ContainerId::from(format!("container-{c}"));
        let zone = if c % 2 == 0 { "A" } else { "B" };
        core.add_container(Container::new(id, zone.to_string(), Dimensions::new(100.0, 100.0, 100.0)).unwrap());
    }
    let mut ids = Vec::with_capacity(items);
    for i in 0..items {
        let id = ItemId::from(format!("item-{i}"));
        ids.push(id.clone());
        let zone = if i % 2 == 0 { "A" } else { "B" };
        core.add_item(
            Item::new(
                id,
                format!("Item {i}"),
                Dimensions::new(10.0, 10.0, 10.0),
                1.0 + (i % 5) as f64,
                1 + (i % 100) as i32,
                ExpiryDate::None,
                10,
                zone.to_string(),
            )
            .unwrap(),
        );
    }
    (core, ids)
}

fn bench_placement(c: &mut Criterion) {
    c.bench_function("plan_placement/200 containers x 500 items", |b| {
        b.iter_batched(
            || build_core(200, 500),
            |(mut core, ids)| core.plan_placement(&ids).unwrap(),
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_placement);
criterion_main!(benches);
