use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};

use stowage_core::container::Container;
use stowage_core::geometry::Dimensions;
use stowage_core::ids::ContainerId;
use stowage_core::item::{ExpiryDate, Item};
use stowage_core::Core;

fn build_core(items: usize) -> Core {
    let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let mut core = Core::new(today);
    core.add_container(
        Container::new(ContainerId::from("undock"), "dock".to_string(), Dimensions::new(200.0, 200.0, 200.0)).unwrap(),
    );
    for i in 0..items {
        let id = stowage_core::ids::ItemId::from(format!("item-{i}"));
        core.add_item(
            Item::new(
                id,
                format!("Item {i}"),
                Dimensions::new(10.0, 10.0, 10.0),
                0.5 + (i % 7) as f64,
                1 + (i % 100) as i32,
                ExpiryDate::None,
                if i % 4 == 0 { 0 } else { 10 },
                "dock".to_string(),
            )
            .unwrap(),
        );
    }
    core
}

fn bench_waste(c: &mut Criterion) {
    c.bench_function("identify_waste + plan_waste_return/2000 items", |b| {
        b.iter_batched(
            || build_core(2000),
            |mut core| {
                let report = core.identify_waste();
                core.plan_waste_return(&report, 500.0, &ContainerId::from("undock")).unwrap()
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_waste);
criterion_main!(benches);
