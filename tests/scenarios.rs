//! Concrete scenarios (§8).

use chrono::NaiveDate;

use stowage_core::container::Container;
use stowage_core::geometry::{Dimensions, Position};
use stowage_core::ids::{ContainerId, ItemId};
use stowage_core::item::{ExpiryDate, Item};
use stowage_core::Core;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()
}

fn item(id: &str, w: f64, d: f64, h: f64, priority: i32, expiry: ExpiryDate, zone: &str) -> Item {
    Item::new(ItemId::from(id), id.to_string(), Dimensions::new(w, d, h), 1.0, priority, expiry, 10, zone.to_string())
        .unwrap()
}

#[test]
fn s1_simple_fit() {
    let mut core = Core::new(today());
    core.add_container(Container::new(ContainerId::from("C1"), "Z".into(), Dimensions::new(100.0, 100.0, 100.0)).unwrap());
    core.add_item(item("A", 30.0, 30.0, 30.0, 50, ExpiryDate::None, "Z"));

    let plan = core.plan_placement(&[ItemId::from("A")]).unwrap();

    assert_eq!(plan.placements.len(), 1);
    assert!(plan.unplaced.is_empty());
    assert!(plan.rearrangements.is_empty());
    let placement = &plan.placements[0];
    assert_eq!(placement.container_id, ContainerId::from("C1"));
    assert_eq!(placement.position, Position::new(0.0, 0.0, 0.0));
    assert_eq!(placement.rotation, Dimensions::new(30.0, 30.0, 30.0));
}

#[test]
fn s2_rotation_required() {
    let mut core = Core::new(today());
    core.add_container(Container::new(ContainerId::from("C2"), "Z".into(), Dimensions::new(50.0, 50.0, 200.0)).unwrap());
    core.add_item(item("B", 180.0, 20.0, 20.0, 80, ExpiryDate::None, "Z"));

    let plan = core.plan_placement(&[ItemId::from("B")]).unwrap();

    assert_eq!(plan.placements.len(), 1);
    let placement = &plan.placements[0];
    assert_eq!(placement.position, Position::new(0.0, 0.0, 0.0));
    assert_eq!(placement.rotation, Dimensions::new(20.0, 20.0, 180.0));
}

#[test]
fn s3_retrieval_blocking() {
    let mut core = Core::new(today());
    core.add_container(Container::new(ContainerId::from("C3"), "Z".into(), Dimensions::new(100.0, 100.0, 100.0)).unwrap());
    core.add_item(item("X", 20.0, 20.0, 20.0, 50, ExpiryDate::None, "Z"));
    core.add_item(item("Y", 20.0, 50.0, 20.0, 50, ExpiryDate::None, "Z"));

    core.store_mut()
        .attach(&ItemId::from("X"), &ContainerId::from("C3"), Position::new(0.0, 50.0, 0.0), Dimensions::new(20.0, 20.0, 20.0))
        .unwrap();
    core.store_mut()
        .attach(&ItemId::from("Y"), &ContainerId::from("C3"), Position::new(0.0, 0.0, 0.0), Dimensions::new(20.0, 50.0, 20.0))
        .unwrap();

    let plan = core.preview_retrieval(&ItemId::from("X"));

    assert!(plan.found);
    assert_eq!(plan.steps.len(), 3);
    assert_eq!(plan.steps[0].step, 1);
    assert_eq!(plan.steps[0].item_id, ItemId::from("Y"));
    assert_eq!(plan.steps[1].step, 2);
    assert_eq!(plan.steps[1].item_id, ItemId::from("X"));
    assert_eq!(plan.steps[2].step, 3);
    assert_eq!(plan.steps[2].item_id, ItemId::from("Y"));

    // Preview must not mutate the store.
    assert!(core.get_item(&ItemId::from("X")).unwrap().current_location.is_some());
}

#[test]
fn s4_expiry_simulation() {
    let mut core = Core::new(today());
    core.add_item(item("P", 10.0, 10.0, 10.0, 50, ExpiryDate::parse("2030-01-05").unwrap(), "Z"));

    let result = core.simulate(10, &[]);

    assert_eq!(result.new_date, NaiveDate::from_ymd_opt(2030, 1, 11).unwrap());
    assert_eq!(result.expired, vec![ItemId::from("P")]);
    assert!(core.get_item(&ItemId::from("P")).unwrap().is_waste);
}

#[test]
fn s5_usage_depletion() {
    let mut core = Core::new(today());
    let mut u = item("U", 10.0, 10.0, 10.0, 50, ExpiryDate::None, "Z");
    u.usage_limit = 1;
    core.add_item(u);

    let result = core.simulate(0, &[ItemId::from("U")]);

    assert_eq!(result.usage_depleted, vec![ItemId::from("U")]);
    let u = core.get_item(&ItemId::from("U")).unwrap();
    assert_eq!(u.usage_limit, 0);
    assert!(u.is_waste);
}

#[test]
fn s6_knapsack_return() {
    use stowage_core::plan::{WasteItemRecord, WasteReport};
    use stowage_core::waste::{WasteCollector, WasteReason};

    let report = WasteReport {
        items: vec![
            WasteItemRecord {
                item_id: ItemId::from("W1"),
                name: "W1".into(),
                reason: WasteReason::Expired,
                container_id: Some(ContainerId::from("C1")),
                position: None,
                mass: 10.0,
            },
            WasteItemRecord {
                item_id: ItemId::from("W2"),
                name: "W2".into(),
                reason: WasteReason::ExpiresInDays(3),
                container_id: Some(ContainerId::from("C1")),
                position: None,
                mass: 30.0,
            },
            WasteItemRecord {
                item_id: ItemId::from("W3"),
                name: "W3".into(),
                reason: WasteReason::ExpiresInDays(4),
                container_id: Some(ContainerId::from("C1")),
                position: None,
                mass: 15.0,
            },
        ],
        total_mass: 55.0,
    };

    let plan = WasteCollector::plan_waste_return(&report, 40.0, &ContainerId::from("undock"));
    let returned: std::collections::HashSet<ItemId> = plan
        .steps
        .iter()
        .filter(|s| s.action == stowage_core::plan::Action::Remove)
        .map(|s| s.item_id.clone())
        .collect();

    assert_eq!(returned, [ItemId::from("W1"), ItemId::from("W2")].into_iter().collect());
}
