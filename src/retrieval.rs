//! Retrieval planning: blocking-item detection and move-aside sequencing
//! (§4.5).
//!
//! Blocking uses its own predicate, distinct from [`crate::space::SpaceModel::retrieval_depth`]:
//! an item blocks the target if it sits at the same depth or nearer the open
//! face and its x/z projection overlaps the target's. `retrieval_depth` is
//! reused only to *order* the blockers once found, not to find them.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::geometry::Aabb;
use crate::ids::{ContainerId, ItemId, TEMPORARY_STORAGE};
use crate::plan::{Action, ItemLocation, RetrievalPlan, StepSequence};
use crate::space::SpaceModel;
use crate::store::Store;

pub struct RetrievalPlanner;

/// Resident items of `container_id`, together with the subset that block
/// `target_id`'s bounding box (§4.5 "Blocking detection"), sorted ascending
/// by retrieval-depth (cheapest-to-clear first).
fn find_blockers(
    store: &Store,
    container_id: &ContainerId,
    target_id: &ItemId,
    target_bbox: Aabb,
) -> Option<Vec<(ItemId, Aabb)>> {
    let container = store.get_container(container_id)?;
    let mut model = SpaceModel::new(container.dims, std::iter::empty());
    let mut resident: Vec<(ItemId, Aabb)> = Vec::new();
    for resident_id in container.items.iter() {
        if let Some(resident_item) = store.get_item(resident_id) {
            if let Some(resident_loc) = &resident_item.current_location {
                let bbox = Aabb::new(resident_loc.position, resident_loc.rotation);
                resident.push((resident_id.clone(), bbox));
            }
        }
    }
    for (id, bbox) in &resident {
        model.place(id.clone(), bbox.min, bbox.dims);
    }

    // An item blocks the target if it sits at or nearer the open face
    // (smaller-or-equal y) and its x/z projection overlaps the target's —
    // it stands somewhere in the corridor the target must travel through
    // to reach y=0.
    let mut blockers: Vec<(ItemId, Aabb)> = resident
        .iter()
        .filter(|(id, bbox)| {
            *id != target_id
                && bbox.min.y <= target_bbox.min.y
                && bbox.overlaps_x(&target_bbox)
                && bbox.overlaps_z(&target_bbox)
        })
        .cloned()
        .collect();

    // Ascending by retrieval-depth: cheapest-to-clear blockers move first.
    blockers.sort_by_key(|(id, bbox)| model.retrieval_depth(*bbox, Some(id)));
    Some(blockers)
}

impl RetrievalPlanner {
    /// Plans retrieval of `item_id`. When `execute` is false this is a pure
    /// preview: the store is read but never mutated. When true, the target
    /// item is detached and its usage/waste state updated per §4.5's "state
    /// mutation on actual retrieve" — blockers are not mutated, since they
    /// end up back at their origin by the end of the plan.
    pub fn plan_retrieval(store: &mut Store, item_id: &ItemId, execute: bool) -> RetrievalPlan {
        let Some(item) = store.get_item(item_id) else {
            return RetrievalPlan::default();
        };
        let Some(loc) = item.current_location.clone() else {
            return RetrievalPlan::default();
        };
        let origin = loc.container_id.clone();
        let target_bbox = Aabb::new(loc.position, loc.rotation);

        let Some(container) = store.get_container(&origin) else {
            return RetrievalPlan::default();
        };
        let origin_zone = container.zone.clone();

        let Some(blockers) = find_blockers(store, &origin, item_id, target_bbox) else {
            return RetrievalPlan::default();
        };

        let mut available: HashMap<ContainerId, f64> =
            store.iter_containers().map(|c| (c.id.clone(), c.available_space())).collect();

        let mut temp_assignments = Vec::with_capacity(blockers.len());
        for (blocker_id, bbox) in &blockers {
            let blocker_volume = bbox.dims.volume();
            let mut any_candidate: Option<ContainerId> = None;
            let mut same_zone_candidate: Option<ContainerId> = None;
            for candidate in store.iter_containers_sorted() {
                if candidate.id == origin {
                    continue;
                }
                let avail = available.get(&candidate.id).copied().unwrap_or(0.0);
                if avail + 1e-6 < blocker_volume {
                    continue;
                }
                if any_candidate.is_none() {
                    any_candidate = Some(candidate.id.clone());
                }
                if candidate.zone == origin_zone && same_zone_candidate.is_none() {
                    same_zone_candidate = Some(candidate.id.clone());
                }
            }
            let temp = same_zone_candidate.or(any_candidate);
            let temp_id = match &temp {
                Some(cid) => cid.clone(),
                None => ContainerId::from(TEMPORARY_STORAGE),
            };
            if let Some(real) = &temp {
                if let Some(space) = available.get_mut(real) {
                    *space -= blocker_volume;
                }
            }
            temp_assignments.push((blocker_id.clone(), temp_id));
        }

        let mut sequence = StepSequence::new();
        for (blocker_id, temp_id) in &temp_assignments {
            sequence.push(Action::Move, blocker_id.clone(), Some(origin.clone()), Some(temp_id.clone()), None);
        }
        sequence.push(Action::Retrieve, item_id.clone(), Some(origin.clone()), None, None);
        for (blocker_id, temp_id) in temp_assignments.iter().rev() {
            sequence.push(Action::Move, blocker_id.clone(), Some(temp_id.clone()), Some(origin.clone()), None);
        }

        if execute {
            if let Some(item) = store.get_item_mut(item_id) {
                if item.usage_limit > 0 {
                    item.usage_limit -= 1;
                    if item.usage_limit == 0 {
                        item.is_waste = true;
                    }
                }
            }
            let _ = store.detach(item_id);
        }

        RetrievalPlan { found: true, steps: sequence.into_steps() }
    }

    /// Detailed location for one item: where it sits and which other items
    /// block its retrieval. `None` if the item is absent or unlocated.
    pub fn get_item_location(store: &Store, item_id: &ItemId) -> Option<ItemLocation> {
        let item = store.get_item(item_id)?;
        let loc = item.current_location.clone()?;
        let target_bbox = Aabb::new(loc.position, loc.rotation);
        let blockers = find_blockers(store, &loc.container_id, item_id, target_bbox)?;
        Some(ItemLocation {
            item_id: item_id.clone(),
            name: item.name.clone(),
            container_id: loc.container_id,
            position: loc.position,
            rotation: loc.rotation,
            retrieval_steps: blockers.len(),
            blocked_by: blockers.into_iter().map(|(id, _)| id).collect(),
        })
    }

    /// Finds items by exact ID or case-insensitive substring of name,
    /// ranked by ease of retrieval, then soonest expiry, then priority
    /// (supplemental search surface retained from the source's retrieval
    /// service; not part of the four core decision engines but a cheap,
    /// read-only query over the same store).
    pub fn search_items(store: &Store, query: &str, today: NaiveDate) -> Vec<ItemLocation> {
        let mut results = Vec::new();
        let mut seen = std::collections::HashSet::new();

        if let Some(item) = store.get_item(&ItemId::from(query)) {
            if let Some(loc) = Self::get_item_location(store, &item.id) {
                seen.insert(item.id.clone());
                results.push(loc);
            }
        }

        let needle = query.to_lowercase();
        for item in store.iter_items_sorted() {
            if seen.contains(&item.id) || !item.name.to_lowercase().contains(&needle) {
                continue;
            }
            if let Some(loc) = Self::get_item_location(store, &item.id) {
                seen.insert(item.id.clone());
                results.push(loc);
            }
        }

        results.sort_by(|a, b| {
            let ia = store.require_item(&a.item_id).expect("just looked up");
            let ib = store.require_item(&b.item_id).expect("just looked up");
            let da = ia.days_until_expiry(today).unwrap_or(365);
            let db = ib.days_until_expiry(today).unwrap_or(365);
            (a.retrieval_steps, da, std::cmp::Reverse(ia.priority)).cmp(&(b.retrieval_steps, db, std::cmp::Reverse(ib.priority)))
        });
        results
    }
}
