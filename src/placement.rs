//! Ordered Best-Fit-Decreasing packing with rotation search, plus
//! rearrangement planning for items that don't fit anywhere (§4.4).

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::geometry::{Aabb, Dimensions, Position};
use crate::ids::{ContainerId, ItemId, TEMPORARY_STORAGE};
use crate::plan::{Action, Placement, PlacementPlan, StepSequence};
use crate::scoring::{placement_score, weighted_score};
use crate::space::SpaceModel;
use crate::store::Store;

/// At most this many unplaced items, highest priority first, get a
/// rearrangement attempt; the rest are reported unplaced outright (§4.4).
const MAX_REARRANGEMENT_TARGETS: usize = 5;

struct Candidate {
    container_id: ContainerId,
    rotation: Dimensions,
    position: Position,
    score: f64,
}

pub struct PlacementEngine;

impl PlacementEngine {
    /// Places every item in `candidate_ids` that currently has no location,
    /// attempting rearrangement for the highest-priority leftovers, and
    /// reports the rest as unplaced.
    pub fn plan_placement(store: &mut Store, candidate_ids: &[ItemId], today: NaiveDate) -> PlacementPlan {
        let container_ids: Vec<ContainerId> = store.iter_containers_sorted().map(|c| c.id.clone()).collect();
        let mut models: HashMap<ContainerId, SpaceModel> = container_ids
            .iter()
            .map(|id| {
                let container = store.require_container(id).expect("id taken from this store's own snapshot");
                let existing: Vec<(ItemId, Aabb)> = container
                    .items
                    .iter()
                    .filter_map(|item_id| store.get_item(item_id))
                    .filter_map(|item| {
                        item.current_location
                            .as_ref()
                            .map(|loc| (item.id.clone(), Aabb::new(loc.position, loc.rotation)))
                    })
                    .collect();
                (id.clone(), SpaceModel::new(container.dims, existing))
            })
            .collect();

        let mut to_place: Vec<ItemId> = candidate_ids
            .iter()
            .filter(|id| store.get_item(id).map(|i| i.current_location.is_none()).unwrap_or(false))
            .cloned()
            .collect();
        to_place.sort_by(|a, b| {
            let ia = store.require_item(a).expect("filtered above");
            let ib = store.require_item(b).expect("filtered above");
            let sa = weighted_score(ia.priority, ia.days_until_expiry(today).unwrap_or(i64::MAX), ia.usage_limit);
            let sb = weighted_score(ib.priority, ib.days_until_expiry(today).unwrap_or(i64::MAX), ib.usage_limit);
            sb.partial_cmp(&sa)
                .unwrap_or(Ordering::Equal)
                .then_with(|| ib.volume().partial_cmp(&ia.volume()).unwrap_or(Ordering::Equal))
        });

        let mut placements = Vec::new();
        let mut unplaced = Vec::new();

        for item_id in &to_place {
            let item = store.require_item(item_id).expect("filtered above").clone();
            let best = Self::best_candidate(store, &models, &container_ids, &item);
            match best {
                Some(candidate) => {
                    store
                        .attach(item_id, &candidate.container_id, candidate.position, candidate.rotation)
                        .expect("find_position/fits_within already checked bounds and fit");
                    models
                        .get_mut(&candidate.container_id)
                        .expect("container_id came from models' own keys")
                        .place(item_id.clone(), candidate.position, candidate.rotation);
                    placements.push(Placement {
                        item_id: item_id.clone(),
                        container_id: candidate.container_id,
                        position: candidate.position,
                        rotation: candidate.rotation,
                    });
                }
                None => unplaced.push(item_id.clone()),
            }
        }

        unplaced.sort_by_key(|id| std::cmp::Reverse(store.get_item(id).map(|i| i.priority).unwrap_or(0)));
        let mut sequence = StepSequence::new();
        let mut still_unplaced = Vec::new();
        for (i, target_id) in unplaced.into_iter().enumerate() {
            if i >= MAX_REARRANGEMENT_TARGETS {
                still_unplaced.push(target_id);
                continue;
            }
            match Self::try_rearrange(store, &mut models, &container_ids, &target_id, &mut sequence) {
                Some(placement) => placements.push(placement),
                None => still_unplaced.push(target_id),
            }
        }

        PlacementPlan { placements, rearrangements: sequence.into_steps(), unplaced: still_unplaced }
    }

    /// Scores every (container, rotation) combination for `item` and keeps
    /// the best, per the ordering in §4.4 step 2.
    fn best_candidate(
        store: &Store,
        models: &HashMap<ContainerId, SpaceModel>,
        container_ids: &[ContainerId],
        item: &crate::item::Item,
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for container_id in container_ids {
            let Some(container) = store.get_container(container_id) else { continue };
            if container.is_full() {
                continue;
            }
            let zone_match = container.zone == item.preferred_zone;
            let Some(model) = models.get(container_id) else { continue };
            for rotation in item.native_dims.rotations() {
                if !rotation.fits_within(&container.dims) {
                    continue;
                }
                let Some(position) = model.find_position(rotation) else {
                    continue;
                };
                let bbox = Aabb::new(position, rotation);
                let depth = model.retrieval_depth(bbox, None);
                let score = placement_score(zone_match, item.priority, depth);
                if best.as_ref().map_or(true, |b| score > b.score) {
                    best = Some(Candidate { container_id: container_id.clone(), rotation, position, score });
                }
            }
        }
        best
    }

    /// Attempts to free `target_volume` worth of space in the target's
    /// preferred zone by moving aside lower-priority items, then places the
    /// target. Returns `None` (no mutation beyond what was already
    /// committed for moved-aside items) if not enough volume could be
    /// freed — §4.4 "failure semantics".
    fn try_rearrange(
        store: &mut Store,
        models: &mut HashMap<ContainerId, SpaceModel>,
        container_ids: &[ContainerId],
        target_id: &ItemId,
        sequence: &mut StepSequence,
    ) -> Option<Placement> {
        let target = store.get_item(target_id)?.clone();
        let target_volume = target.volume();

        let mut candidates: Vec<ItemId> = store
            .iter_items_sorted()
            .filter(|candidate| {
                candidate.id != *target_id
                    && candidate.priority < target.priority
                    && candidate
                        .current_location
                        .as_ref()
                        .and_then(|loc| store.get_container(&loc.container_id))
                        .map(|c| c.zone == target.preferred_zone)
                        .unwrap_or(false)
            })
            .map(|candidate| candidate.id.clone())
            .collect();
        candidates.sort_by(|a, b| {
            let ia = store.require_item(a).expect("filtered above");
            let ib = store.require_item(b).expect("filtered above");
            let da = ia.priority as f64 / ia.volume().max(0.1);
            let db = ib.priority as f64 / ib.volume().max(0.1);
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        });

        let mut chosen = Vec::new();
        let mut freed = 0.0;
        for candidate_id in candidates {
            if freed >= target_volume {
                break;
            }
            let volume = store.require_item(&candidate_id).expect("filtered above").volume();
            freed += volume;
            chosen.push(candidate_id);
        }
        if freed < target_volume {
            return None;
        }

        for candidate_id in &chosen {
            let candidate = store.require_item(candidate_id).expect("just selected").clone();
            let loc = candidate.current_location.clone()?;
            let origin = loc.container_id.clone();
            let volume = candidate.volume();

            let alt = container_ids.iter().find(|cid| {
                **cid != origin
                    && store
                        .get_container(cid)
                        .map(|c| c.zone != target.preferred_zone && !c.is_full() && c.available_space() >= volume)
                        .unwrap_or(false)
            });

            match alt {
                Some(alt_id) => {
                    let position = models.get(alt_id)?.find_position(loc.rotation)?;
                    sequence.push(Action::Move, candidate_id.clone(), Some(origin.clone()), Some(alt_id.clone()), Some(position));
                    store.detach(candidate_id).ok()?;
                    store.attach(candidate_id, alt_id, position, loc.rotation).ok()?;
                    models.get_mut(&origin)?.remove(candidate_id);
                    models.get_mut(alt_id)?.place(candidate_id.clone(), position, loc.rotation);
                }
                None => {
                    let temp = ContainerId::from(TEMPORARY_STORAGE);
                    sequence.push(Action::Move, candidate_id.clone(), Some(origin.clone()), Some(temp), None);
                    store.detach(candidate_id).ok()?;
                    models.get_mut(&origin)?.remove(candidate_id);
                }
            }
        }

        for container_id in container_ids {
            let container = store.get_container(container_id)?;
            if container.zone != target.preferred_zone || container.is_full() {
                continue;
            }
            for rotation in target.native_dims.rotations() {
                if !rotation.fits_within(&container.dims) {
                    continue;
                }
                if let Some(position) = models.get(container_id)?.find_position(rotation) {
                    store.attach(target_id, container_id, position, rotation).ok()?;
                    models.get_mut(container_id)?.place(target_id.clone(), position, rotation);
                    sequence.push(Action::Place, target_id.clone(), None, Some(container_id.clone()), Some(position));
                    return Some(Placement {
                        item_id: target_id.clone(),
                        container_id: container_id.clone(),
                        position,
                        rotation,
                    });
                }
            }
        }
        None
    }
}
