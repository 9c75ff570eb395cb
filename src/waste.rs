//! Waste classification and weight-bounded return planning (§4.6).
//!
//! Classification (`identify_waste`) is the only place besides a direct
//! ingest edit that flips `Item::is_waste` based on a rule rather than an
//! explicit caller request — see [`crate::item::Item::effective_priority`]
//! for why that function stays pure.

use std::fmt;

use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use serde::{Serialize, Serializer};

use crate::ids::{ContainerId, ItemId};
use crate::plan::{Action, StepSequence, WasteItemRecord, WasteReport, WasteReturnPlan};
use crate::scoring::{knapsack_value, waste_urgency};
use crate::store::Store;

/// Why an item was classified as waste. Serializes to the exact strings the
/// wire format expects (§6 "Waste items"); [`WasteReason::ExpiresInDays`]
/// and [`WasteReason::UsesRemaining`] carry the count used in that string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasteReason {
    Expired,
    OutOfUses,
    ManuallyMarked,
    ExpiresInDays(u32),
    UsesRemaining(u32),
}

impl fmt::Display for WasteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WasteReason::Expired => write!(f, "Expired"),
            WasteReason::OutOfUses => write!(f, "Out of Uses"),
            WasteReason::ManuallyMarked => write!(f, "Manually Marked"),
            WasteReason::ExpiresInDays(k) => write!(f, "Expires in {k} days"),
            WasteReason::UsesRemaining(k) => write!(f, "{k} uses remaining"),
        }
    }
}

impl Serialize for WasteReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Applies the classification table of §4.6 to a single item, given today's
/// logical date. Does not mutate the item; the caller flips `is_waste`.
fn classify(item: &crate::item::Item, today: NaiveDate) -> Option<WasteReason> {
    if item.is_waste {
        return Some(if item.usage_limit == 0 {
            WasteReason::OutOfUses
        } else if item.is_expired(today) {
            WasteReason::Expired
        } else {
            WasteReason::ManuallyMarked
        });
    }

    if let Some(days) = item.days_until_expiry(today) {
        if days <= 0 {
            return Some(WasteReason::Expired);
        }
        if days <= 5 {
            return Some(WasteReason::ExpiresInDays(days as u32));
        }
    }

    if item.usage_limit == 0 {
        return Some(WasteReason::OutOfUses);
    }
    if item.usage_limit <= 3 {
        return Some(WasteReason::UsesRemaining(item.usage_limit));
    }

    None
}

pub struct WasteCollector;

impl WasteCollector {
    /// Classifies every item in the store, marking `is_waste` on any newly
    /// (or still) qualifying item, and returns the waste list sorted by
    /// urgency descending (§4.3, §4.6).
    pub fn identify_waste(store: &mut Store, today: NaiveDate) -> WasteReport {
        let ids: Vec<ItemId> = store.iter_items_sorted().map(|item| item.id.clone()).collect();

        let mut records = Vec::new();
        let mut total_mass = 0.0;
        for id in ids {
            let item = store.get_item_mut(&id).expect("id taken from this store's own snapshot");
            let Some(reason) = classify(item, today) else {
                continue;
            };
            item.is_waste = true;

            let (container_id, position) = match &item.current_location {
                Some(loc) => (Some(loc.container_id.clone()), Some(loc.position)),
                None => (None, None),
            };
            total_mass += item.mass;
            records.push(WasteItemRecord {
                item_id: item.id.clone(),
                name: item.name.clone(),
                reason,
                container_id,
                position,
                mass: item.mass,
            });
        }

        records.sort_by(|a, b| {
            let pa = store.get_item(&a.item_id).map(|i| i.priority).unwrap_or(0);
            let pb = store.get_item(&b.item_id).map(|i| i.priority).unwrap_or(0);
            let ua = waste_urgency(&a.reason, pa, a.mass);
            let ub = waste_urgency(&b.reason, pb, b.mass);
            ub.partial_cmp(&ua).unwrap_or(std::cmp::Ordering::Equal)
        });

        WasteReport { items: records, total_mass }
    }

    /// Selects a weight-bounded subset of `report.items` to return via 0/1
    /// knapsack DP (§4.6) and emits the remove/place step sequence, grouped
    /// by source container and ordered front-first, top-first within a
    /// group.
    pub fn plan_waste_return(
        report: &WasteReport,
        max_weight: f64,
        undocking_container_id: &ContainerId,
    ) -> WasteReturnPlan {
        if report.items.is_empty() || max_weight <= 0.0 {
            return WasteReturnPlan::default();
        }

        const SCALE: f64 = 100.0;
        let capacity = (max_weight * SCALE).floor().max(0.0) as usize;
        let n = report.items.len();
        let weights: Vec<usize> = report.items.iter().map(|w| (w.mass * SCALE).round() as usize).collect();
        let values: Vec<f64> = report
            .items
            .iter()
            .enumerate()
            .map(|(rank, w)| knapsack_value(rank, n, w.mass))
            .collect();

        // Classic 0/1 knapsack DP table, dp[i][w] = best value using the
        // first i items within weight w. Kept as a full 2D table rather than
        // the 1D rolling array so selection reconstruction is a plain
        // backward walk with no auxiliary bookkeeping.
        let mut dp = vec![vec![0.0f64; capacity + 1]; n + 1];
        for i in 0..n {
            for w in 0..=capacity {
                dp[i + 1][w] = dp[i][w];
                if weights[i] > 0 && weights[i] <= w {
                    let candidate = dp[i][w - weights[i]] + values[i];
                    if candidate > dp[i + 1][w] {
                        dp[i + 1][w] = candidate;
                    }
                }
            }
        }

        let mut selected = vec![false; n];
        let mut w = capacity;
        for i in (0..n).rev() {
            if dp[i + 1][w] != dp[i][w] {
                selected[i] = true;
                w = w.saturating_sub(weights[i]);
            }
        }

        let mut by_container: IndexMap<ContainerId, Vec<&WasteItemRecord>> = IndexMap::new();
        let mut without_container = Vec::new();
        for (i, item) in report.items.iter().enumerate() {
            if !selected[i] {
                continue;
            }
            match &item.container_id {
                Some(cid) => by_container.entry(cid.clone()).or_default().push(item),
                None => without_container.push(item),
            }
        }

        let mut sequence = StepSequence::new();
        for (container_id, mut items) in by_container {
            items.sort_by(|a, b| {
                let (ay, az, ax) = a.position.map(|p| (p.y, -p.z, p.x)).unwrap_or((0.0, 0.0, 0.0));
                let (by, bz, bx) = b.position.map(|p| (p.y, -p.z, p.x)).unwrap_or((0.0, 0.0, 0.0));
                (ay, az, ax).partial_cmp(&(by, bz, bx)).unwrap_or(std::cmp::Ordering::Equal)
            });
            for item in items {
                sequence.push(Action::Remove, item.item_id.clone(), Some(container_id.clone()), None, None);
                sequence.push(
                    Action::Place,
                    item.item_id.clone(),
                    None,
                    Some(undocking_container_id.clone()),
                    None,
                );
            }
        }
        for item in without_container {
            sequence.push(Action::Place, item.item_id.clone(), None, Some(undocking_container_id.clone()), None);
        }

        WasteReturnPlan { steps: sequence.into_steps() }
    }

    /// Detaches every item named by `plan_steps` and clears its location,
    /// finalizing an executed waste-return plan (§4.6). Returns the number
    /// of items touched; the caller may then delete them from the store.
    pub fn complete_undocking(store: &mut Store, plan_steps: &[crate::plan::Step]) -> usize {
        let mut touched: IndexSet<ItemId> = IndexSet::new();
        for step in plan_steps {
            touched.insert(step.item_id.clone());
        }
        for item_id in &touched {
            let _ = store.detach(item_id);
        }
        touched.len()
    }
}
