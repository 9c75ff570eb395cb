//! Centralized scoring heuristics (§4.3): the placement-ordering score, the
//! per-candidate placement score, waste urgency, and knapsack value. Kept in
//! one module so the formulas that drive ordering decisions elsewhere in
//! the crate live in exactly one place.

use crate::waste::WasteReason;

/// Zone match is worth far more than any amount of retrieval-depth penalty
/// or priority weighting, so a correctly-zoned container always wins over
/// a mis-zoned one (§4.3).
const ZONE_BONUS: f64 = 1000.0;

/// Placement-ordering heuristic (§4.4 step 1): items with soon expiry,
/// scarce remaining uses, and high priority are placed first; larger
/// volume breaks ties (applied by the caller, not here).
pub fn weighted_score(priority: i32, days_until_expiry: i64, usage_limit: u32) -> f64 {
    2.0 * priority as f64 - (days_until_expiry.clamp(0, 100)) as f64 + 0.5 * (usage_limit.min(100)) as f64
}

/// Score of a specific (item, container, corner) combination. Higher is
/// better; zone match dominates, priority nudges ties, and a deep
/// retrieval corridor is penalized.
pub fn placement_score(zone_match: bool, priority: i32, retrieval_depth: usize) -> f64 {
    let zone_bonus = if zone_match { ZONE_BONUS } else { 0.0 };
    zone_bonus + 5.0 * priority as f64 - 50.0 * retrieval_depth as f64
}

/// Waste-ordering heuristic: higher is more urgent to dispose of.
pub fn waste_urgency(reason: &WasteReason, priority: i32, mass: f64) -> f64 {
    let base = match reason {
        WasteReason::Expired | WasteReason::OutOfUses => 100.0,
        WasteReason::ExpiresInDays(k) => 100.0 - 10.0 * (*k as f64),
        WasteReason::UsesRemaining(k) => 50.0 - 10.0 * (*k as f64),
        WasteReason::ManuallyMarked => 100.0,
    };
    base - (priority as f64 / 3.0).min(30.0) + (2.0 * mass).min(20.0)
}

/// Value of a waste item to the return knapsack: a blend of its rank in
/// the urgency-sorted list and its mass (heavier items are worth carrying
/// more, to make better use of the capacity budget).
pub fn knapsack_value(urgency_rank: usize, total: usize, mass: f64) -> f64 {
    let urgency_rank_value = 10.0 * (1.0 - urgency_rank as f64 / total.max(1) as f64);
    0.7 * urgency_rank_value + 0.3 * (2.0 * mass).min(10.0)
}
