//! Immutable plan outputs handed back to callers (§3 Plan outputs, §6
//! External Interfaces). The core never mutates a plan after returning it;
//! every rearrangement/retrieval/waste-return sequence is built through
//! [`StepSequence`] so ordinals are always contiguous and start at 1 (§5
//! Ordering guarantees, §8 property 5).

use serde::{Deserialize, Serialize};

use crate::geometry::{Dimensions, Position};
use crate::ids::{ContainerId, ItemId};
use crate::waste::WasteReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Move,
    Remove,
    Place,
    Retrieve,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub step: u32,
    pub action: Action,
    pub item_id: ItemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_container: Option<ContainerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_container: Option<ContainerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Builds a contiguous, 1-based sequence of [`Step`]s. Every module that
/// emits a multi-step plan (placement rearrangement, retrieval, waste
/// return) goes through this rather than hand-rolling a counter.
#[derive(Debug, Default)]
pub struct StepSequence {
    next: u32,
    steps: Vec<Step>,
}

impl StepSequence {
    pub fn new() -> Self {
        StepSequence { next: 1, steps: Vec::new() }
    }

    pub fn push(
        &mut self,
        action: Action,
        item_id: ItemId,
        from_container: Option<ContainerId>,
        to_container: Option<ContainerId>,
        position: Option<Position>,
    ) {
        self.steps.push(Step {
            step: self.next,
            action,
            item_id,
            from_container,
            to_container,
            position,
        });
        self.next += 1;
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub item_id: ItemId,
    pub container_id: ContainerId,
    pub position: Position,
    pub rotation: Dimensions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementPlan {
    pub placements: Vec<Placement>,
    pub rearrangements: Vec<Step>,
    /// Items that could not be placed even after rearrangement; see §4.4
    /// "Failure semantics" — this is not an error, the caller inspects it.
    pub unplaced: Vec<ItemId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalPlan {
    pub found: bool,
    pub steps: Vec<Step>,
}

// Output-only: carries `WasteReason`, which serializes to a plain string
// but has no corresponding `Deserialize` (nothing ever reads a waste plan
// back in as input).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WasteItemRecord {
    pub item_id: ItemId,
    pub name: String,
    pub reason: WasteReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<ContainerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub mass: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WasteReport {
    pub items: Vec<WasteItemRecord>,
    pub total_mass: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WasteReturnPlan {
    pub steps: Vec<Step>,
}

/// Detailed location record for one item, used by the supplemental
/// search/lookup surface (`RetrievalPlanner::search_items`,
/// `RetrievalPlanner::get_item_location`) rather than by the four core
/// decision engines themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemLocation {
    pub item_id: ItemId,
    pub name: String,
    pub container_id: ContainerId,
    pub position: Position,
    pub rotation: Dimensions,
    pub retrieval_steps: usize,
    pub blocked_by: Vec<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub old_date: chrono::NaiveDate,
    pub new_date: chrono::NaiveDate,
    pub expired: Vec<ItemId>,
    pub usage_depleted: Vec<ItemId>,
}
