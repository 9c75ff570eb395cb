//! The single entry point external callers use (§2 "Control flow",
//! §5 "Scheduling model"): one struct owning the stores and the logical
//! clock, exposing exactly the six top-level operations. Each call is
//! atomic — reads the stores, may build transient [`SpaceModel`]s, mutates
//! the stores, and returns a plan. No hidden I/O, no suspension points.

use chrono::NaiveDate;
use log::{debug, info};

use crate::config::CoreConfig;
use crate::container::Container;
use crate::error::{Error, Result};
use crate::ids::{ContainerId, ItemId};
use crate::item::Item;
use crate::placement::PlacementEngine;
use crate::plan::{PlacementPlan, RetrievalPlan, SimulationResult, WasteReport, WasteReturnPlan};
use crate::retrieval::RetrievalPlanner;
use crate::simulator::Simulator;
use crate::store::Store;
use crate::waste::WasteCollector;

pub struct Core {
    store: Store,
    clock: Simulator,
    config: CoreConfig,
}

impl Core {
    pub fn new(initial_date: NaiveDate) -> Self {
        Core { store: Store::new(), clock: Simulator::new(initial_date), config: CoreConfig::default() }
    }

    pub fn with_config(initial_date: NaiveDate, config: CoreConfig) -> Self {
        Core { store: Store::new(), clock: Simulator::new(initial_date), config }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // -- ingest -------------------------------------------------------------

    pub fn add_item(&mut self, item: Item) {
        self.store.upsert_item(item);
    }

    pub fn add_container(&mut self, container: Container) {
        self.store.upsert_container(container);
    }

    pub fn get_item(&self, id: &ItemId) -> Result<&Item> {
        self.store.require_item(id)
    }

    pub fn get_container(&self, id: &ContainerId) -> Result<&Container> {
        self.store.require_container(id)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    // -- planning operations --------------------------------------------------

    /// Places every unlocated item in `candidate_ids` (§4.4).
    pub fn plan_placement(&mut self, candidate_ids: &[ItemId]) -> Result<PlacementPlan> {
        let work = candidate_ids.len().saturating_mul(self.store.iter_containers().count().max(1));
        if work > self.config.max_placement_work {
            return Err(Error::InvalidInput(format!(
                "placement batch of {} items against {} containers exceeds configured limit of {}",
                candidate_ids.len(),
                self.store.iter_containers().count(),
                self.config.max_placement_work
            )));
        }
        info!("plan_placement: {} candidate items", candidate_ids.len());
        let today = self.clock.today();
        let plan = PlacementEngine::plan_placement(&mut self.store, candidate_ids, today);
        debug!("plan_placement: {} placed, {} unplaced", plan.placements.len(), plan.unplaced.len());
        Ok(plan)
    }

    /// Computes the move-aside/retrieve/move-back sequence for `item_id`
    /// without mutating the store (§4.5 "preview path").
    pub fn preview_retrieval(&mut self, item_id: &ItemId) -> RetrievalPlan {
        RetrievalPlanner::plan_retrieval(&mut self.store, item_id, false)
    }

    /// Same as [`Core::preview_retrieval`] but commits the target item's
    /// usage/waste/detach mutation (§4.5 "state mutation on actual retrieve").
    pub fn plan_retrieval(&mut self, item_id: &ItemId) -> RetrievalPlan {
        info!("plan_retrieval: {item_id}");
        RetrievalPlanner::plan_retrieval(&mut self.store, item_id, true)
    }

    /// Detailed location and blocking-item lookup for one item.
    pub fn get_item_location(&self, item_id: &ItemId) -> Option<crate::plan::ItemLocation> {
        RetrievalPlanner::get_item_location(&self.store, item_id)
    }

    /// ID-or-name search over the store, ranked by ease of retrieval.
    pub fn search_items(&self, query: &str) -> Vec<crate::plan::ItemLocation> {
        RetrievalPlanner::search_items(&self.store, query, self.clock.today())
    }

    /// Classifies waste and marks `isWaste` on qualifying items (§4.6).
    pub fn identify_waste(&mut self) -> WasteReport {
        let today = self.clock.today();
        let report = WasteCollector::identify_waste(&mut self.store, today);
        info!("identify_waste: {} items, {:.2}kg total", report.items.len(), report.total_mass);
        report
    }

    /// Selects a weight-bounded subset of `report` for return, via 0/1
    /// knapsack (§4.6).
    pub fn plan_waste_return(
        &self,
        report: &WasteReport,
        max_weight: f64,
        undocking_container_id: &ContainerId,
    ) -> Result<WasteReturnPlan> {
        let scaled = (max_weight * 100.0).floor().max(0.0) as usize;
        if scaled > self.config.max_knapsack_capacity {
            return Err(Error::InvalidInput(format!(
                "max_weight {max_weight} (scaled {scaled}) exceeds configured knapsack capacity limit of {}",
                self.config.max_knapsack_capacity
            )));
        }
        Ok(WasteCollector::plan_waste_return(report, max_weight, undocking_container_id))
    }

    /// Finalizes an executed waste-return plan: detaches every mentioned
    /// item and clears its location (§4.6).
    pub fn complete_undocking(&mut self, plan_steps: &[crate::plan::Step]) -> usize {
        let count = WasteCollector::complete_undocking(&mut self.store, plan_steps);
        info!("complete_undocking: {count} items removed");
        count
    }

    /// Advances the logical clock and ages item state (§4.7).
    pub fn simulate(&mut self, days: i64, items_used_this_batch: &[ItemId]) -> SimulationResult {
        let result = self.clock.simulate(&mut self.store, days, items_used_this_batch);
        info!(
            "simulate: {} -> {} ({} expired, {} usage-depleted)",
            result.old_date,
            result.new_date,
            result.expired.len(),
            result.usage_depleted.len()
        );
        result
    }
}
