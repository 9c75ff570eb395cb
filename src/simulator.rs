//! Logical clock: advance-only, process-wide "current date" (§4.7, §6
//! "Logical clock"). Only [`Simulator::simulate`] ever moves it forward.

use chrono::{Duration, NaiveDate};

use crate::ids::ItemId;
use crate::plan::SimulationResult;
use crate::store::Store;

pub struct Simulator {
    current_date: NaiveDate,
}

impl Simulator {
    pub fn new(initial_date: NaiveDate) -> Self {
        Simulator { current_date: initial_date }
    }

    pub fn today(&self) -> NaiveDate {
        self.current_date
    }

    /// Advances the clock by at least one day and ages item state:
    /// decrements usage for `items_used_this_batch`, then reclassifies any
    /// item whose expiry falls within the elapsed window (§4.7).
    pub fn simulate(&mut self, store: &mut Store, days: i64, items_used_this_batch: &[ItemId]) -> SimulationResult {
        let old_date = self.current_date;
        let mut usage_depleted = Vec::new();

        for item_id in items_used_this_batch {
            if let Some(item) = store.get_item_mut(item_id) {
                if item.usage_limit > 0 {
                    item.usage_limit -= 1;
                    if item.usage_limit == 0 {
                        item.is_waste = true;
                        usage_depleted.push(item_id.clone());
                    }
                }
            }
        }

        let new_date = old_date + Duration::days(days.max(1));
        self.current_date = new_date;

        let mut expired = Vec::new();
        let ids: Vec<ItemId> = store.iter_items_sorted().map(|item| item.id.clone()).collect();
        for id in ids {
            let item = store.get_item_mut(&id).expect("id taken from this store's own snapshot");
            if item.is_waste {
                continue;
            }
            let Some(expiry_date) = (match item.expiry {
                crate::item::ExpiryDate::Date(d) => Some(d),
                crate::item::ExpiryDate::None => None,
            }) else {
                continue;
            };
            if expiry_date <= new_date && expiry_date > old_date {
                item.is_waste = true;
                expired.push(id);
            }
        }

        SimulationResult { old_date, new_date, expired, usage_depleted }
    }
}
