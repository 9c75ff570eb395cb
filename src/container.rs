//! The [`Container`] entity: a rigid storage box belonging to one zone.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Dimensions;
use crate::ids::{ContainerId, ItemId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub id: ContainerId,
    pub zone: String,
    pub dims: Dimensions,
    pub occupied_space: f64,
    /// Derived index of resident items, maintained by `crate::store`'s
    /// `attach`/`detach` primitives. Truth lives in `Item::current_location`.
    pub items: IndexSet<ItemId>,
}

/// A container is considered effectively full once past this fraction of
/// its volume is occupied; the placement engine skips such containers.
pub const FULL_THRESHOLD: f64 = 0.95;

impl Container {
    pub fn new(id: ContainerId, zone: String, dims: Dimensions) -> Result<Self> {
        if !dims.is_positive() {
            return Err(Error::InvalidInput(format!(
                "container {id} dimensions must be strictly positive"
            )));
        }
        Ok(Container {
            id,
            zone,
            dims,
            occupied_space: 0.0,
            items: IndexSet::new(),
        })
    }

    pub fn capacity(&self) -> f64 {
        self.dims.volume()
    }

    pub fn available_space(&self) -> f64 {
        (self.capacity() - self.occupied_space).max(0.0)
    }

    pub fn is_full(&self) -> bool {
        self.occupied_space >= FULL_THRESHOLD * self.capacity()
    }
}
