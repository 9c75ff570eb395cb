//! Keyed maps for items and containers, plus the mutation primitives that
//! keep invariants (1), (4) and (6) of the data model intact.
//!
//! The core never writes `item.current_location` or `container.items`
//! directly outside of [`Store::attach`] and [`Store::detach`] — those two
//! methods are the only place the item/container relationship changes.

use indexmap::IndexMap;
use itertools::Itertools;
use log::trace;

use crate::container::Container;
use crate::error::{Error, Result};
use crate::geometry::{Aabb, Dimensions};
use crate::ids::{ContainerId, ItemId};
use crate::item::{CurrentLocation, Item};

#[derive(Debug, Clone, Default)]
pub struct Store {
    items: IndexMap<ItemId, Item>,
    containers: IndexMap<ContainerId, Container>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    // -- items ------------------------------------------------------------

    pub fn get_item(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn get_item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.get_mut(id)
    }

    pub fn require_item(&self, id: &ItemId) -> Result<&Item> {
        self.get_item(id).ok_or_else(|| Error::item_not_found(id.clone()))
    }

    pub fn upsert_item(&mut self, item: Item) {
        self.items.insert(item.id.clone(), item);
    }

    /// Removes an item from the store outright. Callers are expected to
    /// have already `detach`-ed it if it was located anywhere; this does
    /// not touch `container.items`.
    pub fn delete_item(&mut self, id: &ItemId) -> Option<Item> {
        self.items.shift_remove(id)
    }

    pub fn iter_items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn iter_items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.values_mut()
    }

    /// Items in ascending ID order. Used wherever the spec calls for
    /// deterministic, ID-sorted iteration.
    pub fn iter_items_sorted(&self) -> impl Iterator<Item = &Item> {
        self.items.values().sorted_by(|a, b| a.id.cmp(&b.id))
    }

    // -- containers ---------------------------------------------------------

    pub fn get_container(&self, id: &ContainerId) -> Option<&Container> {
        self.containers.get(id)
    }

    pub fn get_container_mut(&mut self, id: &ContainerId) -> Option<&mut Container> {
        self.containers.get_mut(id)
    }

    pub fn require_container(&self, id: &ContainerId) -> Result<&Container> {
        self.get_container(id)
            .ok_or_else(|| Error::container_not_found(id.clone()))
    }

    pub fn upsert_container(&mut self, container: Container) {
        self.containers.insert(container.id.clone(), container);
    }

    pub fn delete_container(&mut self, id: &ContainerId) -> Option<Container> {
        self.containers.shift_remove(id)
    }

    pub fn iter_containers(&self) -> impl Iterator<Item = &Container> {
        self.containers.values()
    }

    /// Containers in ascending ID order (§4.4 step 2a: "for each container,
    /// in ID-sorted order").
    pub fn iter_containers_sorted(&self) -> impl Iterator<Item = &Container> {
        self.containers.values().sorted_by(|a, b| a.id.cmp(&b.id))
    }

    // -- mutation primitives ------------------------------------------------

    /// Places `item_id` at `position`/`rotation` inside `container_id`,
    /// maintaining invariants (1), (4) and (6). Rejects the attach (no
    /// mutation) on any invariant violation rather than leaving partial
    /// state behind.
    pub fn attach(
        &mut self,
        item_id: &ItemId,
        container_id: &ContainerId,
        position: crate::geometry::Position,
        rotation: Dimensions,
    ) -> Result<()> {
        let item = self.require_item(item_id)?;
        if !rotation.is_permutation_of(&item.native_dims) {
            return Err(Error::CapacityExceeded(format!(
                "rotation {rotation:?} is not a permutation of item {item_id}'s native dimensions"
            )));
        }
        let container = self.require_container(container_id)?;
        let target = Aabb::new(position, rotation);
        if !target.within_bounds(&container.dims) {
            return Err(Error::CapacityExceeded(format!(
                "placement of {item_id} at {position:?} escapes container {container_id} bounds"
            )));
        }
        for other_id in container.items.iter() {
            let other = self.require_item(other_id)?;
            if let Some(loc) = &other.current_location {
                let other_box = Aabb::new(loc.position, loc.rotation);
                if target.intersects(&other_box) {
                    return Err(Error::CapacityExceeded(format!(
                        "placement of {item_id} overlaps existing item {other_id} in container {container_id}"
                    )));
                }
            }
        }
        let volume = rotation.volume();
        if container.occupied_space + volume > container.capacity() + 1e-6 {
            return Err(Error::CapacityExceeded(format!(
                "container {container_id} has no room left for item {item_id}"
            )));
        }

        let item = self.get_item_mut(item_id).expect("checked above");
        item.current_location = Some(CurrentLocation {
            container_id: container_id.clone(),
            position,
            rotation,
        });
        let container = self.get_container_mut(container_id).expect("checked above");
        container.items.insert(item_id.clone());
        container.occupied_space += volume;
        trace!("attached {item_id} to {container_id} at {position:?} as {rotation:?}");
        Ok(())
    }

    /// Removes `item_id` from wherever it currently resides. A no-op (not
    /// an error) if the item has no location.
    pub fn detach(&mut self, item_id: &ItemId) -> Result<()> {
        let item = self.require_item(item_id)?;
        let Some(loc) = item.current_location.clone() else {
            return Ok(());
        };
        let volume = loc.rotation.volume();
        if let Some(container) = self.get_container_mut(&loc.container_id) {
            container.items.shift_remove(item_id);
            container.occupied_space = (container.occupied_space - volume).max(0.0);
        }
        let item = self.get_item_mut(item_id).expect("checked above");
        item.current_location = None;
        trace!("detached {item_id} from {}", loc.container_id);
        Ok(())
    }
}
