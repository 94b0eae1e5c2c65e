//! House store operations, including the authoritative stock-allocation path

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::HouseDeletePolicy;

use super::core::SharedCore;
use super::entities::{AllocatedItem, EntityId, House, HouseUpdate, NewHouse};
use super::events::{ChangeKind, CollectionKind, StoreEvent};
use super::StoreError;

/// House store
#[derive(Clone)]
pub struct HouseStore {
    core: SharedCore,
    delete_policy: HouseDeletePolicy,
}

impl HouseStore {
    pub fn new(core: SharedCore, delete_policy: HouseDeletePolicy) -> Self {
        Self {
            core,
            delete_policy,
        }
    }

    /// Add a house, assigning the next id
    ///
    /// Progress is clamped into 0..=100 here, so the invariant holds no
    /// matter what the caller hands over.
    pub fn add(&self, new: NewHouse) -> House {
        let house = House {
            id: self.core.next_house_id(),
            name: new.name,
            progress: new.progress.min(100),
            address: new.address,
            photo: new.photo,
            allocated_items: Vec::new(),
        };

        self.core.houses.write().push(house.clone());

        info!(house_id = house.id, name = %house.name, "Added house");
        self.core.publish(StoreEvent::new(
            CollectionKind::Houses,
            ChangeKind::Added { id: house.id },
        ));

        house
    }

    /// Merge the provided fields into the house with `id`
    ///
    /// Returns `false` without mutating anything when no such house exists.
    pub fn update(&self, id: EntityId, update: HouseUpdate) -> bool {
        let mut houses = self.core.houses.write();
        let Some(house) = houses.iter_mut().find(|h| h.id == id) else {
            warn!(house_id = id, "Update for missing house ignored");
            return false;
        };

        if let Some(name) = update.name {
            house.name = name;
        }
        if let Some(progress) = update.progress {
            house.progress = progress.min(100);
        }
        if let Some(address) = update.address {
            house.address = address;
        }
        if let Some(photo) = update.photo {
            house.photo = photo;
        }
        drop(houses);

        self.core.publish(StoreEvent::new(
            CollectionKind::Houses,
            ChangeKind::Updated { id },
        ));
        true
    }

    /// Remove the house with `id`, applying the configured delete policy to
    /// its keys
    ///
    /// Returns `Ok(false)` when the house is absent. Only the `Deny` policy
    /// can fail, and only while keys still reference the house.
    pub fn delete(&self, id: EntityId) -> Result<bool, StoreError> {
        let mut houses = self.core.houses.write();
        if !houses.iter().any(|h| h.id == id) {
            warn!(house_id = id, "Delete for missing house ignored");
            return Ok(false);
        }

        match self.delete_policy {
            HouseDeletePolicy::Detach => {}
            HouseDeletePolicy::Deny => {
                let key_count = self
                    .core
                    .keys
                    .read()
                    .iter()
                    .filter(|k| k.house_id == id)
                    .count();
                if key_count > 0 {
                    return Err(StoreError::KeysAttached {
                        house_id: id,
                        key_count,
                    });
                }
            }
            HouseDeletePolicy::Cascade => {
                let mut keys = self.core.keys.write();
                let removed: Vec<EntityId> = keys
                    .iter()
                    .filter(|k| k.house_id == id)
                    .map(|k| k.id)
                    .collect();
                keys.retain(|k| k.house_id != id);
                drop(keys);

                for key_id in removed {
                    info!(house_id = id, key_id, "Cascaded key deletion with house");
                    self.core.publish(StoreEvent::new(
                        CollectionKind::Keys,
                        ChangeKind::Removed { id: key_id },
                    ));
                }
            }
        }

        houses.retain(|h| h.id != id);
        drop(houses);

        info!(house_id = id, policy = ?self.delete_policy, "Deleted house");
        self.core.publish(StoreEvent::new(
            CollectionKind::Houses,
            ChangeKind::Removed { id },
        ));
        Ok(true)
    }

    /// Snapshot of one house
    pub fn get(&self, id: EntityId) -> Option<House> {
        self.core.houses.read().iter().find(|h| h.id == id).cloned()
    }

    /// Snapshot of all houses in insertion order
    pub fn list(&self) -> Vec<House> {
        self.core.houses.read().clone()
    }

    /// Allocate a quantity of one warehouse item to a house
    ///
    /// Repeated allocation of the same item adds to the existing row's
    /// quantity instead of duplicating it. The warehouse item is referenced
    /// by id only; no existence check is made, matching how key references
    /// behave. Returns `false` when the house is absent.
    pub fn allocate_stock(&self, house_id: EntityId, item_id: EntityId, quantity: u32) -> bool {
        let mut houses = self.core.houses.write();
        let Some(house) = houses.iter_mut().find(|h| h.id == house_id) else {
            warn!(house_id, item_id, "Allocation to missing house ignored");
            return false;
        };

        match house
            .allocated_items
            .iter_mut()
            .find(|a| a.warehouse_item_id == item_id)
        {
            Some(existing) => existing.quantity += quantity,
            None => house.allocated_items.push(AllocatedItem {
                id: Uuid::new_v4(),
                warehouse_item_id: item_id,
                quantity,
            }),
        }
        drop(houses);

        info!(house_id, item_id, quantity, "Allocated stock to house");
        self.core.publish(StoreEvent::new(
            CollectionKind::Houses,
            ChangeKind::Updated { id: house_id },
        ));
        true
    }

    /// Remove one allocation row from a house; `false` when the house or
    /// the row is absent
    pub fn remove_allocation(&self, house_id: EntityId, allocation_id: Uuid) -> bool {
        let mut houses = self.core.houses.write();
        let Some(house) = houses.iter_mut().find(|h| h.id == house_id) else {
            warn!(house_id, "Allocation removal for missing house ignored");
            return false;
        };

        let before = house.allocated_items.len();
        house.allocated_items.retain(|a| a.id != allocation_id);
        let removed = house.allocated_items.len() < before;
        drop(houses);

        if removed {
            info!(house_id, allocation_id = %allocation_id, "Removed allocation from house");
            self.core.publish(StoreEvent::new(
                CollectionKind::Houses,
                ChangeKind::Updated { id: house_id },
            ));
        }
        removed
    }
}
