//! Warehouse stock store operations

use tracing::{info, warn};

use super::core::SharedCore;
use super::entities::{Category, EntityId, NewWarehouseItem, WarehouseItem, WarehouseItemUpdate};
use super::events::{ChangeKind, CollectionKind, StoreEvent};

/// Warehouse stock store
#[derive(Clone)]
pub struct WarehouseStore {
    core: SharedCore,
}

impl WarehouseStore {
    pub fn new(core: SharedCore) -> Self {
        Self { core }
    }

    /// Add a stock item, assigning the next id. Duplicate names are allowed.
    pub fn add(&self, new: NewWarehouseItem) -> WarehouseItem {
        let item = WarehouseItem {
            id: self.core.next_warehouse_id(),
            name: new.name,
            category: new.category,
            quantity: new.quantity,
            photo: new.photo,
        };

        self.core.warehouse_items.write().push(item.clone());

        info!(item_id = item.id, name = %item.name, quantity = item.quantity, "Added warehouse item");
        self.core.publish(StoreEvent::new(
            CollectionKind::Warehouse,
            ChangeKind::Added { id: item.id },
        ));

        item
    }

    /// Merge the provided fields into the item with `id`
    ///
    /// Returns `false` without mutating anything when no such item exists.
    pub fn update(&self, id: EntityId, update: WarehouseItemUpdate) -> bool {
        let mut items = self.core.warehouse_items.write();
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            warn!(item_id = id, "Update for missing warehouse item ignored");
            return false;
        };

        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(quantity) = update.quantity {
            item.quantity = quantity;
        }
        if let Some(photo) = update.photo {
            item.photo = photo;
        }
        drop(items);

        self.core.publish(StoreEvent::new(
            CollectionKind::Warehouse,
            ChangeKind::Updated { id },
        ));
        true
    }

    /// Remove the item with `id`; `false` when absent
    ///
    /// Never cascades: allocation rows referencing the item stay in their
    /// houses and are skipped at render time.
    pub fn delete(&self, id: EntityId) -> bool {
        let mut items = self.core.warehouse_items.write();
        let before = items.len();
        items.retain(|i| i.id != id);
        let removed = items.len() < before;
        drop(items);

        if removed {
            info!(item_id = id, "Deleted warehouse item");
            self.core.publish(StoreEvent::new(
                CollectionKind::Warehouse,
                ChangeKind::Removed { id },
            ));
        } else {
            warn!(item_id = id, "Delete for missing warehouse item ignored");
        }
        removed
    }

    /// Snapshot of one item
    pub fn get(&self, id: EntityId) -> Option<WarehouseItem> {
        self.core
            .warehouse_items
            .read()
            .iter()
            .find(|i| i.id == id)
            .cloned()
    }

    /// Snapshot of all items in insertion order
    pub fn list(&self) -> Vec<WarehouseItem> {
        self.core.warehouse_items.read().clone()
    }

    /// Snapshot of items matching `category` exactly
    pub fn list_in_category(&self, category: Category) -> Vec<WarehouseItem> {
        self.core
            .warehouse_items
            .read()
            .iter()
            .filter(|i| i.category == category)
            .cloned()
            .collect()
    }
}
