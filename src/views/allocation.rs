//! Stock-allocation screen
//!
//! Renders houses with their allocated stock and lets the user allocate
//! warehouse items to a selected house. The house-with-items model is
//! derived from the store on every read; this screen never keeps its own
//! mutable copy. Allocation itself goes through the store's single
//! authoritative path.

use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::debug;
use uuid::Uuid;

use crate::store::{
    Category, EntityId, HouseStore, NewHouse, SharedCore, StoreEvent, WarehouseStore,
};

use super::houses::HouseDraft;
use super::{parse_count, parse_progress};

/// One house card with its allocation badges
#[derive(Debug, Clone)]
pub struct HouseCard {
    pub id: EntityId,
    pub name: String,
    pub address: String,
    pub progress: u8,
    pub badges: Vec<AllocationBadge>,
}

/// "{item name}: {quantity}" badge on a house card
#[derive(Debug, Clone)]
pub struct AllocationBadge {
    pub item_name: String,
    pub quantity: u32,
}

/// One row in the selected house's allocation table
#[derive(Debug, Clone)]
pub struct AllocationRow {
    pub allocation_id: Uuid,
    pub item_name: String,
    pub category: Category,
    pub quantity: u32,
}

/// Detail panel for the selected house
#[derive(Debug, Clone)]
pub struct HouseDetail {
    pub id: EntityId,
    pub name: String,
    pub rows: Vec<AllocationRow>,
}

/// Draft for the allocate-item dialog
#[derive(Default)]
pub struct AllocateDraft {
    pub item_id: Option<EntityId>,
    /// Raw text from the quantity input, parsed at submit
    pub quantity: String,
}

/// Stock-allocation screen controller
pub struct AllocationView {
    houses: HouseStore,
    warehouse: WarehouseStore,
    changes: broadcast::Receiver<StoreEvent>,
    selected: Option<EntityId>,
    pub house_draft: HouseDraft,
    pub allocate_draft: AllocateDraft,
}

impl AllocationView {
    pub fn new(core: &SharedCore, houses: HouseStore, warehouse: WarehouseStore) -> Self {
        Self {
            houses,
            warehouse,
            changes: core.subscribe(),
            selected: None,
            house_draft: HouseDraft::default(),
            allocate_draft: AllocateDraft::default(),
        }
    }

    /// Drain pending change notifications; `true` means re-render
    pub fn take_changes(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.changes.try_recv() {
                Ok(_) => changed = true,
                // Missed events still mean the screen is stale
                Err(TryRecvError::Lagged(_)) => changed = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        changed
    }

    /// House cards with allocation badges, derived from the current store
    /// state. Badges whose warehouse item was deleted are skipped.
    pub fn house_cards(&self) -> Vec<HouseCard> {
        let items = self.warehouse.list();
        self.houses
            .list()
            .into_iter()
            .map(|house| {
                let badges = house
                    .allocated_items
                    .iter()
                    .filter_map(|allocation| {
                        items
                            .iter()
                            .find(|i| i.id == allocation.warehouse_item_id)
                            .map(|item| AllocationBadge {
                                item_name: item.name.clone(),
                                quantity: allocation.quantity,
                            })
                    })
                    .collect();
                HouseCard {
                    id: house.id,
                    name: house.name,
                    address: house.address,
                    progress: house.progress,
                    badges,
                }
            })
            .collect()
    }

    /// Select a house to open its detail panel
    pub fn select(&mut self, id: EntityId) {
        self.selected = Some(id);
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    /// Detail panel for the selected house, derived on read
    ///
    /// `None` when nothing is selected or the house has since been deleted.
    /// Rows referencing deleted warehouse items are skipped.
    pub fn detail(&self) -> Option<HouseDetail> {
        let house = self.houses.get(self.selected?)?;
        let items = self.warehouse.list();
        let rows = house
            .allocated_items
            .iter()
            .filter_map(|allocation| {
                items
                    .iter()
                    .find(|i| i.id == allocation.warehouse_item_id)
                    .map(|item| AllocationRow {
                        allocation_id: allocation.id,
                        item_name: item.name.clone(),
                        category: item.category,
                        quantity: allocation.quantity,
                    })
            })
            .collect();

        Some(HouseDetail {
            id: house.id,
            name: house.name,
            rows,
        })
    }

    /// Submit this screen's add-house dialog
    ///
    /// Same name/address requirement as the houses screen, but this dialog
    /// surfaces nothing on violation.
    pub fn submit_new_house(&mut self) -> bool {
        if self.house_draft.name.is_empty() || self.house_draft.address.is_empty() {
            debug!("Dropped invalid house submission on allocation screen");
            return false;
        }

        let draft = std::mem::take(&mut self.house_draft);
        self.houses.add(NewHouse {
            name: draft.name,
            progress: parse_progress(&draft.progress),
            address: draft.address,
            photo: draft.photo,
        });
        true
    }

    /// Open the allocate dialog for one warehouse item (quantity starts at 1)
    pub fn begin_allocate(&mut self, item_id: EntityId) {
        self.allocate_draft = AllocateDraft {
            item_id: Some(item_id),
            quantity: "1".to_string(),
        };
    }

    /// Submit the allocate dialog against the selected house
    pub fn submit_allocate(&mut self) -> bool {
        let (Some(house_id), Some(item_id)) = (self.selected, self.allocate_draft.item_id) else {
            debug!("Dropped allocation without a selected house and item");
            return false;
        };

        let quantity = parse_count(&self.allocate_draft.quantity);
        let allocated = self.houses.allocate_stock(house_id, item_id, quantity);
        if allocated {
            self.allocate_draft = AllocateDraft::default();
        }
        allocated
    }

    /// Remove one allocation row from the selected house
    pub fn remove_allocation(&mut self, allocation_id: Uuid) -> bool {
        match self.selected {
            Some(house_id) => self.houses.remove_allocation(house_id, allocation_id),
            None => false,
        }
    }
}
