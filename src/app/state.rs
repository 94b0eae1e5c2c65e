//! Application state shared across screens

use std::sync::Arc;

use crate::config::Config;
use crate::store::{HouseStore, KeyStore, SharedCore, StoreCore, WarehouseStore};
use crate::views::{AllocationView, DashboardView, HousesView, KeysView, WarehouseView};

/// Shared application state
///
/// Owns the store and hands screen controllers their handles; nothing in the
/// crate reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub core: SharedCore,
    pub warehouse_store: WarehouseStore,
    pub house_store: HouseStore,
    pub key_store: KeyStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        // Initialize the shared store backend
        let core = StoreCore::new();

        // Initialize stores
        let warehouse_store = WarehouseStore::new(core.clone());
        let house_store = HouseStore::new(core.clone(), config.house_delete_policy);
        let key_store = KeyStore::new(core.clone());

        Self {
            config,
            core,
            warehouse_store,
            house_store,
            key_store,
        }
    }

    /// Fresh warehouse screen controller
    pub fn warehouse_view(&self) -> WarehouseView {
        WarehouseView::new(self.warehouse_store.clone())
    }

    /// Fresh houses screen controller
    pub fn houses_view(&self) -> HousesView {
        HousesView::new(self.house_store.clone())
    }

    /// Fresh keys screen controller
    pub fn keys_view(&self) -> KeysView {
        KeysView::new(self.key_store.clone(), self.house_store.clone())
    }

    /// Fresh stock-allocation screen controller
    pub fn allocation_view(&self) -> AllocationView {
        AllocationView::new(
            &self.core,
            self.house_store.clone(),
            self.warehouse_store.clone(),
        )
    }

    /// Fresh dashboard controller
    pub fn dashboard_view(&self) -> DashboardView {
        DashboardView::new(
            self.warehouse_store.clone(),
            self.house_store.clone(),
            self.key_store.clone(),
        )
    }
}
