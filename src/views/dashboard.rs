//! Dashboard aggregates
//!
//! Read-only statistics derived from the store's current snapshot on every
//! call. Nothing here mutates state.

use std::collections::HashSet;

use serde::Serialize;

use crate::store::{HouseStore, KeyStore, WarehouseStore};

/// Number of recent records summarized per collection
const RECENT_UPDATES_PER_COLLECTION: usize = 3;

/// Headline numbers for the dashboard cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Sum of quantities across all warehouse items
    pub total_stock_items: u64,
    /// Houses with progress below 100
    pub houses_in_progress: usize,
    pub total_keys: usize,
    /// Distinct categories present in stock
    pub stock_categories: usize,
}

/// One entry of the per-house progress list
#[derive(Debug, Clone, Serialize)]
pub struct HouseProgress {
    pub name: String,
    pub progress: u8,
}

/// Dashboard screen controller
pub struct DashboardView {
    warehouse: WarehouseStore,
    houses: HouseStore,
    keys: KeyStore,
}

impl DashboardView {
    pub fn new(warehouse: WarehouseStore, houses: HouseStore, keys: KeyStore) -> Self {
        Self {
            warehouse,
            houses,
            keys,
        }
    }

    /// Headline numbers from the current snapshot
    pub fn stats(&self) -> DashboardStats {
        let items = self.warehouse.list();
        let houses = self.houses.list();

        let categories: HashSet<_> = items.iter().map(|i| i.category).collect();

        DashboardStats {
            total_stock_items: items.iter().map(|i| u64::from(i.quantity)).sum(),
            houses_in_progress: houses.iter().filter(|h| h.progress < 100).count(),
            total_keys: self.keys.list().len(),
            stock_categories: categories.len(),
        }
    }

    /// Human-readable lines for the latest warehouse and house records
    pub fn recent_updates(&self) -> Vec<String> {
        let items = self.warehouse.list();
        let houses = self.houses.list();

        let mut updates: Vec<String> = items
            .iter()
            .rev()
            .take(RECENT_UPDATES_PER_COLLECTION)
            .rev()
            .map(|i| format!("Added {} to Warehouse - Quantity: {}", i.name, i.quantity))
            .collect();

        updates.extend(
            houses
                .iter()
                .rev()
                .take(RECENT_UPDATES_PER_COLLECTION)
                .rev()
                .map(|h| format!("Updated {} - Progress: {}%", h.name, h.progress)),
        );

        updates
    }

    /// Progress bar data for every house
    pub fn house_progress(&self) -> Vec<HouseProgress> {
        self.houses
            .list()
            .into_iter()
            .map(|h| HouseProgress {
                name: h.name,
                progress: h.progress,
            })
            .collect()
    }
}
