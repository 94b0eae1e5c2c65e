//! In-memory store: the single source of truth for all entity collections
//!
//! A shared `StoreCore` holds the collections; one typed store per entity
//! family wraps it and mediates all mutation. Every mutation publishes a
//! `StoreEvent` so subscribed views can re-render.

pub mod core;
pub mod entities;
pub mod events;
pub mod houses;
pub mod keys;
pub mod warehouse;

pub use self::core::{SharedCore, StoreCore};
pub use entities::{
    AllocatedItem, Category, EntityId, House, HouseUpdate, Key, KeyUpdate, NewHouse, NewKey,
    NewWarehouseItem, UnknownCategory, WarehouseItem, WarehouseItemUpdate,
};
pub use events::{ChangeKind, CollectionKind, StoreEvent};
pub use houses::HouseStore;
pub use keys::KeyStore;
pub use warehouse::WarehouseStore;

/// Store-level failures
///
/// Mutations against missing ids are deliberate no-ops, not errors; the only
/// failing store path is a house deletion refused by the `Deny` policy.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("house {house_id} still has {key_count} key(s) attached")]
    KeysAttached {
        house_id: EntityId,
        key_count: usize,
    },
}
