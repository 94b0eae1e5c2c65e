//! Shared in-memory backend wrapped by the typed stores
//!
//! One `StoreCore` per application session holds every collection, the id
//! counters, and the change-notification channel. Typed stores clone an
//! `Arc` of it, so all views observe the same state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::debug;

use super::entities::{EntityId, House, Key, WarehouseItem};
use super::events::StoreEvent;

/// Capacity of the change-notification channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// The shared in-memory state backend
///
/// Collections are ordered by insertion so "recent" reads (dashboard) stay
/// meaningful. Ids come from monotonic counters and are never reused after a
/// deletion.
pub struct StoreCore {
    pub(crate) warehouse_items: RwLock<Vec<WarehouseItem>>,
    pub(crate) houses: RwLock<Vec<House>>,
    pub(crate) keys: RwLock<Vec<Key>>,
    next_warehouse_id: AtomicU64,
    next_house_id: AtomicU64,
    next_key_id: AtomicU64,
    events: broadcast::Sender<StoreEvent>,
}

/// Shared handle to the store backend
pub type SharedCore = Arc<StoreCore>;

impl StoreCore {
    /// Create an empty store (session start)
    pub fn new() -> SharedCore {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            warehouse_items: RwLock::new(Vec::new()),
            houses: RwLock::new(Vec::new()),
            keys: RwLock::new(Vec::new()),
            next_warehouse_id: AtomicU64::new(1),
            next_house_id: AtomicU64::new(1),
            next_key_id: AtomicU64::new(1),
            events,
        })
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Publish a change notification to all subscribers
    pub(crate) fn publish(&self, event: StoreEvent) {
        debug!(
            collection = ?event.collection,
            change = ?event.change,
            "store mutation"
        );
        // Send fails only when no view is subscribed, which is fine
        let _ = self.events.send(event);
    }

    pub(crate) fn next_warehouse_id(&self) -> EntityId {
        self.next_warehouse_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn next_house_id(&self) -> EntityId {
        self.next_house_id.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn next_key_id(&self) -> EntityId {
        self.next_key_id.fetch_add(1, Ordering::Relaxed)
    }
}
