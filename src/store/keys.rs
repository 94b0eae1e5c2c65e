//! Key store operations

use tracing::{info, warn};

use super::core::SharedCore;
use super::entities::{EntityId, Key, KeyUpdate, NewKey};
use super::events::{ChangeKind, CollectionKind, StoreEvent};

/// Key store
#[derive(Clone)]
pub struct KeyStore {
    core: SharedCore,
}

impl KeyStore {
    pub fn new(core: SharedCore) -> Self {
        Self { core }
    }

    /// Add a key, assigning the next id
    ///
    /// The house reference is taken as-is; it is not checked against the
    /// house collection.
    pub fn add(&self, new: NewKey) -> Key {
        let key = Key {
            id: self.core.next_key_id(),
            house_id: new.house_id,
            key_number: new.key_number,
            photo: new.photo,
        };

        self.core.keys.write().push(key.clone());

        info!(key_id = key.id, house_id = key.house_id, key_number = %key.key_number, "Added key");
        self.core.publish(StoreEvent::new(
            CollectionKind::Keys,
            ChangeKind::Added { id: key.id },
        ));

        key
    }

    /// Merge the provided fields into the key with `id`
    ///
    /// Returns `false` without mutating anything when no such key exists.
    pub fn update(&self, id: EntityId, update: KeyUpdate) -> bool {
        let mut keys = self.core.keys.write();
        let Some(key) = keys.iter_mut().find(|k| k.id == id) else {
            warn!(key_id = id, "Update for missing key ignored");
            return false;
        };

        if let Some(house_id) = update.house_id {
            key.house_id = house_id;
        }
        if let Some(key_number) = update.key_number {
            key.key_number = key_number;
        }
        if let Some(photo) = update.photo {
            key.photo = photo;
        }
        drop(keys);

        self.core.publish(StoreEvent::new(
            CollectionKind::Keys,
            ChangeKind::Updated { id },
        ));
        true
    }

    /// Remove the key with `id`; `false` when absent
    pub fn delete(&self, id: EntityId) -> bool {
        let mut keys = self.core.keys.write();
        let before = keys.len();
        keys.retain(|k| k.id != id);
        let removed = keys.len() < before;
        drop(keys);

        if removed {
            info!(key_id = id, "Deleted key");
            self.core.publish(StoreEvent::new(
                CollectionKind::Keys,
                ChangeKind::Removed { id },
            ));
        } else {
            warn!(key_id = id, "Delete for missing key ignored");
        }
        removed
    }

    /// Snapshot of one key
    pub fn get(&self, id: EntityId) -> Option<Key> {
        self.core.keys.read().iter().find(|k| k.id == id).cloned()
    }

    /// Snapshot of all keys in insertion order
    pub fn list(&self) -> Vec<Key> {
        self.core.keys.read().clone()
    }

    /// Name of the house a key belongs to, when it still exists
    pub fn resolve_house_name(&self, key: &Key) -> Option<String> {
        self.core
            .houses
            .read()
            .iter()
            .find(|h| h.id == key.house_id)
            .map(|h| h.name.clone())
    }
}
