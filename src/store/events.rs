//! Store change notifications
//! Every mutation publishes one event so subscribed views can re-render

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::entities::EntityId;

/// Which top-level collection changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Warehouse,
    Houses,
    Keys,
}

/// What happened to a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeKind {
    Added { id: EntityId },
    Updated { id: EntityId },
    Removed { id: EntityId },
}

/// A single observed mutation
#[derive(Debug, Clone, Serialize)]
pub struct StoreEvent {
    pub collection: CollectionKind,
    pub change: ChangeKind,
    pub at: DateTime<Utc>,
}

impl StoreEvent {
    pub fn new(collection: CollectionKind, change: ChangeKind) -> Self {
        Self {
            collection,
            change,
            at: Utc::now(),
        }
    }

    /// Id of the affected record
    pub fn entity_id(&self) -> EntityId {
        match self.change {
            ChangeKind::Added { id } | ChangeKind::Updated { id } | ChangeKind::Removed { id } => {
                id
            }
        }
    }
}
