//! Entity definitions for the inventory store
//! These are the records the store collections hold, plus the insertion
//! and partial-update payloads the mutators accept

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier for records in the top-level collections
pub type EntityId = u64;

/// Stock categories available to warehouse items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Furniture,
    Lighting,
    Decor,
    Appliances,
    Textiles,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 5] = [
        Category::Furniture,
        Category::Lighting,
        Category::Decor,
        Category::Appliances,
        Category::Textiles,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Furniture => "Furniture",
            Category::Lighting => "Lighting",
            Category::Decor => "Decor",
            Category::Appliances => "Appliances",
            Category::Textiles => "Textiles",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Furniture
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Error for category names outside the fixed set
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// A stock item held in the warehouse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseItem {
    pub id: EntityId,
    pub name: String,
    pub category: Category,
    pub quantity: u32,
    /// Photo as an opaque data URI
    pub photo: Option<String>,
}

/// New warehouse item for insertion (id assigned by the store)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWarehouseItem {
    pub name: String,
    pub category: Category,
    pub quantity: u32,
    pub photo: Option<String>,
}

/// Partial warehouse item update; only `Some` fields are merged
#[derive(Debug, Clone, Default, Serialize)]
pub struct WarehouseItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Option<String>>,
}

/// A house under renovation
///
/// `progress` is a completion percentage and is clamped into 0..=100 on
/// every write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct House {
    pub id: EntityId,
    pub name: String,
    pub progress: u8,
    pub address: String,
    pub photo: Option<String>,
    /// Stock allocated to this house; empty when nothing is allocated
    #[serde(default)]
    pub allocated_items: Vec<AllocatedItem>,
}

/// New house for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHouse {
    pub name: String,
    pub progress: u8,
    pub address: String,
    pub photo: Option<String>,
}

/// Partial house update; only `Some` fields are merged
#[derive(Debug, Clone, Default, Serialize)]
pub struct HouseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Option<String>>,
}

/// A key belonging to a house
///
/// `house_id` is a non-owning reference. Deleting the house does not touch
/// the key under the default delete policy; lookups then resolve to nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    pub id: EntityId,
    pub house_id: EntityId,
    pub key_number: String,
    pub photo: Option<String>,
}

/// New key for insertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewKey {
    pub house_id: EntityId,
    pub key_number: String,
    pub photo: Option<String>,
}

/// Partial key update; only `Some` fields are merged
#[derive(Debug, Clone, Default, Serialize)]
pub struct KeyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Option<String>>,
}

/// A quantity of one warehouse item allocated to a house
///
/// Lives embedded in `House::allocated_items`, never as a top-level
/// collection. Rows are minted outside the per-collection counters, so they
/// carry random UUIDs instead of sequential ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatedItem {
    pub id: Uuid,
    pub warehouse_item_id: EntityId,
    pub quantity: u32,
}

/// Clamp a raw progress value into the valid percentage range
pub fn clamp_progress(raw: i64) -> u8 {
    raw.clamp(0, 100) as u8
}
