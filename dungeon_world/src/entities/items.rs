//! Items and the key factory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::EntityId;

/// Item template of an ordinary dungeon key.
pub const KEY_ITEM_ID: u32 = 70029;

/// Item template of a boss room key.
pub const BOSS_KEY_ITEM_ID: u32 = 70030;

/// Metadata tag naming the door a key opens.
pub const PROP_TO_UNLOCK: &str = "prop_to_unlock";

/// Values stored in item metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    String(String),
}

/// Free-form key/value metadata attached to an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MetaData {
    values: BTreeMap<String, MetaValue>,
}

impl MetaData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), MetaValue::String(value.into()));
    }

    /// Get a string value; `None` if absent or of another type.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(MetaValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: MetaValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

/// Template-level data of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    /// Item template id.
    pub id: u32,
    /// Primary display color (0xRRGGBB).
    pub color1: u32,
    pub amount: u16,
}

/// A concrete item instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub entity_id: EntityId,
    pub info: ItemInfo,
    pub meta_data1: MetaData,
}

impl Item {
    /// Create a new item of the given template.
    pub fn new(class_id: u32) -> Self {
        Self {
            entity_id: EntityId::new(),
            info: ItemInfo {
                id: class_id,
                color1: 0,
                amount: 1,
            },
            meta_data1: MetaData::new(),
        }
    }

    /// Create a key that opens the door with the given internal name.
    pub fn create_key(class_id: u32, door_name: impl Into<String>) -> Self {
        let mut key = Self::new(class_id);
        key.meta_data1.set_string(PROP_TO_UNLOCK, door_name);
        key
    }

    /// Whether the item is built from one of the key templates.
    pub fn is_key(&self) -> bool {
        self.info.id == KEY_ITEM_ID || self.info.id == BOSS_KEY_ITEM_ID
    }

    /// Internal name of the door this key opens, if any.
    pub fn door_to_unlock(&self) -> Option<&str> {
        self.meta_data1.get_string(PROP_TO_UNLOCK)
    }
}
