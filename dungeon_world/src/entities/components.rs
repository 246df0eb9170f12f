//! Component definitions for entities.

use serde::{Deserialize, Serialize};

use super::{EntityId, Item};

/// Inventory component for entities that can hold items.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// All items currently held, in pickup order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove one item by identity.
    pub fn remove(&mut self, entity_id: EntityId) -> Option<Item> {
        let index = self.items.iter().position(|i| i.entity_id == entity_id)?;
        Some(self.items.remove(index))
    }

    pub fn has(&self, entity_id: EntityId) -> bool {
        self.items.iter().any(|i| i.entity_id == entity_id)
    }

    /// Count items built from a template.
    pub fn count(&self, class_id: u32) -> usize {
        self.items.iter().filter(|i| i.info.id == class_id).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Position and facing of an entity in its region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct WorldPosition {
    pub x: i32,
    pub y: i32,
    /// Facing in radians.
    pub direction: f32,
}
