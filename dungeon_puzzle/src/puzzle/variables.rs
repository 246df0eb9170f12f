//! Script-private puzzle variables.

use dungeon_world::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value types a puzzle script can store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VarValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Reference to a live entity (prop, monster, item).
    Entity(EntityId),
}

impl VarValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            VarValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            VarValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            VarValue::Float(f) => Some(*f),
            VarValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            VarValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<EntityId> {
        match self {
            VarValue::Entity(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<bool> for VarValue {
    fn from(value: bool) -> Self {
        VarValue::Bool(value)
    }
}

impl From<i64> for VarValue {
    fn from(value: i64) -> Self {
        VarValue::Int(value)
    }
}

impl From<i32> for VarValue {
    fn from(value: i32) -> Self {
        VarValue::Int(value.into())
    }
}

impl From<f64> for VarValue {
    fn from(value: f64) -> Self {
        VarValue::Float(value)
    }
}

impl From<String> for VarValue {
    fn from(value: String) -> Self {
        VarValue::String(value)
    }
}

impl From<&str> for VarValue {
    fn from(value: &str) -> Self {
        VarValue::String(value.to_owned())
    }
}

impl From<EntityId> for VarValue {
    fn from(value: EntityId) -> Self {
        VarValue::Entity(value)
    }
}

/// Named variable store. Last write wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Variables {
    values: HashMap<String, VarValue>,
}

impl Variables {
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<VarValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<VarValue> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
