//! Creature definitions - players and monsters.

use serde::{Deserialize, Serialize};

use super::{EntityId, Inventory, Item, RegionId, WorldPosition};

/// A creature in a region, either a player character or a monster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: EntityId,
    pub name: String,
    /// Race template id; players use 0.
    pub race_id: u32,
    pub region: RegionId,
    pub position: WorldPosition,
    pub inventory: Inventory,
    /// Items dropped when the creature dies.
    pub drops: Vec<Item>,
}

impl Creature {
    /// Create a new player character with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            race_id: 0,
            region: RegionId::default(),
            position: WorldPosition::default(),
            inventory: Inventory::default(),
            drops: Vec::new(),
        }
    }

    /// Create a monster of the given race at a position.
    pub fn monster(race_id: u32, position: WorldPosition) -> Self {
        Self {
            name: format!("monster_{}", race_id),
            race_id,
            position,
            ..Self::new("")
        }
    }

    pub fn is_monster(&self) -> bool {
        self.race_id != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_character() {
        let creature = Creature::new("Test Hero");
        assert_eq!(creature.name, "Test Hero");
        assert!(!creature.is_monster());
        assert!(creature.inventory.is_empty());
    }

    #[test]
    fn test_monster() {
        let position = WorldPosition {
            x: 100,
            y: -200,
            direction: 0.0,
        };
        let monster = Creature::monster(110001, position);
        assert!(monster.is_monster());
        assert_eq!(monster.position, position);
        assert!(monster.drops.is_empty());
    }
}
