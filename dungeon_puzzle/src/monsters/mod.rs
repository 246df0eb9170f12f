//! Monster groups - encounters spawned by puzzles.

use serde::{Deserialize, Serialize};

use dungeon_world::{degree_to_radian, Creature, EntityId, Item, Region, WorldPosition};

use crate::error::PuzzleResult;
use crate::placement::{Placement, PlacementError};
use crate::puzzle::Place;

fn one() -> u32 {
    1
}

/// One kind of monster in a group template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonMonsterData {
    pub race_id: u32,
    #[serde(default = "one")]
    pub amount: u32,
}

/// Template of a monster group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DungeonMonsterGroupData {
    pub monsters: Vec<DungeonMonsterData>,
}

impl DungeonMonsterGroupData {
    /// Total number of monsters the template spawns.
    pub fn count(&self) -> usize {
        self.monsters.iter().map(|m| m.amount as usize).sum()
    }
}

/// Definition of a puzzle from dungeon data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DungeonPuzzleData {
    /// Name of the script driving the puzzle.
    pub script: String,
    /// Monster group templates, addressed as "Mob1", "Mob2", ...
    #[serde(default)]
    pub groups: Vec<DungeonMonsterGroupData>,
}

impl DungeonPuzzleData {
    pub fn from_json(source: &str) -> PuzzleResult<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

/// A named set of monsters tied to a place.
#[derive(Debug)]
pub struct MonsterGroup {
    name: String,
    puzzle: String,
    place: String,
    placement: Placement,

    /// Allocated monsters, copied into the region on spawn.
    allocated: Vec<Creature>,

    /// Spawned monsters still alive.
    alive: Vec<EntityId>,
}

impl MonsterGroup {
    pub fn new(
        name: impl Into<String>,
        puzzle: impl Into<String>,
        place: impl Into<String>,
        placement: Placement,
    ) -> Self {
        Self {
            name: name.into(),
            puzzle: puzzle.into(),
            place: place.into(),
            placement,
            allocated: Vec::new(),
            alive: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn puzzle(&self) -> &str {
        &self.puzzle
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Create the group's monsters from a template, positioned in `place`.
    pub fn allocate(&mut self, data: &DungeonMonsterGroupData, place: &mut Place) -> Result<(), PlacementError> {
        for monster in &data.monsters {
            for _ in 0..monster.amount {
                let position = place.get_position(self.placement)?;
                self.allocated.push(Creature::monster(
                    monster.race_id,
                    WorldPosition {
                        x: position.x,
                        y: position.y,
                        direction: degree_to_radian(position.direction),
                    },
                ));
            }
        }
        log::debug!(
            "puzzle '{}': allocated {} monsters for group '{}'",
            self.puzzle,
            self.allocated.len(),
            self.name
        );
        Ok(())
    }

    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }

    /// Attach a drop to the last allocated monster.
    ///
    /// Returns false if nothing was allocated yet.
    pub fn add_drop(&mut self, item: Item) -> bool {
        match self.allocated.last_mut() {
            Some(monster) => {
                monster.drops.push(item);
                true
            }
            None => {
                log::warn!("group '{}': drop added before allocation, ignored", self.name);
                false
            }
        }
    }

    /// Put the allocated monsters into the region.
    ///
    /// Every call spawns a fresh copy of the allocation.
    pub fn spawn(&mut self, region: &mut Region) -> Vec<EntityId> {
        let spawned: Vec<EntityId> = self
            .allocated
            .iter()
            .map(|template| {
                let mut monster = template.clone();
                monster.id = EntityId::new();
                region.add_creature(monster)
            })
            .collect();

        log::info!(
            "puzzle '{}': spawned {} monsters of group '{}' in region {}",
            self.puzzle,
            spawned.len(),
            self.name,
            region.id()
        );
        self.alive.extend(spawned.iter().copied());
        spawned
    }

    /// Spawned monsters still alive, in spawn order.
    pub fn alive(&self) -> &[EntityId] {
        &self.alive
    }

    pub fn contains(&self, monster: EntityId) -> bool {
        self.alive.contains(&monster)
    }

    /// Monsters still alive.
    pub fn remaining(&self) -> usize {
        self.alive.len()
    }

    /// Record a death. Returns true if it was the group's last monster.
    pub fn on_monster_died(&mut self, monster: EntityId) -> bool {
        let before = self.alive.len();
        self.alive.retain(|id| *id != monster);
        before != self.alive.len() && self.alive.is_empty()
    }
}
