//! Places - named sub-areas of a floor section owned by a puzzle.

use std::collections::HashMap;

use dungeon_world::{EntityId, Item, PropHandle};

use crate::floor::Room;
use crate::placement::{Placement, PlacementError, Position, PositionProvider};

/// A named area of a puzzle, anchored at a room.
#[derive(Debug)]
pub struct Place {
    name: String,
    x: i32,
    y: i32,
    doors: Vec<PropHandle>,
    lock_color: u32,

    is_lock: bool,
    is_boss_lock: bool,
    /// Key of the active lock.
    lock_key: Option<EntityId>,

    radius: i32,
    seed: Option<u64>,
    providers: HashMap<Placement, PositionProvider>,
}

impl Place {
    pub fn new(name: impl Into<String>, room: Room, radius: i32) -> Self {
        Self {
            name: name.into(),
            x: room.x,
            y: room.y,
            doors: room.doors,
            lock_color: room.lock_color,
            is_lock: false,
            is_boss_lock: false,
            lock_key: None,
            radius,
            seed: None,
            providers: HashMap::new(),
        }
    }

    /// Make random placements in this place reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Anchor coordinate.
    pub fn anchor(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn doors(&self) -> &[PropHandle] {
        &self.doors
    }

    pub fn lock_color(&self) -> u32 {
        self.lock_color
    }

    /// Whether the place can be locked with a key.
    pub fn is_lock(&self) -> bool {
        self.is_lock
    }

    pub fn is_boss_lock(&self) -> bool {
        self.is_boss_lock
    }

    /// Whether a lock is currently active.
    pub fn is_locked(&self) -> bool {
        self.lock_key.is_some()
    }

    pub fn lock_key(&self) -> Option<EntityId> {
        self.lock_key
    }

    /// The door a key for this place opens.
    pub fn lock_door(&self) -> Option<&PropHandle> {
        self.doors.first()
    }

    /// Mark the place as lockable through its lock door.
    pub fn declare_lock(&mut self) {
        if self.doors.is_empty() {
            log::warn!("place '{}' has no doors and cannot be a lock", self.name);
            return;
        }
        self.is_lock = true;
    }

    /// Mark the place as the boss room lock.
    pub fn declare_boss_lock(&mut self) {
        self.declare_lock();
        self.is_boss_lock = self.is_lock;
    }

    /// Lock the lock door with the given key.
    pub(crate) fn lock_place(&mut self, key: &Item) {
        if let Some(door) = self.lock_door() {
            let mut door = door.borrow_mut();
            door.close();
            if let Some(data) = door.as_door_mut() {
                data.is_locked = true;
            }
        }
        self.lock_key = Some(key.entity_id);
    }

    /// Clear the lock and open every guarding door.
    pub(crate) fn open_place(&mut self) {
        for door in &self.doors {
            let mut door = door.borrow_mut();
            if let Some(data) = door.as_door_mut() {
                data.is_locked = false;
            }
            door.open();
        }
        self.lock_key = None;
    }

    /// Next absolute position for a placement pattern.
    pub fn get_position(&mut self, placement: Placement) -> Result<Position, PlacementError> {
        let (radius, seed) = (self.radius, self.seed);
        let provider = self.providers.entry(placement).or_insert_with(|| match seed {
            Some(seed) => PositionProvider::with_seed(placement, radius, seed),
            None => PositionProvider::new(placement, radius),
        });

        let offset = provider.next_position()?;
        Ok(Position {
            x: self.x + offset.x,
            y: self.y + offset.y,
            direction: offset.direction,
        })
    }
}
