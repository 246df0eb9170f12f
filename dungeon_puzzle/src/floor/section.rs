//! Floor sections - the pre-generated rooms a puzzle can claim.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use dungeon_world::PropHandle;

/// Shared handle to a floor section; all puzzles of a section draw rooms
/// from the same pool.
pub type SectionHandle = Rc<RefCell<FloorSection>>;

/// A room produced by the floor generator.
#[derive(Debug, Clone)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    /// Doors guarding the room. The first one is the lock door.
    ///
    /// A doorway between two rooms is the same handle in both.
    pub doors: Vec<PropHandle>,
    /// Color of the keys for this room's lock.
    pub lock_color: u32,
}

impl Room {
    pub fn new(x: i32, y: i32, lock_color: u32) -> Self {
        Self {
            x,
            y,
            doors: Vec::new(),
            lock_color,
        }
    }

    pub fn with_door(mut self, door: PropHandle) -> Self {
        self.doors.push(door);
        self
    }
}

/// One section of a dungeon floor.
#[derive(Debug, Default)]
pub struct FloorSection {
    free_rooms: VecDeque<Room>,
}

impl FloorSection {
    pub fn new(rooms: impl IntoIterator<Item = Room>) -> Self {
        Self {
            free_rooms: rooms.into_iter().collect(),
        }
    }

    pub fn into_handle(self) -> SectionHandle {
        Rc::new(RefCell::new(self))
    }

    /// Claim the next free room, in generation order.
    pub fn reserve_room(&mut self) -> Option<Room> {
        self.free_rooms.pop_front()
    }

    pub fn free_room_count(&self) -> usize {
        self.free_rooms.len()
    }
}
