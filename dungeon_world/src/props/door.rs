//! Doors, as found in dungeons.

use serde::{Deserialize, Serialize};

use super::{Prop, PropBehavior, PropInfo, PropKind, TriggerContext};
use crate::entities::{Inventory, Item};
use crate::mechanics::{degree_to_radian, direction_to_radian, TILE_SIZE};
use crate::notice::NoticeType;

pub const MSG_OPENED_WITH_KEY: &str = "You have opened the door with the key.";
pub const MSG_NO_MATCHING_KEY: &str = "There is no matching key.";

/// Door classes placed by the floor generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorType {
    /// Plain door, never locked.
    Door,
    DoorWithLock,
    BossDoor,
}

/// Door-specific data of a door prop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Door {
    internal_name: String,
    door_type: DoorType,
    pub is_locked: bool,
}

impl Door {
    /// Create a door prop.
    ///
    /// `direction` is in degrees. Boss doors ignore it: they always face north
    /// and sit one and a half tiles north of `(x, y)`.
    pub fn create(
        prop_id: u32,
        x: i32,
        y: i32,
        direction: i32,
        door_type: DoorType,
        name: impl Into<String>,
        state: impl Into<String>,
    ) -> Prop {
        let name = name.into();
        let mut prop = Prop::new(prop_id, name.clone(), state);

        prop.info = match door_type {
            DoorType::BossDoor => PropInfo {
                x,
                y: y + TILE_SIZE + TILE_SIZE / 2,
                direction: direction_to_radian(0.0, 1.0),
                ..PropInfo::default()
            },
            DoorType::Door | DoorType::DoorWithLock => PropInfo {
                x,
                y,
                direction: degree_to_radian(direction),
                ..PropInfo::default()
            },
        };

        match door_type {
            DoorType::Door => prop.behavior.set(UnlockedDoorBehavior),
            DoorType::DoorWithLock | DoorType::BossDoor => prop.behavior.set(LockedDoorBehavior),
        }

        prop.kind = PropKind::Door(Door {
            internal_name: name,
            door_type,
            is_locked: false,
        });
        prop
    }

    /// Name used by puzzles and keys to address the door.
    pub fn internal_name(&self) -> &str {
        &self.internal_name
    }

    pub fn door_type(&self) -> DoorType {
        self.door_type
    }
}

/// Behavior of a plain door.
///
/// Reserved for asking the actor whether to enter the room before teleporting
/// them inside; triggering currently does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlockedDoorBehavior;

impl PropBehavior for UnlockedDoorBehavior {
    fn on_trigger(&mut self, _prop: &mut Prop, _ctx: &mut TriggerContext<'_>) {}
}

/// Behavior of lockable and boss doors.
///
/// A locked door opens only for an actor carrying its key, which is used up.
/// An unlocked door just opens; clicking it never locks it again.
#[derive(Debug, Clone, Copy, Default)]
pub struct LockedDoorBehavior;

impl PropBehavior for LockedDoorBehavior {
    fn on_trigger(&mut self, prop: &mut Prop, ctx: &mut TriggerContext<'_>) {
        let Some(door) = prop.as_door() else {
            log::warn!("locked door behavior on non-door prop '{}'", prop.name);
            return;
        };

        if !door.is_locked {
            prop.open();
            return;
        }

        match take_matching_key(&mut ctx.actor.inventory, door.internal_name()) {
            Some(key) => {
                log::debug!(
                    "door '{}' unlocked by {} with key {}",
                    prop.name,
                    ctx.actor.id,
                    key.entity_id
                );
                prop.open();
                if let Some(door) = prop.as_door_mut() {
                    door.is_locked = false;
                }
                ctx.notice(NoticeType::MiddleSystem, MSG_OPENED_WITH_KEY);
            }
            None => ctx.notice(NoticeType::MiddleSystem, MSG_NO_MATCHING_KEY),
        }
    }
}

/// Remove and return the first key in the inventory that opens `door_name`.
fn take_matching_key(inventory: &mut Inventory, door_name: &str) -> Option<Item> {
    let key_id = inventory
        .items()
        .find(|item| item.is_key() && item.door_to_unlock() == Some(door_name))
        .map(|item| item.entity_id)?;
    inventory.remove(key_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Creature, BOSS_KEY_ITEM_ID, KEY_ITEM_ID};
    use crate::notice::NoticeLog;
    use crate::props::{STATE_CLOSED, STATE_OPEN};
    use std::f32::consts::PI;

    fn locked_door(name: &str) -> Prop {
        let mut door = Door::create(10135, 1200, 1200, 90, DoorType::DoorWithLock, name, STATE_CLOSED);
        if let Some(data) = door.as_door_mut() {
            data.is_locked = true;
        }
        door
    }

    fn is_locked(prop: &Prop) -> bool {
        prop.as_door().map(|d| d.is_locked).unwrap_or(false)
    }

    #[test]
    fn test_matching_key_unlocks_and_is_consumed() {
        let mut door = locked_door("door_vault");
        let mut hero = Creature::new("Hero");
        hero.inventory.add(Item::create_key(KEY_ITEM_ID, "door_vault"));
        hero.inventory.add(Item::create_key(KEY_ITEM_ID, "door_vault"));
        let mut notices = NoticeLog::new();

        door.trigger(&mut hero, &mut notices);

        assert!(door.is_open());
        assert!(!is_locked(&door));
        assert_eq!(hero.inventory.count(KEY_ITEM_ID), 1);
        assert_eq!(notices.last().map(|n| n.text.as_str()), Some(MSG_OPENED_WITH_KEY));
    }

    #[test]
    fn test_boss_key_template_also_matches() {
        let mut door = locked_door("door_boss");
        let mut hero = Creature::new("Hero");
        hero.inventory.add(Item::create_key(BOSS_KEY_ITEM_ID, "door_boss"));
        let mut notices = NoticeLog::new();

        door.trigger(&mut hero, &mut notices);

        assert!(door.is_open());
        assert!(hero.inventory.is_empty());
    }

    #[test]
    fn test_wrong_key_leaves_door_locked() {
        let mut door = locked_door("door_vault");
        let mut hero = Creature::new("Hero");
        hero.inventory.add(Item::create_key(KEY_ITEM_ID, "door_other"));
        let mut notices = NoticeLog::new();

        door.trigger(&mut hero, &mut notices);

        assert_eq!(door.state, STATE_CLOSED);
        assert!(is_locked(&door));
        assert_eq!(hero.inventory.len(), 1);
        assert_eq!(notices.last().map(|n| n.text.as_str()), Some(MSG_NO_MATCHING_KEY));
    }

    #[test]
    fn test_non_key_item_with_door_metadata_is_ignored() {
        let mut door = locked_door("door_vault");
        let mut hero = Creature::new("Hero");
        let mut fake = Item::new(51001);
        fake.meta_data1.set_string("prop_to_unlock", "door_vault");
        hero.inventory.add(fake);
        let mut notices = NoticeLog::new();

        door.trigger(&mut hero, &mut notices);

        assert!(is_locked(&door));
        assert_eq!(hero.inventory.len(), 1);
    }

    #[test]
    fn test_unlocked_closed_door_opens_without_key() {
        let mut door = Door::create(10135, 0, 0, 0, DoorType::DoorWithLock, "d", STATE_CLOSED);
        let mut hero = Creature::new("Hero");
        hero.inventory.add(Item::create_key(KEY_ITEM_ID, "d"));
        let mut notices = NoticeLog::new();

        door.trigger(&mut hero, &mut notices);

        assert_eq!(door.state, STATE_OPEN);
        // Key untouched, nothing said.
        assert_eq!(hero.inventory.len(), 1);
        assert!(notices.notices().is_empty());
    }

    #[test]
    fn test_plain_door_trigger_does_nothing() {
        let mut door = Door::create(10135, 0, 0, 0, DoorType::Door, "d", STATE_CLOSED);
        let mut hero = Creature::new("Hero");
        let mut notices = NoticeLog::new();

        door.trigger(&mut hero, &mut notices);

        assert_eq!(door.state, STATE_CLOSED);
        assert!(notices.notices().is_empty());
    }

    #[test]
    fn test_open_close_ignore_lock() {
        let mut door = locked_door("d");
        door.open();
        assert!(door.is_open());
        assert!(is_locked(&door));
        door.close();
        assert!(!door.is_open());
    }

    #[test]
    fn test_boss_door_faces_north_and_is_offset() {
        for direction in [0, 90, 180, 270] {
            let door = Door::create(10135, 500, 1000, direction, DoorType::BossDoor, "boss", STATE_CLOSED);
            assert!((door.info.direction - PI / 2.0).abs() < 1e-6);
            assert_eq!(door.info.x, 500);
            assert_eq!(door.info.y, 1000 + 3600);
        }
    }

    #[test]
    fn test_regular_door_keeps_facing() {
        let door = Door::create(10135, 500, 1000, 180, DoorType::DoorWithLock, "d", STATE_OPEN);
        assert!((door.info.direction - PI).abs() < 1e-6);
        assert_eq!(door.info.y, 1000);
        assert_eq!(door.as_door().map(|d| d.internal_name()), Some("d"));
        assert_eq!(door.as_door().map(|d| d.door_type()), Some(DoorType::DoorWithLock));
    }
}
