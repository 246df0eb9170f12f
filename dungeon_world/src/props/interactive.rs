//! Chests and switches.

use super::{Prop, PropBehavior, PropKind, TriggerContext, STATE_CLOSED, STATE_OPEN};
use crate::entities::Item;
use crate::notice::NoticeType;

pub const CHEST_PROP_ID: u32 = 10201;
pub const SWITCH_PROP_ID: u32 = 10202;

pub const STATE_ON: &str = "on";
pub const STATE_OFF: &str = "off";

/// A chest that hands its contents to whoever opens it first.
pub struct Chest;

impl Chest {
    pub fn create(name: impl Into<String>, items: Vec<Item>) -> Prop {
        let mut prop = Prop::new(CHEST_PROP_ID, name, STATE_CLOSED);
        prop.kind = PropKind::Chest(items);
        prop.behavior.set(ChestBehavior);
        prop
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChestBehavior;

impl PropBehavior for ChestBehavior {
    fn on_trigger(&mut self, prop: &mut Prop, ctx: &mut TriggerContext<'_>) {
        if prop.is_open() {
            return;
        }
        prop.set_state(STATE_OPEN);

        if let PropKind::Chest(items) = &mut prop.kind {
            let count = items.len();
            for item in items.drain(..) {
                ctx.actor.inventory.add(item);
            }
            if count > 0 {
                ctx.notice(NoticeType::MiddleSystem, "You found something in the chest.");
            }
        }
    }
}

/// A two-state switch.
pub struct Switch;

impl Switch {
    pub fn create(name: impl Into<String>) -> Prop {
        let mut prop = Prop::new(SWITCH_PROP_ID, name, STATE_OFF);
        prop.behavior.set(SwitchBehavior);
        prop
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SwitchBehavior;

impl PropBehavior for SwitchBehavior {
    fn on_trigger(&mut self, prop: &mut Prop, _ctx: &mut TriggerContext<'_>) {
        let next = if prop.state == STATE_ON { STATE_OFF } else { STATE_ON };
        prop.set_state(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Creature, KEY_ITEM_ID};
    use crate::notice::NoticeLog;

    #[test]
    fn test_chest_hands_out_contents_once() {
        let key = Item::create_key(KEY_ITEM_ID, "door_vault");
        let mut chest = Chest::create("chest_1", vec![key.clone()]);
        let mut hero = Creature::new("Hero");
        let mut other = Creature::new("Other");
        let mut notices = NoticeLog::new();

        chest.trigger(&mut hero, &mut notices);
        chest.trigger(&mut other, &mut notices);

        assert!(chest.is_open());
        assert!(hero.inventory.has(key.entity_id));
        assert!(other.inventory.is_empty());
        assert_eq!(notices.notices().len(), 1);
    }

    #[test]
    fn test_empty_chest_is_silent() {
        let mut chest = Chest::create("chest_1", Vec::new());
        let mut hero = Creature::new("Hero");
        let mut notices = NoticeLog::new();

        chest.trigger(&mut hero, &mut notices);

        assert!(chest.is_open());
        assert!(notices.notices().is_empty());
    }

    #[test]
    fn test_switch_toggles() {
        let mut switch = Switch::create("lever");
        let mut hero = Creature::new("Hero");
        let mut notices = NoticeLog::new();

        assert_eq!(switch.state, STATE_OFF);
        switch.trigger(&mut hero, &mut notices);
        assert_eq!(switch.state, STATE_ON);
        switch.trigger(&mut hero, &mut notices);
        assert_eq!(switch.state, STATE_OFF);
    }
}
