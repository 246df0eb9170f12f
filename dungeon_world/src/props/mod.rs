//! Props - interactive world objects (doors, chests, switches, decorations).
//!
//! Every prop carries a [`Behavior`]: an ordered chain of handlers run when an
//! actor triggers it. The handler installed at construction decides what the
//! prop does on its own; later handlers (e.g. an [`EventForwarder`]) are
//! appended and run after it.

mod behavior;
mod door;
mod interactive;

pub use behavior::*;
pub use door::*;
pub use interactive::*;

use std::cell::RefCell;
use std::rc::Rc;

use crate::entities::{Creature, EntityId, Item, RegionId};
use crate::notice::NoticeSink;

/// Shared handle to a prop.
///
/// A prop can be referenced from several owners at once (a region, one or two
/// places, a puzzle's prop table), all on the same region loop.
pub type PropHandle = Rc<RefCell<Prop>>;

pub const STATE_OPEN: &str = "open";
pub const STATE_CLOSED: &str = "closed";

/// Placement of a prop in its region.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PropInfo {
    pub region: RegionId,
    pub x: i32,
    pub y: i32,
    /// Facing in radians.
    pub direction: f32,
}

/// Type-specific data of a prop.
#[derive(Debug, Clone, PartialEq)]
pub enum PropKind {
    /// Decoration or scripted object with no data of its own.
    Plain,
    Door(Door),
    /// Chest and its remaining contents.
    Chest(Vec<Item>),
}

/// A world object that actors can trigger.
#[derive(Debug)]
pub struct Prop {
    /// Live identity, assigned once the prop is registered in a region.
    pub entity_id: Option<EntityId>,
    /// Prop template id.
    pub class_id: u32,
    pub name: String,
    pub info: PropInfo,
    pub state: String,
    pub kind: PropKind,
    pub behavior: Behavior,
}

impl Prop {
    /// Create a plain prop with an empty trigger chain.
    pub fn new(class_id: u32, name: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: None,
            class_id,
            name: name.into(),
            info: PropInfo::default(),
            state: state.into(),
            kind: PropKind::Plain,
            behavior: Behavior::default(),
        }
    }

    /// Wrap the prop into a shared handle.
    pub fn into_handle(self) -> PropHandle {
        Rc::new(RefCell::new(self))
    }

    /// Whether the prop has been registered in a region.
    pub fn is_live(&self) -> bool {
        self.entity_id.is_some()
    }

    pub fn set_state(&mut self, state: impl Into<String>) {
        self.state = state.into();
    }

    pub fn open(&mut self) {
        self.set_state(STATE_OPEN);
    }

    pub fn close(&mut self) {
        self.set_state(STATE_CLOSED);
    }

    pub fn is_open(&self) -> bool {
        self.state == STATE_OPEN
    }

    pub fn as_door(&self) -> Option<&Door> {
        match &self.kind {
            PropKind::Door(door) => Some(door),
            _ => None,
        }
    }

    pub fn as_door_mut(&mut self) -> Option<&mut Door> {
        match &mut self.kind {
            PropKind::Door(door) => Some(door),
            _ => None,
        }
    }

    /// Run the trigger chain for an actor.
    ///
    /// Returns the events emitted by the chain for the caller to route.
    pub fn trigger(&mut self, actor: &mut Creature, notices: &mut dyn NoticeSink) -> Vec<PropEvent> {
        let mut chain = std::mem::take(&mut self.behavior);
        let mut ctx = TriggerContext::new(actor, notices);

        chain.run(self, &mut ctx);

        // Handlers installed while the chain ran go after the existing ones.
        chain.append(&mut self.behavior);
        self.behavior = chain;

        ctx.into_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeLog;

    #[test]
    fn test_new_prop_is_not_live() {
        let prop = Prop::new(10000, "statue", "");
        assert!(!prop.is_live());
        assert!(prop.as_door().is_none());
        assert!(prop.behavior.is_empty());
    }

    #[test]
    fn test_open_close() {
        let mut prop = Prop::new(10000, "gate", STATE_CLOSED);
        assert!(!prop.is_open());
        prop.open();
        assert!(prop.is_open());
        prop.close();
        assert_eq!(prop.state, STATE_CLOSED);
    }

    #[test]
    fn test_trigger_plain_prop_is_noop() {
        let mut prop = Prop::new(10000, "statue", "");
        let mut actor = Creature::new("Hero");
        let mut notices = NoticeLog::new();

        let events = prop.trigger(&mut actor, &mut notices);
        assert!(events.is_empty());
        assert!(notices.notices().is_empty());
    }
}
