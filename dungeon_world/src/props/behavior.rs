//! Trigger chains and the events they emit.

use std::fmt;

use super::Prop;
use crate::entities::{Creature, EntityId};
use crate::notice::{NoticeSink, NoticeType};

/// A handler run when an actor triggers a prop.
pub trait PropBehavior: fmt::Debug {
    fn on_trigger(&mut self, prop: &mut Prop, ctx: &mut TriggerContext<'_>);
}

/// Ordered chain of trigger handlers.
#[derive(Debug, Default)]
pub struct Behavior {
    handlers: Vec<Box<dyn PropBehavior>>,
}

impl Behavior {
    /// Replace the whole chain with a single handler.
    pub fn set(&mut self, handler: impl PropBehavior + 'static) {
        self.handlers.clear();
        self.handlers.push(Box::new(handler));
    }

    /// Append a handler after the existing ones.
    pub fn add(&mut self, handler: impl PropBehavior + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub(crate) fn append(&mut self, other: &mut Behavior) {
        self.handlers.append(&mut other.handlers);
    }

    pub(crate) fn run(&mut self, prop: &mut Prop, ctx: &mut TriggerContext<'_>) {
        for handler in self.handlers.iter_mut() {
            handler.on_trigger(prop, ctx);
        }
    }
}

/// Identifies who receives events emitted by an [`EventForwarder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

/// Emitted when a forwarded prop is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropEvent {
    pub listener: ListenerId,
    pub prop: EntityId,
    pub actor: EntityId,
}

/// Everything a handler may touch while a prop is being triggered.
pub struct TriggerContext<'a> {
    pub actor: &'a mut Creature,
    notices: &'a mut dyn NoticeSink,
    events: Vec<PropEvent>,
}

impl<'a> TriggerContext<'a> {
    pub fn new(actor: &'a mut Creature, notices: &'a mut dyn NoticeSink) -> Self {
        Self {
            actor,
            notices,
            events: Vec::new(),
        }
    }

    /// Send a notice to the triggering actor.
    pub fn notice(&mut self, kind: NoticeType, text: &str) {
        self.notices.notice(self.actor.id, kind, text);
    }

    pub fn emit(&mut self, event: PropEvent) {
        self.events.push(event);
    }

    pub fn into_events(self) -> Vec<PropEvent> {
        self.events
    }
}

/// Reports every trigger of a registered prop to a listener.
#[derive(Debug, Clone, Copy)]
pub struct EventForwarder {
    pub listener: ListenerId,
}

impl PropBehavior for EventForwarder {
    fn on_trigger(&mut self, prop: &mut Prop, ctx: &mut TriggerContext<'_>) {
        let Some(entity_id) = prop.entity_id else {
            log::warn!("prop '{}' triggered before registration, event dropped", prop.name);
            return;
        };
        let actor = ctx.actor.id;
        ctx.emit(PropEvent {
            listener: self.listener,
            prop: entity_id,
            actor,
        });
    }
}
