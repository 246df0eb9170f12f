//! Regions - the live simulation space of one dungeon floor.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

use crate::entities::{Creature, EntityId, RegionId};
use crate::notice::NoticeSink;
use crate::props::{PropEvent, PropHandle};

/// Shared handle to a region.
pub type RegionHandle = Rc<RefCell<Region>>;

/// Errors raised by region bookkeeping.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("prop {0} is not registered in region {1}")]
    PropNotFound(EntityId, RegionId),

    #[error("creature {0} is not in region {1}")]
    CreatureNotFound(EntityId, RegionId),

    #[error("prop '{name}' is already registered as {entity_id}")]
    AlreadyRegistered { name: String, entity_id: EntityId },
}

pub type WorldResult<T> = Result<T, WorldError>;

/// The complete live state of one region.
#[derive(Debug, Default)]
pub struct Region {
    id: RegionId,

    /// Registered props by live identity.
    props: HashMap<EntityId, PropHandle>,

    /// Creatures currently in the region (monsters; players are owned by
    /// their connections).
    creatures: HashMap<EntityId, Creature>,
}

impl Region {
    /// Create a new empty region.
    pub fn new(id: RegionId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn into_handle(self) -> RegionHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Register a prop for simulation and visibility.
    ///
    /// Assigns the prop its live identity. A prop can be registered once.
    pub fn add_prop(&mut self, prop: PropHandle) -> WorldResult<EntityId> {
        let entity_id = {
            let mut p = prop.borrow_mut();
            if let Some(entity_id) = p.entity_id {
                return Err(WorldError::AlreadyRegistered {
                    name: p.name.clone(),
                    entity_id,
                });
            }
            let entity_id = EntityId::new();
            p.entity_id = Some(entity_id);
            p.info.region = self.id;
            log::debug!("region {}: registered prop '{}' as {}", self.id, p.name, entity_id);
            entity_id
        };
        self.props.insert(entity_id, prop);
        Ok(entity_id)
    }

    pub fn get_prop(&self, entity_id: EntityId) -> Option<PropHandle> {
        self.props.get(&entity_id).cloned()
    }

    /// Find a registered prop by name.
    pub fn find_prop(&self, name: &str) -> Option<PropHandle> {
        self.props
            .values()
            .find(|p| p.borrow().name == name)
            .cloned()
    }

    pub fn prop_count(&self) -> usize {
        self.props.len()
    }

    /// Trigger a registered prop on behalf of an actor.
    pub fn trigger_prop(
        &self,
        entity_id: EntityId,
        actor: &mut Creature,
        notices: &mut dyn NoticeSink,
    ) -> WorldResult<Vec<PropEvent>> {
        let prop = self
            .get_prop(entity_id)
            .ok_or(WorldError::PropNotFound(entity_id, self.id))?;
        let events = prop.borrow_mut().trigger(actor, notices);
        Ok(events)
    }

    /// Add a creature to the region.
    pub fn add_creature(&mut self, mut creature: Creature) -> EntityId {
        let id = creature.id;
        creature.region = self.id;
        self.creatures.insert(id, creature);
        id
    }

    pub fn get_creature(&self, id: EntityId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn remove_creature(&mut self, id: EntityId) -> WorldResult<Creature> {
        self.creatures
            .remove(&id)
            .ok_or(WorldError::CreatureNotFound(id, self.id))
    }

    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }
}
