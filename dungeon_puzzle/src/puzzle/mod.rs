//! Puzzle - binds a scripted puzzle definition to a live dungeon region.
//!
//! A puzzle owns its places, the props it placed, the keys it minted, its
//! monster groups and a variable store for its script. Its life has three
//! steps:
//!
//! 1. **Prepare**: the script reserves places and declares locks
//!    ([`Puzzle::prepare`]).
//! 2. **Create**: the puzzle is bound to a region, registers the doors of its
//!    places and lets the script set up props and monsters
//!    ([`Puzzle::on_create`]).
//! 3. **Run**: triggers of puzzle props are forwarded to the script
//!    ([`Puzzle::on_prop_event`]).
//!
//! Name tables (props, keys, variables) are last-write-wins; scripts are
//! responsible for unique names.

mod place;
mod script;
mod variables;

pub use place::*;
pub use script::*;
pub use variables::*;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use dungeon_world::{
    degree_to_radian, EntityId, EventForwarder, Item, ListenerId, Prop, PropHandle, RegionHandle,
    WorldError, BOSS_KEY_ITEM_ID, KEY_ITEM_ID,
};

use crate::config::PuzzleConfig;
use crate::error::{PuzzleError, PuzzleResult};
use crate::floor::SectionHandle;
use crate::monsters::{DungeonMonsterGroupData, DungeonPuzzleData, MonsterGroup};
use crate::placement::Placement;

pub struct Puzzle {
    name: String,
    listener: ListenerId,
    data: DungeonPuzzleData,
    script: Rc<dyn PuzzleScript>,
    section: SectionHandle,
    config: PuzzleConfig,

    /// Set once by `on_create`.
    region: Option<RegionHandle>,

    places: HashMap<String, Place>,
    props: HashMap<String, PropHandle>,
    keys: HashMap<String, Item>,
    monster_group_data: HashMap<String, DungeonMonsterGroupData>,
    monster_groups: HashMap<String, MonsterGroup>,
    variables: Variables,
}

impl Puzzle {
    /// Create a puzzle for a floor section.
    ///
    /// `listener` identifies the puzzle in events emitted by its props.
    pub fn new(
        listener: ListenerId,
        section: SectionHandle,
        data: DungeonPuzzleData,
        script: Rc<dyn PuzzleScript>,
        config: PuzzleConfig,
    ) -> Self {
        let monster_group_data = data
            .groups
            .iter()
            .enumerate()
            .map(|(i, group)| (format!("Mob{}", i + 1), group.clone()))
            .collect();

        Self {
            name: script.name().to_owned(),
            listener,
            data,
            script,
            section,
            config,
            region: None,
            places: HashMap::new(),
            props: HashMap::new(),
            keys: HashMap::new(),
            monster_group_data,
            monster_groups: HashMap::new(),
            variables: Variables::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    pub fn data(&self) -> &DungeonPuzzleData {
        &self.data
    }

    pub fn region(&self) -> Option<&RegionHandle> {
        self.region.as_ref()
    }

    /// Whether the puzzle is bound to a region.
    pub fn is_created(&self) -> bool {
        self.region.is_some()
    }

    /// Let the script reserve places and declare locks.
    pub fn prepare(&mut self) -> PuzzleResult<()> {
        let script = Rc::clone(&self.script);
        script.on_prepare(self)
    }

    /// Bind the puzzle to its region.
    ///
    /// Registers every place door that is not live yet (a door shared with
    /// another puzzle may already be), then hands the puzzle to the script.
    pub fn on_create(&mut self, region: RegionHandle) -> PuzzleResult<()> {
        if self.region.is_some() {
            return Err(PuzzleError::AlreadyCreated(self.name.clone()));
        }

        {
            let mut region = region.borrow_mut();
            for place in self.places.values() {
                for door in place.doors() {
                    if door.borrow().is_live() {
                        continue;
                    }
                    region.add_prop(Rc::clone(door))?;
                }
            }
            log::info!("puzzle '{}' created in region {}", self.name, region.id());
        }

        self.region = Some(region);
        let script = Rc::clone(&self.script);
        script.on_puzzle_create(self)
    }

    /// Reserve a room of the section as a new named place.
    pub fn new_place(&mut self, name: &str) -> PuzzleResult<&mut Place> {
        let room = self
            .section
            .borrow_mut()
            .reserve_room()
            .ok_or_else(|| PuzzleError::NoFreeRoom(name.to_owned()))?;

        let mut place = Place::new(name, room, self.config.placement_radius);
        if let Some(seed) = self.config.placement_seed {
            place = place.with_seed(seed);
        }
        if self.places.contains_key(name) {
            log::warn!("puzzle '{}': place '{}' replaced", self.name, name);
        }
        self.places.insert(name.to_owned(), place);
        self.get_place_mut(name)
    }

    pub fn get_place(&self, name: &str) -> PuzzleResult<&Place> {
        self.places
            .get(name)
            .ok_or_else(|| self.place_not_found(name))
    }

    pub fn get_place_mut(&mut self, name: &str) -> PuzzleResult<&mut Place> {
        let not_found = self.place_not_found(name);
        self.places.get_mut(name).ok_or(not_found)
    }

    fn place_not_found(&self, place: &str) -> PuzzleError {
        PuzzleError::PlaceNotFound {
            puzzle: self.name.clone(),
            place: place.to_owned(),
        }
    }

    /// A prop added through [`Puzzle::add_prop`], by name.
    pub fn find_prop(&self, name: &str) -> Option<PropHandle> {
        self.props.get(name).cloned()
    }

    /// Store a script variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<VarValue>) {
        self.variables.set(name, value);
    }

    /// Read a script variable; `None` if never set.
    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.variables.get(name)
    }

    /// Lock a place and mint the key that opens it.
    ///
    /// Boss locks get a boss key in the boss key color, other locks a normal
    /// key in the place's lock color. The key is stored under `key_name` and
    /// a copy is returned for the script to hand out.
    pub fn lock_place(&mut self, place: &str, key_name: &str) -> PuzzleResult<Item> {
        let not_found = self.place_not_found(place);
        let lock = self.places.get_mut(place).ok_or(not_found)?;

        let door_name = match lock.lock_door() {
            Some(door) if lock.is_lock() => lock_door_name(door),
            _ => {
                return Err(PuzzleError::NotALock {
                    puzzle: self.name.clone(),
                    place: place.to_owned(),
                })
            }
        };

        let (class_id, color) = if lock.is_boss_lock() {
            (BOSS_KEY_ITEM_ID, self.config.boss_key_color)
        } else {
            (KEY_ITEM_ID, lock.lock_color())
        };
        let mut key = Item::create_key(class_id, door_name.as_str());
        key.info.color1 = color;

        lock.lock_place(&key);
        log::info!(
            "puzzle '{}': locked place '{}' at door '{}' with key '{}'",
            self.name,
            place,
            door_name,
            key_name
        );

        if self.keys.insert(key_name.to_owned(), key.clone()).is_some() {
            log::warn!("puzzle '{}': key '{}' replaced", self.name, key_name);
        }
        Ok(key)
    }

    /// Clear a place's lock and open all its doors.
    pub fn open_place(&mut self, place: &str) -> PuzzleResult<()> {
        self.get_place_mut(place)?.open_place();
        log::info!("puzzle '{}': opened place '{}'", self.name, place);
        Ok(())
    }

    /// A key minted by [`Puzzle::lock_place`].
    ///
    /// `color` does not take part in the lookup.
    pub fn get_key(&self, name: &str, _color: u32) -> Option<&Item> {
        self.keys.get(name)
    }

    /// Place a prop in a place and wire its triggers to the script.
    ///
    /// The prop takes the next position of `placement`, keeps its own
    /// behavior and additionally reports every trigger to the script.
    pub fn add_prop(&mut self, place: &str, mut prop: Prop, placement: Placement) -> PuzzleResult<PropHandle> {
        let region = self
            .region
            .clone()
            .ok_or_else(|| PuzzleError::NotBound(self.name.clone()))?;

        let position = self.get_place_mut(place)?.get_position(placement)?;

        prop.info.x = position.x;
        prop.info.y = position.y;
        prop.info.direction = degree_to_radian(position.direction);
        prop.behavior.add(EventForwarder {
            listener: self.listener,
        });

        let name = prop.name.clone();
        let handle = prop.into_handle();
        region.borrow_mut().add_prop(Rc::clone(&handle))?;

        if self.props.insert(name.clone(), Rc::clone(&handle)).is_some() {
            log::warn!("puzzle '{}': prop '{}' replaced", self.name, name);
        }
        Ok(handle)
    }

    /// Forward a trigger of one of this puzzle's props to the script.
    pub fn on_prop_event(&mut self, prop: EntityId) -> PuzzleResult<()> {
        let region = self
            .region
            .clone()
            .ok_or_else(|| PuzzleError::NotBound(self.name.clone()))?;
        let found = region.borrow().get_prop(prop);
        let handle = found.ok_or_else(|| WorldError::PropNotFound(prop, region.borrow().id()))?;

        log::debug!("puzzle '{}': event from prop '{}'", self.name, handle.borrow().name);
        let script = Rc::clone(&self.script);
        script.on_prop_event(self, &handle)
    }

    /// Create a monster group in a place and spawn it right away.
    pub fn allocate_and_spawn_mob(
        &mut self,
        place: &str,
        name: &str,
        group: &DungeonMonsterGroupData,
        placement: Placement,
    ) -> PuzzleResult<()> {
        let region = self
            .region
            .clone()
            .ok_or_else(|| PuzzleError::NotBound(self.name.clone()))?;
        let not_found = self.place_not_found(place);
        let place_ref = self.places.get_mut(place).ok_or(not_found)?;

        let mob = MonsterGroup::new(name, self.name.as_str(), place, placement);
        if self.monster_groups.insert(name.to_owned(), mob).is_some() {
            log::warn!("puzzle '{}': monster group '{}' replaced", self.name, name);
        }
        if let Some(mob) = self.monster_groups.get_mut(name) {
            mob.allocate(group, place_ref)?;
        }

        let script = Rc::clone(&self.script);
        script.on_mob_allocated(self, name)?;

        let mob = self.get_monster_group_mut(name)?;
        mob.spawn(&mut region.borrow_mut());
        Ok(())
    }

    pub fn get_monster_group(&self, name: &str) -> Option<&MonsterGroup> {
        self.monster_groups.get(name)
    }

    pub fn get_monster_group_mut(&mut self, name: &str) -> PuzzleResult<&mut MonsterGroup> {
        let puzzle = &self.name;
        self.monster_groups
            .get_mut(name)
            .ok_or_else(|| PuzzleError::MonsterGroupNotFound {
                puzzle: puzzle.clone(),
                group: name.to_owned(),
            })
    }

    /// Monster group template from the puzzle data ("Mob1", "Mob2", ...).
    pub fn get_monster_data(&self, name: &str) -> Option<&DungeonMonsterGroupData> {
        self.monster_group_data.get(name)
    }

    /// Whether a live monster belongs to one of this puzzle's groups.
    pub fn owns_monster(&self, monster: EntityId) -> bool {
        self.monster_groups.values().any(|g| g.contains(monster))
    }

    /// Record the death of one of this puzzle's monsters.
    ///
    /// Tells the script when a group has been wiped out.
    pub fn on_monster_killed(&mut self, monster: EntityId) -> PuzzleResult<()> {
        let mut cleared = None;
        if let Some(group) = self.monster_groups.values_mut().find(|g| g.contains(monster)) {
            if group.on_monster_died(monster) {
                cleared = Some(group.name().to_owned());
            }
        }

        if let Some(group) = cleared {
            log::info!("puzzle '{}': monster group '{}' cleared", self.name, group);
            let script = Rc::clone(&self.script);
            script.on_monster_dead(self, &group)?;
        }
        Ok(())
    }
}

/// Internal name of a lock door, or the prop name for non-door props.
fn lock_door_name(door: &PropHandle) -> String {
    let door = door.borrow();
    let name = door
        .as_door()
        .map(|d| d.internal_name().to_owned())
        .unwrap_or_else(|| door.name.clone());
    name
}

impl fmt::Debug for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Puzzle")
            .field("name", &self.name)
            .field("listener", &self.listener)
            .field("created", &self.is_created())
            .field("places", &self.places.keys().collect::<Vec<_>>())
            .field("props", &self.props.keys().collect::<Vec<_>>())
            .field("keys", &self.keys.keys().collect::<Vec<_>>())
            .field("variables", &self.variables)
            .finish()
    }
}
