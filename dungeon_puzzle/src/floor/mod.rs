//! Dungeon floors - one region, its section and the puzzles living in it.
//!
//! The floor is the single entry point of the region loop into puzzle logic:
//! actor interactions and monster deaths come in here and are routed to the
//! puzzle that owns the prop or monster.

mod section;

pub use section::*;

use std::rc::Rc;

use dungeon_world::{Creature, EntityId, Item, ListenerId, NoticeSink, Region, RegionHandle};

use crate::config::PuzzleConfig;
use crate::error::{PuzzleError, PuzzleResult};
use crate::monsters::DungeonPuzzleData;
use crate::puzzle::{Puzzle, PuzzleScript};

/// A live dungeon floor.
#[derive(Debug)]
pub struct DungeonFloor {
    region: RegionHandle,
    section: SectionHandle,
    config: PuzzleConfig,
    puzzles: Vec<Puzzle>,
}

impl DungeonFloor {
    pub fn new(region: Region, section: FloorSection, config: PuzzleConfig) -> Self {
        Self {
            region: region.into_handle(),
            section: section.into_handle(),
            config,
            puzzles: Vec::new(),
        }
    }

    pub fn region(&self) -> &RegionHandle {
        &self.region
    }

    pub fn section(&self) -> &SectionHandle {
        &self.section
    }

    /// Instantiate and prepare a puzzle of this floor.
    pub fn add_puzzle(
        &mut self,
        data: DungeonPuzzleData,
        script: Rc<dyn PuzzleScript>,
    ) -> PuzzleResult<ListenerId> {
        let listener = ListenerId(self.puzzles.len() as u32);
        let mut puzzle = Puzzle::new(
            listener,
            Rc::clone(&self.section),
            data,
            script,
            self.config.clone(),
        );
        puzzle.prepare().map_err(|e| report(&puzzle, "prepare", e))?;

        log::debug!("floor: added puzzle '{}' as listener {}", puzzle.name(), listener.0);
        self.puzzles.push(puzzle);
        Ok(listener)
    }

    /// Bind every puzzle that is not created yet to the floor's region.
    pub fn create(&mut self) -> PuzzleResult<()> {
        for puzzle in self.puzzles.iter_mut().filter(|p| !p.is_created()) {
            puzzle
                .on_create(Rc::clone(&self.region))
                .map_err(|e| report(puzzle, "create", e))?;
        }
        Ok(())
    }

    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    pub fn puzzle(&self, name: &str) -> Option<&Puzzle> {
        self.puzzles.iter().find(|p| p.name() == name)
    }

    pub fn puzzle_mut(&mut self, name: &str) -> Option<&mut Puzzle> {
        self.puzzles.iter_mut().find(|p| p.name() == name)
    }

    /// An actor triggers a prop of this floor.
    ///
    /// Runs the prop's trigger chain and hands forwarded events to the
    /// owning puzzles.
    pub fn interact(
        &mut self,
        actor: &mut Creature,
        prop: EntityId,
        notices: &mut dyn NoticeSink,
    ) -> PuzzleResult<()> {
        let events = self.region.borrow().trigger_prop(prop, actor, notices)?;

        for event in events {
            let puzzle = self
                .puzzles
                .get_mut(event.listener.0 as usize)
                .ok_or(PuzzleError::UnknownListener(event.listener.0))?;
            puzzle
                .on_prop_event(event.prop)
                .map_err(|e| report(puzzle, "prop event", e))?;
        }
        Ok(())
    }

    /// A monster of this floor died.
    ///
    /// Removes it from the region and returns what it dropped.
    pub fn kill_monster(&mut self, monster: EntityId) -> PuzzleResult<Vec<Item>> {
        let creature = self.region.borrow_mut().remove_creature(monster)?;

        if let Some(puzzle) = self.puzzles.iter_mut().find(|p| p.owns_monster(monster)) {
            puzzle
                .on_monster_killed(monster)
                .map_err(|e| report(puzzle, "monster death", e))?;
        }
        Ok(creature.drops)
    }
}

/// Log a failed puzzle callback for operators and pass the error on.
fn report(puzzle: &Puzzle, stage: &str, error: PuzzleError) -> PuzzleError {
    log::error!("puzzle '{}' failed during {}: {}", puzzle.name(), stage, error);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_world::{Door, DoorType, NoticeLog, PropHandle, RegionId, STATE_CLOSED};

    struct Idle;

    impl PuzzleScript for Idle {
        fn name(&self) -> &str {
            "idle"
        }

        fn on_prepare(&self, puzzle: &mut Puzzle) -> PuzzleResult<()> {
            puzzle.new_place("Room")?;
            Ok(())
        }

        fn on_puzzle_create(&self, _puzzle: &mut Puzzle) -> PuzzleResult<()> {
            Ok(())
        }

        fn on_prop_event(&self, _puzzle: &mut Puzzle, _prop: &PropHandle) -> PuzzleResult<()> {
            Ok(())
        }
    }

    struct Broken;

    impl PuzzleScript for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn on_puzzle_create(&self, puzzle: &mut Puzzle) -> PuzzleResult<()> {
            Err(PuzzleError::Script {
                script: puzzle.name().to_owned(),
                message: "lever missing".into(),
            })
        }

        fn on_prop_event(&self, _puzzle: &mut Puzzle, _prop: &PropHandle) -> PuzzleResult<()> {
            Ok(())
        }
    }

    fn floor_with_rooms(count: usize) -> DungeonFloor {
        let rooms = (0..count).map(|i| {
            let door = Door::create(10135, 0, 0, 0, DoorType::Door, format!("door_{}", i), STATE_CLOSED);
            Room::new(i as i32 * 2400, 0, 0).with_door(door.into_handle())
        });
        DungeonFloor::new(
            Region::new(RegionId(10032)),
            FloorSection::new(rooms),
            PuzzleConfig::default(),
        )
    }

    #[test]
    fn test_add_and_create_puzzles() {
        let mut floor = floor_with_rooms(2);

        assert_eq!(floor.add_puzzle(DungeonPuzzleData::default(), Rc::new(Idle)).unwrap(), ListenerId(0));
        assert_eq!(floor.add_puzzle(DungeonPuzzleData::default(), Rc::new(Idle)).unwrap(), ListenerId(1));
        assert_eq!(floor.section().borrow().free_room_count(), 0);

        floor.create().unwrap();

        assert!(floor.puzzles().iter().all(|p| p.is_created()));
        assert_eq!(floor.region().borrow().prop_count(), 2);
        // Creating again leaves created puzzles alone.
        assert!(floor.create().is_ok());
    }

    #[test]
    fn test_prepare_failure_is_reported() {
        let mut floor = floor_with_rooms(0);
        let result = floor.add_puzzle(DungeonPuzzleData::default(), Rc::new(Idle));

        assert!(matches!(result, Err(PuzzleError::NoFreeRoom(_))));
        assert!(floor.puzzles().is_empty());
    }

    #[test]
    fn test_script_failure_surfaces_from_create() {
        let mut floor = floor_with_rooms(0);
        floor.add_puzzle(DungeonPuzzleData::default(), Rc::new(Broken)).unwrap();

        let result = floor.create();

        assert!(matches!(result, Err(PuzzleError::Script { ref message, .. }) if message == "lever missing"));
        // The region was bound before the script ran.
        assert!(floor.puzzle("broken").is_some_and(|p| p.is_created()));
    }

    #[test]
    fn test_interact_with_unknown_prop() {
        let mut floor = floor_with_rooms(1);
        let mut hero = Creature::new("Hero");
        let mut notices = NoticeLog::new();

        let result = floor.interact(&mut hero, EntityId::new(), &mut notices);
        assert!(matches!(result, Err(PuzzleError::World(_))));
    }

    #[test]
    fn test_kill_unknown_monster() {
        let mut floor = floor_with_rooms(1);
        assert!(floor.kill_monster(EntityId::new()).is_err());
    }
}
