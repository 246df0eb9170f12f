//! Puzzle scripts - the game logic attached to a puzzle.

use dungeon_world::PropHandle;

use super::Puzzle;
use crate::error::PuzzleResult;

/// Callbacks implemented by puzzle authors.
///
/// The script decides what each prop does; the puzzle only wires props and
/// forwards their events. Returning an error aborts the callback and is
/// reported as an authoring error.
pub trait PuzzleScript {
    /// Script name, also used as the puzzle name.
    fn name(&self) -> &str;

    /// Called once when the puzzle is added to a floor, before it is bound
    /// to a region. Reserve places and declare locks here.
    fn on_prepare(&self, _puzzle: &mut Puzzle) -> PuzzleResult<()> {
        Ok(())
    }

    /// Called once after the puzzle is bound to its region.
    fn on_puzzle_create(&self, puzzle: &mut Puzzle) -> PuzzleResult<()>;

    /// Called for every trigger of a prop added through the puzzle.
    fn on_prop_event(&self, puzzle: &mut Puzzle, prop: &PropHandle) -> PuzzleResult<()>;

    /// Called after a monster group was allocated, before it spawns.
    ///
    /// The group is already registered; look it up by name to attach drops.
    fn on_mob_allocated(&self, _puzzle: &mut Puzzle, _group: &str) -> PuzzleResult<()> {
        Ok(())
    }

    /// Called when the last monster of a group died.
    fn on_monster_dead(&self, _puzzle: &mut Puzzle, _group: &str) -> PuzzleResult<()> {
        Ok(())
    }
}
