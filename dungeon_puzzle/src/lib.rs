//! # Dungeon Puzzle
//!
//! Puzzle orchestration for generated dungeon floors. This crate sits on top
//! of `dungeon_world` and lets puzzle scripts reserve rooms, lock them behind
//! keyed doors, place props and spawn monster groups.
//!
//! ## Core Components
//!
//! - **placement**: Deterministic and random position patterns around a place anchor
//! - **puzzle**: Places, locks and keys, prop wiring and the script callbacks
//! - **monsters**: Monster group templates, allocation, spawning and deaths
//! - **floor**: Room reservation and event dispatch for a whole floor
//!
//! ## Threading
//!
//! Props and regions are shared through `Rc<RefCell<_>>` handles, so a floor
//! and its puzzles stay on the thread that runs their region.

pub mod config;
pub mod error;
pub mod floor;
pub mod monsters;
pub mod placement;
pub mod puzzle;

pub use config::*;
pub use error::*;
pub use floor::*;
pub use monsters::*;
pub use placement::*;
pub use puzzle::*;
