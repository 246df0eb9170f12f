//! Puzzle errors.
//!
//! Everything here is an authoring error: a puzzle script asked for something
//! its puzzle cannot do. Expected runtime outcomes (no matching key, absent
//! lookups) are not errors and never show up here.

use dungeon_world::WorldError;
use thiserror::Error;

use crate::placement::PlacementError;

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("puzzle '{puzzle}': place '{place}' does not exist")]
    PlaceNotFound { puzzle: String, place: String },

    #[error("puzzle '{puzzle}': tried to lock place '{place}' that isn't a lock")]
    NotALock { puzzle: String, place: String },

    #[error("puzzle '{0}' is not bound to a region yet")]
    NotBound(String),

    #[error("puzzle '{0}' was already created")]
    AlreadyCreated(String),

    #[error("floor section has no free room for place '{0}'")]
    NoFreeRoom(String),

    #[error("puzzle '{puzzle}': monster group '{group}' does not exist")]
    MonsterGroupNotFound { puzzle: String, group: String },

    #[error("no puzzle listens on id {0}")]
    UnknownListener(u32),

    #[error("puzzle script '{script}' failed: {message}")]
    Script { script: String, message: String },

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid puzzle data: {0}")]
    Data(#[from] serde_json::Error),
}

pub type PuzzleResult<T> = Result<T, PuzzleError>;
