//! Puzzle configuration, loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PuzzleResult;
use crate::placement::DEFAULT_RADIUS;

/// Color of every boss key (red).
pub const BOSS_KEY_COLOR: u32 = 0xFF0000;

/// Tunables shared by all puzzles of a dungeon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Radius of the fixed placement tables.
    pub placement_radius: i32,

    /// Display color given to boss keys.
    pub boss_key_color: u32,

    /// Seed for random placements; `None` draws from entropy.
    pub placement_seed: Option<u64>,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            placement_radius: DEFAULT_RADIUS,
            boss_key_color: BOSS_KEY_COLOR,
            placement_seed: None,
        }
    }
}

impl PuzzleConfig {
    /// Parse a configuration document. Missing fields keep their defaults.
    pub fn from_toml_str(source: &str) -> PuzzleResult<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> PuzzleResult<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        log::info!("loaded puzzle configuration from {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = PuzzleConfig::from_toml_str("").unwrap();
        assert_eq!(config, PuzzleConfig::default());
        assert_eq!(config.placement_radius, 600);
        assert_eq!(config.boss_key_color, 0xFF0000);
    }

    #[test]
    fn test_partial_document() {
        let config = PuzzleConfig::from_toml_str("placement_radius = 450\nplacement_seed = 7\n").unwrap();
        assert_eq!(config.placement_radius, 450);
        assert_eq!(config.placement_seed, Some(7));
        assert_eq!(config.boss_key_color, BOSS_KEY_COLOR);
    }

    #[test]
    fn test_invalid_document() {
        assert!(PuzzleConfig::from_toml_str("placement_radius = \"wide\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(PuzzleConfig::load("/nonexistent/puzzle.toml").is_err());
    }
}
