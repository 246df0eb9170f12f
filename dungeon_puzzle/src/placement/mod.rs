//! Placement patterns - where props and monsters go inside a place.
//!
//! A [`PositionProvider`] hands out offsets relative to a place's anchor.
//! Fixed patterns are precomputed at construction and consumed in table
//! order; asking for more positions than the table holds is an error, never a
//! wrap-around. [`Placement::Random`] draws every position independently and
//! never runs out.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::str::FromStr;
use thiserror::Error;

/// Radius used when a place does not configure one.
pub const DEFAULT_RADIUS: i32 = 600;

/// Placement patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    /// Four diagonal corners, facing inward.
    Corner4,
    /// Corners and edge midpoints, facing inward; no center.
    Corner8,
    /// 3x3 grid including the center, all facing 0.
    Center9,
    /// The anchor itself.
    Center,
    /// Uniform random offsets and facing.
    Random,
}

// (unit x, unit y, facing in degrees)
const CORNER4_OFFSETS: [(i32, i32, i32); 4] = [(-1, 1, 315), (1, 1, 225), (-1, -1, 45), (1, -1, 135)];

const CORNER8_OFFSETS: [(i32, i32, i32); 8] = [
    (-1, 1, 315),
    (0, 1, 270),
    (1, 1, 225),
    (-1, 0, 0),
    (1, 0, 180),
    (-1, -1, 45),
    (0, -1, 90),
    (1, -1, 135),
];

const CENTER9_OFFSETS: [(i32, i32, i32); 9] = [
    (-1, 1, 0),
    (0, 1, 0),
    (1, 1, 0),
    (-1, 0, 0),
    (0, 0, 0),
    (1, 0, 0),
    (-1, -1, 0),
    (0, -1, 0),
    (1, -1, 0),
];

const CENTER_OFFSETS: [(i32, i32, i32); 1] = [(0, 0, 0)];

impl Placement {
    /// Unit offset table of a fixed pattern; `None` for [`Placement::Random`].
    pub fn offsets(&self) -> Option<&'static [(i32, i32, i32)]> {
        match self {
            Placement::Corner4 => Some(&CORNER4_OFFSETS),
            Placement::Corner8 => Some(&CORNER8_OFFSETS),
            Placement::Center9 => Some(&CENTER9_OFFSETS),
            Placement::Center => Some(&CENTER_OFFSETS),
            Placement::Random => None,
        }
    }

    /// Number of positions before exhaustion; `None` if unlimited.
    pub fn capacity(&self) -> Option<usize> {
        self.offsets().map(|o| o.len())
    }
}

impl FromStr for Placement {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Corner4" => Ok(Placement::Corner4),
            "Corner8" => Ok(Placement::Corner8),
            "Center9" => Ok(Placement::Center9),
            "Center" => Ok(Placement::Center),
            "Random" => Ok(Placement::Random),
            other => Err(PlacementError::UnknownPattern(other.to_owned())),
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("placement pattern '{0}' has no positions left")]
    Exhausted(String),

    #[error("unknown placement pattern '{0}'")]
    UnknownPattern(String),
}

/// An offset from a place anchor plus a facing in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub direction: i32,
}

/// Yields successive positions for one placement pattern.
#[derive(Debug, Clone)]
pub struct PositionProvider {
    pattern: String,
    random: bool,
    radius: i32,
    queue: VecDeque<Position>,
    rng: StdRng,
}

impl PositionProvider {
    pub fn new(placement: Placement, radius: i32) -> Self {
        Self::with_rng(placement, radius, StdRng::from_entropy())
    }

    /// Provider whose random draws are reproducible.
    pub fn with_seed(placement: Placement, radius: i32, seed: u64) -> Self {
        Self::with_rng(placement, radius, StdRng::seed_from_u64(seed))
    }

    fn with_rng(placement: Placement, radius: i32, rng: StdRng) -> Self {
        let queue: VecDeque<Position> = placement
            .offsets()
            .map(|table| {
                table
                    .iter()
                    .map(|&(x, y, direction)| Position {
                        x: x * radius,
                        y: y * radius,
                        direction,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            pattern: placement.to_string(),
            random: placement == Placement::Random,
            radius,
            queue,
            rng,
        }
    }

    /// Provider for a pattern given by name.
    ///
    /// Unrecognized names give an empty provider that is exhausted from the
    /// start.
    pub fn from_pattern_name(name: &str, radius: i32) -> Self {
        match name.parse::<Placement>() {
            Ok(placement) => Self::new(placement, radius),
            Err(_) => {
                log::warn!("unknown placement pattern '{}', provider is empty", name);
                Self {
                    pattern: name.to_owned(),
                    random: false,
                    radius,
                    queue: VecDeque::new(),
                    rng: StdRng::from_entropy(),
                }
            }
        }
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Positions left before exhaustion; `None` for random providers.
    pub fn remaining(&self) -> Option<usize> {
        if self.random {
            None
        } else {
            Some(self.queue.len())
        }
    }

    /// Next position of the pattern.
    pub fn next_position(&mut self) -> Result<Position, PlacementError> {
        if self.random {
            return Ok(self.random_position());
        }
        self.queue
            .pop_front()
            .ok_or_else(|| PlacementError::Exhausted(self.pattern.clone()))
    }

    fn random_position(&mut self) -> Position {
        let (x, y) = if self.radius > 0 {
            (
                self.rng.gen_range(-self.radius..self.radius),
                self.rng.gen_range(-self.radius..self.radius),
            )
        } else {
            (0, 0)
        };
        Position {
            x,
            y,
            direction: self.rng.gen_range(0..360),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn drain(provider: &mut PositionProvider) -> Vec<Position> {
        std::iter::from_fn(|| provider.next_position().ok()).collect()
    }

    #[test]
    fn test_corner4_table() {
        let mut provider = PositionProvider::new(Placement::Corner4, 600);
        let positions = drain(&mut provider);

        let expected = vec![
            Position { x: -600, y: 600, direction: 315 },
            Position { x: 600, y: 600, direction: 225 },
            Position { x: -600, y: -600, direction: 45 },
            Position { x: 600, y: -600, direction: 135 },
        ];
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_capacities() {
        for (placement, count) in [
            (Placement::Corner4, 4),
            (Placement::Corner8, 8),
            (Placement::Center9, 9),
            (Placement::Center, 1),
        ] {
            let mut provider = PositionProvider::new(placement, 300);
            assert_eq!(provider.remaining(), Some(count));

            let positions = drain(&mut provider);
            let distinct: HashSet<_> = positions.iter().map(|p| (p.x, p.y)).collect();
            assert_eq!(positions.len(), count);
            assert_eq!(distinct.len(), count);
            assert_eq!(placement.capacity(), Some(count));
        }
    }

    #[test]
    fn test_offsets_scaled_by_radius() {
        let mut provider = PositionProvider::new(Placement::Corner8, 250);
        for position in drain(&mut provider) {
            assert!(position.x.abs() == 250 || position.x == 0);
            assert!(position.y.abs() == 250 || position.y == 0);
            // Center is never part of Corner8.
            assert!(position.x != 0 || position.y != 0);
        }
    }

    #[test]
    fn test_center9_includes_center_facing_zero() {
        let mut provider = PositionProvider::new(Placement::Center9, 600);
        let positions = drain(&mut provider);
        assert!(positions.iter().all(|p| p.direction == 0));
        assert_eq!(positions[4], Position { x: 0, y: 0, direction: 0 });
    }

    #[test]
    fn test_exhaustion_is_an_error() {
        let mut provider = PositionProvider::new(Placement::Center, 600);
        assert!(provider.next_position().is_ok());
        assert_eq!(
            provider.next_position(),
            Err(PlacementError::Exhausted("Center".to_string()))
        );
        // Stays exhausted.
        assert!(provider.next_position().is_err());
    }

    #[test]
    fn test_unknown_pattern_is_empty() {
        let mut provider = PositionProvider::from_pattern_name("Spiral", 600);
        assert_eq!(provider.remaining(), Some(0));
        assert!(matches!(provider.next_position(), Err(PlacementError::Exhausted(name)) if name == "Spiral"));
    }

    #[test]
    fn test_pattern_name_parsing() {
        assert_eq!("Corner8".parse::<Placement>(), Ok(Placement::Corner8));
        assert!("corner8".parse::<Placement>().is_err());

        let mut provider = PositionProvider::from_pattern_name("Center", 600);
        assert_eq!(provider.next_position(), Ok(Position { x: 0, y: 0, direction: 0 }));
    }

    #[test]
    fn test_random_never_exhausts_and_stays_in_range() {
        let radius = 600;
        let mut provider = PositionProvider::new(Placement::Random, radius);
        assert_eq!(provider.remaining(), None);

        for _ in 0..10_000 {
            let p = provider.next_position().unwrap();
            assert!((-radius..radius).contains(&p.x));
            assert!((-radius..radius).contains(&p.y));
            assert!((0..360).contains(&p.direction));
        }
    }

    #[test]
    fn test_random_with_seed_is_reproducible() {
        let mut a = PositionProvider::with_seed(Placement::Random, 600, 42);
        let mut b = PositionProvider::with_seed(Placement::Random, 600, 42);
        for _ in 0..100 {
            assert_eq!(a.next_position(), b.next_position());
        }
    }

    #[test]
    fn test_random_zero_radius() {
        let mut provider = PositionProvider::new(Placement::Random, 0);
        let p = provider.next_position().unwrap();
        assert_eq!((p.x, p.y), (0, 0));
    }

    proptest! {
        #[test]
        fn prop_random_draws_in_range(radius in 1i32..5000, seed in any::<u64>()) {
            let mut provider = PositionProvider::with_seed(Placement::Random, radius, seed);
            for _ in 0..64 {
                let p = provider.next_position().unwrap();
                prop_assert!(p.x >= -radius && p.x < radius);
                prop_assert!(p.y >= -radius && p.y < radius);
                prop_assert!(p.direction >= 0 && p.direction < 360);
            }
        }

        #[test]
        fn prop_fixed_tables_scale_linearly(radius in 0i32..5000) {
            let mut provider = PositionProvider::new(Placement::Center9, radius);
            for &(ux, uy, _) in Placement::Center9.offsets().unwrap() {
                let p = provider.next_position().unwrap();
                prop_assert_eq!((p.x, p.y), (ux * radius, uy * radius));
            }
            prop_assert!(provider.next_position().is_err());
        }
    }
}
