//! Dungeon geometry: tile size and angle conversions.

use std::f32::consts::PI;

/// Length of one dungeon tile in world units.
pub const TILE_SIZE: i32 = 2400;

/// Convert degrees to the engine's angle unit (radians).
pub fn degree_to_radian(degree: i32) -> f32 {
    degree as f32 * PI / 180.0
}

/// Angle (radians) of the direction vector `(x, y)`.
pub fn direction_to_radian(x: f32, y: f32) -> f32 {
    y.atan2(x)
}
