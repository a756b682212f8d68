// Character tuning constants

use serde::Deserialize;

/// Movement and physics tunables, all expressed per tick
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CharacterStats {
    /// Horizontal velocity while a move key is held
    pub run_speed: f32,
    /// Subtracted from vertical velocity when jumping from the ground
    pub jump_impulse: f32,
    /// Multiplier applied to horizontal velocity during integration
    pub speed: f32,
    /// Divisor applied to vertical velocity during integration
    pub weight: f32,
    /// Added to vertical velocity every airborne tick
    pub gravity: f32,
}

/// The hero's stats
pub const BASE_STATS: CharacterStats = CharacterStats {
    run_speed: 5.0,
    jump_impulse: 50.0,
    speed: 1.0,
    weight: 5.0,
    gravity: 1.0,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}
