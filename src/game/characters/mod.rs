// Character system
//
// This module contains everything related to the playable character:
// - Character data structure and per-tick physics
// - Character stats and properties
// - Animation states and the sprite animator

pub mod animation;
pub mod character;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::AnimationClip;
pub use character::Character;
pub use state::AnimationState;
pub use stats::CharacterStats;
