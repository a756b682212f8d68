// Character animation states

use serde::Deserialize;
use std::fmt;

/// Direction the character last moved in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// What the character is doing, independent of direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    Idle,
    Run,
    Jump,
    Fall,
}

/// The active animation. Every pose has a right- and a left-facing variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    IdleLeft,
    Run,
    RunLeft,
    Jump,
    JumpLeft,
    Fall,
    FallLeft,
}

impl AnimationState {
    /// Every state, right-facing variant first
    pub const ALL: [AnimationState; 8] = [
        Self::Idle,
        Self::IdleLeft,
        Self::Run,
        Self::RunLeft,
        Self::Jump,
        Self::JumpLeft,
        Self::Fall,
        Self::FallLeft,
    ];

    /// Pick the variant of `pose` for `facing`
    pub fn new(pose: Pose, facing: Facing) -> Self {
        match (pose, facing) {
            (Pose::Idle, Facing::Right) => Self::Idle,
            (Pose::Idle, Facing::Left) => Self::IdleLeft,
            (Pose::Run, Facing::Right) => Self::Run,
            (Pose::Run, Facing::Left) => Self::RunLeft,
            (Pose::Jump, Facing::Right) => Self::Jump,
            (Pose::Jump, Facing::Left) => Self::JumpLeft,
            (Pose::Fall, Facing::Right) => Self::Fall,
            (Pose::Fall, Facing::Left) => Self::FallLeft,
        }
    }

    pub fn pose(&self) -> Pose {
        match self {
            Self::Idle | Self::IdleLeft => Pose::Idle,
            Self::Run | Self::RunLeft => Pose::Run,
            Self::Jump | Self::JumpLeft => Pose::Jump,
            Self::Fall | Self::FallLeft => Pose::Fall,
        }
    }

    #[cfg(test)]
    pub fn facing(&self) -> Facing {
        match self {
            Self::IdleLeft | Self::RunLeft | Self::JumpLeft | Self::FallLeft => Facing::Left,
            _ => Facing::Right,
        }
    }

    /// Check if the character is rising
    pub fn is_jumping(&self) -> bool {
        self.pose() == Pose::Jump
    }

    /// Check if the character is in the air
    pub fn is_airborne(&self) -> bool {
        matches!(self.pose(), Pose::Jump | Pose::Fall)
    }

    /// Name of the animation, which is also the sprite sheet's file stem
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::IdleLeft => "IdleLeft",
            Self::Run => "Run",
            Self::RunLeft => "RunLeft",
            Self::Jump => "Jump",
            Self::JumpLeft => "JumpLeft",
            Self::Fall => "Fall",
            Self::FallLeft => "FallLeft",
        }
    }
}

impl fmt::Display for AnimationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
