// The player-controlled character

use glam::Vec2;

use super::animation::{AnimationClip, SpriteAnimator};
use super::state::{AnimationState, Facing, Pose};
use super::stats::CharacterStats;
use crate::engine::assets::AssetManager;
use crate::engine::input::{Action, InputSnapshot};
use crate::engine::renderer::DrawContext;

/// A sprite-animated character with simple platformer physics
///
/// The only ground is the bottom edge of the drawing surface. Positions are
/// in canvas pixels with y pointing down, so jumping means negative `velocity.y`.
#[derive(Debug)]
pub struct Character {
    /// Top-left corner of the sprite
    pub position: Vec2,
    /// Per-tick velocity
    pub velocity: Vec2,
    /// Tuning constants
    pub stats: CharacterStats,
    /// Direction of the last horizontal movement
    pub facing: Facing,
    /// Animation player for the sprite sheets
    pub animation: SpriteAnimator,
    /// State chosen by this tick's policies, committed to the animator at tick end
    next_state: AnimationState,
}

impl Character {
    /// Create a character at `position`, standing still and facing right
    pub fn new(position: Vec2, stats: CharacterStats) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            stats,
            facing: Facing::Right,
            animation: SpriteAnimator::new(AnimationState::Idle),
            next_state: AnimationState::Idle,
        }
    }

    /// Builder-style clip registration
    pub fn with_clips(mut self, clips: impl IntoIterator<Item = AnimationClip>) -> Self {
        for clip in clips {
            self.animation.add_clip(clip);
        }
        self
    }

    /// Run one tick: draw, apply controls, integrate, apply gravity.
    /// The floor is the bottom edge of `ctx`.
    ///
    /// The animation state is resolved across both policies and handed to the
    /// animator once, so a state the gravity phase overrides never restarts a clip.
    pub fn update(&mut self, input: &InputSnapshot, sheets: &AssetManager, ctx: &mut dyn DrawContext) {
        let floor = ctx.size().1 as f32;

        self.animation.draw(ctx, sheets, self.position);

        self.next_state = self.animation.current_state();
        self.apply_controls(input, sheets, floor);
        self.integrate();
        self.apply_gravity(sheets, floor);

        self.animation.play(self.next_state);
    }

    /// Horizontal movement and jump impulse from the held keys
    ///
    /// Left wins over right. The jump impulse is applied on every tick the key
    /// is held while grounded, not only on the first one.
    fn apply_controls(&mut self, input: &InputSnapshot, sheets: &AssetManager, floor: f32) {
        if input.is_held(Action::MoveLeft) {
            self.velocity.x = -self.stats.run_speed;
            self.facing = Facing::Left;
            self.next_state = AnimationState::RunLeft;
        } else if input.is_held(Action::MoveRight) {
            self.velocity.x = self.stats.run_speed;
            self.facing = Facing::Right;
            self.next_state = AnimationState::Run;
        } else {
            self.velocity.x = 0.0;
            self.play_facing(Pose::Idle);
        }

        if input.is_held(Action::Jump) && self.is_grounded(sheets, floor) {
            self.velocity.y -= self.stats.jump_impulse;
        }
    }

    /// Move by the current velocity
    fn integrate(&mut self) {
        self.position.x += self.velocity.x * self.stats.speed;
        self.position.y += self.velocity.y / self.stats.weight;
    }

    /// Pull the character down while airborne and pick the air animation;
    /// stop vertical motion on the ground
    fn apply_gravity(&mut self, sheets: &AssetManager, floor: f32) {
        if !self.is_grounded(sheets, floor) {
            self.velocity.y += self.stats.gravity;

            if self.velocity.y < 0.0 {
                self.play_facing(Pose::Jump);
            } else {
                self.play_facing(Pose::Fall);
            }
        } else {
            self.velocity.y = 0.0;

            if self.next_state.is_jumping() {
                self.play_facing(Pose::Idle);
            }
        }
    }

    /// Feet at or below the floor. Uses the height of the sheet for the state
    /// chosen so far this tick, which is 0 until that sheet has loaded.
    pub fn is_grounded(&self, sheets: &AssetManager, floor: f32) -> bool {
        self.position.y + self.animation.sprite_height(self.next_state, sheets) >= floor
    }

    /// Get the current animation state
    pub fn state(&self) -> AnimationState {
        self.animation.current_state()
    }

    fn play_facing(&mut self, pose: Pose) {
        self.next_state = AnimationState::new(pose, self.facing);
    }
}
