// Sprite-sheet animation

use std::collections::HashMap;

use glam::Vec2;
use log::debug;

use super::state::AnimationState;
use crate::core::math::Rect;
use crate::engine::assets::{AssetManager, SheetHandle};
use crate::engine::renderer::DrawContext;

/// A single animation: a filmstrip sheet plus its timing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClip {
    /// State this clip is shown for
    pub state: AnimationState,
    /// Sprite sheet holding the frames side by side
    pub sheet: SheetHandle,
    /// Number of frames in the sheet (at least 1)
    pub frame_count: usize,
    /// Ticks each frame is held before advancing (at least 1)
    pub cadence: u32,
}

impl AnimationClip {
    /// Create a new animation clip. Zero counts are raised to 1.
    pub fn new(state: AnimationState, sheet: SheetHandle, frame_count: usize, cadence: u32) -> Self {
        Self {
            state,
            sheet,
            frame_count: frame_count.max(1),
            cadence: cadence.max(1),
        }
    }
}

/// Plays one clip at a time and draws its current frame
///
/// The frame index advances once every `cadence` draws and wraps after the
/// last frame. Switching to a different state restarts from frame 0.
#[derive(Debug)]
pub struct SpriteAnimator {
    /// All available clips
    clips: HashMap<AnimationState, AnimationClip>,
    /// Currently playing state
    current: AnimationState,
    /// Current frame index
    current_frame: usize,
    /// Draws since the current clip became active
    elapsed_ticks: u64,
}

impl SpriteAnimator {
    pub fn new(initial: AnimationState) -> Self {
        Self {
            clips: HashMap::new(),
            current: initial,
            current_frame: 0,
            elapsed_ticks: 0,
        }
    }

    /// Add (or replace) the clip for its state
    pub fn add_clip(&mut self, clip: AnimationClip) {
        self.clips.insert(clip.state, clip);
    }

    /// Switch to `state`. Returns true if the state changed; replaying the
    /// active state keeps its phase.
    pub fn play(&mut self, state: AnimationState) -> bool {
        if self.current == state {
            return false;
        }

        debug!("Animation {} -> {}", self.current, state);
        self.current = state;
        self.current_frame = 0;
        self.elapsed_ticks = 0;
        true
    }

    /// Draw the current frame with its top-left corner at `position`, then advance
    /// the animation by one tick. Nothing is drawn while the sheet is unavailable,
    /// but the animation still advances.
    pub fn draw(&mut self, ctx: &mut dyn DrawContext, sheets: &AssetManager, position: Vec2) {
        if let Some(clip) = self.current_clip() {
            if let Some(sheet) = sheets.sheet(clip.sheet) {
                let frame_width = sheet.frame_width(clip.frame_count);
                let height = sheet.height() as f32;

                let src = Rect::new(self.current_frame as f32 * frame_width, 0.0, frame_width, height);
                let dst = Rect::new(position.x, position.y, frame_width, height);
                ctx.draw_image(sheet.image(), src, dst);
            }
        }

        self.advance();
    }

    fn advance(&mut self) {
        let (frame_count, cadence) = self
            .current_clip()
            .map(|clip| (clip.frame_count, clip.cadence))
            .unwrap_or((1, 1));

        self.elapsed_ticks += 1;

        if self.elapsed_ticks % cadence as u64 == 0 {
            self.current_frame = if self.current_frame + 1 < frame_count {
                self.current_frame + 1
            } else {
                0
            };
        }
    }

    /// Height of the sheet shown for `state`; 0 while it is unavailable
    pub fn sprite_height(&self, state: AnimationState, sheets: &AssetManager) -> f32 {
        self.clip(state)
            .and_then(|clip| sheets.sheet(clip.sheet))
            .map(|sheet| sheet.height() as f32)
            .unwrap_or(0.0)
    }

    /// Get the current state
    pub fn current_state(&self) -> AnimationState {
        self.current
    }

    /// Get the current frame index
    #[cfg(test)]
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Ticks since the current clip became active
    #[cfg(test)]
    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    /// Get the clip for the current state
    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.clips.get(&self.current)
    }

    /// Get the clip for any state
    pub fn clip(&self, state: AnimationState) -> Option<&AnimationClip> {
        self.clips.get(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::SpriteSheet;
    use crate::engine::renderer::{Canvas, Color};
    use image::RgbaImage;

    /// Records draw_image calls instead of drawing
    #[derive(Default)]
    struct RecordingContext {
        draws: Vec<(Rect, Rect)>,
    }

    impl DrawContext for RecordingContext {
        fn size(&self) -> (u32, u32) {
            (1024, 576)
        }
        fn clear_rect(&mut self, _rect: Rect) {}
        fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
        fn draw_image(&mut self, _image: &RgbaImage, src: Rect, dst: Rect) {
            self.draws.push((src, dst));
        }
    }

    /// Animator with a Run clip (4 frames, cadence 3) and an Idle clip (2 frames, cadence 2)
    fn setup() -> (SpriteAnimator, AssetManager) {
        let mut sheets = AssetManager::new("assets");
        let run = sheets.insert_sheet("Run.png", SpriteSheet::new(RgbaImage::new(64, 20)));
        let idle = sheets.insert_sheet("Idle.png", SpriteSheet::new(RgbaImage::new(32, 24)));

        let mut animator = SpriteAnimator::new(AnimationState::Run);
        animator.add_clip(AnimationClip::new(AnimationState::Run, run, 4, 3));
        animator.add_clip(AnimationClip::new(AnimationState::Idle, idle, 2, 2));
        (animator, sheets)
    }

    fn tick(animator: &mut SpriteAnimator, sheets: &AssetManager) {
        let mut ctx = RecordingContext::default();
        animator.draw(&mut ctx, sheets, Vec2::ZERO);
    }

    #[test]
    fn test_clip_clamps_zero_counts() {
        let (_, mut sheets) = setup();
        let handle = sheets.insert_sheet("x.png", SpriteSheet::new(RgbaImage::new(1, 1)));
        let clip = AnimationClip::new(AnimationState::Fall, handle, 0, 0);
        assert_eq!(clip.frame_count, 1);
        assert_eq!(clip.cadence, 1);
    }

    #[test]
    fn test_frame_advances_every_cadence_ticks() {
        let (mut animator, sheets) = setup();

        let mut frames = Vec::new();
        for _ in 0..13 {
            tick(&mut animator, &sheets);
            frames.push(animator.current_frame());
        }

        // Cadence 3, 4 frames: advance after ticks 3, 6, 9, 12 and wrap at 12
        assert_eq!(frames, vec![0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 0, 0]);
    }

    #[test]
    fn test_frame_index_stays_in_range() {
        let (mut animator, sheets) = setup();
        for _ in 0..1000 {
            tick(&mut animator, &sheets);
            assert!(animator.current_frame() < 4);
        }
    }

    #[test]
    fn test_draw_uses_current_frame_region() {
        let (mut animator, sheets) = setup();
        let mut ctx = RecordingContext::default();

        for _ in 0..4 {
            animator.draw(&mut ctx, &sheets, Vec2::new(100.0, 50.0));
        }

        // Sheet is 64 wide with 4 frames: 16px per frame
        assert_eq!(ctx.draws[0].0, Rect::new(0.0, 0.0, 16.0, 20.0));
        assert_eq!(ctx.draws[3].0, Rect::new(16.0, 0.0, 16.0, 20.0));
        assert_eq!(ctx.draws[3].1, Rect::new(100.0, 50.0, 16.0, 20.0));
    }

    #[test]
    fn test_switch_resets_phase() {
        let (mut animator, sheets) = setup();
        for _ in 0..7 {
            tick(&mut animator, &sheets);
        }
        assert_eq!(animator.current_frame(), 2);

        assert!(animator.play(AnimationState::Idle));
        assert_eq!(animator.current_frame(), 0);
        assert_eq!(animator.elapsed_ticks(), 0);

        tick(&mut animator, &sheets);
        assert_eq!(animator.current_frame(), 0);

        assert!(animator.play(AnimationState::Run));
        assert_eq!(animator.current_frame(), 0);
        assert_eq!(animator.elapsed_ticks(), 0);
    }

    #[test]
    fn test_replaying_same_state_keeps_phase() {
        let (mut animator, sheets) = setup();
        for _ in 0..4 {
            tick(&mut animator, &sheets);
        }

        assert!(!animator.play(AnimationState::Run));
        assert_eq!(animator.current_frame(), 1);
        assert_eq!(animator.elapsed_ticks(), 4);
    }

    #[test]
    fn test_unloaded_sheet_draws_nothing_but_advances() {
        let mut sheets = AssetManager::new("/definitely/not/here");
        let handle = sheets.request("Run.png");

        let mut animator = SpriteAnimator::new(AnimationState::Run);
        animator.add_clip(AnimationClip::new(AnimationState::Run, handle, 2, 1));

        let mut ctx = RecordingContext::default();
        animator.draw(&mut ctx, &sheets, Vec2::ZERO);

        assert!(ctx.draws.is_empty());
        assert_eq!(animator.current_frame(), 1);
        assert_eq!(animator.sprite_height(AnimationState::Run, &sheets), 0.0);
    }

    #[test]
    fn test_missing_clip_is_harmless() {
        let (mut animator, sheets) = setup();
        animator.play(AnimationState::JumpLeft);

        let mut ctx = RecordingContext::default();
        animator.draw(&mut ctx, &sheets, Vec2::ZERO);

        assert!(ctx.draws.is_empty());
        assert_eq!(animator.current_frame(), 0);
        assert!(animator.current_clip().is_none());
    }

    #[test]
    fn test_sprite_height_per_state() {
        let (animator, sheets) = setup();
        assert_eq!(animator.sprite_height(AnimationState::Run, &sheets), 20.0);
        assert_eq!(animator.sprite_height(AnimationState::Idle, &sheets), 24.0);
        assert_eq!(animator.sprite_height(AnimationState::Fall, &sheets), 0.0);
    }

    #[test]
    fn test_draws_onto_canvas() {
        let mut sheets = AssetManager::new("assets");
        let red = image::Rgba([255, 0, 0, 255]);
        let handle = sheets.insert_sheet(
            "Idle.png",
            SpriteSheet::new(RgbaImage::from_pixel(8, 4, red)),
        );

        let mut animator = SpriteAnimator::new(AnimationState::Idle);
        animator.add_clip(AnimationClip::new(AnimationState::Idle, handle, 2, 10));

        let mut canvas = Canvas::new(32, 32);
        animator.draw(&mut canvas, &sheets, Vec2::new(10.0, 10.0));

        assert_eq!(canvas.pixel(10, 10), Some(red));
        assert_eq!(canvas.pixel(13, 13), Some(red));
        assert_eq!(canvas.pixel(14, 10).map(|p| p.0[3]), Some(0));
    }
}
