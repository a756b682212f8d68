// Per-tick scene driver

use log::{info, warn};

use super::characters::{AnimationClip, AnimationState, Character};
use crate::config::CharacterConfig;
use crate::engine::assets::{AssetManager, LoadStatus};
use crate::engine::input::InputSnapshot;
use crate::engine::renderer::{Color, DrawContext};

/// Owns the hero and paints one frame per tick
#[derive(Debug)]
pub struct Scene {
    pub character: Character,
    pub background: Color,
}

impl Scene {
    pub fn new(character: Character, background: Color) -> Self {
        Self {
            character,
            background,
        }
    }

    /// Build the hero from config, requesting every clip's sheet from `assets`
    pub fn from_config(config: &CharacterConfig, background: Color, assets: &mut AssetManager) -> Self {
        let clips: Vec<AnimationClip> = config
            .clips
            .iter()
            .map(|clip| {
                AnimationClip::new(clip.state, assets.request(&clip.path), clip.frames, clip.cadence)
            })
            .collect();

        info!(
            "Spawning character at {:?} with {} clips",
            config.spawn_position(),
            clips.len()
        );

        let character = Character::new(config.spawn_position(), config.stats).with_clips(clips);
        Self::new(character, background)
    }

    /// States whose sheet failed to load, logging each one. These draw nothing.
    pub fn missing_sheets(&self, sheets: &AssetManager) -> Vec<AnimationState> {
        AnimationState::ALL
            .into_iter()
            .filter(|&state| {
                let status = self
                    .character
                    .animation
                    .clip(state)
                    .and_then(|clip| sheets.status(clip.sheet));
                status == Some(LoadStatus::Failed)
            })
            .inspect(|state| warn!("No sprite sheet for {}, it will not be drawn", state))
            .collect()
    }

    /// Clear, paint the background, then update the character once
    pub fn tick(&mut self, input: &InputSnapshot, sheets: &AssetManager, ctx: &mut dyn DrawContext) {
        let full = ctx.bounds();

        ctx.clear_rect(full);
        ctx.fill_rect(full, self.background);

        self.character.update(input, sheets, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::SpriteSheet;
    use crate::engine::input::Action;
    use crate::engine::renderer::Canvas;
    use crate::game::characters::CharacterStats;
    use glam::Vec2;
    use image::{Rgba, RgbaImage};

    const BACKGROUND: Color = Rgba([10, 20, 30, 255]);
    const HERO: Color = Rgba([200, 50, 50, 255]);

    /// Scene whose every clip shows a solid 2-frame, 16x8 sheet
    fn setup(position: Vec2) -> (Scene, AssetManager) {
        let mut sheets = AssetManager::new("assets");
        let sheet = sheets.insert_sheet("hero.png", SpriteSheet::new(RgbaImage::from_pixel(32, 8, HERO)));
        let clips: Vec<AnimationClip> = AnimationState::ALL
            .iter()
            .map(|&state| AnimationClip::new(state, sheet, 2, 10))
            .collect();

        let character = Character::new(position, CharacterStats::default()).with_clips(clips);
        (Scene::new(character, BACKGROUND), sheets)
    }

    #[test]
    fn test_tick_paints_background_and_character() {
        let (mut scene, sheets) = setup(Vec2::new(4.0, 4.0));
        let mut canvas = Canvas::new(64, 32);

        scene.tick(&InputSnapshot::default(), &sheets, &mut canvas);

        assert_eq!(canvas.pixel(0, 0), Some(BACKGROUND));
        assert_eq!(canvas.pixel(63, 31), Some(BACKGROUND));
        assert_eq!(canvas.pixel(4, 4), Some(HERO));
        assert_eq!(canvas.pixel(19, 11), Some(HERO));
        assert_eq!(canvas.pixel(20, 4), Some(BACKGROUND));
    }

    #[test]
    fn test_previous_frame_is_cleared() {
        let (mut scene, sheets) = setup(Vec2::new(4.0, 24.0));
        let mut canvas = Canvas::new(64, 32);
        let right = InputSnapshot::holding(&[Action::MoveRight]);

        scene.tick(&right, &sheets, &mut canvas);
        assert_eq!(canvas.pixel(4, 24), Some(HERO));

        // Drawn at x = 9 on the second tick, so the old left edge is background again
        scene.tick(&right, &sheets, &mut canvas);
        assert_eq!(canvas.pixel(4, 24), Some(BACKGROUND));
        assert_eq!(canvas.pixel(9, 24), Some(HERO));
    }

    #[test]
    fn test_floor_is_canvas_bottom() {
        let (mut scene, sheets) = setup(Vec2::new(0.0, 24.0));
        let mut canvas = Canvas::new(64, 32);

        for _ in 0..10 {
            scene.tick(&InputSnapshot::default(), &sheets, &mut canvas);
        }
        assert_eq!(scene.character.position.y, 24.0);
        assert_eq!(scene.character.state(), AnimationState::Idle);
    }

    #[test]
    fn test_tick_without_sheets_only_paints_background() {
        let mut sheets = AssetManager::new("/definitely/not/here");
        let config = CharacterConfig::default();
        let mut scene = Scene::from_config(&config, BACKGROUND, &mut sheets);
        let mut canvas = Canvas::new(32, 32);

        scene.tick(&InputSnapshot::default(), &sheets, &mut canvas);

        assert_eq!(canvas.pixel(1, 0), Some(BACKGROUND));
        assert_eq!(scene.character.velocity.y, 1.0);
    }

    #[test]
    fn test_missing_sheets_lists_failed_clips() {
        let (scene, sheets) = setup(Vec2::ZERO);
        assert!(scene.missing_sheets(&sheets).is_empty());

        let mut sheets = AssetManager::new("/definitely/not/here");
        let scene = Scene::from_config(&CharacterConfig::default(), BACKGROUND, &mut sheets);
        assert!(sheets.wait_until_settled(std::time::Duration::from_secs(5)));
        assert_eq!(scene.missing_sheets(&sheets), AnimationState::ALL.to_vec());
    }

    #[test]
    fn test_from_config_registers_every_clip() {
        let mut sheets = AssetManager::new("/definitely/not/here");
        let scene = Scene::from_config(&CharacterConfig::default(), BACKGROUND, &mut sheets);

        for state in AnimationState::ALL {
            assert!(scene.character.animation.clip(state).is_some(), "no clip for {}", state);
        }
        assert_eq!(scene.character.position, Vec2::new(1.0, 0.0));
        assert_eq!(sheets.stats().pending + sheets.stats().failed + sheets.stats().ready, 8);
    }
}
