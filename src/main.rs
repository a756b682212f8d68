use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{error, info, warn};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod config;
mod core;
mod engine;
mod game;

use config::GameConfig;
use engine::assets::AssetManager;
use engine::game_loop::GameLoop;
use engine::input::InputManager;
use engine::renderer::{Canvas, RenderError, Renderer};
use game::scene::Scene;

/// Upper bound on the startup wait when asset gating is on
const ASSET_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Sprite Hero...");

    let config = GameConfig::load_from_env()?;
    let (canvas_width, canvas_height) = (config.canvas.width, config.canvas.height);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(canvas_width, canvas_height))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone(), canvas_width, canvas_height))?;

    let mut assets = AssetManager::new(&config.asset_root);
    info!("Loading sprite sheets from {}", assets.loader().base_path().display());

    let mut scene = Scene::from_config(
        &config.character,
        config.canvas.background_color(),
        &mut assets,
    );
    info!("Requested {} sprite sheets", assets.stats().pending);

    if config.wait_for_assets && !assets.wait_until_settled(ASSET_WAIT_TIMEOUT) {
        warn!("Sprite sheets still loading after {:?}", ASSET_WAIT_TIMEOUT);
    }

    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut canvas = Canvas::new(canvas_width, canvas_height);
    let mut reported_settled = false;

    // Main event loop
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!(
                    "Close requested after {} ticks ({:.1}s, {:.1} FPS, last frame {:.1}ms) in state {}, shutting down...",
                    game_loop.frame_count(),
                    game_loop.elapsed().as_secs_f32(),
                    game_loop.fps(),
                    game_loop.frame_delta() * 1000.0,
                    scene.character.state()
                );
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                renderer.resize(physical_size);
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Key releases are not delivered while unfocused
                input.reset();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                assets.poll();
                if !reported_settled && assets.is_settled() {
                    let stats = assets.stats();
                    info!(
                        "Sprite sheets settled: {} ready, {} failed",
                        stats.ready, stats.failed
                    );
                    scene.missing_sheets(&assets);
                    reported_settled = true;
                }

                let snapshot = input.begin_tick();
                game_loop.begin_frame();

                if !config.wait_for_assets || assets.is_settled() {
                    scene.tick(&snapshot, &assets, &mut canvas);
                }

                match renderer.render(&canvas) {
                    Ok(()) => {}
                    Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                        renderer.reconfigure();
                    }
                    Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                        error!("GPU out of memory, shutting down");
                        elwt.exit();
                    }
                    Err(e) => warn!("Skipping frame: {}", e),
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        }
    }).map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
