//! MINNOW: a minnow-sized 2D sprite engine
//!
//! Pooled entities, a pure camera transform, macroquad rendering:
//! - Fixed-capacity entity pool, O(1) create and swap-remove destroy
//! - Generation-counted handles so stale references are detected
//! - World/screen projection with pixels-per-unit and zoom
//! - RON configuration, logged degraded asset loading, frame pacing
//!
//! The binary runs the demo stage: WASD moves the player, the camera
//! follows, scroll zooms, space fires, click launches toward the cursor,
//! and falling asteroids respawn as projectiles shoot them down.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod game;
mod input;
mod timing;

use std::path::Path;

use macroquad::prelude::*;

use config::{Config, CONFIG_PATH};
use game::Stage;
use input::InputState;
use timing::limit_frame_rate;

fn window_conf() -> Conf {
    // The logger isn't up yet; main reloads the config with logging
    let config = Config::load(Path::new(CONFIG_PATH)).unwrap_or_default();
    Conf {
        window_title: format!("MINNOW v{}", VERSION),
        window_width: config.window_width as i32,
        window_height: config.window_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Load a texture, degrading to `None` with a logged error on failure.
/// Later draws simply skip sprites without a texture.
async fn load_texture_or_none(path: &str, filter: FilterMode) -> Option<Texture2D> {
    match load_texture(path).await {
        Ok(texture) => {
            texture.set_filter(filter);
            log::info!("Loaded texture {}", path);
            Some(texture)
        }
        Err(e) => {
            log::error!("Failed to load texture {}: {}", path, e);
            None
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::load_or_default();
    log::info!(
        "MINNOW v{} - {}x{}, {} ppu, pool capacity {}",
        VERSION,
        config.window_width,
        config.window_height,
        config.pixels_per_unit,
        config.entity_capacity
    );

    // Pixel-art atlas stays crisp, the backdrop can blur
    let atlas = load_texture_or_none(&config.atlas_path, FilterMode::Nearest).await;
    let background = load_texture_or_none(&config.background_path, FilterMode::Linear).await;

    let mut stage = Stage::new(&config, atlas, background);

    loop {
        let frame_start = get_time();

        let input = InputState::poll();
        if input.quit {
            break;
        }

        // Delta from the previous frame; no upper clamp, a stalled frame
        // steps proportionally far
        let delta = get_frame_time();
        stage.update(&input, delta);

        clear_background(BLACK);
        stage.render();
        draw_text(
            &format!(
                "{} entities | fps cap: {}",
                stage.live_count(),
                config.fps_limit.label()
            ),
            8.0,
            24.0,
            20.0,
            WHITE,
        );

        limit_frame_rate(frame_start, config.fps_limit);
        next_frame().await;
    }
}
