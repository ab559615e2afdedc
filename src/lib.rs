//! Pet Rescue - a side-scrolling pixel-art runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, run state)
//! - `sprites`: Palette-indexed pixel art catalog
//! - `renderer`: WebGPU rendering pipeline
//! - `highscores`: Leaderboard persisted to LocalStorage
//! - `progress`: Level and photo unlock tracking

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod progress;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod sprites;

pub use highscores::HighScores;
pub use progress::Progress;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, physics constants are per-tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// World dimensions (pixels)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 400.0;
    /// Top of the road surface
    pub const GROUND_Y: f32 = 320.0;

    /// Player physics
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_STRENGTH: f32 = -12.0;
    /// Extra impulse applied once while the jump button is held
    pub const JUMP_BOOST: f32 = -3.0;
    /// Ascent is clamped to this when the jump button is released early
    pub const JUMP_RELEASE_CLAMP: f32 = -4.0;
    /// Vertical slack allowed when starting a jump off a support
    pub const JUMP_TOLERANCE: f32 = 5.0;
    /// Downward impact speed that triggers the landing squash animation
    pub const SQUASH_IMPACT_SPEED: f32 = 8.0;
    pub const SQUASH_TICKS: u32 = 8;

    /// The player runs in place at this x position
    pub const PLAYER_X: f32 = 100.0;

    /// Run progression
    pub const INITIAL_SPEED: f32 = 5.0;
    pub const SPEEDUP_AMOUNT: f32 = 0.5;
    pub const SPEEDUP_INTERVAL_TICKS: u64 = 600;
    pub const SCORE_INTERVAL_TICKS: u64 = 30;
    pub const WIN_SCORE: u32 = 100;

    /// Health
    pub const MAX_HEALTH: u8 = 3;
    pub const INVINCIBILITY_TICKS: u32 = 60;

    /// Entities fully off-screen to the left are dropped
    pub const CLEANUP_X: f32 = -150.0;

    /// Platform landing band relative to the platform top
    pub const PLATFORM_BAND_ABOVE: f32 = 8.0;
    pub const PLATFORM_BAND_BELOW: f32 = 14.0;
}

/// Convert a 0xRRGGBB hex color to linear-ish rgba floats
#[inline]
pub fn hex_color(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}
