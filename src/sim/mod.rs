//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{can_land_on, platform_overlap_x, player_overlaps};
pub use spawn::{Category, roll_category, run_spawner, spawn_interval};
pub use state::{
    Character, ConfigError, Difficulty, Entity, EntityKind, RunConfig, RunEvent, RunPhase,
    RunState, SoundCue, Sub,
};
pub use tick::{TickInput, tick};
