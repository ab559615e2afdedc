//! Run state and core simulation types
//!
//! Everything the tick function mutates lives here. A `RunState` is owned
//! exclusively by the run loop; the renderer and shell only read it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use thiserror::Error;

use crate::consts::*;
use crate::sprites::{self, PLAYER_HEIGHT};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Player is running; the world advances
    Active,
    /// Reached the goal house
    Victory,
    /// Health hit zero
    Defeat,
}

/// Playable characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Character {
    Dog,
    Cat,
    /// Unlocked by clearing level 3
    Rabbit,
}

impl Character {
    pub fn speed_mult(&self) -> f32 {
        match self {
            Character::Dog => 1.0,
            Character::Cat => 1.05,
            Character::Rabbit => 1.35,
        }
    }

    /// The rabbit is fast but falls hard
    pub fn gravity_mult(&self) -> f32 {
        match self {
            Character::Dog | Character::Cat => 1.0,
            Character::Rabbit => 1.2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Character::Dog => "dog",
            Character::Cat => "cat",
            Character::Rabbit => "rabbit",
        }
    }
}

/// Difficulty setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn speed_mult(&self) -> f32 {
        match self {
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.25,
        }
    }

    pub fn gravity_mult(&self) -> f32 {
        match self {
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.1,
        }
    }

    pub fn jump_mult(&self) -> f32 {
        match self {
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.05,
        }
    }
}

/// Broad entity categories that drive collision resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Obstacle sitting on the road
    Ground,
    /// Airborne hazard
    Air,
    /// Can be stood on; damages on side contact
    Platform,
    /// Kibble or heart
    Collectible,
    /// The house that ends the run
    Goal,
}

/// Themed sub-kind; picks the sprite and the damage class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sub {
    // Air hazards per level
    Pigeon,
    Crow,
    Seagull,
    // Ground obstacles per level
    TrashCan,
    HayBale,
    Sandcastle,
    // Vehicles (heavy ones deal double damage)
    Car,
    Moped,
    Tractor,
    Buggy,
    // Platforms per level
    Bench,
    Crate,
    Bush,
    // Collectibles
    Bone,
    Biscuit,
    Heart,
    // Goal
    House,
}

impl Sub {
    /// Damage dealt on contact; heavy vehicles hit twice as hard
    pub fn damage(&self) -> u8 {
        match self {
            Sub::Car | Sub::Tractor | Sub::Buggy => 2,
            _ => 1,
        }
    }
}

/// A spawned world entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub sub: Sub,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Entity {
    /// Build an entity with its collision box taken from the sprite catalog
    pub fn new(id: u32, kind: EntityKind, sub: Sub, x: f32, y: f32) -> Self {
        let sprite = sprites::sub_sprite(sub);
        Self {
            id,
            kind,
            sub,
            x,
            y,
            width: sprite.px_width(),
            height: sprite.px_height(),
        }
    }
}

/// Immutable per-run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub character: Character,
    pub difficulty: Difficulty,
    /// 1..=3
    pub level: u32,
    pub nickname: String,
}

/// Rejected run configurations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("nickname must not be empty")]
    EmptyNickname,
    #[error("level {0} is out of range (1-3)")]
    LevelOutOfRange(u32),
}

/// Sound cues emitted by the simulation; the shell decides how to play them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
    Damage,
    Collect,
    Victory,
    Defeat,
}

/// Events emitted by `tick` for the shell to consume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent {
    ScoreChanged(u32),
    KibbleChanged(u32),
    HealthChanged(u8),
    Sound(SoundCue),
    /// Emitted exactly once; carries score scaled by level
    Victory { final_score: u32 },
    /// Emitted exactly once; carries score scaled by level
    Defeat { final_score: u32 },
}

/// Complete run state (deterministic given config + seed + inputs)
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub config: RunConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Unpaused ticks elapsed
    pub frame: u64,
    pub phase: RunPhase,
    paused: bool,

    // Player
    /// Top of the player box; x is fixed at PLAYER_X
    pub player_y: f32,
    pub player_vel_y: f32,
    pub is_jumping: bool,
    pub jump_held: bool,
    pub boost_consumed: bool,
    /// Entity id of the platform currently stood on
    pub on_platform: Option<u32>,
    /// Cosmetic landing squash countdown
    pub landing_squash_ticks: u32,
    pub invincibility_ticks: u32,
    pub health: u8,

    // World
    pub entities: Vec<Entity>,
    pub speed: f32,
    pub background_distance: f32,
    pub score: u32,
    pub kibble: u32,
    /// Set once the goal house has been queued; freezes progression
    pub victory_started: bool,
    next_id: u32,
}

impl RunState {
    /// Start a new run. The nickname is the only user-supplied field and is
    /// validated before any state exists.
    pub fn new(config: RunConfig, seed: u64) -> Result<Self, ConfigError> {
        if config.nickname.trim().is_empty() {
            return Err(ConfigError::EmptyNickname);
        }
        if !(1..=3).contains(&config.level) {
            return Err(ConfigError::LevelOutOfRange(config.level));
        }

        let speed =
            INITIAL_SPEED * config.difficulty.speed_mult() * config.character.speed_mult();

        Ok(Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            phase: RunPhase::Active,
            paused: false,
            player_y: GROUND_Y - PLAYER_HEIGHT,
            player_vel_y: 0.0,
            is_jumping: false,
            jump_held: false,
            boost_consumed: false,
            on_platform: None,
            landing_squash_ticks: 0,
            invincibility_ticks: 0,
            health: MAX_HEALTH,
            entities: Vec::new(),
            speed,
            background_distance: 0.0,
            score: 0,
            kibble: 0,
            victory_started: false,
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Pause or resume. Idempotent; a paused run ignores ticks entirely.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Per-tick gravity with difficulty and character applied
    pub fn gravity(&self) -> f32 {
        GRAVITY * self.config.difficulty.gravity_mult() * self.config.character.gravity_mult()
    }

    /// Jump impulse with difficulty applied
    pub fn jump_strength(&self) -> f32 {
        JUMP_STRENGTH * self.config.difficulty.jump_mult()
    }

    /// Combined speed multiplier used by spawn cadence and speedups
    pub fn speed_mult(&self) -> f32 {
        self.config.difficulty.speed_mult() * self.config.character.speed_mult()
    }

    /// Score scaled by level, reported on victory and defeat
    pub fn final_score(&self) -> u32 {
        self.score * self.config.level
    }

    /// Top of whatever the player is standing on (platform or road)
    pub fn support_top(&self) -> f32 {
        self.on_platform
            .and_then(|id| self.entities.iter().find(|e| e.id == id))
            .map(|e| e.y)
            .unwrap_or(GROUND_Y)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.entities.sort_by_key(|e| e.id);
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> RunConfig {
    RunConfig {
        character: Character::Dog,
        difficulty: Difficulty::Normal,
        level: 1,
        nickname: "Rex".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_nickname_is_rejected() {
        let config = RunConfig {
            nickname: "   ".to_string(),
            ..test_config()
        };
        assert_eq!(
            RunState::new(config, 1).unwrap_err(),
            ConfigError::EmptyNickname
        );
    }

    #[test]
    fn level_out_of_range_is_rejected() {
        let config = RunConfig {
            level: 4,
            ..test_config()
        };
        assert_eq!(
            RunState::new(config, 1).unwrap_err(),
            ConfigError::LevelOutOfRange(4)
        );
    }

    #[test]
    fn new_run_starts_on_the_ground() {
        let state = RunState::new(test_config(), 7).unwrap();
        assert_eq!(state.phase, RunPhase::Active);
        assert_eq!(state.player_y, GROUND_Y - PLAYER_HEIGHT);
        assert_eq!(state.health, MAX_HEALTH);
        assert_eq!(state.speed, INITIAL_SPEED);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn rabbit_is_faster_and_heavier() {
        let rabbit = RunConfig {
            character: Character::Rabbit,
            ..test_config()
        };
        let state = RunState::new(rabbit, 7).unwrap();
        assert!(state.speed > INITIAL_SPEED);
        assert!(state.gravity() > GRAVITY);
    }

    #[test]
    fn heavy_vehicles_hit_twice_as_hard() {
        assert_eq!(Sub::Car.damage(), 2);
        assert_eq!(Sub::Tractor.damage(), 2);
        assert_eq!(Sub::Buggy.damage(), 2);
        assert_eq!(Sub::Moped.damage(), 1);
        assert_eq!(Sub::TrashCan.damage(), 1);
    }
}
