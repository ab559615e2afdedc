//! Procedural entity spawner
//!
//! All spawn decisions come from the run's seeded RNG so a replay with the
//! same seed and inputs produces the same world. Cadence tightens as the
//! score climbs, then goes quiet just before the goal so the final stretch
//! is a clean run-in.

use rand::Rng;

use crate::consts::*;
use crate::sim::state::{Entity, EntityKind, RunState, Sub};

/// What a spawn attempt produces, rolled once per attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// 1-3 stacked airborne hazards
    AirBurst,
    Collectible,
    Vehicle,
    Platform,
    Ground,
}

/// Probability that a due spawn attempt actually fires
const SPAWN_CHANCE: f32 = 0.9;
/// Per-tick chance of a healing heart inside the eligible score band
const HEART_CHANCE: f32 = 0.002;
/// Heart score band (inclusive)
const HEART_MIN_SCORE: u32 = 30;
const HEART_MAX_SCORE: u32 = 85;
/// Regular spawning stops this close to the goal
const FINAL_STRETCH: u32 = 3;
/// Below this speed, airborne hazards are unjumpable and fall back to ground
const AIR_MIN_SPEED: f32 = 6.0;
/// Vertical gap between stacked air hazards
const AIR_STACK_GAP: f32 = 40.0;

/// Ticks between spawn attempts for a given score, scaled by the combined
/// speed multiplier so faster configurations stay dense
pub fn spawn_interval(score: u32, speed_mult: f32) -> u64 {
    let base = (70.0 - (score as f32 * 0.4).floor()).max(30.0);
    ((base / speed_mult).floor() as u64).max(1)
}

/// Map a uniform roll to a spawn category via cumulative thresholds
pub fn roll_category(roll: f32) -> Category {
    if roll < 0.20 {
        Category::AirBurst
    } else if roll < 0.45 {
        Category::Collectible
    } else if roll < 0.65 {
        Category::Vehicle
    } else if roll < 0.85 {
        Category::Platform
    } else {
        Category::Ground
    }
}

/// Is a heart allowed to spawn right now?
pub fn heart_allowed(score: u32, health: u8) -> bool {
    (HEART_MIN_SCORE..=HEART_MAX_SCORE).contains(&score) && health < MAX_HEALTH
}

fn air_sub(level: u32) -> Sub {
    match level {
        1 => Sub::Pigeon,
        2 => Sub::Crow,
        _ => Sub::Seagull,
    }
}

fn ground_sub(level: u32) -> Sub {
    match level {
        1 => Sub::TrashCan,
        2 => Sub::HayBale,
        _ => Sub::Sandcastle,
    }
}

/// (heavy, light) vehicle pair for a level
fn vehicle_subs(level: u32) -> (Sub, Sub) {
    match level {
        1 => (Sub::Car, Sub::Moped),
        2 => (Sub::Tractor, Sub::Moped),
        _ => (Sub::Buggy, Sub::Moped),
    }
}

fn platform_sub(level: u32) -> Sub {
    match level {
        1 => Sub::Bench,
        2 => Sub::Crate,
        _ => Sub::Bush,
    }
}

/// Push an entity whose feet rest on the road
fn push_grounded(state: &mut RunState, kind: EntityKind, sub: Sub, x: f32) {
    let id = state.next_entity_id();
    let mut entity = Entity::new(id, kind, sub, x, 0.0);
    entity.y = GROUND_Y - entity.height;
    state.entities.push(entity);
}

/// Push an entity at an explicit top-y
fn push_at(state: &mut RunState, kind: EntityKind, sub: Sub, x: f32, y: f32) {
    let id = state.next_entity_id();
    state.entities.push(Entity::new(id, kind, sub, x, y));
}

/// Run the spawner for one tick. Called while the run is active.
pub fn run_spawner(state: &mut RunState) {
    if state.victory_started {
        return;
    }

    // Goal: queued once, off-screen, when the score line is crossed
    if state.score >= WIN_SCORE {
        if !state.entities.iter().any(|e| e.kind == EntityKind::Goal) {
            push_grounded(state, EntityKind::Goal, Sub::House, GAME_WIDTH + 100.0);
            state.victory_started = true;
            log::info!("goal queued at score {}", state.score);
        }
        return;
    }

    // Hearts roll independently of the cadence
    if heart_allowed(state.score, state.health) && state.rng.random::<f32>() < HEART_CHANCE {
        let y = state.rng.random_range(GROUND_Y - 150.0..GROUND_Y - 60.0);
        push_at(state, EntityKind::Collectible, Sub::Heart, GAME_WIDTH, y);
    }

    // Regular spawning goes quiet just before the goal
    if state.score >= WIN_SCORE - FINAL_STRETCH {
        return;
    }

    let interval = spawn_interval(state.score, state.speed_mult());
    if state.frame % interval != 0 {
        return;
    }
    if state.rng.random::<f32>() >= SPAWN_CHANCE {
        return;
    }

    let level = state.config.level;
    let mut category = roll_category(state.rng.random::<f32>());
    if category == Category::AirBurst && state.speed < AIR_MIN_SPEED {
        category = Category::Ground;
    }

    match category {
        Category::AirBurst => {
            let count = state.rng.random_range(1..=3u32);
            let sub = air_sub(level);
            for i in 0..count {
                let y = GROUND_Y - 100.0 - i as f32 * AIR_STACK_GAP;
                push_at(state, EntityKind::Air, sub, GAME_WIDTH, y);
            }
        }
        Category::Collectible => {
            let sub = if state.rng.random::<f32>() < 0.5 {
                Sub::Bone
            } else {
                Sub::Biscuit
            };
            let y = state.rng.random_range(GROUND_Y - 150.0..GROUND_Y - 40.0);
            push_at(state, EntityKind::Collectible, sub, GAME_WIDTH, y);
        }
        Category::Vehicle => {
            let (heavy, light) = vehicle_subs(level);
            let sub = if state.rng.random::<f32>() < 0.5 {
                heavy
            } else {
                light
            };
            push_grounded(state, EntityKind::Ground, sub, GAME_WIDTH);
        }
        Category::Platform => {
            let sub = platform_sub(level);
            let y = state.rng.random_range(GROUND_Y - 120.0..GROUND_Y - 70.0);
            push_at(state, EntityKind::Platform, sub, GAME_WIDTH, y);
        }
        Category::Ground => {
            push_grounded(state, EntityKind::Ground, ground_sub(level), GAME_WIDTH);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{RunState, test_config};

    fn active_state(seed: u64) -> RunState {
        RunState::new(test_config(), seed).unwrap()
    }

    #[test]
    fn interval_tightens_with_score_and_floors_at_30() {
        assert_eq!(spawn_interval(0, 1.0), 70);
        assert_eq!(spawn_interval(50, 1.0), 50);
        assert_eq!(spawn_interval(100, 1.0), 30);
        assert_eq!(spawn_interval(255, 1.0), 30);
    }

    #[test]
    fn interval_shrinks_with_speed_multiplier() {
        assert_eq!(spawn_interval(0, 1.25), 56);
        assert!(spawn_interval(0, 1.35) < spawn_interval(0, 1.0));
        // Extreme multipliers still attempt every tick at most
        assert_eq!(spawn_interval(100, 100.0), 1);
    }

    #[test]
    fn category_thresholds_are_cumulative() {
        assert_eq!(roll_category(0.0), Category::AirBurst);
        assert_eq!(roll_category(0.19), Category::AirBurst);
        assert_eq!(roll_category(0.20), Category::Collectible);
        assert_eq!(roll_category(0.44), Category::Collectible);
        assert_eq!(roll_category(0.45), Category::Vehicle);
        assert_eq!(roll_category(0.64), Category::Vehicle);
        assert_eq!(roll_category(0.65), Category::Platform);
        assert_eq!(roll_category(0.84), Category::Platform);
        assert_eq!(roll_category(0.85), Category::Ground);
        assert_eq!(roll_category(0.99), Category::Ground);
    }

    #[test]
    fn hearts_only_in_band_and_below_full_health() {
        assert!(!heart_allowed(29, 1));
        assert!(heart_allowed(30, 1));
        assert!(heart_allowed(85, 2));
        assert!(!heart_allowed(86, 1));
        assert!(!heart_allowed(50, MAX_HEALTH));
    }

    #[test]
    fn same_seed_spawns_identical_worlds() {
        let mut a = active_state(0xFEED);
        let mut b = active_state(0xFEED);
        for frame in 1..=600 {
            a.frame = frame;
            b.frame = frame;
            run_spawner(&mut a);
            run_spawner(&mut b);
        }
        assert!(!a.entities.is_empty(), "expected some spawns in 600 ticks");
        assert_eq!(a.entities, b.entities);
    }

    #[test]
    fn final_stretch_is_quiet() {
        let mut state = active_state(42);
        state.score = WIN_SCORE - FINAL_STRETCH;
        for frame in 1..=300 {
            state.frame = frame;
            run_spawner(&mut state);
        }
        assert!(state.entities.is_empty());
        assert!(!state.victory_started);
    }

    #[test]
    fn goal_is_queued_exactly_once() {
        let mut state = active_state(42);
        state.score = WIN_SCORE;
        run_spawner(&mut state);
        assert!(state.victory_started);
        run_spawner(&mut state);
        run_spawner(&mut state);

        let goals = state
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Goal)
            .count();
        assert_eq!(goals, 1);
        let house = state
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::Goal)
            .unwrap();
        assert_eq!(house.x, GAME_WIDTH + 100.0);
        assert_eq!(house.sub, Sub::House);
    }

    #[test]
    fn low_speed_spawns_no_air_hazards() {
        // Dog on Normal starts at speed 5.0, below the air threshold
        let mut state = active_state(0xA1);
        for frame in 1..=2000 {
            state.frame = frame;
            run_spawner(&mut state);
        }
        assert!(
            state
                .entities
                .iter()
                .all(|e| e.kind != EntityKind::Air),
            "air hazards must not spawn below speed {AIR_MIN_SPEED}"
        );
    }

    #[test]
    fn fast_runs_do_spawn_air_bursts() {
        let mut state = active_state(0xA1);
        state.speed = 7.0;
        for frame in 1..=4000 {
            state.frame = frame;
            run_spawner(&mut state);
        }
        assert!(state.entities.iter().any(|e| e.kind == EntityKind::Air));
    }
}
