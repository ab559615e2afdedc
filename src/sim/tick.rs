//! Fixed timestep simulation tick
//!
//! Advances one run by exactly one tick. Physics constants are per-tick,
//! so determinism falls out of calling this at a fixed cadence with the
//! same inputs.

use crate::consts::*;
use crate::sim::collision::{can_land_on, platform_overlap_x, player_overlaps};
use crate::sim::spawn;
use crate::sim::state::{EntityKind, RunEvent, RunPhase, RunState, SoundCue, Sub};
use crate::sprites::PLAYER_HEIGHT;

/// Input sampled for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump button went down this tick
    pub jump_pressed: bool,
    /// Jump button is currently down
    pub jump_held: bool,
}

/// Advance the run by one tick, appending events for the shell.
///
/// Paused and finished runs are untouched, so ticking a paused state any
/// number of times leaves it bit-identical.
pub fn tick(state: &mut RunState, input: &TickInput, events: &mut Vec<RunEvent>) {
    if state.is_paused() || state.phase != RunPhase::Active {
        return;
    }

    state.frame += 1;
    state.jump_held = input.jump_held;

    apply_jump_input(state, input, events);
    integrate_player(state);

    // Score and speed freeze once the goal is queued
    if !state.victory_started {
        if state.frame % SCORE_INTERVAL_TICKS == 0 {
            state.score += 1;
            events.push(RunEvent::ScoreChanged(state.score));
        }
        if state.frame % SPEEDUP_INTERVAL_TICKS == 0 {
            state.speed += SPEEDUP_AMOUNT * state.speed_mult();
        }
    }

    spawn::run_spawner(state);

    for entity in &mut state.entities {
        entity.x -= state.speed;
    }

    maintain_platform_support(state);
    try_platform_landing(state);
    resolve_collisions(state, events);

    state.entities.retain(|e| e.x + e.width >= CLEANUP_X);

    state.invincibility_ticks = state.invincibility_ticks.saturating_sub(1);
    state.landing_squash_ticks = state.landing_squash_ticks.saturating_sub(1);
    state.background_distance += state.speed;
}

/// Jump start, hold-to-boost, and early-release clamp
fn apply_jump_input(state: &mut RunState, input: &TickInput, events: &mut Vec<RunEvent>) {
    if input.jump_pressed && !state.victory_started {
        let feet = state.player_y + PLAYER_HEIGHT;
        let near_support = state.support_top() - feet <= JUMP_TOLERANCE;
        if near_support && state.player_vel_y >= 0.0 {
            state.player_vel_y = state.jump_strength();
            state.is_jumping = true;
            state.boost_consumed = false;
            state.on_platform = None;
            events.push(RunEvent::Sound(SoundCue::Jump));
        }
    }

    // One extra shove while the button is still held, applied only after
    // the initial impulse has decayed past its halfway point
    if input.jump_held
        && state.is_jumping
        && !state.boost_consumed
        && state.player_vel_y < 0.0
        && state.player_vel_y > state.jump_strength() / 2.0
    {
        state.player_vel_y += JUMP_BOOST * state.config.difficulty.jump_mult();
        state.boost_consumed = true;
    }

    // Releasing early cuts the ascent short
    if !input.jump_held && state.player_vel_y < JUMP_RELEASE_CLAMP {
        state.player_vel_y = JUMP_RELEASE_CLAMP;
    }
}

/// Gravity, integration, and the ground clamp
fn integrate_player(state: &mut RunState) {
    if state.on_platform.is_some() {
        return;
    }

    state.player_vel_y += state.gravity();
    state.player_y += state.player_vel_y;

    let ground_top = GROUND_Y - PLAYER_HEIGHT;
    if state.player_y >= ground_top {
        let impact = state.player_vel_y;
        state.player_y = ground_top;
        state.player_vel_y = 0.0;
        state.is_jumping = false;
        state.boost_consumed = false;
        if impact > SQUASH_IMPACT_SPEED {
            state.landing_squash_ticks = SQUASH_TICKS;
        }
    }
}

/// Keep the player glued to a platform, or drop them when it slides away
fn maintain_platform_support(state: &mut RunState) {
    let Some(id) = state.on_platform else { return };

    let supported = state
        .entities
        .iter()
        .find(|e| e.id == id)
        .filter(|e| platform_overlap_x(e))
        .map(|e| e.y);

    match supported {
        Some(top) => {
            state.player_y = top - PLAYER_HEIGHT;
            state.player_vel_y = 0.0;
        }
        None => {
            // Walked off the edge (or the platform was removed)
            state.on_platform = None;
            state.is_jumping = true;
        }
    }
}

/// Catch a falling player on the first platform whose top band the feet
/// pass through
fn try_platform_landing(state: &mut RunState) {
    if state.on_platform.is_some() || state.player_vel_y < 0.0 {
        return;
    }

    let landing = state
        .entities
        .iter()
        .find(|e| {
            e.kind == EntityKind::Platform && can_land_on(state.player_y, state.player_vel_y, e)
        })
        .map(|e| (e.id, e.y));

    if let Some((id, top)) = landing {
        let impact = state.player_vel_y;
        state.player_y = top - PLAYER_HEIGHT;
        state.player_vel_y = 0.0;
        state.is_jumping = false;
        state.boost_consumed = false;
        state.on_platform = Some(id);
        if impact > SQUASH_IMPACT_SPEED {
            state.landing_squash_ticks = SQUASH_TICKS;
        }
    }
}

/// Walk the entity list in spawn order and resolve contacts
fn resolve_collisions(state: &mut RunState, events: &mut Vec<RunEvent>) {
    let mut removed: Vec<u32> = Vec::new();
    let support = state.on_platform;

    for i in 0..state.entities.len() {
        let entity = state.entities[i];
        if Some(entity.id) == support {
            continue;
        }
        if !player_overlaps(state.player_y, &entity) {
            continue;
        }

        match entity.kind {
            EntityKind::Goal => {
                state.phase = RunPhase::Victory;
                events.push(RunEvent::Victory {
                    final_score: state.final_score(),
                });
                events.push(RunEvent::Sound(SoundCue::Victory));
                log::info!(
                    "run won: score {} x level {} = {}",
                    state.score,
                    state.config.level,
                    state.final_score()
                );
                break;
            }
            EntityKind::Collectible => {
                match entity.sub {
                    Sub::Heart => {
                        // A heart at full health is consumed without effect
                        if state.health < MAX_HEALTH {
                            state.health += 1;
                            events.push(RunEvent::HealthChanged(state.health));
                        }
                    }
                    _ => {
                        state.kibble += 1;
                        events.push(RunEvent::KibbleChanged(state.kibble));
                    }
                }
                removed.push(entity.id);
                events.push(RunEvent::Sound(SoundCue::Collect));
            }
            EntityKind::Ground | EntityKind::Air | EntityKind::Platform => {
                if state.invincibility_ticks == 0 {
                    state.health = state.health.saturating_sub(entity.sub.damage());
                    events.push(RunEvent::HealthChanged(state.health));
                    state.invincibility_ticks = INVINCIBILITY_TICKS;
                    events.push(RunEvent::Sound(SoundCue::Damage));

                    if state.health == 0 {
                        state.phase = RunPhase::Defeat;
                        events.push(RunEvent::Defeat {
                            final_score: state.final_score(),
                        });
                        events.push(RunEvent::Sound(SoundCue::Defeat));
                        log::info!("run lost at score {}", state.score);
                        break;
                    }
                }
            }
        }
    }

    if !removed.is_empty() {
        state.entities.retain(|e| !removed.contains(&e.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Character, Entity, RunConfig, test_config};
    use proptest::prelude::*;

    fn new_run(seed: u64) -> RunState {
        RunState::new(test_config(), seed).unwrap()
    }

    fn held() -> TickInput {
        TickInput {
            jump_pressed: false,
            jump_held: true,
        }
    }

    fn press_and_hold() -> TickInput {
        TickInput {
            jump_pressed: true,
            jump_held: true,
        }
    }

    fn tap() -> TickInput {
        TickInput {
            jump_pressed: true,
            jump_held: false,
        }
    }

    /// Drop everything that could collide with the player, keeping the goal
    fn clear_hazards(state: &mut RunState) {
        state.entities.retain(|e| e.kind == EntityKind::Goal);
        state.on_platform = None;
    }

    fn vehicle_on_player(state: &mut RunState) -> Entity {
        let id = state.next_entity_id();
        let mut car = Entity::new(id, EntityKind::Ground, Sub::Car, PLAYER_X - 10.0, 0.0);
        car.y = GROUND_Y - car.height;
        state.entities.push(car);
        car
    }

    #[test]
    fn clean_run_reaches_the_goal_line_in_3000_ticks() {
        let mut state = new_run(0xDECAF);
        let mut events = Vec::new();

        for _ in 0..3000 {
            clear_hazards(&mut state);
            tick(&mut state, &TickInput::default(), &mut events);
        }

        assert_eq!(state.frame, 3000);
        assert_eq!(state.score, WIN_SCORE);
        assert!(state.victory_started);
        assert_eq!(
            state
                .entities
                .iter()
                .filter(|e| e.kind == EntityKind::Goal)
                .count(),
            1
        );
        assert!(events.contains(&RunEvent::ScoreChanged(WIN_SCORE)));
    }

    #[test]
    fn vehicle_hit_at_one_health_defeats_exactly_once() {
        let mut state = new_run(1);
        state.score = 40;
        state.health = 1;
        vehicle_on_player(&mut state);
        // A second overlapping hazard must not double-process
        vehicle_on_player(&mut state);

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), &mut events);

        assert_eq!(state.phase, RunPhase::Defeat);
        assert_eq!(state.health, 0);
        let defeats: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, RunEvent::Defeat { .. }))
            .collect();
        assert_eq!(defeats.len(), 1);
        assert_eq!(
            defeats[0],
            &RunEvent::Defeat {
                final_score: state.score * state.config.level
            }
        );

        // A finished run is inert
        let frozen = state.clone();
        tick(&mut state, &TickInput::default(), &mut events);
        assert_eq!(state, frozen);
    }

    #[test]
    fn heavy_vehicle_deals_double_damage() {
        let mut state = new_run(1);
        state.health = 3;
        vehicle_on_player(&mut state);

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), &mut events);

        assert_eq!(state.health, 1);
        assert_eq!(state.invincibility_ticks, INVINCIBILITY_TICKS - 1);
        assert_eq!(state.phase, RunPhase::Active);
    }

    #[test]
    fn invincibility_blocks_repeat_damage() {
        let mut state = new_run(1);
        state.health = 3;
        let mut events = Vec::new();

        vehicle_on_player(&mut state);
        tick(&mut state, &TickInput::default(), &mut events);
        assert_eq!(state.health, 1);

        // Fresh overlapping hazard while still invincible
        clear_hazards(&mut state);
        vehicle_on_player(&mut state);
        tick(&mut state, &TickInput::default(), &mut events);
        assert_eq!(state.health, 1);
    }

    #[test]
    fn held_jump_rises_higher_than_tapped_jump() {
        let apex = |hold: bool| -> f32 {
            let mut state = new_run(9);
            let mut events = Vec::new();
            let mut min_y = state.player_y;

            tick(
                &mut state,
                &if hold { press_and_hold() } else { tap() },
                &mut events,
            );
            for _ in 0..80 {
                let input = if hold { held() } else { TickInput::default() };
                tick(&mut state, &input, &mut events);
                min_y = min_y.min(state.player_y);
            }
            min_y
        };

        let tapped_apex = apex(false);
        let held_apex = apex(true);
        // Smaller y is higher on screen
        assert!(
            held_apex < tapped_apex,
            "held {held_apex} should peak above tapped {tapped_apex}"
        );
    }

    #[test]
    fn heart_at_full_health_is_consumed_without_healing() {
        let mut state = new_run(2);
        assert_eq!(state.health, MAX_HEALTH);
        let id = state.next_entity_id();
        state.entities.push(Entity::new(
            id,
            EntityKind::Collectible,
            Sub::Heart,
            PLAYER_X,
            state.player_y,
        ));

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), &mut events);

        assert_eq!(state.health, MAX_HEALTH);
        assert!(state.entities.iter().all(|e| e.sub != Sub::Heart));
        assert!(events.contains(&RunEvent::Sound(SoundCue::Collect)));
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, RunEvent::HealthChanged(_)))
        );
    }

    #[test]
    fn heart_below_full_health_heals_one() {
        let mut state = new_run(2);
        state.health = 1;
        let id = state.next_entity_id();
        state.entities.push(Entity::new(
            id,
            EntityKind::Collectible,
            Sub::Heart,
            PLAYER_X,
            state.player_y,
        ));

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), &mut events);

        assert_eq!(state.health, 2);
        assert!(events.contains(&RunEvent::HealthChanged(2)));
    }

    #[test]
    fn kibble_pickup_counts_and_disappears() {
        let mut state = new_run(3);
        let id = state.next_entity_id();
        state.entities.push(Entity::new(
            id,
            EntityKind::Collectible,
            Sub::Bone,
            PLAYER_X,
            state.player_y,
        ));

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), &mut events);

        assert_eq!(state.kibble, 1);
        assert!(events.contains(&RunEvent::KibbleChanged(1)));
        assert!(state.entities.iter().all(|e| e.sub != Sub::Bone));
    }

    #[test]
    fn pausing_is_idempotent_and_freezes_the_run() {
        let mut state = new_run(4);
        let mut events = Vec::new();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), &mut events);
        }

        state.set_paused(true);
        let paused = state.clone();
        state.set_paused(true);
        assert_eq!(state, paused);

        for _ in 0..100 {
            tick(&mut state, &press_and_hold(), &mut events);
        }
        assert_eq!(state, paused);

        state.set_paused(false);
        tick(&mut state, &TickInput::default(), &mut events);
        assert_eq!(state.frame, 11);
    }

    #[test]
    fn speed_never_decreases() {
        let mut state = new_run(5);
        let mut events = Vec::new();
        let mut last_speed = state.speed;
        for _ in 0..2500 {
            clear_hazards(&mut state);
            tick(&mut state, &TickInput::default(), &mut events);
            assert!(state.speed >= last_speed);
            last_speed = state.speed;
        }
        // Speedups landed at 600-tick intervals
        assert!(state.speed > INITIAL_SPEED);
    }

    #[test]
    fn landing_on_a_platform_sticks_until_it_slides_away() {
        let mut state = new_run(6);
        let id = state.next_entity_id();
        let platform = Entity::new(id, EntityKind::Platform, Sub::Bench, PLAYER_X, 240.0);
        state.entities.push(platform);

        // Drop the player right above the platform top
        state.player_y = 240.0 - PLAYER_HEIGHT - 2.0;
        state.player_vel_y = 4.0;
        state.is_jumping = true;

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), &mut events);

        assert_eq!(state.on_platform, Some(id));
        assert_eq!(state.player_y, 240.0 - PLAYER_HEIGHT);
        assert!(!state.is_jumping);

        // Let the platform scroll out from under the player
        for _ in 0..200 {
            state.entities.retain(|e| e.id == id);
            tick(&mut state, &TickInput::default(), &mut events);
            if state.on_platform.is_none() {
                break;
            }
        }
        assert_eq!(state.on_platform, None);
        // Back on the ground after the fall
        for _ in 0..60 {
            state.entities.clear();
            tick(&mut state, &TickInput::default(), &mut events);
        }
        assert_eq!(state.player_y, GROUND_Y - PLAYER_HEIGHT);
    }

    #[test]
    fn goal_contact_wins_with_level_scaled_score() {
        let config = RunConfig {
            level: 3,
            ..test_config()
        };
        let mut state = RunState::new(config, 8).unwrap();
        state.score = WIN_SCORE;
        state.victory_started = true;
        let id = state.next_entity_id();
        let mut house = Entity::new(id, EntityKind::Goal, Sub::House, PLAYER_X, 0.0);
        house.y = GROUND_Y - house.height;
        state.entities.push(house);

        let mut events = Vec::new();
        tick(&mut state, &TickInput::default(), &mut events);

        assert_eq!(state.phase, RunPhase::Victory);
        assert!(events.contains(&RunEvent::Victory {
            final_score: WIN_SCORE * 3
        }));
    }

    #[test]
    fn determinism_across_identical_runs() {
        let inputs = [
            TickInput::default(),
            press_and_hold(),
            held(),
            held(),
            TickInput::default(),
            tap(),
        ];

        let mut a = new_run(0xC0FFEE);
        let mut b = new_run(0xC0FFEE);
        let mut events_a = Vec::new();
        let mut events_b = Vec::new();

        for step in 0..600 {
            let input = inputs[step % inputs.len()];
            tick(&mut a, &input, &mut events_a);
            tick(&mut b, &input, &mut events_b);
        }

        assert_eq!(a, b);
        assert_eq!(events_a, events_b);
    }

    #[test]
    fn hard_difficulty_jumps_carry_more_impulse() {
        let config = RunConfig {
            difficulty: crate::sim::state::Difficulty::Hard,
            ..test_config()
        };
        let hard = RunState::new(config, 1).unwrap();
        let normal = new_run(1);
        assert!(hard.jump_strength() < normal.jump_strength());
        assert!(hard.gravity() > normal.gravity());
    }

    proptest! {
        #[test]
        fn player_never_sinks_below_ground_and_health_stays_bounded(
            inputs in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..400),
            seed in any::<u64>(),
        ) {
            let mut state = RunState::new(
                RunConfig {
                    character: Character::Rabbit,
                    ..test_config()
                },
                seed,
            ).unwrap();
            let mut events = Vec::new();

            for (pressed, held_down) in inputs {
                let input = TickInput { jump_pressed: pressed, jump_held: held_down };
                tick(&mut state, &input, &mut events);
                prop_assert!(state.player_y <= GROUND_Y - PLAYER_HEIGHT + 0.001);
                prop_assert!(state.health <= MAX_HEALTH);
                if let Some(id) = state.on_platform {
                    let platform = state.entities.iter().find(|e| e.id == id);
                    prop_assert!(platform.is_some());
                    prop_assert!((state.player_y - (platform.unwrap().y - PLAYER_HEIGHT)).abs() < 0.001);
                }
            }
        }
    }
}
