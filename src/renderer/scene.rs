//! Scene builder
//!
//! Turns a `RunState` into a flat triangle list each frame: sky, parallax
//! backdrop, road, entities, then the player on top. Everything is quads;
//! sprites are just grids of quads with palette colors.

use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::hex_color;
use crate::sim::RunState;
use crate::sprites::{self, PLAYER_HEIGHT, SpriteMap};

/// Backdrop scrolls at a fraction of world speed
const BACKDROP_PARALLAX: f32 = 0.3;
/// Vertical scale while the landing squash plays
const SQUASH_SCALE: f32 = 0.75;
/// Backdrop shapes per screen-width
const BACKDROP_COLS: u32 = 8;

struct Theme {
    sky: [f32; 4],
    backdrop: [f32; 4],
    ground: [f32; 4],
    marking: [f32; 4],
    /// City buildings get lit windows
    windows: bool,
    /// Backdrop height factor (buildings tall, dunes low)
    backdrop_height: f32,
}

fn theme(level: u32) -> Theme {
    match level {
        2 => Theme {
            sky: colors::SKY_FIELDS,
            backdrop: colors::BACKDROP_HILLS,
            ground: colors::GROUND_DIRT,
            marking: colors::MARKING_RUT,
            windows: false,
            backdrop_height: 0.45,
        },
        3 => Theme {
            sky: colors::SKY_BEACH,
            backdrop: colors::BACKDROP_SEA,
            ground: colors::GROUND_SAND,
            marking: colors::MARKING_FOAM,
            windows: false,
            backdrop_height: 0.3,
        },
        _ => Theme {
            sky: colors::SKY_CITY,
            backdrop: colors::BACKDROP_BUILDINGS,
            ground: colors::GROUND_ROAD,
            marking: colors::MARKING_PAINT,
            windows: true,
            backdrop_height: 1.0,
        },
    }
}

fn push_quad(out: &mut Vec<Vertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    out.push(Vertex::new(x, y, color));
    out.push(Vertex::new(x, y + h, color));
    out.push(Vertex::new(x + w, y + h, color));
    out.push(Vertex::new(x, y, color));
    out.push(Vertex::new(x + w, y + h, color));
    out.push(Vertex::new(x + w, y, color));
}

/// Draw a sprite with its top-left at (x, y), optionally squashed vertically
fn push_sprite_scaled(out: &mut Vec<Vertex>, sprite: &SpriteMap, x: f32, y: f32, y_scale: f32) {
    let ps = sprite.pixel_size;
    for row in 0..sprite.height {
        for col in 0..sprite.width {
            let value = sprite.data[row * sprite.width + col];
            if let Some(hex) = sprite.color(value) {
                push_quad(
                    out,
                    x + col as f32 * ps,
                    y + row as f32 * ps * y_scale,
                    ps,
                    ps * y_scale,
                    hex_color(hex),
                );
            }
        }
    }
}

fn push_sprite(out: &mut Vec<Vertex>, sprite: &SpriteMap, x: f32, y: f32) {
    push_sprite_scaled(out, sprite, x, y, 1.0);
}

fn push_backdrop(out: &mut Vec<Vertex>, theme: &Theme, distance: f32) {
    let phase = (distance * BACKDROP_PARALLAX) % GAME_WIDTH;
    let col_w = GAME_WIDTH / BACKDROP_COLS as f32;

    // Two copies so the seam is always off-screen
    for copy in 0..2 {
        let base_x = copy as f32 * GAME_WIDTH - phase;
        for i in 0..BACKDROP_COLS {
            let hash = (i + 1).wrapping_mul(2654435761u32);
            let w = 55.0 + ((hash >> 8) % 35) as f32;
            let h = (70.0 + ((hash >> 16) % 90) as f32) * theme.backdrop_height;
            let x = base_x + i as f32 * col_w + ((hash >> 4) % 20) as f32;
            push_quad(out, x, GROUND_Y - h, w, h, theme.backdrop);

            if theme.windows {
                for wy in 0..3 {
                    for wx in 0..2 {
                        if (hash >> (wy * 2 + wx)) & 1 == 1 {
                            push_quad(
                                out,
                                x + 10.0 + wx as f32 * 22.0,
                                GROUND_Y - h + 12.0 + wy as f32 * 26.0,
                                9.0,
                                12.0,
                                colors::WINDOW_LIT,
                            );
                        }
                    }
                }
            }
        }
    }
}

fn push_road(out: &mut Vec<Vertex>, theme: &Theme, distance: f32) {
    push_quad(
        out,
        0.0,
        GROUND_Y,
        GAME_WIDTH,
        GAME_HEIGHT - GROUND_Y,
        theme.ground,
    );

    // Lane markings every 100 units, scrolling at world speed
    let offset = distance % 100.0;
    let mut i = 0;
    loop {
        let x = i as f32 * 100.0 - offset;
        if x > GAME_WIDTH {
            break;
        }
        push_quad(out, x, GROUND_Y + 46.0, 40.0, 6.0, theme.marking);
        i += 1;
    }
}

fn push_player(out: &mut Vec<Vertex>, state: &RunState) {
    // Flicker while invincible: visible half of each 10-tick cycle
    if state.invincibility_ticks > 0 && state.invincibility_ticks % 10 >= 5 {
        return;
    }

    let (idle, run) = sprites::character_sprites(state.config.character);
    let sprite = if state.is_jumping || (state.frame / 8) % 2 == 0 {
        idle
    } else {
        run
    };

    if state.landing_squash_ticks > 0 {
        // Squash toward the feet so the contact point stays put
        let feet = state.player_y + PLAYER_HEIGHT;
        let y = feet - PLAYER_HEIGHT * SQUASH_SCALE;
        push_sprite_scaled(out, sprite, PLAYER_X, y, SQUASH_SCALE);
    } else {
        push_sprite(out, sprite, PLAYER_X, state.player_y);
    }
}

/// Build the frame's triangle list from the current run state
pub fn build_scene(state: &RunState) -> Vec<Vertex> {
    let theme = theme(state.config.level);
    let mut out = Vec::with_capacity(2048);

    push_quad(&mut out, 0.0, 0.0, GAME_WIDTH, GROUND_Y, theme.sky);
    push_backdrop(&mut out, &theme, state.background_distance);
    push_road(&mut out, &theme, state.background_distance);

    for entity in &state.entities {
        push_sprite(&mut out, sprites::sub_sprite(entity.sub), entity.x, entity.y);
    }

    push_player(&mut out, state);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::test_config;

    fn fresh_state() -> RunState {
        RunState::new(test_config(), 42).unwrap()
    }

    #[test]
    fn scene_is_a_nonempty_triangle_list() {
        let scene = build_scene(&fresh_state());
        assert!(!scene.is_empty());
        assert_eq!(scene.len() % 3, 0);
    }

    #[test]
    fn flicker_hides_the_player_mid_cycle() {
        let mut state = fresh_state();
        let visible = build_scene(&state).len();

        state.invincibility_ticks = 7; // 7 % 10 >= 5, hidden half
        let hidden = build_scene(&state).len();
        assert!(hidden < visible);

        state.invincibility_ticks = 3; // visible half
        assert_eq!(build_scene(&state).len(), visible);
    }

    #[test]
    fn backdrop_scrolls_with_distance() {
        let mut state = fresh_state();
        let before = build_scene(&state);
        state.background_distance = 37.0;
        let after = build_scene(&state);
        assert_ne!(
            before.iter().map(|v| v.position).collect::<Vec<_>>(),
            after.iter().map(|v| v.position).collect::<Vec<_>>()
        );
    }

    #[test]
    fn squash_keeps_the_feet_planted() {
        let mut state = fresh_state();
        state.landing_squash_ticks = 4;
        let scene = build_scene(&state);
        let feet = state.player_y + PLAYER_HEIGHT;
        let max_y = scene
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        // The road quad reaches the bottom of the screen; the player must
        // never be drawn below its feet line
        assert!(max_y >= feet);
        let player_max = scene
            .iter()
            .filter(|v| v.position[0] >= PLAYER_X && v.position[0] <= PLAYER_X + 40.0)
            .filter(|v| v.position[1] < GROUND_Y + 0.5)
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!(player_max <= feet + 0.001);
    }
}
