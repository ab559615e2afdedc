//! Collision helpers
//!
//! Axis-aligned overlap tests between the player box and entities. The
//! boxes are inset so grazing contact feels fair: 10 units off each side
//! of the player, 5 off each side of the entity, and 5/10 off the player's
//! top/bottom edges.

use crate::consts::*;
use crate::sim::state::Entity;
use crate::sprites::{PLAYER_HEIGHT, PLAYER_WIDTH};

/// Horizontal player inset for damage/collect overlap
const PLAYER_INSET_X: f32 = 10.0;
/// Horizontal entity inset for damage/collect overlap
const ENTITY_INSET_X: f32 = 5.0;
/// Vertical insets on the player box (top, bottom)
const PLAYER_INSET_TOP: f32 = 5.0;
const PLAYER_INSET_BOTTOM: f32 = 10.0;
/// Horizontal inset used for platform support
const PLATFORM_INSET_X: f32 = 5.0;

/// Does the (inset) player box overlap the (inset) entity box?
pub fn player_overlaps(player_y: f32, entity: &Entity) -> bool {
    let p_left = PLAYER_X + PLAYER_INSET_X;
    let p_right = PLAYER_X + PLAYER_WIDTH - PLAYER_INSET_X;
    let e_left = entity.x + ENTITY_INSET_X;
    let e_right = entity.x + entity.width - ENTITY_INSET_X;
    if e_right <= p_left || e_left >= p_right {
        return false;
    }

    let p_top = player_y + PLAYER_INSET_TOP;
    let p_bottom = player_y + PLAYER_HEIGHT - PLAYER_INSET_BOTTOM;
    p_bottom > entity.y && p_top < entity.y + entity.height
}

/// Horizontal overlap used for standing on a platform (inset on the
/// platform only, so the player can hang slightly off the edge)
pub fn platform_overlap_x(entity: &Entity) -> bool {
    PLAYER_X + PLAYER_WIDTH > entity.x + PLATFORM_INSET_X
        && PLAYER_X < entity.x + entity.width - PLATFORM_INSET_X
}

/// Can the player, falling through `player_y` with non-negative velocity,
/// land on top of this platform? The foot line must be inside a band
/// around the platform top so fast falls still catch the surface.
pub fn can_land_on(player_y: f32, vel_y: f32, entity: &Entity) -> bool {
    if vel_y < 0.0 {
        return false;
    }
    let feet = player_y + PLAYER_HEIGHT;
    let band_top = entity.y - PLATFORM_BAND_ABOVE;
    let band_bottom = entity.y + PLATFORM_BAND_BELOW;
    feet >= band_top && feet <= band_bottom && platform_overlap_x(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EntityKind, Sub};

    fn bench_at(x: f32, y: f32) -> Entity {
        Entity::new(1, EntityKind::Platform, Sub::Bench, x, y)
    }

    fn trash_at(x: f32) -> Entity {
        let mut e = Entity::new(2, EntityKind::Ground, Sub::TrashCan, x, 0.0);
        e.y = GROUND_Y - e.height;
        e
    }

    #[test]
    fn overlap_requires_real_penetration() {
        let ground_top = GROUND_Y - PLAYER_HEIGHT;
        let entity = trash_at(PLAYER_X);
        assert!(player_overlaps(ground_top, &entity));

        // Just touching edges with the insets applied does not count
        let grazing = trash_at(PLAYER_X + PLAYER_WIDTH - 14.0);
        assert!(!player_overlaps(ground_top, &grazing));
    }

    #[test]
    fn overlap_respects_vertical_insets() {
        let entity = trash_at(PLAYER_X);
        // Player fully above the obstacle
        let above = entity.y - PLAYER_HEIGHT - 1.0;
        assert!(!player_overlaps(above, &entity));
        // Player bottom inset (10) keeps a shallow clip from registering
        let shallow = entity.y - PLAYER_HEIGHT + 9.0;
        assert!(!player_overlaps(shallow, &entity));
        let deep = entity.y - PLAYER_HEIGHT + 12.0;
        assert!(player_overlaps(deep, &entity));
    }

    #[test]
    fn landing_band_accepts_feet_near_platform_top() {
        let platform = bench_at(PLAYER_X, 240.0);
        // Feet right at the top
        assert!(can_land_on(240.0 - PLAYER_HEIGHT, 5.0, &platform));
        // Slightly above, within the 8-unit band
        assert!(can_land_on(240.0 - PLAYER_HEIGHT - 7.0, 5.0, &platform));
        // Slightly sunk in, within the 14-unit band
        assert!(can_land_on(240.0 - PLAYER_HEIGHT + 13.0, 5.0, &platform));
        // Too far above
        assert!(!can_land_on(240.0 - PLAYER_HEIGHT - 20.0, 5.0, &platform));
        // Too far below
        assert!(!can_land_on(240.0 - PLAYER_HEIGHT + 20.0, 5.0, &platform));
    }

    #[test]
    fn rising_player_never_lands() {
        let platform = bench_at(PLAYER_X, 240.0);
        assert!(!can_land_on(240.0 - PLAYER_HEIGHT, -1.0, &platform));
    }

    #[test]
    fn landing_requires_horizontal_overlap() {
        let far_right = bench_at(PLAYER_X + 300.0, 240.0);
        assert!(!can_land_on(240.0 - PLAYER_HEIGHT, 5.0, &far_right));
    }
}
