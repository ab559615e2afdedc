//! Palette-indexed pixel art catalog
//!
//! Every drawable thing in the game is a small grid of palette indices
//! (0 = transparent, 1.. = palette entries) scaled up by `pixel_size`.
//! The scaled footprint of a sprite doubles as its collision box.

use crate::sim::state::{Character, Sub};

/// A pixel-art bitmap with its palette and scale
#[derive(Debug, Clone, Copy)]
pub struct SpriteMap {
    /// Size of one sprite pixel in world units
    pub pixel_size: f32,
    /// Grid width in sprite pixels
    pub width: usize,
    /// Grid height in sprite pixels
    pub height: usize,
    /// 0xRRGGBB colors; index N in `data` maps to `palette[N - 1]`
    pub palette: &'static [u32],
    /// Row-major palette indices, `width * height` entries
    pub data: &'static [u8],
}

impl SpriteMap {
    /// Footprint width in world units
    pub fn px_width(&self) -> f32 {
        self.width as f32 * self.pixel_size
    }

    /// Footprint height in world units
    pub fn px_height(&self) -> f32 {
        self.height as f32 * self.pixel_size
    }

    /// Palette color for a data value, None for transparent/out-of-range
    pub fn color(&self, value: u8) -> Option<u32> {
        if value == 0 {
            return None;
        }
        self.palette.get(value as usize - 1).copied()
    }
}

/// Idle and running frames for a playable character
pub fn character_sprites(character: Character) -> (&'static SpriteMap, &'static SpriteMap) {
    match character {
        Character::Dog => (&DOG, &DOG_RUN),
        Character::Cat => (&CAT, &CAT_RUN),
        Character::Rabbit => (&RABBIT, &RABBIT_RUN),
    }
}

/// Sprite for a spawned entity sub-kind
pub fn sub_sprite(sub: Sub) -> &'static SpriteMap {
    match sub {
        Sub::Pigeon => &PIGEON,
        Sub::Crow => &CROW,
        Sub::Seagull => &SEAGULL,
        Sub::TrashCan => &TRASH_CAN,
        Sub::HayBale => &HAY_BALE,
        Sub::Sandcastle => &SANDCASTLE,
        Sub::Car => &CAR,
        Sub::Moped => &MOPED,
        Sub::Tractor => &TRACTOR,
        Sub::Buggy => &BUGGY,
        Sub::Bench => &BENCH,
        Sub::Crate => &CRATE,
        Sub::Bush => &BUSH,
        Sub::Bone => &BONE,
        Sub::Biscuit => &BISCUIT,
        Sub::Heart => &HEART,
        Sub::House => &HOUSE,
    }
}

// --- Characters (10x8 at 4px -> 40x32 world units) ---

pub const DOG: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 10,
    height: 8,
    palette: &[0xD97706, 0x92400E, 0x000000],
    data: &[
        0, 0, 0, 0, 0, 1, 1, 1, 0, 0, //
        0, 0, 0, 0, 1, 1, 1, 3, 1, 0, //
        0, 0, 0, 1, 1, 1, 1, 1, 1, 1, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
        1, 1, 1, 1, 1, 1, 1, 0, 0, 0, //
        0, 1, 0, 0, 0, 0, 0, 1, 0, 0, //
        0, 1, 0, 0, 0, 0, 0, 1, 0, 0, //
    ],
};

pub const DOG_RUN: SpriteMap = SpriteMap {
    data: &[
        0, 0, 0, 0, 0, 1, 1, 1, 0, 0, //
        0, 0, 0, 0, 1, 1, 1, 3, 1, 0, //
        0, 0, 0, 1, 1, 1, 1, 1, 1, 1, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
        1, 1, 1, 1, 1, 1, 1, 0, 0, 0, //
        1, 0, 0, 0, 0, 0, 0, 0, 1, 0, //
        1, 0, 0, 0, 0, 0, 0, 0, 1, 0, //
    ],
    ..DOG
};

pub const CAT: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 10,
    height: 8,
    palette: &[0xF97316, 0xC2410C, 0x000000],
    data: &[
        0, 0, 0, 0, 0, 1, 0, 1, 0, 0, //
        0, 0, 0, 0, 1, 1, 1, 1, 1, 0, //
        0, 0, 0, 1, 1, 1, 3, 1, 3, 0, //
        0, 0, 1, 1, 1, 1, 1, 1, 1, 0, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 0, //
        1, 1, 1, 1, 1, 1, 1, 0, 0, 0, //
        0, 1, 0, 0, 0, 0, 0, 1, 0, 0, //
        0, 1, 0, 0, 0, 0, 0, 1, 0, 0, //
    ],
};

pub const CAT_RUN: SpriteMap = SpriteMap {
    data: &[
        0, 0, 0, 0, 0, 1, 0, 1, 0, 0, //
        0, 0, 0, 0, 1, 1, 1, 1, 1, 0, //
        0, 0, 0, 1, 1, 1, 3, 1, 3, 0, //
        0, 0, 1, 1, 1, 1, 1, 1, 1, 0, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 0, //
        1, 1, 1, 1, 1, 1, 1, 0, 0, 0, //
        1, 0, 0, 0, 0, 0, 0, 0, 1, 0, //
        1, 0, 0, 0, 0, 0, 0, 0, 1, 0, //
    ],
    ..CAT
};

pub const RABBIT: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 10,
    height: 8,
    palette: &[0xE5E7EB, 0xF9A8D4, 0x000000],
    data: &[
        0, 0, 0, 0, 0, 1, 0, 1, 0, 0, //
        0, 0, 0, 0, 0, 2, 0, 2, 0, 0, //
        0, 0, 0, 0, 1, 1, 1, 1, 1, 0, //
        0, 0, 1, 1, 1, 1, 3, 1, 1, 0, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 0, //
        2, 1, 1, 1, 1, 1, 1, 0, 0, 0, //
        0, 1, 0, 0, 0, 0, 0, 1, 0, 0, //
        0, 1, 0, 0, 0, 0, 0, 1, 0, 0, //
    ],
};

pub const RABBIT_RUN: SpriteMap = SpriteMap {
    data: &[
        0, 0, 0, 0, 0, 1, 0, 1, 0, 0, //
        0, 0, 0, 0, 0, 2, 0, 2, 0, 0, //
        0, 0, 0, 0, 1, 1, 1, 1, 1, 0, //
        0, 0, 1, 1, 1, 1, 3, 1, 1, 0, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 0, //
        2, 1, 1, 1, 1, 1, 1, 0, 0, 0, //
        1, 0, 0, 0, 0, 0, 0, 0, 1, 0, //
        1, 0, 0, 0, 0, 0, 0, 0, 1, 0, //
    ],
    ..RABBIT
};

// --- Airborne hazards (shared silhouette, themed palettes) ---

const BIRD_DATA: &[u8] = &[
    0, 0, 0, 0, 0, 1, 1, 1, 0, 0, //
    0, 0, 0, 0, 1, 2, 3, 3, 0, 0, //
    1, 1, 1, 1, 1, 1, 1, 0, 0, 0, //
    0, 1, 1, 1, 1, 1, 0, 0, 0, 0, //
    0, 0, 1, 0, 0, 1, 0, 0, 0, 0, //
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, //
];

pub const PIGEON: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 10,
    height: 6,
    palette: &[0x9CA3AF, 0xFFFFFF, 0xFCD34D],
    data: BIRD_DATA,
};

pub const CROW: SpriteMap = SpriteMap {
    palette: &[0x1F2937, 0x374151, 0xFBBF24],
    ..PIGEON
};

pub const SEAGULL: SpriteMap = SpriteMap {
    palette: &[0xF3F4F6, 0xD1D5DB, 0xF97316],
    ..PIGEON
};

// --- Ground obstacles ---

pub const TRASH_CAN: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 8,
    height: 8,
    palette: &[0x4B5563, 0x10B981, 0x1F2937],
    data: &[
        0, 1, 1, 1, 1, 1, 0, 0, //
        1, 1, 3, 3, 3, 1, 1, 0, //
        1, 2, 2, 2, 2, 2, 1, 0, //
        1, 2, 1, 2, 1, 2, 1, 0, //
        1, 2, 1, 2, 1, 2, 1, 0, //
        1, 2, 1, 2, 1, 2, 1, 0, //
        1, 2, 1, 2, 1, 2, 1, 0, //
        1, 1, 1, 1, 1, 1, 1, 0, //
    ],
};

pub const HAY_BALE: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 10,
    height: 8,
    palette: &[0xEAB308, 0xA16207, 0xFDE047],
    data: &[
        0, 1, 1, 1, 1, 1, 1, 1, 1, 0, //
        1, 1, 3, 1, 1, 3, 1, 1, 1, 1, //
        1, 2, 2, 2, 2, 2, 2, 2, 2, 1, //
        1, 1, 1, 3, 1, 1, 1, 3, 1, 1, //
        1, 2, 2, 2, 2, 2, 2, 2, 2, 1, //
        1, 1, 3, 1, 1, 3, 1, 1, 1, 1, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
        0, 1, 1, 1, 1, 1, 1, 1, 1, 0, //
    ],
};

pub const SANDCASTLE: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 10,
    height: 8,
    palette: &[0xFBBF24, 0xD97706, 0xFEF3C7],
    data: &[
        0, 1, 0, 0, 1, 1, 0, 0, 1, 0, //
        0, 1, 1, 1, 1, 1, 1, 1, 1, 0, //
        0, 1, 3, 1, 1, 1, 1, 3, 1, 0, //
        0, 1, 1, 1, 1, 1, 1, 1, 1, 0, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
        1, 1, 1, 2, 2, 2, 1, 1, 1, 1, //
        1, 1, 1, 2, 2, 2, 1, 1, 1, 1, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
    ],
};

// --- Vehicles ---

pub const CAR: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 16,
    height: 8,
    palette: &[0xDC2626, 0x93C5FD, 0x1F2937],
    data: &[
        0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, //
        0, 0, 0, 1, 2, 2, 1, 2, 2, 1, 1, 0, 0, 0, 0, 0, //
        0, 0, 1, 1, 2, 2, 1, 2, 2, 1, 1, 1, 0, 0, 0, 0, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
        0, 0, 3, 3, 0, 0, 0, 0, 0, 0, 0, 3, 3, 0, 0, 0, //
        0, 0, 3, 3, 0, 0, 0, 0, 0, 0, 0, 3, 3, 0, 0, 0, //
    ],
};

pub const MOPED: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 12,
    height: 8,
    palette: &[0x3B82F6, 0x1F2937, 0xF3F4F6],
    data: &[
        0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, //
        0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, //
        0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, //
        0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, //
        0, 0, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, //
        0, 2, 2, 0, 0, 0, 2, 2, 0, 0, 0, 0, //
        2, 2, 2, 2, 0, 2, 2, 2, 2, 0, 0, 0, //
        0, 2, 2, 0, 0, 0, 2, 2, 0, 0, 0, 0, //
    ],
};

pub const TRACTOR: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 14,
    height: 10,
    palette: &[0x16A34A, 0x1F2937, 0xFBBF24],
    data: &[
        0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, //
        0, 0, 0, 0, 0, 0, 0, 1, 3, 3, 1, 0, 0, 0, //
        0, 1, 1, 1, 1, 1, 1, 1, 3, 3, 1, 0, 0, 0, //
        0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, //
        0, 2, 2, 2, 0, 0, 0, 0, 0, 2, 2, 2, 0, 0, //
        2, 2, 2, 2, 2, 0, 0, 0, 2, 2, 2, 2, 2, 0, //
        2, 2, 2, 2, 2, 0, 0, 0, 2, 2, 2, 2, 2, 0, //
        0, 2, 2, 2, 0, 0, 0, 0, 0, 2, 2, 2, 0, 0, //
    ],
};

pub const BUGGY: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 14,
    height: 8,
    palette: &[0xF59E0B, 0x1F2937, 0x93C5FD],
    data: &[
        0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, //
        0, 0, 1, 3, 3, 1, 3, 3, 1, 1, 0, 0, 0, 0, //
        0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
        0, 2, 2, 0, 0, 0, 0, 0, 0, 0, 2, 2, 0, 0, //
        2, 2, 2, 2, 0, 0, 0, 0, 0, 2, 2, 2, 2, 0, //
        0, 2, 2, 0, 0, 0, 0, 0, 0, 0, 2, 2, 0, 0, //
    ],
};

// --- Platforms ---

pub const BENCH: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 14,
    height: 5,
    palette: &[0x92400E, 0x78350F],
    data: &[
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
        2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, //
        0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, //
        0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, //
        0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, //
    ],
};

pub const CRATE: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 10,
    height: 8,
    palette: &[0xB45309, 0x78350F],
    data: &[
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
        1, 2, 2, 2, 2, 2, 2, 2, 2, 1, //
        1, 2, 1, 2, 2, 2, 2, 1, 2, 1, //
        1, 2, 2, 1, 2, 2, 1, 2, 2, 1, //
        1, 2, 2, 2, 1, 1, 2, 2, 2, 1, //
        1, 2, 2, 1, 2, 2, 1, 2, 2, 1, //
        1, 2, 1, 2, 2, 2, 2, 1, 2, 1, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
    ],
};

pub const BUSH: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 12,
    height: 6,
    palette: &[0x16A34A, 0x15803D, 0xF472B6],
    data: &[
        0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, //
        0, 1, 1, 3, 1, 1, 1, 1, 3, 1, 1, 0, //
        1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, //
        1, 1, 2, 1, 1, 1, 1, 2, 1, 1, 1, 1, //
        1, 1, 1, 1, 2, 1, 1, 1, 1, 2, 1, 1, //
        0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, //
    ],
};

// --- Collectibles ---

pub const BONE: SpriteMap = SpriteMap {
    pixel_size: 3.0,
    width: 8,
    height: 4,
    palette: &[0xFEF3C7, 0xD6D3D1],
    data: &[
        1, 1, 0, 0, 0, 0, 1, 1, //
        1, 1, 2, 2, 2, 2, 1, 1, //
        1, 1, 2, 2, 2, 2, 1, 1, //
        1, 1, 0, 0, 0, 0, 1, 1, //
    ],
};

pub const BISCUIT: SpriteMap = SpriteMap {
    pixel_size: 3.0,
    width: 6,
    height: 6,
    palette: &[0xD97706, 0x92400E],
    data: &[
        0, 1, 1, 1, 1, 0, //
        1, 1, 2, 2, 1, 1, //
        1, 2, 1, 1, 2, 1, //
        1, 2, 1, 1, 2, 1, //
        1, 1, 2, 2, 1, 1, //
        0, 1, 1, 1, 1, 0, //
    ],
};

pub const HEART: SpriteMap = SpriteMap {
    pixel_size: 4.0,
    width: 7,
    height: 6,
    palette: &[0xEF4444, 0xFCA5A5],
    data: &[
        0, 1, 1, 0, 1, 1, 0, //
        1, 2, 1, 1, 1, 1, 1, //
        1, 1, 1, 1, 1, 1, 1, //
        0, 1, 1, 1, 1, 1, 0, //
        0, 0, 1, 1, 1, 0, 0, //
        0, 0, 0, 1, 0, 0, 0, //
    ],
};

// --- Goal ---

pub const HOUSE: SpriteMap = SpriteMap {
    pixel_size: 5.0,
    width: 16,
    height: 16,
    palette: &[0xDC2626, 0xFEF3C7, 0x4B5563, 0x7C2D12],
    data: &[
        0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, //
        0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, //
        0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, //
        0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, //
        0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, //
        0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, //
        0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
        0, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 0, //
        0, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 0, //
        0, 2, 2, 2, 4, 4, 4, 4, 4, 4, 4, 2, 2, 2, 2, 0, //
        0, 2, 2, 2, 4, 4, 4, 4, 4, 4, 4, 2, 2, 2, 2, 0, //
        0, 2, 2, 2, 4, 4, 4, 4, 4, 4, 4, 2, 2, 2, 2, 0, //
        0, 2, 2, 2, 4, 4, 4, 4, 4, 4, 4, 2, 2, 2, 2, 0, //
        0, 2, 2, 2, 4, 4, 4, 4, 4, 4, 4, 2, 2, 2, 2, 0, //
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, //
    ],
};

/// Player collision box (all character sprites share one footprint)
pub const PLAYER_WIDTH: f32 = 40.0;
pub const PLAYER_HEIGHT: f32 = 32.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grids_match_declared_dimensions() {
        let all = [
            &DOG, &DOG_RUN, &CAT, &CAT_RUN, &RABBIT, &RABBIT_RUN, &PIGEON, &CROW, &SEAGULL,
            &TRASH_CAN, &HAY_BALE, &SANDCASTLE, &CAR, &MOPED, &TRACTOR, &BUGGY, &BENCH, &CRATE,
            &BUSH, &BONE, &BISCUIT, &HEART, &HOUSE,
        ];
        for sprite in all {
            assert_eq!(
                sprite.data.len(),
                sprite.width * sprite.height,
                "sprite grid size mismatch"
            );
            for &v in sprite.data {
                assert!(
                    v as usize <= sprite.palette.len(),
                    "palette index {v} out of range"
                );
            }
        }
    }

    #[test]
    fn player_footprint_matches_character_sprites() {
        for character in [Character::Dog, Character::Cat, Character::Rabbit] {
            let (idle, run) = character_sprites(character);
            assert_eq!(idle.px_width(), PLAYER_WIDTH);
            assert_eq!(idle.px_height(), PLAYER_HEIGHT);
            assert_eq!(run.px_width(), PLAYER_WIDTH);
            assert_eq!(run.px_height(), PLAYER_HEIGHT);
        }
    }
}
