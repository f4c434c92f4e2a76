/// Block sprite artwork.
/// A sprite is a 24x24 RGB color layer plus an 8-bit coverage mask; the
/// compositor pastes through the mask so partially transparent artwork
/// (water, glass, ice) keeps its translucency on the tile.
///
/// The built-in set is generated procedurally: an isometric cube with
/// per-face shading and a small deterministic dither, one per classic block
/// id. Production texture packs replace it through `SpriteTable::insert`.
use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::chunk::block;

use super::projection::SPRITE_SIZE;

pub struct Sprite {
    pub color: RgbImage,
    pub mask: GrayImage,
}

impl Sprite {
    pub fn new(color: RgbImage, mask: GrayImage) -> Self {
        debug_assert_eq!(color.dimensions(), (SPRITE_SIZE, SPRITE_SIZE));
        debug_assert_eq!(mask.dimensions(), (SPRITE_SIZE, SPRITE_SIZE));
        Self { color, mask }
    }
}

/// 256-slot sprite registry indexed by block id. Ids without an entry,
/// air and the hidden marker included, simply draw nothing.
pub struct SpriteTable {
    sprites: Vec<Option<Sprite>>,
}

impl SpriteTable {
    pub fn empty() -> Self {
        Self {
            sprites: (0..block::BLOCK_ID_COUNT).map(|_| None).collect(),
        }
    }

    /// The procedural cube sprite set.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for &(id, base) in BASE_COLORS {
            let alpha = if block::is_transparent(id) {
                TRANSLUCENT_ALPHA
            } else {
                0xFF
            };
            let seed = (id as u32).wrapping_mul(1103515245).wrapping_add(12345);
            table.insert(id, cube_sprite(base, alpha, seed));
        }
        table
    }

    pub fn insert(&mut self, id: u8, sprite: Sprite) {
        self.sprites[id as usize] = Some(sprite);
    }

    #[inline]
    pub fn get(&self, id: u8) -> Option<&Sprite> {
        self.sprites[id as usize].as_ref()
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Mask level for see-through blocks in the built-in set.
const TRANSLUCENT_ALPHA: u8 = 176;

/// Base colors for the block ids the classic chunk format uses. Id 21 is
/// deliberately absent; it is reserved as the cave-mode hidden marker.
const BASE_COLORS: &[(u8, [u8; 3])] = &[
    (1, [125, 125, 125]),  // stone
    (2, [117, 176, 73]),   // grass
    (3, [134, 96, 67]),    // dirt
    (4, [115, 115, 115]),  // cobblestone
    (5, [157, 128, 79]),   // planks
    (6, [57, 90, 36]),     // sapling
    (7, [84, 84, 84]),     // bedrock
    (8, [38, 92, 255]),    // flowing water
    (9, [38, 92, 255]),    // still water
    (10, [255, 90, 0]),    // flowing lava
    (11, [255, 90, 0]),    // still lava
    (12, [218, 210, 158]), // sand
    (13, [136, 126, 126]), // gravel
    (14, [143, 140, 125]), // gold ore
    (15, [136, 130, 127]), // iron ore
    (16, [115, 115, 115]), // coal ore
    (17, [102, 81, 50]),   // log
    (18, [58, 95, 32]),    // leaves
    (19, [193, 193, 57]),  // sponge
    (20, [222, 239, 241]), // glass
    (22, [29, 71, 165]),   // lapis block
    (23, [107, 107, 107]), // dispenser
    (24, [218, 210, 158]), // sandstone
    (25, [100, 67, 50]),   // note block
    (35, [222, 222, 222]), // wool
    (37, [255, 236, 79]),  // dandelion
    (38, [214, 40, 40]),   // rose
    (39, [145, 109, 85]),  // brown mushroom
    (40, [226, 18, 18]),   // red mushroom
    (41, [231, 165, 45]),  // gold block
    (42, [191, 191, 191]), // iron block
    (43, [200, 200, 200]), // double slab
    (44, [200, 200, 200]), // slab
    (45, [170, 86, 62]),   // brick
    (46, [219, 68, 26]),   // tnt
    (47, [157, 128, 79]),  // bookshelf
    (48, [90, 108, 90]),   // mossy cobblestone
    (49, [20, 18, 29]),    // obsidian
    (50, [255, 215, 0]),   // torch
    (51, [255, 170, 30]),  // fire
    (52, [27, 42, 52]),    // monster spawner
    (53, [157, 128, 79]),  // wooden stairs
    (54, [125, 91, 38]),   // chest
    (56, [129, 140, 143]), // diamond ore
    (57, [69, 218, 203]),  // diamond block
    (58, [123, 79, 25]),   // crafting table
    (59, [146, 192, 0]),   // crops
    (60, [134, 96, 67]),   // farmland
    (61, [107, 107, 107]), // furnace
    (62, [107, 107, 107]), // lit furnace
    (63, [157, 128, 79]),  // sign post
    (64, [148, 115, 71]),  // wooden door
    (65, [157, 128, 79]),  // ladder
    (66, [140, 134, 72]),  // rails
    (67, [115, 115, 115]), // cobblestone stairs
    (71, [191, 191, 191]), // iron door
    (73, [133, 107, 107]), // redstone ore
    (74, [133, 107, 107]), // lit redstone ore
    (75, [181, 100, 44]),  // redstone torch (off)
    (76, [255, 60, 60]),   // redstone torch (on)
    (78, [240, 251, 251]), // snow layer
    (79, [125, 173, 255]), // ice
    (80, [240, 251, 251]), // snow block
    (81, [11, 99, 23]),    // cactus
    (82, [158, 164, 176]), // clay
    (83, [130, 168, 89]),  // sugar cane
    (85, [157, 128, 79]),  // fence
    (86, [192, 118, 21]),  // pumpkin
    (87, [110, 53, 51]),   // netherrack
    (88, [84, 64, 51]),    // soul sand
    (89, [137, 112, 64]),  // glowstone
    (91, [192, 118, 21]),  // jack-o-lantern
];

#[derive(Copy, Clone, PartialEq)]
enum Face {
    Top,
    Left,
    Right,
}

/// Which cube face (if any) covers the sprite pixel at (x, y).
/// The top rhombus spans rows 0..=12; the side faces hang 12 rows below
/// its lower edges, meeting in the bottom vertex at (12, 24).
fn face_at(x: i32, y: i32) -> Option<Face> {
    if (x - 12).abs() + 2 * (y - 6).abs() <= 12 {
        return Some(Face::Top);
    }

    // Mirrored distance from the outer edge, 1..=12.
    let xm = if x < 12 { x + 1 } else { 24 - x };
    if y >= 6 + xm / 2 && y < 18 + xm / 2 {
        if x < 12 {
            Some(Face::Left)
        } else {
            Some(Face::Right)
        }
    } else {
        None
    }
}

fn cube_sprite(base: [u8; 3], alpha: u8, seed: u32) -> Sprite {
    let mut color = RgbImage::new(SPRITE_SIZE, SPRITE_SIZE);
    let mut mask = GrayImage::new(SPRITE_SIZE, SPRITE_SIZE);

    // Simple pseudo-random dither stream
    let mut state = seed;

    for y in 0..SPRITE_SIZE {
        for x in 0..SPRITE_SIZE {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);

            let face = match face_at(x as i32, y as i32) {
                Some(face) => face,
                None => continue,
            };

            // Fixed-point 8.8 light per face: full on top, dimmer on the
            // south and west walls.
            let light: u32 = match face {
                Face::Top => 256,
                Face::Left => 205,
                Face::Right => 154,
            };

            let dither = ((state >> 16) & 0x1F) as i32 - 16;
            color.put_pixel(x, y, Rgb(shade(base, light, dither)));
            mask.put_pixel(x, y, Luma([alpha]));
        }
    }

    Sprite::new(color, mask)
}

#[inline]
fn shade(base: [u8; 3], light: u32, dither: i32) -> [u8; 3] {
    let mut out = [0u8; 3];
    for c in 0..3 {
        let lit = ((base[c] as u32 * light) >> 8) as i32 + dither;
        out[c] = lit.clamp(0, 255) as u8;
    }
    out
}
