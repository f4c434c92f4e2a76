/// Block id classification tables.
/// Ids are raw bytes straight out of the chunk format; the renderer only
/// cares about one property, whether an id lets the view pass through it.

pub const BLOCK_ID_COUNT: usize = 256;

/// Empty space.
pub const AIR: u8 = 0;

/// Reserved marker written by the cave pre-pass over sky-lit voxels.
/// Opaque and without a sprite, so everything it covers is occluded
/// without drawing anything itself.
pub const HIDDEN: u8 = 21;

/// Ids that do not block the view of their neighbors: air, water, glass,
/// leaves, and the assorted thin decoration blocks.
const TRANSPARENT_IDS: [u8; 31] = [
    0, 8, 9, 18, 20, 37, 38, 39, 40, 50, 51, 52, 53, 59, 63, 64, 65, 66, 67, 68, 69, 70, 71, 72,
    74, 75, 76, 77, 79, 83, 85,
];

// Lookup table for the transparency test - eliminates set probes in hot paths
const BLOCK_IS_TRANSPARENT_LUT: [bool; BLOCK_ID_COUNT] = build_transparent_lut();

const fn build_transparent_lut() -> [bool; BLOCK_ID_COUNT] {
    let mut lut = [false; BLOCK_ID_COUNT];
    let mut i = 0;
    while i < TRANSPARENT_IDS.len() {
        lut[TRANSPARENT_IDS[i] as usize] = true;
        i += 1;
    }
    lut
}

/// Fast lookup-table based transparency check - no branches
#[inline]
pub const fn is_transparent(id: u8) -> bool {
    BLOCK_IS_TRANSPARENT_LUT[id as usize]
}

#[inline]
pub const fn is_opaque(id: u8) -> bool {
    !is_transparent(id)
}
