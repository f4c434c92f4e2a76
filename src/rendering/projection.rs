/// Isometric projection of chunk-local voxel coordinates onto the tile.
///
/// Every voxel renders as a 24x24 sprite. Stepping one voxel along +x moves
/// the sprite 12 px right and 6 px up; +y moves 12 px right and 6 px down;
/// +z moves 12 px straight up. A full 16x16x128 chunk therefore projects
/// into a fixed 384x1728 tile.
use glam::IVec2;

use crate::chunk::{CHUNK_HEIGHT, CHUNK_SIZE};

/// Side length of a voxel sprite in pixels.
pub const SPRITE_SIZE: u32 = 24;

/// Screen-space deltas per voxel step along each grid axis.
pub const X_STEP: IVec2 = IVec2::new(12, -6);
pub const Y_STEP: IVec2 = IVec2::new(12, 6);
pub const Z_STEP: IVec2 = IVec2::new(0, -12);

pub const TILE_WIDTH: u32 = CHUNK_SIZE as u32 * SPRITE_SIZE;
pub const TILE_HEIGHT: u32 = (CHUNK_HEIGHT as u32 + CHUNK_SIZE as u32) * (SPRITE_SIZE / 2);

/// Anchor of the (0, 0, 0) voxel: bottom of the column at the left edge.
const ORIGIN: IVec2 = IVec2::new(
    0,
    CHUNK_HEIGHT as i32 * 12 + CHUNK_SIZE as i32 * 6,
);

/// Top-left corner of the sprite for the voxel at chunk-local (x, y, z),
/// relative to the tile origin shifted by `offset`.
#[inline]
pub fn project(x: usize, y: usize, z: usize, offset: IVec2) -> IVec2 {
    debug_assert!(x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_HEIGHT);
    offset + ORIGIN + X_STEP * x as i32 + Y_STEP * y as i32 + Z_STEP * z as i32
}
