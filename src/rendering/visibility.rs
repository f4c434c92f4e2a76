/// Per-voxel occlusion tests.
/// The renderer walks every voxel of the grid; these predicates decide which
/// ones can be skipped because the three faces the camera sees (top, south,
/// west) are fully covered by opaque neighbors. Neighbor chunks are never
/// consulted, so chunk-boundary voxels on those faces always draw.
use crate::chunk::{block, VoxelGrid, CHUNK_HEIGHT, CHUNK_SIZE};

use super::RenderMode;

const TOP_Z: usize = CHUNK_HEIGHT - 1;
const SOUTH_Y: usize = CHUNK_SIZE - 1;

/// Returns true if the voxel at (x, y, z) would be invisible and can be
/// skipped entirely.
#[inline]
pub fn is_occluded(blocks: &VoxelGrid, x: usize, y: usize, z: usize, mode: RenderMode) -> bool {
    match mode {
        RenderMode::Normal => occluded_normal(blocks, x, y, z),
        RenderMode::Cave => occluded_cave(blocks, x, y, z),
    }
}

/// Normal mode: hidden iff the -x, +y and +z neighbors are all opaque.
#[inline]
fn occluded_normal(blocks: &VoxelGrid, x: usize, y: usize, z: usize) -> bool {
    if x == 0 || y == SOUTH_Y || z == TOP_Z {
        return false;
    }
    block::is_opaque(blocks.get(x - 1, y, z))
        && block::is_opaque(blocks.get(x, y + 1, z))
        && block::is_opaque(blocks.get(x, y, z + 1))
}

/// Cave mode: boundary voxels get face-specific rules so the chunk walls do
/// not render as solid sheets over the tunnels behind them. The missing
/// neighbor above the top layer counts as open sky.
#[inline]
fn occluded_cave(blocks: &VoxelGrid, x: usize, y: usize, z: usize) -> bool {
    if x == 0 && y != SOUTH_Y && z != TOP_Z {
        block::is_opaque(blocks.get(x, y + 1, z)) && block::is_opaque(blocks.get(x, y, z + 1))
    } else if y == SOUTH_Y && x != 0 && z != TOP_Z {
        block::is_opaque(blocks.get(x - 1, y, z)) && block::is_opaque(blocks.get(x, y, z + 1))
    } else if y == SOUTH_Y && x == 0 {
        z != TOP_Z && block::is_opaque(blocks.get(x, y, z + 1))
    } else {
        occluded_normal(blocks, x, y, z)
    }
}
