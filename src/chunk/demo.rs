/// Procedural chunk fixtures.
/// Real chunks come from a `ChunkLoader`; these exist so tests and benches
/// can exercise the renderer without world data on disk.
use noise::{NoiseFn, Perlin};

use crate::chunk::block;
use crate::chunk::grid::{VoxelGrid, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::chunk::skylight::SkylightBuffer;

const STONE: u8 = 1;
const GRASS: u8 = 2;
const DIRT: u8 = 3;
const WATER: u8 = 9;

const SEA_LEVEL: usize = 58;

/// Rolling terrain: stone body, dirt cap, grass surface, water filling the
/// low spots. Deterministic for a given seed.
pub fn terrain(seed: u32) -> VoxelGrid {
    let perlin = Perlin::new(seed);
    let mut grid = VoxelGrid::filled(block::AIR);

    for x in 0..CHUNK_SIZE {
        for y in 0..CHUNK_SIZE {
            let height = sample_height(&perlin, x, y);
            for z in 0..CHUNK_HEIGHT {
                let id = if z > height {
                    if z <= SEA_LEVEL {
                        WATER
                    } else {
                        block::AIR
                    }
                } else if z == height {
                    if height < SEA_LEVEL {
                        DIRT
                    } else {
                        GRASS
                    }
                } else if z + 3 > height {
                    DIRT
                } else {
                    STONE
                };

                if id != block::AIR {
                    grid.set(x, y, z, id);
                }
            }
        }
    }

    grid
}

/// Terrain plus a matching skylight volume: full light straight down each
/// column until the first non-air voxel, darkness below.
pub fn terrain_with_skylight(seed: u32) -> (VoxelGrid, SkylightBuffer) {
    let grid = terrain(seed);
    let mut skylight = SkylightBuffer::filled(0);

    for x in 0..CHUNK_SIZE {
        for y in 0..CHUNK_SIZE {
            for z in (0..CHUNK_HEIGHT).rev() {
                if grid.get(x, y, z) != block::AIR {
                    break;
                }
                skylight.set(x, y, z, 15);
            }
        }
    }

    (grid, skylight)
}

/// Fully uniform grid (for visibility and boundary tests).
pub fn solid(id: u8) -> VoxelGrid {
    VoxelGrid::filled(id)
}

#[inline]
fn sample_height(perlin: &Perlin, x: usize, y: usize) -> usize {
    let scale = 0.07;
    let noise_value = perlin.get([x as f64 * scale, y as f64 * scale]);
    (60.0 + noise_value * 12.0) as usize
}
