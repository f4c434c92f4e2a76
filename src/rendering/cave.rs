/// Cave pre-pass: hide everything under open sky.
use crate::chunk::{block, SkylightBuffer, VoxelGrid, CHUNK_VOLUME};

/// Returns a copy of `blocks` with every sky-lit voxel replaced by the
/// opaque hidden marker. The marker has no sprite, so lit surface terrain
/// occludes whatever sits behind it without drawing anything itself, and
/// only unlit underground spaces remain on the tile.
pub fn apply_cave_mask(blocks: &VoxelGrid, skylight: &SkylightBuffer) -> VoxelGrid {
    let light = skylight.expand();
    let mut masked = blocks.clone();

    for i in 0..CHUNK_VOLUME {
        if light[i] != 0 {
            masked.set_index(i, block::HIDDEN);
        }
    }

    masked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::coords_to_index;

    #[test]
    fn lit_voxels_become_the_hidden_marker() {
        let grid = VoxelGrid::filled(1);
        let mut skylight = SkylightBuffer::filled(0);
        skylight.set(2, 3, 40, 1);
        skylight.set(2, 3, 41, 15);

        let masked = apply_cave_mask(&grid, &skylight);
        assert_eq!(masked.get(2, 3, 40), block::HIDDEN);
        assert_eq!(masked.get(2, 3, 41), block::HIDDEN);
        assert_eq!(masked.get(2, 3, 42), 1, "dark voxels keep their id");
    }

    #[test]
    fn any_nonzero_level_counts_as_lit() {
        let grid = VoxelGrid::filled(1);
        let mut skylight = SkylightBuffer::filled(0);
        for (z, level) in [(10usize, 1u8), (11, 7), (12, 15)] {
            skylight.set(0, 0, z, level);
        }

        let masked = apply_cave_mask(&grid, &skylight);
        for z in 10..=12 {
            assert_eq!(masked.get(0, 0, z), block::HIDDEN, "z={z}");
        }
    }

    #[test]
    fn source_grid_is_never_mutated() {
        let grid = VoxelGrid::filled(1);
        let skylight = SkylightBuffer::filled(15);

        let masked = apply_cave_mask(&grid, &skylight);
        assert_eq!(masked.get_index(coords_to_index(8, 8, 8)), block::HIDDEN);
        assert!(
            grid.as_bytes().iter().all(|&id| id == 1),
            "masking must operate on a copy"
        );
    }
}
