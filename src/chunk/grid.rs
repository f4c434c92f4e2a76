/// Chunk block storage.
/// A chunk has a 16x16 footprint and is 128 voxels tall. Blocks are stored
/// x-major with z contiguous, so a whole vertical column is one memory run.
use crate::error::TileError;

pub const CHUNK_SIZE: usize = 16;
pub const CHUNK_HEIGHT: usize = 128;
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_HEIGHT;

/// Dense block id array for one chunk.
/// Boxed to keep the owning structs small on the stack.
#[derive(Clone)]
pub struct VoxelGrid {
    blocks: Box<[u8; CHUNK_VOLUME]>,
}

impl VoxelGrid {
    /// Grid with every voxel set to the same id.
    pub fn filled(id: u8) -> Self {
        Self {
            blocks: Box::new([id; CHUNK_VOLUME]),
        }
    }

    /// Build a grid from raw chunk bytes. The only way to get foreign data
    /// in, so every grid in the system has the right length.
    pub fn from_raw(bytes: &[u8]) -> Result<Self, TileError> {
        if bytes.len() != CHUNK_VOLUME {
            return Err(TileError::BadLength {
                what: "block data",
                expected: CHUNK_VOLUME,
                actual: bytes.len(),
            });
        }

        let mut blocks = Box::new([0u8; CHUNK_VOLUME]);
        blocks.copy_from_slice(bytes);
        Ok(Self { blocks })
    }

    /// Get block id at local coordinates (0..CHUNK_SIZE, 0..CHUNK_HEIGHT)
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> u8 {
        debug_assert!(x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_HEIGHT);
        self.blocks[coords_to_index(x, y, z)]
    }

    /// Get block id at a linear index
    #[inline]
    pub fn get_index(&self, index: usize) -> u8 {
        debug_assert!(index < CHUNK_VOLUME);
        self.blocks[index]
    }

    /// Set block id at local coordinates
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, id: u8) {
        debug_assert!(x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_HEIGHT);
        self.blocks[coords_to_index(x, y, z)] = id;
    }

    /// Set block id at a linear index
    #[inline]
    pub fn set_index(&mut self, index: usize, id: u8) {
        debug_assert!(index < CHUNK_VOLUME);
        self.blocks[index] = id;
    }

    /// The raw block bytes in storage order. This is what gets hashed for
    /// cache identity.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.blocks[..]
    }
}

/// Convert 3D coordinates to linear index
#[inline]
pub const fn coords_to_index(x: usize, y: usize, z: usize) -> usize {
    (x * CHUNK_SIZE + y) * CHUNK_HEIGHT + z
}

/// Convert linear index to 3D coordinates
#[inline]
pub const fn index_to_coords(index: usize) -> (usize, usize, usize) {
    let z = index % CHUNK_HEIGHT;
    let column = index / CHUNK_HEIGHT;
    let y = column % CHUNK_SIZE;
    let x = column / CHUNK_SIZE;
    (x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        for index in [0, 1, 127, 128, 2047, 2048, CHUNK_VOLUME - 1] {
            let (x, y, z) = index_to_coords(index);
            assert_eq!(coords_to_index(x, y, z), index);
        }
    }

    #[test]
    fn layout_is_x_major_z_contiguous() {
        assert_eq!(coords_to_index(0, 0, 0), 0);
        assert_eq!(coords_to_index(0, 0, 1), 1);
        assert_eq!(coords_to_index(0, 1, 0), CHUNK_HEIGHT);
        assert_eq!(coords_to_index(1, 0, 0), CHUNK_SIZE * CHUNK_HEIGHT);
    }

    #[test]
    fn from_raw_validates_length() {
        let short = vec![0u8; CHUNK_VOLUME - 1];
        match VoxelGrid::from_raw(&short) {
            Err(TileError::BadLength {
                expected, actual, ..
            }) => {
                assert_eq!(expected, CHUNK_VOLUME);
                assert_eq!(actual, CHUNK_VOLUME - 1);
            }
            other => panic!("expected BadLength, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn from_raw_preserves_byte_order() {
        let mut bytes = vec![0u8; CHUNK_VOLUME];
        bytes[coords_to_index(3, 7, 42)] = 9;
        let grid = VoxelGrid::from_raw(&bytes).unwrap();
        assert_eq!(grid.get(3, 7, 42), 9);
        assert_eq!(grid.as_bytes(), &bytes[..]);
    }

    #[test]
    fn clone_is_independent() {
        let mut original = VoxelGrid::filled(1);
        let copy = original.clone();
        original.set(0, 0, 0, 7);
        assert_eq!(copy.get(0, 0, 0), 1);
    }
}
