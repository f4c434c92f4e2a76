/// Packed skylight storage.
/// The chunk format stores skylight at half a byte per voxel: each byte
/// covers two vertically adjacent cells, even z in the low nibble and odd z
/// in the high nibble.
use crate::chunk::grid::{CHUNK_HEIGHT, CHUNK_SIZE, CHUNK_VOLUME};
use crate::error::TileError;

pub const SKYLIGHT_VOLUME: usize = CHUNK_VOLUME / 2;

#[derive(Clone)]
pub struct SkylightBuffer {
    data: Box<[u8; SKYLIGHT_VOLUME]>,
}

impl SkylightBuffer {
    /// Buffer with every voxel at the same light level (0..=15).
    pub fn filled(level: u8) -> Self {
        debug_assert!(level <= 0x0F);
        let packed = (level << 4) | (level & 0x0F);
        Self {
            data: Box::new([packed; SKYLIGHT_VOLUME]),
        }
    }

    pub fn from_raw(bytes: &[u8]) -> Result<Self, TileError> {
        if bytes.len() != SKYLIGHT_VOLUME {
            return Err(TileError::BadLength {
                what: "skylight data",
                expected: SKYLIGHT_VOLUME,
                actual: bytes.len(),
            });
        }

        let mut data = Box::new([0u8; SKYLIGHT_VOLUME]);
        data.copy_from_slice(bytes);
        Ok(Self { data })
    }

    /// Skylight level of a single voxel, 0..=15.
    #[inline]
    pub fn sample(&self, x: usize, y: usize, z: usize) -> u8 {
        debug_assert!(x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_HEIGHT);
        let byte = self.data[packed_index(x, y, z)];
        if z % 2 == 0 {
            byte & 0x0F
        } else {
            byte >> 4
        }
    }

    /// Set the skylight level of a single voxel.
    pub fn set(&mut self, x: usize, y: usize, z: usize, level: u8) {
        debug_assert!(x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_HEIGHT);
        debug_assert!(level <= 0x0F);
        let byte = &mut self.data[packed_index(x, y, z)];
        if z % 2 == 0 {
            *byte = (*byte & 0xF0) | (level & 0x0F);
        } else {
            *byte = (*byte & 0x0F) | ((level & 0x0F) << 4);
        }
    }

    /// Unpack to one byte per voxel, in the same order as `VoxelGrid`
    /// storage, so expanded light and block ids share linear indices.
    pub fn expand(&self) -> Box<[u8; CHUNK_VOLUME]> {
        let mut out = Box::new([0u8; CHUNK_VOLUME]);
        for (i, &byte) in self.data.iter().enumerate() {
            out[i * 2] = byte & 0x0F;
            out[i * 2 + 1] = byte >> 4;
        }
        out
    }

    /// The packed bytes in storage order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..]
    }
}

#[inline]
const fn packed_index(x: usize, y: usize, z: usize) -> usize {
    (x * CHUNK_SIZE + y) * (CHUNK_HEIGHT / 2) + z / 2
}
