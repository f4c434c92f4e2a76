/// Altitude color ramp for cave mode.
/// Deep layers are red and the ramp walks through yellow, green, and cyan
/// toward the top of the world, so tunnel depth reads directly off the tile.
use crate::chunk::CHUNK_HEIGHT;

/// Per-channel step between adjacent layers.
const RAMP_STEP: u8 = 7;

/// 128 precomputed tint colors indexed by z. Built once at startup and
/// shared read-only between render workers.
pub struct DepthColorTable {
    colors: [[u8; 3]; CHUNK_HEIGHT],
}

impl DepthColorTable {
    pub fn new() -> Self {
        let mut colors = [[0u8; 3]; CHUNK_HEIGHT];
        let mut r = 255u8;
        let mut g = 0u8;
        let mut b = 0u8;

        for (z, slot) in colors.iter_mut().enumerate() {
            *slot = [r, g, b];
            // Walk one channel per 32-layer band. Saturating so alternative
            // step sizes cannot wrap the ramp.
            if z < 32 {
                g = g.saturating_add(RAMP_STEP);
            } else if z < 64 {
                r = r.saturating_sub(RAMP_STEP);
            } else if z < 96 {
                b = b.saturating_add(RAMP_STEP);
            } else {
                g = g.saturating_sub(RAMP_STEP);
            }
        }

        Self { colors }
    }

    #[inline]
    pub fn color_at(&self, z: usize) -> [u8; 3] {
        self.colors[z]
    }
}

impl Default for DepthColorTable {
    fn default() -> Self {
        Self::new()
    }
}
