/// The tile renderer.
/// Walks a chunk back to front (x descending, y ascending, z ascending) and
/// composites one sprite per visible voxel, so nearer and higher voxels
/// paint over farther and lower ones without any depth buffer.
use std::sync::Arc;
use std::time::Instant;

use glam::IVec2;
use image::RgbaImage;
use log::debug;

use crate::chunk::{block, ChunkRecord, VoxelGrid, CHUNK_HEIGHT, CHUNK_SIZE};
use crate::error::TileError;
use crate::rendering::cave;
use crate::rendering::compositor;
use crate::rendering::depth_tint::DepthColorTable;
use crate::rendering::projection::{self, SPRITE_SIZE, TILE_HEIGHT, TILE_WIDTH};
use crate::rendering::sprites::SpriteTable;
use crate::rendering::visibility;
use crate::rendering::RenderMode;

/// Renders chunk tiles. The sprite and tint tables are shared behind `Arc`,
/// so clones are cheap and one renderer can serve many worker threads.
#[derive(Clone)]
pub struct IsoRenderer {
    sprites: Arc<SpriteTable>,
    depth_colors: Arc<DepthColorTable>,
}

impl IsoRenderer {
    pub fn new(sprites: Arc<SpriteTable>, depth_colors: Arc<DepthColorTable>) -> Self {
        Self {
            sprites,
            depth_colors,
        }
    }

    /// Renderer using the built-in procedural sprite set.
    pub fn with_builtin_sprites() -> Self {
        Self::new(
            Arc::new(SpriteTable::builtin()),
            Arc::new(DepthColorTable::new()),
        )
    }

    /// Render a whole chunk into a fresh transparent 384x1728 tile.
    pub fn render(&self, record: &ChunkRecord, mode: RenderMode) -> Result<RgbaImage, TileError> {
        let started = Instant::now();
        let mut canvas = RgbaImage::new(TILE_WIDTH, TILE_HEIGHT);

        match mode {
            RenderMode::Normal => {
                self.render_into(&mut canvas, &record.blocks, mode, IVec2::ZERO);
            }
            RenderMode::Cave => {
                let skylight =
                    record
                        .skylight
                        .as_ref()
                        .ok_or_else(|| TileError::MissingSkylight {
                            path: record.path.clone(),
                        })?;
                let masked = cave::apply_cave_mask(&record.blocks, skylight);
                self.render_into(&mut canvas, &masked, mode, IVec2::ZERO);
            }
        }

        debug!(
            "rendered chunk {} in {mode} mode ({:?})",
            record.chunk_id(),
            started.elapsed()
        );
        Ok(canvas)
    }

    /// Render a grid into a caller-supplied canvas with the tile origin at
    /// `offset`. The grid is drawn as-is: cave-mode callers assembling
    /// mosaics apply `cave::apply_cave_mask` themselves (`render` does both
    /// steps).
    pub fn render_into(
        &self,
        canvas: &mut RgbaImage,
        blocks: &VoxelGrid,
        mode: RenderMode,
        offset: IVec2,
    ) {
        for x in (0..CHUNK_SIZE).rev() {
            for y in 0..CHUNK_SIZE {
                for z in 0..CHUNK_HEIGHT {
                    self.draw_voxel(canvas, blocks, x, y, z, mode, offset);
                }
            }
        }
    }

    #[inline]
    fn draw_voxel(
        &self,
        canvas: &mut RgbaImage,
        blocks: &VoxelGrid,
        x: usize,
        y: usize,
        z: usize,
        mode: RenderMode,
        offset: IVec2,
    ) {
        let id = blocks.get(x, y, z);
        if id == block::AIR {
            return;
        }
        if visibility::is_occluded(blocks, x, y, z, mode) {
            return;
        }
        let sprite = match self.sprites.get(id) {
            Some(sprite) => sprite,
            None => return,
        };

        let pos = projection::project(x, y, z, offset);
        match mode {
            RenderMode::Normal => compositor::paste_sprite(canvas, sprite, pos),
            RenderMode::Cave => {
                compositor::paste_sprite_tinted(canvas, sprite, self.depth_colors.color_at(z), pos)
            }
        }

        if block::is_opaque(id) {
            draw_open_air_edges(canvas, blocks, x, y, z, pos);
        }
    }
}

/// Black rim segments where a drawn voxel borders open air: along the top
/// face's far edge when the +x neighbor is air, and along its left edge when
/// the -y neighbor is air.
fn draw_open_air_edges(
    canvas: &mut RgbaImage,
    blocks: &VoxelGrid,
    x: usize,
    y: usize,
    z: usize,
    pos: IVec2,
) {
    let full = SPRITE_SIZE as i32;
    let half = full / 2;
    let quarter = full / 4;

    if x != CHUNK_SIZE - 1 && blocks.get(x + 1, y, z) == block::AIR {
        compositor::draw_edge_line(
            canvas,
            pos + IVec2::new(half, 0),
            pos + IVec2::new(full, quarter),
        );
    }
    if y != 0 && blocks.get(x, y - 1, z) == block::AIR {
        compositor::draw_edge_line(
            canvas,
            pos + IVec2::new(0, quarter),
            pos + IVec2::new(half, 0),
        );
    }
}
