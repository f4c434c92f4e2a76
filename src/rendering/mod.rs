use std::fmt;

pub mod cave;
pub mod compositor;
pub mod depth_tint;
pub mod engine;
/// Isometric software compositing pipeline
/// Projection, visibility, and sprite pasting for chunk tiles
pub mod projection;
pub mod sprites;
pub mod visibility;

pub use depth_tint::DepthColorTable;
pub use engine::IsoRenderer;
pub use projection::{SPRITE_SIZE, TILE_HEIGHT, TILE_WIDTH};
pub use sprites::{Sprite, SpriteTable};

/// Which of the two tile flavors to produce.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Straight overworld view.
    Normal,
    /// Underground view: sky-lit voxels are masked out and sprites are
    /// tinted by altitude.
    Cave,
}

impl RenderMode {
    /// Token used in cache file names.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            RenderMode::Normal => "nocave",
            RenderMode::Cave => "cave",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderMode::Normal => "normal",
            RenderMode::Cave => "cave",
        })
    }
}
