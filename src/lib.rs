pub mod cache;
/// Chunk tile renderer - isometric voxel chunks composited into PNG tiles
/// with content-hash caching of the results
pub mod chunk;
pub mod error;
pub mod rendering;

pub use cache::{content_digest, render_and_save, CacheConfig, TileCache, RENDER_VERSION};
pub use chunk::{
    ChunkLoader, ChunkRecord, RawChunkLoader, SkylightBuffer, VoxelGrid, CHUNK_HEIGHT, CHUNK_SIZE,
    CHUNK_VOLUME,
};
pub use error::{Result, TileError};
pub use rendering::{
    DepthColorTable, IsoRenderer, RenderMode, Sprite, SpriteTable, SPRITE_SIZE, TILE_HEIGHT,
    TILE_WIDTH,
};
