/// Chunk data model: block storage, skylight, id tables, and the loader
/// seam that feeds the renderer
pub mod block;
pub mod demo;
pub mod grid;
pub mod record;
pub mod skylight;

pub use grid::{
    coords_to_index, index_to_coords, VoxelGrid, CHUNK_HEIGHT, CHUNK_SIZE, CHUNK_VOLUME,
};
pub use record::{chunk_id_for_path, ChunkLoader, ChunkRecord, RawChunkLoader};
pub use skylight::{SkylightBuffer, SKYLIGHT_VOLUME};
