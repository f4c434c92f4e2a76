/// Chunk records and the loader seam.
/// Real worlds keep chunks in container formats this crate does not parse;
/// anything that can produce a `ChunkRecord` can be rendered and cached.
use std::fs;
use std::path::{Path, PathBuf};

use crate::chunk::grid::{VoxelGrid, CHUNK_VOLUME};
use crate::chunk::skylight::{SkylightBuffer, SKYLIGHT_VOLUME};
use crate::error::TileError;

/// One chunk as loaded from disk: block ids plus, when the source carries
/// it, the packed skylight volume needed for cave rendering.
pub struct ChunkRecord {
    pub path: PathBuf,
    pub blocks: VoxelGrid,
    pub skylight: Option<SkylightBuffer>,
}

impl ChunkRecord {
    pub fn new(path: impl Into<PathBuf>, blocks: VoxelGrid, skylight: Option<SkylightBuffer>) -> Self {
        Self {
            path: path.into(),
            blocks,
            skylight,
        }
    }

    /// Identifier used in cache file names.
    #[inline]
    pub fn chunk_id(&self) -> String {
        chunk_id_for_path(&self.path)
    }
}

/// Chunk files are conventionally named `c.<x>.<z>.dat` with base36
/// coordinates; the two coordinate segments form the chunk id. Names that
/// do not follow that shape fall back to the whole file stem.
pub fn chunk_id_for_path(path: &Path) -> String {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() >= 4 {
        parts[1..3].join(".")
    } else {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("chunk")
            .to_string()
    }
}

/// Source of chunk data. The cache is generic over this so tests can feed
/// synthetic chunks and real container formats can plug in externally.
pub trait ChunkLoader {
    fn load(&self, path: &Path) -> Result<ChunkRecord, TileError>;
}

/// Reads the flat binary chunk layout: 32768 block bytes, optionally
/// followed by 16384 packed skylight bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawChunkLoader;

impl ChunkLoader for RawChunkLoader {
    fn load(&self, path: &Path) -> Result<ChunkRecord, TileError> {
        if !path.is_file() {
            return Err(TileError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path).map_err(|source| TileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match bytes.len() {
            CHUNK_VOLUME => {
                let blocks = VoxelGrid::from_raw(&bytes)?;
                Ok(ChunkRecord::new(path, blocks, None))
            }
            n if n == CHUNK_VOLUME + SKYLIGHT_VOLUME => {
                let blocks = VoxelGrid::from_raw(&bytes[..CHUNK_VOLUME])?;
                let skylight = SkylightBuffer::from_raw(&bytes[CHUNK_VOLUME..])?;
                Ok(ChunkRecord::new(path, blocks, Some(skylight)))
            }
            actual => Err(TileError::BadLength {
                what: "chunk file",
                expected: CHUNK_VOLUME,
                actual,
            }),
        }
    }
}
