/// Content-addressed tile cache.
///
/// Rendered tiles are stored next to their source chunk as
/// `img.<chunk-id>.<cave|nocave>.<hash>.png`, where `<hash>` is a prefix of
/// the blake3 digest over the chunk's raw block bytes and the render format
/// version. Editing a chunk changes the digest, so the old file simply stops
/// matching and gets replaced on the next request.
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rayon::prelude::*;

use crate::chunk::{ChunkLoader, RawChunkLoader};
use crate::error::TileError;
use crate::rendering::{IsoRenderer, RenderMode};

/// Bumped whenever sprite art or projection geometry changes shape, so
/// tiles rendered by an older format never satisfy a lookup.
pub const RENDER_VERSION: &str = "1";

/// Cache tuning knobs.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Hex digits of the content digest kept in cache file names. Short
    /// names keep directories readable; longer prefixes shrink the
    /// collision surface for very large worlds.
    pub hash_prefix_len: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { hash_prefix_len: 6 }
    }
}

/// Get-or-render front end over a `ChunkLoader` and an `IsoRenderer`.
pub struct TileCache<L> {
    loader: L,
    renderer: IsoRenderer,
    config: CacheConfig,
}

impl<L: ChunkLoader> TileCache<L> {
    pub fn new(loader: L, renderer: IsoRenderer) -> Self {
        Self::with_config(loader, renderer, CacheConfig::default())
    }

    pub fn with_config(loader: L, renderer: IsoRenderer, config: CacheConfig) -> Self {
        Self {
            loader,
            renderer,
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Path of the tile for (chunk file, mode), rendering and writing it
    /// first unless a valid copy is already on disk.
    pub fn get_or_render(&self, chunk_path: &Path, mode: RenderMode) -> Result<PathBuf, TileError> {
        let record = self.loader.load(chunk_path)?;
        let chunk_id = record.chunk_id();

        let digest = content_digest(record.blocks.as_bytes());
        let prefix_len = self.config.hash_prefix_len.min(digest.len());
        let prefix = &digest[..prefix_len];

        // parent() of a bare file name is Some(""), which read_dir rejects
        let dir = match chunk_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let dest = dir.join(cache_file_name(&chunk_id, mode, prefix));

        if is_valid_tile(&dest) {
            debug!("tile cache hit: {}", dest.display());
            return Ok(dest);
        }

        let tile = self
            .renderer
            .render(&record, mode)
            .map_err(|source| TileError::Render {
                chunk: chunk_id.clone(),
                mode,
                source: Box::new(source),
            })?;

        remove_stale_tiles(dir, &chunk_id, mode, &dest);

        tile.save(&dest).map_err(|source| TileError::Image {
            path: dest.clone(),
            source,
        })?;
        debug!("tile cache write: {}", dest.display());
        Ok(dest)
    }

    /// Run a set of (chunk file, mode) jobs across the rayon pool.
    /// Duplicate jobs are collapsed first so no two workers ever race on
    /// the same tile; results come back per unique job.
    pub fn get_or_render_batch(
        &self,
        jobs: &[(PathBuf, RenderMode)],
    ) -> Vec<(PathBuf, RenderMode, Result<PathBuf, TileError>)>
    where
        L: Sync,
    {
        let mut seen = HashSet::new();
        let mut unique: Vec<&(PathBuf, RenderMode)> = Vec::with_capacity(jobs.len());
        for job in jobs {
            if seen.insert(job) {
                unique.push(job);
            }
        }

        unique
            .into_par_iter()
            .map(|(path, mode)| (path.clone(), *mode, self.get_or_render(path, *mode)))
            .collect()
    }
}

/// One-shot convenience: render `chunk_path` with the flat binary loader,
/// the built-in sprite set, and default cache settings.
pub fn render_and_save(chunk_path: &Path, mode: RenderMode) -> Result<PathBuf, TileError> {
    let cache = TileCache::new(RawChunkLoader, IsoRenderer::with_builtin_sprites());
    cache.get_or_render(chunk_path, mode)
}

/// Hex blake3 digest over the raw block bytes and the render format
/// version.
pub fn content_digest(blocks: &[u8]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(blocks);
    hasher.update(RENDER_VERSION.as_bytes());
    hasher.finalize().to_hex().to_string()
}

fn cache_file_name(chunk_id: &str, mode: RenderMode, digest_prefix: &str) -> String {
    format!("img.{}.{}.{}.png", chunk_id, mode.label(), digest_prefix)
}

/// A hit requires the file to decode as an image, not merely exist; a torn
/// write from a crashed run is treated as a miss and overwritten.
fn is_valid_tile(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    match image::open(path) {
        Ok(_) => true,
        Err(err) => {
            warn!("discarding unreadable tile {}: {err}", path.display());
            false
        }
    }
}

/// Delete every cached tile for this chunk and mode except `keep`.
/// Failures are logged and ignored; a leftover stale file only costs disk
/// space and can never satisfy a lookup.
fn remove_stale_tiles(dir: &Path, chunk_id: &str, mode: RenderMode, keep: &Path) {
    let tile_prefix = format!("img.{}.{}.", chunk_id, mode.label());
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("could not scan {} for stale tiles: {err}", dir.display());
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path == keep {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if name.starts_with(&tile_prefix) && name.ends_with(".png") {
            debug!("removing stale tile: {}", path.display());
            if let Err(err) = fs::remove_file(&path) {
                warn!("could not remove stale tile {}: {err}", path.display());
            }
        }
    }
}
