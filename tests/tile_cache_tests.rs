/// Cache lifecycle tests against real temporary directories: miss, hit,
/// invalidation on edit, corrupt-entry recovery, and batch behavior.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use image::GenericImageView;

use isotile::chunk::demo;
use isotile::*;

fn write_chunk(
    dir: &Path,
    name: &str,
    blocks: &VoxelGrid,
    skylight: Option<&SkylightBuffer>,
) -> PathBuf {
    let path = dir.join(name);
    let mut bytes = blocks.as_bytes().to_vec();
    if let Some(skylight) = skylight {
        bytes.extend_from_slice(skylight.as_bytes());
    }
    fs::write(&path, bytes).expect("write chunk fixture");
    path
}

fn tile_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read cache dir")
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("img."))
        .collect();
    names.sort();
    names
}

fn default_cache() -> TileCache<RawChunkLoader> {
    TileCache::new(RawChunkLoader, IsoRenderer::with_builtin_sprites())
}

/// Loader wrapper that counts how many times chunks are read back.
struct CountingLoader {
    inner: RawChunkLoader,
    loads: Arc<AtomicUsize>,
}

impl ChunkLoader for CountingLoader {
    fn load(&self, path: &Path) -> Result<ChunkRecord> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(path)
    }
}

#[test]
fn miss_renders_and_writes_a_decodable_tile() {
    let dir = tempfile::tempdir().unwrap();
    let blocks = demo::terrain(12345);
    let chunk = write_chunk(dir.path(), "c.0.1f.dat", &blocks, None);

    let tile = default_cache()
        .get_or_render(&chunk, RenderMode::Normal)
        .unwrap();

    let digest = content_digest(blocks.as_bytes());
    let expected = format!("img.0.1f.nocave.{}.png", &digest[..6]);
    assert_eq!(tile, dir.path().join(&expected));
    assert_eq!(tile_names(dir.path()), vec![expected]);

    let decoded = image::open(&tile).expect("cached tile must decode");
    assert_eq!(decoded.dimensions(), (TILE_WIDTH, TILE_HEIGHT));
}

#[test]
fn hit_returns_the_existing_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let chunk = write_chunk(dir.path(), "c.0.0.dat", &demo::terrain(1), None);
    let cache = default_cache();

    let tile = cache.get_or_render(&chunk, RenderMode::Normal).unwrap();

    // Plant a recognizable valid image at the cached path; a hit must
    // leave it alone.
    image::RgbaImage::new(1, 1).save(&tile).unwrap();

    let again = cache.get_or_render(&chunk, RenderMode::Normal).unwrap();
    assert_eq!(again, tile);
    assert_eq!(image::open(&tile).unwrap().dimensions(), (1, 1));
}

#[test]
fn corrupt_cache_entry_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let chunk = write_chunk(dir.path(), "c.0.0.dat", &demo::terrain(2), None);
    let cache = default_cache();

    let tile = cache.get_or_render(&chunk, RenderMode::Normal).unwrap();
    fs::write(&tile, b"torn write, not a png").unwrap();

    let again = cache.get_or_render(&chunk, RenderMode::Normal).unwrap();
    assert_eq!(again, tile);
    assert_eq!(
        image::open(&tile).unwrap().dimensions(),
        (TILE_WIDTH, TILE_HEIGHT),
        "unreadable entry must be re-rendered"
    );
}

#[test]
fn editing_the_chunk_replaces_the_old_tile() {
    let dir = tempfile::tempdir().unwrap();
    let mut blocks = demo::terrain(3);
    let chunk = write_chunk(dir.path(), "c.0.0.dat", &blocks, None);
    let cache = default_cache();

    let old_tile = cache.get_or_render(&chunk, RenderMode::Normal).unwrap();

    blocks.set(0, 0, 0, 4);
    write_chunk(dir.path(), "c.0.0.dat", &blocks, None);

    let new_tile = cache.get_or_render(&chunk, RenderMode::Normal).unwrap();
    assert_ne!(new_tile, old_tile, "content edit must change the digest");
    assert!(!old_tile.exists(), "stale tile must be deleted");
    assert_eq!(tile_names(dir.path()).len(), 1);
}

#[test]
fn bare_file_names_resolve_against_the_current_directory() {
    let dir = tempfile::tempdir().unwrap();
    let previous_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    // Unqualified names have a parent of "", not "."; the whole cache
    // round trip, stale cleanup included, must still work from the
    // current directory.
    let mut blocks = demo::terrain(11);
    write_chunk(dir.path(), "c.0.0.dat", &blocks, None);
    let cache = default_cache();
    let old_tile = cache
        .get_or_render(Path::new("c.0.0.dat"), RenderMode::Normal)
        .unwrap();

    blocks.set(0, 0, 0, 4);
    write_chunk(dir.path(), "c.0.0.dat", &blocks, None);
    let new_tile = cache
        .get_or_render(Path::new("c.0.0.dat"), RenderMode::Normal)
        .unwrap();

    std::env::set_current_dir(&previous_dir).unwrap();

    assert_ne!(new_tile, old_tile);
    let digest = content_digest(blocks.as_bytes());
    assert_eq!(
        tile_names(dir.path()),
        vec![format!("img.0.0.nocave.{}.png", &digest[..6])],
        "a refresh through a bare name must still replace the stale tile"
    );
}

#[test]
fn modes_are_cached_independently() {
    let dir = tempfile::tempdir().unwrap();
    let (blocks, skylight) = demo::terrain_with_skylight(4);
    let chunk = write_chunk(dir.path(), "c.0.0.dat", &blocks, Some(&skylight));
    let cache = default_cache();

    let normal = cache.get_or_render(&chunk, RenderMode::Normal).unwrap();
    let cave = cache.get_or_render(&chunk, RenderMode::Cave).unwrap();
    assert_ne!(normal, cave);

    let names = tile_names(dir.path());
    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n.contains(".nocave.")));
    assert!(names.iter().any(|n| n.contains(".cave.")));

    // A normal-mode refresh must not disturb the cave tile.
    fs::remove_file(&normal).unwrap();
    cache.get_or_render(&chunk, RenderMode::Normal).unwrap();
    assert!(cave.exists());
    assert_eq!(tile_names(dir.path()).len(), 2);
}

#[test]
fn batch_collapses_duplicate_jobs() {
    let dir = tempfile::tempdir().unwrap();
    let (blocks_a, skylight_a) = demo::terrain_with_skylight(5);
    let a = write_chunk(dir.path(), "c.0.0.dat", &blocks_a, Some(&skylight_a));
    let b = write_chunk(dir.path(), "c.1.0.dat", &demo::terrain(6), None);

    let loads = Arc::new(AtomicUsize::new(0));
    let cache = TileCache::new(
        CountingLoader {
            inner: RawChunkLoader,
            loads: Arc::clone(&loads),
        },
        IsoRenderer::with_builtin_sprites(),
    );

    let jobs = vec![
        (a.clone(), RenderMode::Normal),
        (a.clone(), RenderMode::Normal),
        (a.clone(), RenderMode::Cave),
        (b.clone(), RenderMode::Normal),
        (a.clone(), RenderMode::Normal),
    ];

    let start = Instant::now();
    let results = cache.get_or_render_batch(&jobs);
    println!("[CACHE] batch of {} unique jobs: {:?}", results.len(), start.elapsed());

    assert_eq!(results.len(), 3, "duplicates collapse to unique jobs");
    assert_eq!(loads.load(Ordering::SeqCst), 3, "one load per unique job");
    for (path, mode, result) in &results {
        let tile = result.as_ref().unwrap_or_else(|err| {
            panic!("job ({}, {mode}) failed: {err}", path.display());
        });
        assert!(tile.exists());
    }
    assert_eq!(tile_names(dir.path()).len(), 3);
}

#[test]
fn missing_chunk_file_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let result = default_cache().get_or_render(&dir.path().join("c.9.9.dat"), RenderMode::Normal);
    assert!(matches!(result, Err(TileError::NotFound { .. })));
}

#[test]
fn cave_render_without_skylight_carries_context() {
    let dir = tempfile::tempdir().unwrap();
    let chunk = write_chunk(dir.path(), "c.0.1f.dat", &demo::terrain(7), None);

    let err = default_cache()
        .get_or_render(&chunk, RenderMode::Cave)
        .unwrap_err();

    match err {
        TileError::Render { chunk, mode, source } => {
            assert_eq!(chunk, "0.1f");
            assert_eq!(mode, RenderMode::Cave);
            assert!(matches!(*source, TileError::MissingSkylight { .. }));
        }
        other => panic!("expected a render error, got: {other}"),
    }
    assert!(tile_names(dir.path()).is_empty(), "failures must not leave tiles");
}

#[test]
fn unconventional_file_names_fall_back_to_the_stem() {
    let dir = tempfile::tempdir().unwrap();
    let chunk = write_chunk(dir.path(), "overworld.dat", &demo::terrain(8), None);

    let tile = default_cache()
        .get_or_render(&chunk, RenderMode::Normal)
        .unwrap();

    let name = tile.file_name().unwrap().to_str().unwrap();
    assert!(
        name.starts_with("img.overworld.nocave."),
        "unexpected tile name: {name}"
    );
}

#[test]
fn hash_prefix_length_is_configurable() {
    let dir = tempfile::tempdir().unwrap();
    let blocks = demo::terrain(9);
    let chunk = write_chunk(dir.path(), "c.0.0.dat", &blocks, None);

    let cache = TileCache::with_config(
        RawChunkLoader,
        IsoRenderer::with_builtin_sprites(),
        CacheConfig { hash_prefix_len: 12 },
    );
    let tile = cache.get_or_render(&chunk, RenderMode::Normal).unwrap();

    let digest = content_digest(blocks.as_bytes());
    assert_eq!(
        tile.file_name().unwrap().to_str().unwrap(),
        format!("img.0.0.nocave.{}.png", &digest[..12])
    );
}

#[test]
fn render_and_save_uses_the_default_stack() {
    let dir = tempfile::tempdir().unwrap();
    let chunk = write_chunk(dir.path(), "c.2.2.dat", &demo::terrain(10), None);

    let tile = render_and_save(&chunk, RenderMode::Normal).unwrap();
    assert!(tile.exists());
    assert!(tile.starts_with(dir.path()), "tile lands next to its chunk");
}
