/// Crate-wide error type.
/// Every fallible operation returns `TileError`; variants carry enough
/// context (path, chunk id, mode) that a failed batch render can report
/// which tile broke without any backtrace digging.
use std::path::PathBuf;

use thiserror::Error;

use crate::rendering::RenderMode;

pub type Result<T> = std::result::Result<T, TileError>;

#[derive(Error, Debug)]
pub enum TileError {
    #[error("chunk file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read chunk file {}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{what} has wrong length: expected {expected} bytes, got {actual}")]
    BadLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("cave render requested but {} carries no skylight data", .path.display())]
    MissingSkylight { path: PathBuf },

    #[error("image encode/decode failed for {}", .path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("rendering chunk {chunk} in {mode} mode failed")]
    Render {
        chunk: String,
        mode: RenderMode,
        source: Box<TileError>,
    },
}
