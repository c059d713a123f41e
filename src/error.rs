//! Crate error type
//!
//! Gameplay itself never fails; only the edges that touch files or
//! host-supplied buffers do.

use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed json in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported save version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("pixel buffer holds {actual} entries, expected {width}x{height}")]
    BufferSize {
        width: u32,
        height: u32,
        actual: usize,
    },

    #[error("terrain is {actual:?}, level `{level}` needs {expected:?}")]
    TerrainSize {
        level: &'static str,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("unknown level {0} (levels are numbered 1 to 6)")]
    UnknownLevel(u8),
}
