use std::path::PathBuf;

use thiserror::Error;

/// Configuration failures. All of them surface before the first step runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least 3x3, got {rows}x{cols}")]
    GridTooSmall { rows: usize, cols: usize },

    #[error("unknown preset index {index} (table has {len} entries)")]
    UnknownPresetIndex { index: usize, len: usize },

    #[error("unknown preset name {0:?}")]
    UnknownPresetName(String),

    #[error("rate `{name}` must be finite and non-negative, got {value}")]
    InvalidRate { name: &'static str, value: f32 },

    #[error("seed cell ({row}, {col}) lies outside the {rows}x{cols} grid")]
    SeedOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("seed value {0} for b is outside [0, 1]")]
    SeedValueOutOfRange(f32),

    #[error("snapshot_every must be greater than zero")]
    ZeroSnapshotInterval,

    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
}
