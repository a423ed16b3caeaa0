use std::path::PathBuf;

use thiserror::Error;

/// Failures that can only happen while bootstrapping a session:
/// reading configuration or building a grid from user-supplied text.
/// Running the simulation itself never fails.
#[derive(Error, Debug)]
pub enum LifeError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Unknown render mode '{0}'")]
    UnknownRenderMode(String),

    #[error("Grid row {row} has {actual} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Unexpected character '{found}' in grid literal at row {row}")]
    InvalidGlyph { row: usize, found: char },
}

pub type LifeResult<T> = Result<T, LifeError>;
