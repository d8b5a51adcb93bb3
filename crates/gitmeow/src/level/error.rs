//! Level-pack error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading and validating level packs.
#[derive(Error, Debug)]
pub enum LevelError {
    #[error("Level pack directory not found: {0}")]
    PackDirNotFound(PathBuf),

    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML in '{path}': {message}")]
    ParseYaml { path: PathBuf, message: String },

    #[error("Invalid API version '{version}', expected '{expected}'")]
    InvalidApiVersion { version: String, expected: String },

    #[error("Duplicate level id {id} (second definition in '{path}')")]
    DuplicateLevelId { id: u32, path: PathBuf },

    #[error("Level pack contains no levels")]
    EmptyPack,

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for level-pack operations.
pub type Result<T> = std::result::Result<T, LevelError>;
