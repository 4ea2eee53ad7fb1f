//! Project settings for tromba.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for `tromba.toml` (`types`)
//! - Locating the project root and loading its settings (`load`)

mod load;
mod types;

pub use load::{CONFIG_FILE, resolve_project_path};
pub use types::{ProjectConfig, ProjectSettings};

use std::path::PathBuf;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("failed to resolve project path {path}: {source}")]
    ResolvePath {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not find tromba.toml in project directory {0}")]
    ProjectNotFound(PathBuf),

    #[error("failed to encode config file path as a unicode string: {0}")]
    EncodePath(PathBuf),

    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),
}
