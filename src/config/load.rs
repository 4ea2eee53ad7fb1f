//! Locating the project root and loading `tromba.toml`.

use std::path::{Path, PathBuf};

use super::{ConfigError, ProjectConfig, ProjectSettings};

/// The marker file every project root must contain.
pub const CONFIG_FILE: &str = "tromba.toml";

impl ProjectSettings {
    /// Load settings from the command line argument, defaulting to the
    /// current working directory.
    pub fn load_from_arg(project_path: Option<&Path>) -> Result<Self, ConfigError> {
        let project_path = resolve_project_path(project_path)?;
        Self::load(&project_path)
    }

    /// Load settings for an absolute project path.
    pub fn load(project_path: &Path) -> Result<Self, ConfigError> {
        let config_path = project_path.join(CONFIG_FILE);
        if !config_path.is_file() {
            return Err(ConfigError::ProjectNotFound(project_path.to_path_buf()));
        }

        let path_str = config_path
            .as_os_str()
            .to_str()
            .ok_or_else(|| ConfigError::EncodePath(config_path.clone()))?;

        let config = config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<ProjectConfig>()?;

        tracing::debug!(path = %config_path.display(), ?config, "loaded project config");

        Ok(Self::new(project_path.to_path_buf(), config))
    }
}

/// Make the project path absolute, falling back to the working directory.
pub fn resolve_project_path(project_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match project_path {
        Some(path) => std::path::absolute(path).map_err(|source| ConfigError::ResolvePath {
            path: path.to_path_buf(),
            source,
        }),
        None => std::env::current_dir().map_err(ConfigError::CwdFailure),
    }
}
