//! Configuration type definitions.
//!
//! These types are pure data - no I/O.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The contents of a project's `tromba.toml`.
///
/// ```toml
/// name = "my-site"
/// input = "src"
/// output = "dist"
///
/// [build]
/// write_empty = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Informational project name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Directory holding the source tree, relative to the project root
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Directory the site is written to, relative to the project root
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default)]
    pub build: BuildConfig,
}

fn default_input() -> PathBuf {
    PathBuf::from("src")
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            input: default_input(),
            output: default_output(),
            build: BuildConfig::default(),
        }
    }
}

/// Build behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Write an empty `index.html` for pages that produced no content
    /// (unsupported kinds and failed renders). When false those pages are skipped.
    #[serde(default = "default_write_empty")]
    pub write_empty: bool,
}

fn default_write_empty() -> bool {
    true
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            write_empty: default_write_empty(),
        }
    }
}

/// Everything the build needs to know about one project.
#[derive(Debug, Clone)]
pub struct ProjectSettings {
    /// Absolute path to the project root (the directory holding `tromba.toml`)
    pub project_path: PathBuf,
    pub config: ProjectConfig,
}

impl ProjectSettings {
    pub fn new(project_path: PathBuf, config: ProjectConfig) -> Self {
        Self {
            project_path,
            config,
        }
    }

    /// The input directory, resolved against the project root.
    pub fn input_dir(&self) -> PathBuf {
        resolve(&self.project_path, &self.config.input)
    }

    /// The output directory, resolved against the project root.
    pub fn output_dir(&self) -> PathBuf {
        resolve(&self.project_path, &self.config.output)
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}
