//! Route resolution: mapping the input tree onto pages.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::page::{Page, PageKind};
use super::paths::source_path_to_url;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum RouteError {
    #[error("input directory does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("input path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read metadata for {path}: {source}")]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("URL '{url}' is produced by both {first} and {second}")]
    UrlCollision {
        url: String,
        first: PathBuf,
        second: PathBuf,
    },
}

// =============================================================================
// Discovery
// =============================================================================

/// Discover every page under the input directory.
///
/// Each regular file with a non-empty extension becomes one page;
/// directories and extensionless files do not. Entries are visited in
/// file name order. Any filesystem error aborts discovery.
pub fn discover_pages(input_dir: &Path) -> Result<Vec<Page>, RouteError> {
    if !input_dir.exists() {
        return Err(RouteError::PathNotFound(input_dir.to_path_buf()));
    }
    if !input_dir.is_dir() {
        return Err(RouteError::NotADirectory(input_dir.to_path_buf()));
    }

    let mut pages = Vec::new();
    let mut visited = HashSet::new();
    walk_directory(input_dir, &PathBuf::new(), &mut visited, &mut pages)?;
    Ok(pages)
}

/// Recursively walk a directory and collect pages.
///
/// `visited` holds the canonical path of every directory walked so far;
/// a directory reached twice (through a symlink) is only walked once.
fn walk_directory(
    dir: &Path,
    relative_path: &Path,
    visited: &mut HashSet<PathBuf>,
    pages: &mut Vec<Page>,
) -> Result<(), RouteError> {
    let canonical = dir.canonicalize().map_err(|e| RouteError::Metadata {
        path: dir.to_path_buf(),
        source: e,
    })?;
    if !visited.insert(canonical) {
        tracing::debug!(path = %dir.display(), "directory already walked, skipping");
        return Ok(());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| RouteError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut entries = entries
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| RouteError::ReadEntry {
            path: dir.to_path_buf(),
            source: e,
        })?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let item_relative_path = relative_path.join(entry.file_name());

        // Follows symlinks, so a dangling link fails the walk here
        let metadata = std::fs::metadata(&path).map_err(|e| RouteError::Metadata {
            path: path.clone(),
            source: e,
        })?;

        if metadata.is_dir() {
            walk_directory(&path, &item_relative_path, visited, pages)?;
        } else if metadata.is_file()
            && let Some(page) = resolve_page(path, &item_relative_path)
        {
            pages.push(page);
        }
    }

    Ok(())
}

/// Build the page for one file, or `None` if it has no extension.
fn resolve_page(full_path: PathBuf, relative_path: &Path) -> Option<Page> {
    let extension = relative_path.extension()?.to_string_lossy();
    if extension.is_empty() {
        return None;
    }

    let kind = PageKind::from_extension(&extension);
    let filename = relative_path.file_name()?.to_string_lossy().into_owned();
    let url = source_path_to_url(relative_path);

    Some(Page::new(full_path, url, filename, kind))
}

// =============================================================================
// Collision detection
// =============================================================================

/// Fail if two pages that will both be written share a URL.
///
/// Unsupported pages only produce output when empty pages are written,
/// so they are ignored otherwise.
pub fn check_collisions(pages: &[Page], include_unsupported: bool) -> Result<(), RouteError> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();

    for page in pages {
        if page.kind == PageKind::Unsupported && !include_unsupported {
            continue;
        }
        if let Some(first) = seen.insert(&page.url, &page.source_path) {
            return Err(RouteError::UrlCollision {
                url: page.url.clone(),
                first: first.to_path_buf(),
                second: page.source_path.clone(),
            });
        }
    }

    Ok(())
}
