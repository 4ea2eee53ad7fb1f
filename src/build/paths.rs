//! Path and URL conversion utilities.
//!
//! This module handles conversions between:
//! - Source file paths (relative to the input directory)
//! - URL paths (the route a page is served at)
//! - Output paths (where the page is written in the output directory)

use std::path::{Component, Path, PathBuf};

/// A filename starting with this marker is the index page of its directory.
pub const INDEX_MARKER: char = '+';

/// The file every page is written to, inside its URL's directory.
pub const INDEX_FILE: &str = "index.html";

/// Convert an input-relative source path to a URL path.
///
/// Index files (marker-prefixed) take their directory's URL; every other
/// file keeps its path minus the extension.
///
/// # Examples
/// ```ignore
/// source_path_to_url("blog/+page.html") => "/blog"
/// source_path_to_url("blog/article-one.md") => "/blog/article-one"
/// source_path_to_url("+page.html") => "/"
/// ```
pub fn source_path_to_url(path: &Path) -> String {
    let mut segments: Vec<String> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if let Some(filename) = segments.pop()
        && !is_index_file(&filename)
    {
        let stem = match Path::new(&filename).file_stem() {
            Some(stem) => stem.to_string_lossy().into_owned(),
            None => filename.clone(),
        };
        segments.push(stem);
    }

    trim_trailing_separator(format!("/{}", segments.join("/")))
}

/// Returns true if the filename marks its directory's index page.
pub fn is_index_file(filename: &str) -> bool {
    filename.starts_with(INDEX_MARKER)
}

/// Remove a trailing `/` from any URL except the root.
fn trim_trailing_separator(mut url: String) -> String {
    while url.len() > 1 && url.ends_with('/') {
        url.pop();
    }
    url
}

/// Convert a URL path to the directory its page is written into.
///
/// # Examples
/// ```ignore
/// url_to_output_dir("/blog/article-one", output_dir) => output_dir/blog/article-one
/// url_to_output_dir("/", output_dir) => output_dir
/// ```
pub fn url_to_output_dir(url_path: &str, output_dir: &Path) -> PathBuf {
    let url_path = url_path.trim_start_matches('/');

    if url_path.is_empty() {
        output_dir.to_path_buf()
    } else {
        output_dir.join(url_path)
    }
}

/// Convert a URL path to the output file path.
///
/// # Examples
/// ```ignore
/// url_to_output_path("/blog", output_dir) => output_dir/blog/index.html
/// url_to_output_path("/", output_dir) => output_dir/index.html
/// ```
pub fn url_to_output_path(url_path: &str, output_dir: &Path) -> PathBuf {
    url_to_output_dir(url_path, output_dir).join(INDEX_FILE)
}
