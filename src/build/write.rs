//! The output writer: materializing rendered pages on disk.

use std::path::{Path, PathBuf};

use super::page::Page;
use super::paths::url_to_output_path;

#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Counts from one pass of the writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Write every page to `<output_dir>/<url>/index.html`, one at a time.
///
/// Pages with empty content are written as empty files when `write_empty`
/// is set and skipped otherwise. The first filesystem error stops the pass;
/// files already written are left in place.
pub fn write_pages(
    pages: &[Page],
    output_dir: &Path,
    write_empty: bool,
) -> Result<WriteSummary, WriteError> {
    let mut summary = WriteSummary::default();

    for page in pages {
        if page.html_content.is_empty() && !write_empty {
            tracing::debug!(url = %page.url, "skipping page with no content");
            summary.skipped += 1;
            continue;
        }

        let output_path = write_page(page, output_dir)?;
        tracing::debug!(url = %page.url, path = %output_path.display(), "wrote page");
        summary.written += 1;
    }

    Ok(summary)
}

/// Write one page, overwriting any existing file. Returns the file written.
pub fn write_page(page: &Page, output_dir: &Path) -> Result<PathBuf, WriteError> {
    let output_path = url_to_output_path(&page.url, output_dir);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| WriteError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(&output_path, &page.html_content).map_err(|e| WriteError::WriteFile {
        path: output_path.clone(),
        source: e,
    })?;

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::page::PageKind;
    use tempfile::TempDir;

    fn rendered(url: &str, kind: PageKind, html: &str) -> Page {
        let mut page = Page::new(
            PathBuf::from(format!("/project/src{url}.src")),
            url.to_string(),
            "file".to_string(),
            kind,
        );
        page.html_content = html.to_string();
        page
    }

    #[test]
    fn test_pages_land_under_their_urls() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("dist");
        let pages = vec![
            rendered("/blog", PageKind::Template, "<h1>Blog</h1>"),
            rendered("/blog/article-one", PageKind::Markdown, "<p>one</p>\n"),
            rendered("/", PageKind::Template, "home"),
        ];

        let summary = write_pages(&pages, &out, true).unwrap();

        assert_eq!(summary, WriteSummary { written: 3, skipped: 0 });
        assert_eq!(
            std::fs::read_to_string(out.join("blog/index.html")).unwrap(),
            "<h1>Blog</h1>"
        );
        assert_eq!(
            std::fs::read_to_string(out.join("blog/article-one/index.html")).unwrap(),
            "<p>one</p>\n"
        );
        assert_eq!(std::fs::read_to_string(out.join("index.html")).unwrap(), "home");
    }

    #[test]
    fn test_existing_output_is_overwritten() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("about")).unwrap();
        std::fs::write(dir.path().join("about/index.html"), "stale content, longer").unwrap();

        write_page(&rendered("/about", PageKind::Markdown, "fresh"), dir.path()).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("about/index.html")).unwrap(),
            "fresh"
        );
    }

    #[test]
    fn test_writing_twice_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let pages = vec![
            rendered("/a", PageKind::Markdown, "<p>a</p>\n"),
            rendered("/a/b", PageKind::Markdown, "<p>b</p>\n"),
        ];

        write_pages(&pages, dir.path(), true).unwrap();
        let first = std::fs::read(dir.path().join("a/b/index.html")).unwrap();
        write_pages(&pages, dir.path(), true).unwrap();
        let second = std::fs::read(dir.path().join("a/b/index.html")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_pages_follow_policy() {
        let dir = TempDir::new().unwrap();
        let pages = vec![
            rendered("/notes", PageKind::Unsupported, ""),
            rendered("/post", PageKind::Markdown, "<p>x</p>\n"),
        ];

        let skipped = write_pages(&pages, &dir.path().join("skip"), false).unwrap();
        assert_eq!(skipped, WriteSummary { written: 1, skipped: 1 });
        assert!(!dir.path().join("skip/notes").exists());

        let written = write_pages(&pages, &dir.path().join("keep"), true).unwrap();
        assert_eq!(written, WriteSummary { written: 2, skipped: 0 });
        assert_eq!(
            std::fs::read_to_string(dir.path().join("keep/notes/index.html")).unwrap(),
            ""
        );
    }

    #[test]
    fn test_blocked_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        // A file where the page's directory needs to go
        std::fs::write(dir.path().join("blog"), "not a directory").unwrap();

        let result = write_page(&rendered("/blog", PageKind::Markdown, "x"), dir.path());

        assert!(matches!(result, Err(WriteError::CreateDir { .. })));
    }
}
