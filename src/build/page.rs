//! The page and project data model shared by every build stage.

use std::path::PathBuf;

// =============================================================================
// Page kinds
// =============================================================================

/// How a page's source is turned into HTML, decided by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// `.md` files, rendered with the Markdown format
    Markdown,
    /// `.html` files, parsed and executed as templates
    Template,
    /// Anything else. Enumerated, never transformed.
    Unsupported,
}

impl PageKind {
    /// Classify a file extension (without the leading dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "md" => PageKind::Markdown,
            "html" => PageKind::Template,
            _ => PageKind::Unsupported,
        }
    }
}

// =============================================================================
// Pages
// =============================================================================

/// One routable unit of content, derived from one source file.
///
/// `source_path`, `url`, `filename` and `kind` are fixed by the route
/// resolver. `html_content` starts empty and is filled in by the render
/// stage, which hands each page to exactly one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Absolute path to the source file
    pub source_path: PathBuf,
    /// Route the page is served at, e.g. "/blog/article-one" or "/"
    pub url: String,
    /// Base filename of the source, e.g. "+page.html"
    pub filename: String,
    pub kind: PageKind,
    pub html_content: String,
}

impl Page {
    pub fn new(source_path: PathBuf, url: String, filename: String, kind: PageKind) -> Self {
        Self {
            source_path,
            url,
            filename,
            kind,
            html_content: String::new(),
        }
    }
}

// =============================================================================
// Project
// =============================================================================

/// The in-memory aggregate for one build run.
#[derive(Debug)]
pub struct Project {
    /// Absolute project root
    pub path: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub pages: Vec<Page>,
}

impl Project {
    pub fn new(path: PathBuf, input_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            path,
            input_dir,
            output_dir,
            pages: Vec::new(),
        }
    }
}
