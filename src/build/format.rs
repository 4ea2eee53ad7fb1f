//! Content formats: the transforms from page source to HTML.
//!
//! Each [`ContentFormat`] handles one [`PageKind`]. The render stage looks
//! the format up in a [`FormatRegistry`]; pages with no registered format
//! (the `Unsupported` kind) are never transformed.
//!
//! # Replacing a Format
//!
//! ```ignore
//! struct RawMarkdownFormat;
//!
//! impl ContentFormat for RawMarkdownFormat {
//!     fn name(&self) -> &'static str { "raw-markdown" }
//!     fn kind(&self) -> PageKind { PageKind::Markdown }
//!     fn render(&self, source: &str) -> Result<String, FormatError> {
//!         Ok(format!("<pre>{}</pre>", source))
//!     }
//! }
//!
//! registry.register(RawMarkdownFormat);
//! ```

use super::markdown::render_markdown;
use super::page::PageKind;
use super::template::{TemplateError, render_template};

/// Error during format rendering.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl FormatError {
    /// The error and all of its causes, joined for a single log line.
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let cause_message = cause.to_string();
            if !message.contains(&cause_message) {
                message.push_str(": ");
                message.push_str(&cause_message);
            }
            source = cause.source();
        }
        message
    }
}

/// A content format that can render page sources to HTML.
pub trait ContentFormat: Send + Sync {
    /// The name of this format (e.g., "markdown").
    fn name(&self) -> &'static str;

    /// The page kind this format renders.
    fn kind(&self) -> PageKind;

    /// Render a page source to HTML.
    fn render(&self, source: &str) -> Result<String, FormatError>;
}

/// Markdown format, backed by pulldown-cmark.
pub struct MarkdownFormat;

impl ContentFormat for MarkdownFormat {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn kind(&self) -> PageKind {
        PageKind::Markdown
    }

    fn render(&self, source: &str) -> Result<String, FormatError> {
        Ok(render_markdown(source))
    }
}

/// HTML template format, backed by tera.
pub struct TemplateFormat;

impl ContentFormat for TemplateFormat {
    fn name(&self) -> &'static str {
        "html-template"
    }

    fn kind(&self) -> PageKind {
        PageKind::Template
    }

    fn render(&self, source: &str) -> Result<String, FormatError> {
        Ok(render_template(source)?)
    }
}

/// Registry of content formats, keyed by page kind.
pub struct FormatRegistry {
    formats: Vec<Box<dyn ContentFormat>>,
}

impl FormatRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            formats: Vec::new(),
        }
    }

    /// Create a registry with the Markdown and template formats.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(MarkdownFormat);
        registry.register(TemplateFormat);
        registry
    }

    /// Register a new format.
    ///
    /// Later registrations take precedence for the same kind.
    pub fn register<F: ContentFormat + 'static>(&mut self, format: F) {
        self.formats.push(Box::new(format));
    }

    /// Find the format for a page kind.
    ///
    /// Always `None` for `Unsupported`: those pages are never transformed,
    /// whatever is registered.
    pub fn for_kind(&self, kind: PageKind) -> Option<&dyn ContentFormat> {
        if kind == PageKind::Unsupported {
            return None;
        }

        // Search in reverse so later registrations take precedence
        self.formats
            .iter()
            .rev()
            .find(|f| f.kind() == kind)
            .map(|f| f.as_ref())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_default_formats() {
        let registry = FormatRegistry::with_defaults();

        assert_eq!(registry.for_kind(PageKind::Markdown).unwrap().name(), "markdown");
        assert_eq!(
            registry.for_kind(PageKind::Template).unwrap().name(),
            "html-template"
        );
        assert!(registry.for_kind(PageKind::Unsupported).is_none());
    }

    struct MockFormat;
    impl ContentFormat for MockFormat {
        fn name(&self) -> &'static str {
            "mock"
        }
        fn kind(&self) -> PageKind {
            PageKind::Markdown
        }
        fn render(&self, _source: &str) -> Result<String, FormatError> {
            Ok("<p>mock</p>".to_string())
        }
    }

    #[test]
    fn test_later_registration_wins() {
        let mut registry = FormatRegistry::with_defaults();
        registry.register(MockFormat);

        let format = registry.for_kind(PageKind::Markdown).unwrap();
        assert_eq!(format.name(), "mock");
        assert_eq!(format.render("# ignored").unwrap(), "<p>mock</p>");
    }

    struct CatchAllFormat;
    impl ContentFormat for CatchAllFormat {
        fn name(&self) -> &'static str {
            "catch-all"
        }
        fn kind(&self) -> PageKind {
            PageKind::Unsupported
        }
        fn render(&self, source: &str) -> Result<String, FormatError> {
            Ok(source.to_string())
        }
    }

    #[test]
    fn test_unsupported_kind_never_has_a_format() {
        let mut registry = FormatRegistry::with_defaults();
        registry.register(CatchAllFormat);

        assert!(registry.for_kind(PageKind::Unsupported).is_none());
        assert_eq!(registry.for_kind(PageKind::Markdown).unwrap().name(), "markdown");
    }

    #[test]
    fn test_template_error_description_includes_cause() {
        let err = TemplateFormat.render("{% if %}").unwrap_err();

        let message = err.describe();
        assert!(message.starts_with("failed to parse template"));
        assert!(message.len() > "failed to parse template: ".len());
    }
}
