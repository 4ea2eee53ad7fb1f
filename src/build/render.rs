//! The render stage: turning every page's source into HTML, concurrently.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;

use super::format::FormatRegistry;
use super::page::Page;

/// A per-page problem that did not stop the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDiagnostic {
    pub url: String,
    pub source_path: PathBuf,
    pub message: String,
}

impl PageDiagnostic {
    fn new(page: &Page, message: String) -> Self {
        Self {
            url: page.url.clone(),
            source_path: page.source_path.clone(),
            message,
        }
    }
}

/// Pages after rendering, in their original order.
#[derive(Debug)]
pub struct RenderOutput {
    pub pages: Vec<Page>,
    pub diagnostics: Vec<PageDiagnostic>,
}

/// Render every page, one blocking task per page.
///
/// Each task owns its page outright, so no page is written by more than one
/// task. Returns only once every task has finished. Failures stay with their
/// page: it keeps empty content and a diagnostic is recorded; siblings are
/// never cancelled.
pub async fn render_pages(pages: Vec<Page>, registry: Arc<FormatRegistry>) -> RenderOutput {
    let tasks: Vec<(Page, JoinHandle<(Page, Option<PageDiagnostic>)>)> = pages
        .into_iter()
        .map(|page| {
            let fallback = Page::new(
                page.source_path.clone(),
                page.url.clone(),
                page.filename.clone(),
                page.kind,
            );
            let registry = Arc::clone(&registry);
            let handle = tokio::task::spawn_blocking(move || render_page(page, &registry));
            (fallback, handle)
        })
        .collect();

    let mut rendered = Vec::with_capacity(tasks.len());
    let mut diagnostics = Vec::new();

    for (fallback, handle) in tasks {
        match handle.await {
            Ok((page, diagnostic)) => {
                rendered.push(page);
                diagnostics.extend(diagnostic);
            }
            Err(e) => {
                tracing::warn!(
                    url = %fallback.url,
                    path = %fallback.source_path.display(),
                    "render task failed: {}",
                    e
                );
                diagnostics.push(PageDiagnostic::new(
                    &fallback,
                    format!("render task failed: {}", e),
                ));
                rendered.push(fallback);
            }
        }
    }

    RenderOutput {
        pages: rendered,
        diagnostics,
    }
}

/// Render a single page with the format registered for its kind.
pub fn render_page(mut page: Page, registry: &FormatRegistry) -> (Page, Option<PageDiagnostic>) {
    let Some(format) = registry.for_kind(page.kind) else {
        tracing::warn!(
            url = %page.url,
            path = %page.source_path.display(),
            "unsupported file kind, no content rendered"
        );
        let message = format!("unsupported file: {}", page.filename);
        let diagnostic = PageDiagnostic::new(&page, message);
        return (page, Some(diagnostic));
    };

    // Invalid UTF-8 is replaced rather than failing the page
    let result = std::fs::read(&page.source_path)
        .map_err(|e| format!("failed to read source: {}", e))
        .and_then(|bytes| {
            let source = String::from_utf8_lossy(&bytes);
            format.render(&source).map_err(|e| e.describe())
        });

    match result {
        Ok(html) => {
            tracing::trace!(url = %page.url, format = format.name(), "rendered page");
            page.html_content = html;
            (page, None)
        }
        Err(message) => {
            tracing::warn!(
                url = %page.url,
                path = %page.source_path.display(),
                format = format.name(),
                "{}",
                message
            );
            let diagnostic = PageDiagnostic::new(&page, message);
            (page, Some(diagnostic))
        }
    }
}
