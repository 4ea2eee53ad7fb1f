use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ProjectSettings;

use super::format::FormatRegistry;
use super::page::Project;
use super::render::{PageDiagnostic, render_pages};
use super::routes::{RouteError, check_collisions, discover_pages};
use super::write::{WriteError, write_pages};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("route error: {0}")]
    Route(#[from] RouteError),

    #[error("write error: {0}")]
    Write(#[from] WriteError),
}

pub struct BuildResult {
    pub output_dir: PathBuf,
    /// Pages discovered in the input tree
    pub pages: usize,
    pub written: usize,
    /// Pages left unwritten because they had no content
    pub skipped: usize,
    /// Per-page problems that did not stop the build
    pub diagnostics: Vec<PageDiagnostic>,
}

impl BuildResult {
    /// True if every page rendered without a diagnostic.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub struct Builder {
    settings: ProjectSettings,
    registry: Arc<FormatRegistry>,
}

impl Builder {
    pub fn new(settings: ProjectSettings) -> Self {
        Self {
            settings,
            registry: Arc::new(FormatRegistry::with_defaults()),
        }
    }

    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Resolve routes -> Page[] (then check for URL collisions)
        // 2. Render every page concurrently, wait for all of them
        // 3. Write each page to the output directory
        let write_empty = self.settings.config.build.write_empty;
        let mut project = Project::new(
            self.settings.project_path.clone(),
            self.settings.input_dir(),
            self.settings.output_dir(),
        );
        tracing::debug!(project = %project.path.display(), "starting build");

        // Step 1: Discover pages
        project.pages = discover_pages(&project.input_dir)?;
        tracing::info!(
            input = %project.input_dir.display(),
            "found {} page(s)",
            project.pages.len()
        );
        check_collisions(&project.pages, write_empty)?;

        // Step 2: Render. Every task has finished once this returns.
        let pages = std::mem::take(&mut project.pages);
        let output = render_pages(pages, Arc::clone(&self.registry)).await;
        project.pages = output.pages;
        tracing::info!(
            "rendered {} page(s), {} with problems",
            project.pages.len(),
            output.diagnostics.len()
        );

        // Step 3: Write
        let summary = write_pages(&project.pages, &project.output_dir, write_empty)?;
        tracing::info!(
            output = %project.output_dir.display(),
            "wrote {} file(s), skipped {}",
            summary.written,
            summary.skipped
        );

        Ok(BuildResult {
            output_dir: project.output_dir,
            pages: project.pages.len(),
            written: summary.written,
            skipped: summary.skipped,
            diagnostics: output.diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn read(root: &Path, relative: &str) -> String {
        std::fs::read_to_string(root.join(relative)).unwrap()
    }

    fn builder(root: &Path, write_empty: bool) -> Builder {
        let mut config = ProjectConfig::default();
        config.build.write_empty = write_empty;
        Builder::new(ProjectSettings::new(root.to_path_buf(), config))
    }

    fn sample_site(root: &Path) {
        write(root, "src/+page.html", "<h1>Home</h1>");
        write(root, "src/blog/+page.html", "<h1>Blog</h1>");
        write(root, "src/blog/article-one.md", "# Article One\n\nHello.");
        write(root, "src/notes.txt", "not a page format");
    }

    #[tokio::test]
    async fn test_build_writes_every_page() {
        let dir = TempDir::new().unwrap();
        sample_site(dir.path());

        let result = builder(dir.path(), true).build().await.unwrap();

        assert_eq!(result.output_dir, dir.path().join("dist"));
        assert_eq!(result.pages, 4);
        assert_eq!(result.written, 4);
        assert_eq!(read(dir.path(), "dist/index.html"), "<h1>Home</h1>");
        assert_eq!(read(dir.path(), "dist/blog/index.html"), "<h1>Blog</h1>");
        assert!(read(dir.path(), "dist/blog/article-one/index.html").contains("Article One"));
        assert_eq!(read(dir.path(), "dist/notes/index.html"), "");

        assert!(!result.is_clean());
        assert_eq!(result.diagnostics[0].url, "/notes");
    }

    #[tokio::test]
    async fn test_unsupported_pages_skipped_without_write_empty() {
        let dir = TempDir::new().unwrap();
        sample_site(dir.path());

        let result = builder(dir.path(), false).build().await.unwrap();

        assert_eq!(result.written, 3);
        assert_eq!(result.skipped, 1);
        assert!(!dir.path().join("dist/notes").exists());
    }

    #[tokio::test]
    async fn test_failed_template_leaves_siblings_intact() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/+page.html", "<h1>Home</h1>");
        write(dir.path(), "src/broken/+page.html", "{% if %}");
        write(dir.path(), "src/post.md", "post");

        let result = builder(dir.path(), true).build().await.unwrap();

        assert_eq!(result.written, 3);
        assert_eq!(read(dir.path(), "dist/broken/index.html"), "");
        assert_eq!(read(dir.path(), "dist/post/index.html"), "<p>post</p>\n");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].url, "/broken");
    }

    #[tokio::test]
    async fn test_rebuild_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        sample_site(dir.path());
        let builder = builder(dir.path(), true);

        builder.build().await.unwrap();
        let first = std::fs::read(dir.path().join("dist/blog/article-one/index.html")).unwrap();
        builder.build().await.unwrap();
        let second = std::fs::read(dir.path().join("dist/blog/article-one/index.html")).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_input_dir_is_fatal() {
        let dir = TempDir::new().unwrap();

        let result = builder(dir.path(), true).build().await;

        assert!(matches!(result, Err(BuildError::Route(RouteError::PathNotFound(_)))));
    }

    #[tokio::test]
    async fn test_collision_stops_build_before_output() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/about.md", "one");
        write(dir.path(), "src/about/+page.html", "two");

        let result = builder(dir.path(), true).build().await;

        assert!(matches!(
            result,
            Err(BuildError::Route(RouteError::UrlCollision { .. }))
        ));
        assert!(!dir.path().join("dist").exists());
    }

    #[tokio::test]
    async fn test_write_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/blog/+page.html", "blog");
        // The output directory is a file, so nothing can be created under it
        write(dir.path(), "dist", "");

        let result = builder(dir.path(), true).build().await;

        assert!(matches!(result, Err(BuildError::Write(_))));
    }
}
