//! Parallel post builder.
//!
//! Renders every post found by the [`Scanner`] and writes one HTML fragment
//! per post, mirroring the source layout under the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use quill_renderer::MarkdownRenderer;
use rayon::prelude::*;

use crate::scanner::{PostRef, Scanner};

/// Error returned by the post builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Source directory does not exist.
    #[error("Posts directory not found: {}", .0.display())]
    SourceMissing(PathBuf),
    /// Reading a source or writing an output failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Failure to build a single post.
#[derive(Debug, thiserror::Error)]
#[error("{slug}: {error}")]
pub struct PostError {
    /// Slug of the failed post.
    pub slug: String,
    /// What went wrong.
    #[source]
    pub error: BuildError,
}

/// Outcome of a build.
///
/// Contains both successfully built posts and per-post failures; one bad
/// file does not stop the others from building.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Slugs written, sorted.
    pub built: Vec<String>,
    /// Posts that failed.
    pub errors: Vec<PostError>,
}

impl BuildReport {
    /// Whether every discovered post was built.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Renders a directory of markdown posts to HTML fragments.
#[derive(Debug)]
pub struct PostBuilder {
    scanner: Scanner,
    renderer: MarkdownRenderer,
}

impl PostBuilder {
    /// Create a builder reading posts from `source_dir`.
    pub fn new(source_dir: impl Into<PathBuf>, renderer: MarkdownRenderer) -> Self {
        Self {
            scanner: Scanner::new(source_dir),
            renderer,
        }
    }

    /// Render every post into `output_dir`.
    ///
    /// Uses the global rayon thread pool; the renderer is shared read-only
    /// across workers.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::SourceMissing` if the source directory does not
    /// exist, or `BuildError::Io` if the output directory cannot be created.
    /// Per-post failures are reported in [`BuildReport::errors`].
    pub fn build(&self, output_dir: &Path) -> Result<BuildReport, BuildError> {
        let source_dir = self.scanner.source_dir();
        if !source_dir.is_dir() {
            return Err(BuildError::SourceMissing(source_dir.to_path_buf()));
        }

        let posts = self.scanner.scan();
        tracing::info!(
            source = %source_dir.display(),
            count = posts.len(),
            "Discovered posts"
        );

        fs::create_dir_all(output_dir).map_err(BuildError::io(output_dir))?;

        let results: Vec<Result<String, PostError>> = posts
            .par_iter()
            .map(|post| self.build_post(post, output_dir))
            .collect();

        let mut report = BuildReport::default();
        for result in results {
            match result {
                Ok(slug) => report.built.push(slug),
                Err(e) => {
                    tracing::warn!(slug = %e.slug, error = %e.error, "Failed to build post");
                    report.errors.push(e);
                }
            }
        }

        tracing::info!(
            built = report.built.len(),
            failed = report.errors.len(),
            "Build completed"
        );
        Ok(report)
    }

    /// Read, render and write a single post.
    fn build_post(&self, post: &PostRef, output_dir: &Path) -> Result<String, PostError> {
        let fail = |error| PostError {
            slug: post.slug.clone(),
            error,
        };

        let markdown = fs::read_to_string(&post.source)
            .map_err(BuildError::io(&post.source))
            .map_err(fail)?;
        let html = self.renderer.render(&markdown);

        let target = output_path(output_dir, &post.slug);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .map_err(BuildError::io(parent))
                .map_err(fail)?;
        }
        fs::write(&target, html)
            .map_err(BuildError::io(&target))
            .map_err(fail)?;

        tracing::debug!(slug = %post.slug, target = %target.display(), "Built post");
        Ok(post.slug.clone())
    }
}

/// Output file for a slug: `<output_dir>/<slug>.html`.
fn output_path(output_dir: &Path, slug: &str) -> PathBuf {
    let mut path = output_dir.to_path_buf();
    path.extend(slug.split('/'));
    let mut file = path.into_os_string();
    file.push(".html");
    PathBuf::from(file)
}
