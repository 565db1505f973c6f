//! Post discovery by filesystem walking.
//!
//! The scanner only identifies post sources; no content is read here.

use std::fs;
use std::path::{Path, PathBuf};

/// Reference to a post's markdown source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRef {
    /// Slash-separated path relative to the source directory, without
    /// extension (e.g., "hello-world", "2024/recap").
    pub slug: String,
    /// Path to the markdown file.
    pub source: PathBuf,
}

/// Discovers posts by walking a source directory.
#[derive(Debug)]
pub struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    /// Create a scanner rooted at `source_dir`.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    /// Root directory being scanned.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Scan the filesystem and return post references sorted by slug.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    pub fn scan(&self) -> Vec<PostRef> {
        let mut refs = Vec::new();
        if self.source_dir.exists() {
            scan_directory(&self.source_dir, "", &mut refs);
        }
        refs.sort_by(|a, b| a.slug.cmp(&b.slug));
        refs
    }
}

/// Collect `.md` files in `dir_path`, recursing into subdirectories.
fn scan_directory(dir_path: &Path, slug_prefix: &str, refs: &mut Vec<PostRef>) {
    let Ok(entries) = fs::read_dir(dir_path) else {
        return;
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        // Skip hidden files/dirs
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());

        if is_dir {
            scan_directory(&path, &join_slug(slug_prefix, &name), refs);
        } else if path.extension().is_some_and(|e| e == "md") {
            let stem = name.strip_suffix(".md").unwrap_or(&name);
            refs.push(PostRef {
                slug: join_slug(slug_prefix, stem),
                source: path,
            });
        }
    }
}

fn join_slug(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slugs(refs: &[PostRef]) -> Vec<&str> {
        refs.iter().map(|r| r.slug.as_str()).collect()
    }

    #[test]
    fn test_join_slug() {
        assert_eq!(join_slug("", "post"), "post");
        assert_eq!(join_slug("2024", "post"), "2024/post");
    }

    #[test]
    fn test_scan_missing_dir() {
        let scanner = Scanner::new("/nonexistent/posts");
        assert!(scanner.scan().is_empty());
    }

    #[test]
    fn test_scan_flat() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello.md"), "# Hello").unwrap();
        fs::write(dir.path().join("about.md"), "About").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let refs = Scanner::new(dir.path()).scan();

        assert_eq!(slugs(&refs), vec!["about", "hello"]);
        assert_eq!(refs[1].source, dir.path().join("hello.md"));
    }

    #[test]
    fn test_scan_nested() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("2024/spring")).unwrap();
        fs::write(dir.path().join("2024/recap.md"), "").unwrap();
        fs::write(dir.path().join("2024/spring/garden.md"), "").unwrap();

        let refs = Scanner::new(dir.path()).scan();

        assert_eq!(slugs(&refs), vec!["2024/recap", "2024/spring/garden"]);
    }

    #[test]
    fn test_scan_skips_hidden() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".drafts")).unwrap();
        fs::write(dir.path().join(".drafts/secret.md"), "").unwrap();
        fs::write(dir.path().join(".hidden.md"), "").unwrap();
        fs::write(dir.path().join("public.md"), "").unwrap();

        let refs = Scanner::new(dir.path()).scan();

        assert_eq!(slugs(&refs), vec!["public"]);
    }
}
