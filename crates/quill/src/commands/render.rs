//! `quill render` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use quill_config::{CliSettings, Config};

use super::RenderFlags;
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render (default: stdin; `-` also reads stdin).
    file: Option<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    flags: RenderFlags,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read,
    /// or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            theme: self.flags.theme,
            escape_html: self.flags.resolve_escape_html(),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let markdown = read_input(self.file.as_deref())?;
        let html = config.renderer().render(&markdown);
        tracing::info!(
            input = markdown.len(),
            output = html.len(),
            theme = config.render.theme.name(),
            "Rendered document"
        );

        write_output(self.output.as_deref(), &html)
    }
}

/// Read markdown from a file, or stdin when no path (or `-`) is given.
fn read_input(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut buffer = String::new();
            std::io::stdin().lock().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Write HTML to a file, or stdout when no path is given.
fn write_output(output: Option<&Path>, html: &str) -> Result<(), CliError> {
    if let Some(path) = output {
        return std::fs::write(path, html).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.md");
        std::fs::write(&path, "# Title").unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), "# Title");
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/post.md"))).unwrap_err();

        assert!(matches!(err, CliError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/post.md"));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.html");

        write_output(Some(&path), "<p>hi</p>").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_write_output_bad_path() {
        let err = write_output(Some(Path::new("/nonexistent/dir/post.html")), "").unwrap_err();

        assert!(matches!(err, CliError::Write { .. }));
    }
}
