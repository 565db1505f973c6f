//! `quill build` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_config::{CliSettings, Config};
use quill_site::PostBuilder;

use super::RenderFlags;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Posts source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for rendered HTML (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    flags: RenderFlags,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the source directory is
    /// missing, or any post fails to build.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            escape_html: self.flags.resolve_escape_html(),
            theme: self.flags.theme,
            source_dir: self.source_dir,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let posts = &config.posts_resolved;

        output.info(&format!("Source directory: {}", posts.source_dir.display()));
        output.info(&format!("Output directory: {}", posts.output_dir.display()));
        output.info(&format!("Theme: {}", config.render.theme.name()));

        let builder = PostBuilder::new(&posts.source_dir, config.renderer());
        let report = builder.build(&posts.output_dir)?;

        if report.built.is_empty() && report.errors.is_empty() {
            output.warning("No posts found");
            return Ok(());
        }

        for error in &report.errors {
            output.warning(&format!("  {error}"));
        }

        if report.is_success() {
            output.success(&format!("Built {} post(s)", report.built.len()));
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "{} of {} post(s) failed to build",
                report.errors.len(),
                report.built.len() + report.errors.len()
            )))
        }
    }
}
