//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod render;

use clap::Args;
use quill_renderer::Theme;

pub(crate) use build::BuildArgs;
pub(crate) use render::RenderArgs;

/// Rendering flags shared by `render` and `build`.
#[derive(Args)]
pub(crate) struct RenderFlags {
    /// Element class theme (overrides config).
    #[arg(long, value_name = "plain|tailwind")]
    theme: Option<Theme>,

    /// Escape raw HTML in the markdown source.
    #[arg(long)]
    escape_html: bool,

    /// Pass raw HTML through unchanged.
    #[arg(long, conflicts_with = "escape_html")]
    no_escape_html: bool,
}

impl RenderFlags {
    /// Resolve `escape_html` from --escape-html/--no-escape-html flags.
    fn resolve_escape_html(&self) -> Option<bool> {
        if self.no_escape_html {
            Some(false)
        } else {
            self.escape_html.then_some(true)
        }
    }
}
