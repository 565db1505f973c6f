//! Configuration management for Quill.
//!
//! Parses `quill.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `posts.source_dir`
//! - `posts.output_dir`

mod expand;

use quill_renderer::{ElementClasses, MarkdownRenderer, Theme};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override posts source directory.
    pub source_dir: Option<PathBuf>,
    /// Override rendered output directory.
    pub output_dir: Option<PathBuf>,
    /// Override render theme.
    pub theme: Option<Theme>,
    /// Override raw HTML escaping.
    pub escape_html: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Posts configuration (paths are relative strings from TOML).
    posts: PostsConfigRaw,
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Resolved posts configuration (set after loading).
    #[serde(skip)]
    pub posts_resolved: PostsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw posts configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PostsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved posts configuration with absolute paths.
#[derive(Debug, Default)]
pub struct PostsConfig {
    /// Directory containing markdown posts.
    pub source_dir: PathBuf,
    /// Directory receiving rendered HTML fragments.
    pub output_dir: PathBuf,
}

/// Rendering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Built-in class set.
    pub theme: Theme,
    /// Escape raw HTML in post sources.
    pub escape_html: bool,
    /// Per-element class overrides applied on top of the theme.
    pub classes: ElementClasses,
}

impl RenderConfig {
    /// Effective class set: theme classes with overrides applied.
    #[must_use]
    pub fn effective_classes(&self) -> ElementClasses {
        self.theme.classes().merge(&self.classes)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`posts.source_dir`").
        field: String,
        /// Error message (e.g., "${`BLOG_POSTS`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quill.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Build the markdown renderer described by this configuration.
    #[must_use]
    pub fn renderer(&self) -> MarkdownRenderer {
        let renderer = MarkdownRenderer::new().with_classes(self.render.effective_classes());
        if self.render.escape_html {
            renderer.with_html_escaping()
        } else {
            renderer
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.posts_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.posts_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(theme) = settings.theme {
            self.render.theme = theme;
        }
        if let Some(escape_html) = settings.escape_html {
            self.render.escape_html = escape_html;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            posts: PostsConfigRaw::default(),
            render: RenderConfig::default(),
            posts_resolved: PostsConfig {
                source_dir: base.join("posts"),
                output_dir: base.join("public"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_posts()?;
        self.validate_classes()?;
        Ok(())
    }

    /// Validate posts directories.
    fn validate_posts(&self) -> Result<(), ConfigError> {
        if self.posts_resolved.source_dir == self.posts_resolved.output_dir {
            return Err(ConfigError::Validation(format!(
                "posts.output_dir must differ from posts.source_dir ({})",
                self.posts_resolved.source_dir.display()
            )));
        }
        Ok(())
    }

    /// Validate class overrides.
    ///
    /// Class values are written into markup before later passes run, so they
    /// must not contain any of [`quill_renderer::RESERVED_CLASS_CHARS`].
    fn validate_classes(&self) -> Result<(), ConfigError> {
        self.render.classes.validate().map_err(|e| {
            ConfigError::Validation(format!(
                "render.classes.{} contains unsupported character {:?}",
                e.element, e.found
            ))
        })
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.posts.source_dir {
            self.posts.source_dir = Some(expand::expand_env(dir, "posts.source_dir")?);
        }
        if let Some(ref dir) = self.posts.output_dir {
            self.posts.output_dir = Some(expand::expand_env(dir, "posts.output_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        self.posts_resolved = PostsConfig {
            source_dir: resolve_dir(
                config_dir,
                self.posts.source_dir.as_deref(),
                "posts.source_dir",
                "posts",
            )?,
            output_dir: resolve_dir(
                config_dir,
                self.posts.output_dir.as_deref(),
                "posts.output_dir",
                "public",
            )?,
        };

        Ok(())
    }
}

/// Join a configured directory (or its default) onto the config directory.
fn resolve_dir(
    config_dir: &Path,
    path: Option<&str>,
    field: &str,
    default: &str,
) -> Result<PathBuf, ConfigError> {
    let path = path.unwrap_or(default);
    require_non_empty(path, field)?;
    Ok(config_dir.join(path))
}
