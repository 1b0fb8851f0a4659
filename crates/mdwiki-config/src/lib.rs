//! Configuration management for mdwiki.
//!
//! Parses `mdwiki.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "mdwiki.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output trimming.
    pub trim: Option<bool>,
    /// Override the trailing newline.
    pub trailing_newline: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Markdown extensions.
    pub parser: ParserConfig,
    /// Post-processing of the rendered markup.
    pub output: OutputConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Markdown extensions to enable. All default to on.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct ParserConfig {
    /// GFM pipe tables.
    pub tables: bool,
    /// `~~strikethrough~~`.
    pub strikethrough: bool,
    /// `- [x]` task list items.
    pub tasklists: bool,
    /// `[^label]` footnotes.
    pub footnotes: bool,
    /// Definition lists.
    pub definition_lists: bool,
    /// Bare URLs and email addresses become links.
    pub autolinks: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            tasklists: true,
            footnotes: true,
            definition_lists: true,
            autolinks: true,
        }
    }
}

/// Post-processing of the rendered markup.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Strip leading and trailing whitespace.
    pub trim: bool,
    /// End the output with a newline.
    pub trailing_newline: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            trim: false,
            trailing_newline: true,
        }
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
    /// TOML parsing error, including unknown keys.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdwiki.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_from(&cwd)),
        };
        Self::load_with(config_path.is_some(), discovered.as_deref(), cli_settings)
    }

    fn load_with(
        explicit: bool,
        path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if explicit && !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(trim) = settings.trim {
            self.output.trim = trim;
        }
        if let Some(trailing_newline) = settings.trailing_newline {
            self.output.trailing_newline = trailing_newline;
        }
    }

    /// Search for a config file in `start` and its parents.
    #[must_use]
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.parser.tables);
        assert!(config.parser.strikethrough);
        assert!(config.parser.tasklists);
        assert!(config.parser.footnotes);
        assert!(config.parser.definition_lists);
        assert!(config.parser.autolinks);
        assert!(!config.output.trim);
        assert!(config.output.trailing_newline);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.parser.footnotes);
        assert!(config.output.trailing_newline);
    }

    #[test]
    fn test_parse_parser_config() {
        let toml = r"
[parser]
tables = false
footnotes = false
autolinks = false
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.parser.tables);
        assert!(!config.parser.footnotes);
        assert!(!config.parser.autolinks);
        assert!(config.parser.strikethrough);
    }

    #[test]
    fn test_parse_output_config() {
        let toml = r"
[output]
trim = true
trailing_newline = false
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.output.trim);
        assert!(!config.output.trailing_newline);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<Config, _> = toml::from_str("[parser]\ntabels = true\n");
        assert!(result.is_err());

        let result: Result<Config, _> = toml::from_str("[server]\nport = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings_trim() {
        let mut config = Config::default();
        let overrides = CliSettings {
            trim: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(config.output.trim);
        assert!(config.output.trailing_newline); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert!(!config.output.trim);
        assert!(config.output.trailing_newline);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[output]\ntrim = true\n");

        let config = Config::load(Some(&path), None).unwrap();

        assert!(config.output.trim);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_explicit_path_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(
            matches!(err, ConfigError::NotFound(ref p) if *p == path),
            "Expected ConfigError::NotFound, got {err:?}"
        );
    }

    #[test]
    fn test_load_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[output]\ntrim = \"yes\"\n");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
        assert!(err.to_string().starts_with("TOML parse error"));
    }

    #[test]
    fn test_cli_settings_override_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[output]\ntrim = true\n");
        let settings = CliSettings {
            trim: Some(false),
            trailing_newline: Some(false),
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert!(!config.output.trim);
        assert!(!config.output.trailing_newline);
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_from(&nested), Some(path));
    }

    #[test]
    fn test_discover_prefers_nearest() {
        let dir = TempDir::new().unwrap();
        write_config(dir.path(), "");
        let nested = dir.path().join("sub");
        std::fs::create_dir(&nested).unwrap();
        let near = write_config(&nested, "");

        assert_eq!(Config::discover_from(&nested), Some(near));
    }

    #[test]
    fn test_discovered_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "[parser]\ntasklists = false\n");

        let config = Config::load_with(false, Some(&path), None).unwrap();

        assert!(!config.parser.tasklists);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_no_config_uses_defaults() {
        let settings = CliSettings {
            trim: Some(true),
            ..Default::default()
        };

        let config = Config::load_with(false, None, Some(&settings)).unwrap();

        assert!(config.output.trim);
        assert!(config.config_path.is_none());
    }
}
