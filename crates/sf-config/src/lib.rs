//! Configuration management for SiteForge.
//!
//! Parses `siteforge.toml` with serde and discovers it in the working
//! directory or its parents. CLI flags override file values through
//! [`CliSettings`].
//!
//! ```toml
//! [output]
//! lang = "en"
//! escape = true
//!
//! [export]
//! output_dir = "${SITE_OUT:-dist}"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields: `output.lang`, `export.output_dir`.

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "siteforge.toml";

/// Default export directory, relative to the config file.
const DEFAULT_OUTPUT_DIR: &str = "dist";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override document language.
    pub lang: Option<String>,
    /// Override HTML escaping of user content.
    pub escape: Option<bool>,
    /// Override export directory.
    pub output_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generated document settings.
    pub output: OutputConfig,
    /// Export settings as written in the file.
    export: ExportConfigRaw,

    /// Resolved export settings (set after loading).
    #[serde(skip)]
    pub export_resolved: ExportConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Generated document settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Value of `<html lang>`.
    pub lang: String,
    /// HTML-escape user content and drop inline click handlers.
    pub escape: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            lang: "fr".to_owned(),
            escape: false,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExportConfigRaw {
    output_dir: Option<String>,
}

/// Resolved export settings with absolute paths.
#[derive(Debug, Default)]
pub struct ExportConfig {
    /// Directory exported files are written to.
    pub output_dir: PathBuf,
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
        /// Config field path (e.g., "`export.output_dir`").
        field: String,
        /// Error message (e.g., "${`SITE_OUT`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `siteforge.toml` in the current directory and parents, falling
    /// back to defaults when none exists.
    ///
    /// CLI settings are applied after loading, then the result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value is invalid.
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

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(lang) = &settings.lang {
            self.output.lang.clone_from(lang);
        }
        if let Some(escape) = settings.escape {
            self.output.escape = escape;
        }
        if let Some(output_dir) = &settings.output_dir {
            self.export_resolved.output_dir.clone_from(output_dir);
        }
    }

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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            output: OutputConfig::default(),
            export: ExportConfigRaw::default(),
            export_resolved: ExportConfig {
                output_dir: base.join(DEFAULT_OUTPUT_DIR),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lang = &self.output.lang;
        require_non_empty(lang, "output.lang")?;
        if !lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ConfigError::Validation(format!(
                "output.lang must be a language tag such as \"en\" or \"pt-BR\", got \"{lang}\""
            )));
        }
        if self.export_resolved.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "export.output_dir cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.output.lang = expand::expand_env(&self.output.lang, "output.lang")?;
        if let Some(ref dir) = self.export.output_dir {
            self.export.output_dir = Some(expand::expand_env(dir, "export.output_dir")?);
        }
        Ok(())
    }

    /// Resolve the export directory against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let output_dir = self.export.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR);
        require_non_empty(output_dir, "export.output_dir")?;
        self.export_resolved = ExportConfig {
            output_dir: config_dir.join(output_dir),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(config.output.lang, "fr");
        assert!(!config.output.escape);
        assert_eq!(config.export_resolved.output_dir, PathBuf::from("/site/dist"));
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.output.lang, "fr");
        assert!(!config.output.escape);
    }

    #[test]
    fn test_parse_output_config() {
        let toml = r#"
[output]
lang = "en"
escape = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.output.lang, "en");
        assert!(config.output.escape);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[export]
output_dir = "public/site"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project")).unwrap();
        assert_eq!(
            config.export_resolved.output_dir,
            PathBuf::from("/project/public/site")
        );
    }

    #[test]
    fn test_resolve_paths_rejects_empty_output_dir() {
        let toml = r#"
[export]
output_dir = ""
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.resolve_paths(Path::new("/project")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: export.output_dir cannot be empty"
        );
    }

    #[test]
    fn test_validate_lang() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.validate().unwrap();

        config.output.lang = "pt-BR".to_owned();
        config.validate().unwrap();

        config.output.lang = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.output.lang = "en\"><script>".to_owned();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.apply_cli_settings(&CliSettings {
            lang: Some("en".to_owned()),
            escape: Some(true),
            output_dir: Some(PathBuf::from("/tmp/out")),
        });
        assert_eq!(config.output.lang, "en");
        assert!(config.output.escape);
        assert_eq!(config.export_resolved.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.output.lang, "fr");
        assert!(!config.output.escape);
        assert_eq!(config.export_resolved.output_dir, PathBuf::from("/site/dist"));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SF_TEST_CONFIG_LANG", "nl");
            std::env::remove_var("SF_TEST_CONFIG_OUT");
        }

        let toml = r#"
[output]
lang = "${SF_TEST_CONFIG_LANG}"

[export]
output_dir = "${SF_TEST_CONFIG_OUT:-build}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        assert_eq!(config.output.lang, "nl");
        assert_eq!(config.export.output_dir.as_deref(), Some("build"));

        unsafe {
            std::env::remove_var("SF_TEST_CONFIG_LANG");
        }
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[output]\nlang = \"en\"\n\n[export]\noutput_dir = \"out\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.output.lang, "en");
        assert_eq!(config.export_resolved.output_dir, dir.path().join("out"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[output]\nlang = \"en\"\n").unwrap();

        let settings = CliSettings {
            lang: Some("de".to_owned()),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.output.lang, "de");
        assert_eq!(config.export_resolved.output_dir, dir.path().join("dist"));
    }

    #[test]
    fn test_load_rejects_invalid_cli_lang() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            lang: Some("fr fr".to_owned()),
            ..CliSettings::default()
        };
        assert!(matches!(
            Config::load(Some(&path), Some(&settings)),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/siteforge.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[output\nlang = ").unwrap();
        assert!(matches!(
            Config::load(Some(&path), None),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_unknown_fields_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[output]\ntheme = \"dark\"\n").unwrap();
        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.output.lang, "fr");
    }
}
