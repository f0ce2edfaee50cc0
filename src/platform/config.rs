// Memoria - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and
// config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::export::ExportFormat;
use crate::core::label::{LabelQuery, StripMode};
use crate::platform::fs::{read_capped, CappedRead};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for Memoria configuration and data.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/memoria/ or %APPDATA%\Memoria\config\)
    pub config_dir: PathBuf,

    /// Data directory for the session file.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Full path of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[filter]` section.
    pub filter: FilterSection,
    /// `[export]` section.
    pub export: ExportSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[filter]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct FilterSection {
    /// "codepoint" or "cluster".
    pub strip_mode: Option<String>,
    /// Label selected when the CLI gives none and no session exists.
    pub default_label: Option<String>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// "text", "json" or "csv".
    pub format: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub strip_mode: StripMode,
    pub default_label: LabelQuery,
    pub export_format: ExportFormat,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

/// Load and validate `config.toml` at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal problems.
/// A missing file yields defaults with no problems (first run). An unreadable
/// or unparseable file yields defaults plus the error, so the tool still runs
/// but the user is told.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match read_capped(config_path, constants::MAX_CONFIG_FILE_SIZE) {
        Ok(CappedRead::Content(c)) => c,
        Ok(CappedRead::TooLarge { size }) => {
            let err = ConfigError::InvalidValue {
                field: constants::CONFIG_FILE_NAME.to_string(),
                value: format!("{size} bytes"),
                expected: format!("at most {} bytes", constants::MAX_CONFIG_FILE_SIZE),
            };
            return (AppConfig::default(), vec![err]);
        }
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            tracing::warn!(error = %err, "Using default configuration");
            return (AppConfig::default(), vec![err]);
        }
    };

    parse_config(&content, config_path)
}

/// Parse and validate config.toml content.
pub fn parse_config(content: &str, config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let mut problems: Vec<ConfigError> = Vec::new();

    let raw: RawConfig = match toml::from_str(content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            };
            tracing::warn!(error = %err, "Using default configuration");
            problems.push(err);
            return (AppConfig::default(), problems);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field, accumulating all problems.
    let mut config = AppConfig::default();

    // -- Filter: strip_mode --
    if let Some(ref mode) = raw.filter.strip_mode {
        match StripMode::from_name(mode) {
            Some(m) => config.strip_mode = m,
            None => problems.push(ConfigError::InvalidValue {
                field: "[filter] strip_mode".to_string(),
                value: mode.clone(),
                expected: "\"codepoint\" or \"cluster\"".to_string(),
            }),
        }
    }

    // -- Filter: default_label --
    config.default_label = LabelQuery::parse(raw.filter.default_label.as_deref());

    // -- Export: format --
    if let Some(ref format) = raw.export.format {
        match ExportFormat::from_name(format) {
            Some(f) => config.export_format = f,
            None => problems.push(ConfigError::InvalidValue {
                field: "[export] format".to_string(),
                value: format.clone(),
                expected: "\"text\", \"json\" or \"csv\"".to_string(),
            }),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            problems.push(ConfigError::InvalidValue {
                field: "[logging] level".to_string(),
                value: level.clone(),
                expected: constants::VALID_LOG_LEVELS.join(", "),
            });
        }
    }

    if !problems.is_empty() {
        tracing::warn!(
            count = problems.len(),
            "Config validation produced warnings"
        );
    }

    (config, problems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            [filter]
            strip_mode = "cluster"
            default_label = "Happy"

            [export]
            format = "csv"

            [logging]
            level = "DEBUG"
        "#;
        let (config, problems) = parse_config(toml, &path());
        assert!(problems.is_empty(), "unexpected problems: {problems:?}");
        assert_eq!(config.strip_mode, StripMode::Cluster);
        assert_eq!(config.default_label.as_label(), Some("Happy"));
        assert_eq!(config.export_format, ExportFormat::Csv);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_invalid_values_fall_back_individually() {
        let toml = r#"
            [filter]
            strip_mode = "grapheme"
            default_label = "All"

            [export]
            format = "xml"

            [logging]
            level = "loud"
        "#;
        let (config, problems) = parse_config(toml, &path());
        assert_eq!(problems.len(), 3);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let toml = "[ui]\ntheme = \"dark\"\n[filter]\nstrip_mode = \"codepoint\"\n";
        let (config, problems) = parse_config(toml, &path());
        assert!(problems.is_empty());
        assert_eq!(config.strip_mode, StripMode::Codepoint);
    }

    #[test]
    fn test_unparseable_config_uses_defaults() {
        let (config, problems) = parse_config("[filter\nstrip_mode=", &path());
        assert_eq!(config, AppConfig::default());
        assert!(matches!(problems.as_slice(), [ConfigError::TomlParse { .. }]));
    }

    #[test]
    fn test_missing_file_is_not_a_problem() {
        let dir = TempDir::new().unwrap();
        let (config, problems) = load_config(&dir.path().join("config.toml"));
        assert!(problems.is_empty());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(&file, "[export]\nformat = \"json\"\n").unwrap();
        let (config, problems) = load_config(&file);
        assert!(problems.is_empty());
        assert_eq!(config.export_format, ExportFormat::Json);
    }
}
