// DocWatch - platform/config.rs
//
// Platform-specific path resolution and config.toml loading with startup
// validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for DocWatch data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/docwatch/ or %APPDATA%\DocWatch\)
    pub config_dir: PathBuf,

    /// Data directory holding the document store file.
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

    /// Default location of the JSON document store.
    pub fn store_file(&self) -> PathBuf {
        self.data_dir.join(constants::STORE_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[query]` section.
    pub query: QuerySection,
    /// `[import]` section.
    pub import: ImportSection,
    /// `[storage]` section.
    pub storage: StorageSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[query]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct QuerySection {
    /// Default expiry window in days for `list --expiring`.
    pub default_window_days: Option<i64>,
}

/// `[import]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ImportSection {
    /// Data rows shown by the import preview.
    pub preview_rows: Option<usize>,
}

/// `[storage]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Override path for the JSON document store file.
    pub file: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration with defaults applied.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Default expiry window in days.
    pub default_window_days: i64,

    /// Data rows shown by the import preview.
    pub preview_rows: usize,

    /// Override path for the store file (None = platform default).
    pub store_file: Option<PathBuf>,

    /// Log level from config (None = built-in default).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_window_days: constants::DEFAULT_WINDOW_DAYS,
            preview_rows: constants::DEFAULT_PREVIEW_ROWS,
            store_file: None,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with an error warning --
/// the application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all warnings.
    let mut config = AppConfig::default();

    // -- Query: default_window_days --
    if let Some(days) = raw.query.default_window_days {
        if (0..=constants::MAX_WINDOW_DAYS).contains(&days) {
            config.default_window_days = days;
        } else {
            warnings.push(format!(
                "[query] default_window_days = {days} is out of range (0-{}). Using default ({}).",
                constants::MAX_WINDOW_DAYS,
                constants::DEFAULT_WINDOW_DAYS,
            ));
        }
    }

    // -- Import: preview_rows --
    if let Some(rows) = raw.import.preview_rows {
        if (1..=constants::MAX_PREVIEW_ROWS).contains(&rows) {
            config.preview_rows = rows;
        } else {
            warnings.push(format!(
                "[import] preview_rows = {rows} is out of range (1-{}). Using default ({}).",
                constants::MAX_PREVIEW_ROWS,
                constants::DEFAULT_PREVIEW_ROWS,
            ));
        }
    }

    // -- Storage: file --
    if let Some(ref file) = raw.storage.file {
        if !file.trim().is_empty() {
            config.store_file = Some(PathBuf::from(file));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) {
        std::fs::write(dir.path().join(constants::CONFIG_FILE_NAME), content).unwrap();
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.default_window_days, constants::DEFAULT_WINDOW_DAYS);
        assert_eq!(config.preview_rows, constants::DEFAULT_PREVIEW_ROWS);
    }

    #[test]
    fn test_valid_config_applies_values() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
            [query]
            default_window_days = 14

            [import]
            preview_rows = 10

            [storage]
            file = "/tmp/docs.json"

            [logging]
            level = "debug"
            "#,
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.default_window_days, 14);
        assert_eq!(config.preview_rows, 10);
        assert_eq!(config.store_file, Some(PathBuf::from("/tmp/docs.json")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_warn_and_default() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
            [query]
            default_window_days = -3

            [import]
            preview_rows = 0
            "#,
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 2);
        assert_eq!(config.default_window_days, constants::DEFAULT_WINDOW_DAYS);
        assert_eq!(config.preview_rows, constants::DEFAULT_PREVIEW_ROWS);
    }

    #[test]
    fn test_unparseable_config_warns_and_defaults() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "not [ valid toml");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert_eq!(config.default_window_days, constants::DEFAULT_WINDOW_DAYS);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
            [query]
            default_window_days = 7
            some_future_key = true

            [future_section]
            x = 1
            "#,
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.default_window_days, 7);
    }
}
