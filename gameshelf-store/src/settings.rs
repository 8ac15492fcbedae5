//! User settings and data-file resolution.
//!
//! The settings file lives at `~/.config/gameshelf/settings.toml`:
//!
//! ```toml
//! [data]
//! file = "/home/me/gameshelf.txt"
//! format = "text"
//!
//! [general]
//! save_on_exit = true
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::format::Format;
use crate::gateway::write_atomic;

/// Environment variable that overrides the saved data file.
pub const DATA_ENV_VAR: &str = "GAMESHELF_DATA";

/// Data file used when nothing else names one.
pub const DEFAULT_DATA_FILE: &str = "gameshelf.txt";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub general: GeneralSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Save the catalog when the interactive shell exits.
    #[serde(default = "default_true")]
    pub save_on_exit: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self { save_on_exit: true }
    }
}

/// Returns `~/.config/gameshelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gameshelf").join("settings.toml")
}

/// Load settings from the default location.
pub fn load_settings() -> AppSettings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`, returning defaults if missing or corrupt.
pub fn load_settings_from(path: &Path) -> AppSettings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

pub fn save_settings(settings: &AppSettings) -> Result<(), StoreError> {
    save_settings_to(&settings_path(), settings)
}

/// Save settings atomically (write to temp, then rename).
pub fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), StoreError> {
    let contents =
        toml::to_string_pretty(settings).map_err(|e| StoreError::settings(e.to_string()))?;
    write_atomic(path, &contents)
}

/// Which setting chose the data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    CommandLine,
    Environment,
    Settings,
    Default,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandLine => f.write_str("--data"),
            Self::Environment => f.write_str(DATA_ENV_VAR),
            Self::Settings => f.write_str("settings"),
            Self::Default => f.write_str("default"),
        }
    }
}

/// Resolve the data file using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. `GAMESHELF_DATA` environment variable
/// 3. Saved `data.file` in `settings.toml`
/// 4. `gameshelf.txt` in the current directory
pub fn resolve_data_path(
    cli_override: Option<PathBuf>,
    settings: &AppSettings,
) -> (PathBuf, DataSource) {
    resolve_data_path_with(cli_override, std::env::var_os(DATA_ENV_VAR), settings)
}

/// [`resolve_data_path`] with the environment value passed in.
pub fn resolve_data_path_with(
    cli_override: Option<PathBuf>,
    env_value: Option<OsString>,
    settings: &AppSettings,
) -> (PathBuf, DataSource) {
    if let Some(p) = cli_override {
        return (p, DataSource::CommandLine);
    }
    if let Some(p) = env_value.filter(|v| !v.is_empty()) {
        return (PathBuf::from(p), DataSource::Environment);
    }
    if let Some(p) = settings.data.file.as_ref().filter(|p| !p.as_os_str().is_empty()) {
        return (p.clone(), DataSource::Settings);
    }
    (PathBuf::from(DEFAULT_DATA_FILE), DataSource::Default)
}

/// Pick the format: explicit choice, then the saved one, then the file extension.
pub fn resolve_format(cli_override: Option<Format>, settings: &AppSettings, path: &Path) -> Format {
    cli_override
        .or(settings.data.format)
        .unwrap_or_else(|| Format::from_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = load_settings_from(&tmp.path().join("settings.toml"));
        assert_eq!(settings, AppSettings::default());
        assert!(settings.general.save_on_exit);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[data\nfile = ").unwrap();
        assert_eq!(load_settings_from(&path), AppSettings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[data]\nformat = \"json\"\n").unwrap();

        let settings = load_settings_from(&path);
        assert_eq!(settings.data.format, Some(Format::Json));
        assert_eq!(settings.data.file, None);
        assert!(settings.general.save_on_exit);
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("settings.toml");
        let settings = AppSettings {
            data: DataSettings {
                file: Some(PathBuf::from("/srv/shelf.json")),
                format: Some(Format::Json),
            },
            general: GeneralSettings {
                save_on_exit: false,
            },
        };

        save_settings_to(&path, &settings).unwrap();
        assert_eq!(load_settings_from(&path), settings);
        assert!(!tmp.path().join("nested").join("settings.toml.tmp").exists());
    }

    #[test]
    fn test_resolve_data_path_priority() {
        let mut settings = AppSettings::default();
        settings.data.file = Some(PathBuf::from("saved.txt"));

        assert_eq!(
            resolve_data_path_with(
                Some(PathBuf::from("cli.txt")),
                Some("env.txt".into()),
                &settings
            ),
            (PathBuf::from("cli.txt"), DataSource::CommandLine)
        );
        assert_eq!(
            resolve_data_path_with(None, Some("env.txt".into()), &settings),
            (PathBuf::from("env.txt"), DataSource::Environment)
        );
        assert_eq!(
            resolve_data_path_with(None, Some("".into()), &settings),
            (PathBuf::from("saved.txt"), DataSource::Settings)
        );
        assert_eq!(
            resolve_data_path_with(None, None, &AppSettings::default()),
            (PathBuf::from(DEFAULT_DATA_FILE), DataSource::Default)
        );
    }

    #[test]
    fn test_data_source_labels() {
        assert_eq!(DataSource::CommandLine.to_string(), "--data");
        assert_eq!(DataSource::Environment.to_string(), "GAMESHELF_DATA");
    }

    #[test]
    fn test_resolve_format() {
        let mut settings = AppSettings::default();
        let json = Path::new("shelf.json");
        let text = Path::new("shelf.txt");

        assert_eq!(resolve_format(None, &settings, json), Format::Json);
        assert_eq!(resolve_format(Some(Format::Text), &settings, json), Format::Text);

        settings.data.format = Some(Format::Json);
        assert_eq!(resolve_format(None, &settings, text), Format::Json);
    }
}
