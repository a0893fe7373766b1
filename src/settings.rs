use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};

pub const CURRENT_VERSION: u32 = 1;
const SETTINGS_FILENAME: &str = "config.yaml";
const APP_NAME: &str = "region-picker";

/// Verbosity of the log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Where saved regions go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Only log the saved region
    #[default]
    Log,
    /// Print each saved region to stdout as a JSON line
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

fn default_log_file() -> PathBuf {
    PathBuf::from("region-picker.log")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            log_level: LogLevel::default(),
            log_file: default_log_file(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Settings {
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("serializing settings")
    }
}

/// Default location of the settings file
pub fn preferred_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join(APP_NAME).join(SETTINGS_FILENAME))
}

/// Load settings from `path`, or from the default location when `None`.
///
/// An explicit path must exist. A missing default file yields defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => load_settings_from_path(path),
        None => match preferred_config_path() {
            Some(path) if path.exists() => load_settings_from_path(&path),
            Some(path) => {
                info!("Settings file not found at {path:?}, using defaults");
                Ok(Settings::default())
            }
            None => {
                info!("Could not determine config directory, using default settings");
                Ok(Settings::default())
            }
        },
    }
}

fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {path:?}"))?;
    let mut settings: Settings = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse settings file {path:?}"))?;
    debug!("Loaded settings from {path:?}");

    if settings.version < CURRENT_VERSION {
        migrate_settings(&mut settings);
    }
    Ok(settings)
}

fn migrate_settings(settings: &mut Settings) {
    info!(
        "Migrating settings from v{} to v{}",
        settings.version, CURRENT_VERSION
    );
    settings.version = CURRENT_VERSION;
}
