//! User settings persisted as JSON.
//!
//! # Responsibility
//! - Load settings with per-field defaults so partial files still work.
//! - Validate the visible hour range and row height.
//!
//! # Invariants
//! - A missing settings file yields `TimeblockSettings::default()`.
//! - `load` never returns settings that fail `validate`.

use crate::kanban::window::WeekStart;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings file failure.
#[derive(Debug)]
pub enum SettingsError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "settings file `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "settings parse error: {err}"),
            Self::Invalid(message) => write!(f, "invalid settings: {message}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Timeline and board preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeblockSettings {
    /// First visible timeline hour.
    #[serde(default = "default_start_hour")]
    pub start_hour: u8,
    /// Last visible timeline hour (exclusive).
    #[serde(default = "default_end_hour")]
    pub end_hour: u8,
    /// Pixel height of one hour row.
    #[serde(default = "default_hour_height")]
    pub hour_height: u32,
    #[serde(default = "default_true")]
    pub week_starts_on_monday: bool,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub craft_api_url: Option<String>,
}

fn default_start_hour() -> u8 {
    6
}

fn default_end_hour() -> u8 {
    22
}

fn default_hour_height() -> u32 {
    60
}

fn default_true() -> bool {
    true
}

impl Default for TimeblockSettings {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            hour_height: default_hour_height(),
            week_starts_on_monday: true,
            theme: Theme::Dark,
            craft_api_url: None,
        }
    }
}

impl TimeblockSettings {
    /// Reads settings from `path`, falling back to defaults when it is absent.
    ///
    /// # Errors
    /// - The file exists but cannot be read, is not valid JSON, or fails
    ///   [`TimeblockSettings::validate`].
    pub fn load(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            info!(
                "event=settings_load module=settings status=default path={}",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&contents)?;
        if let Err(err) = settings.validate() {
            warn!(
                "event=settings_load module=settings status=invalid path={}",
                path.display()
            );
            return Err(err);
        }
        info!(
            "event=settings_load module=settings status=ok path={}",
            path.display()
        );
        Ok(settings)
    }

    /// Writes pretty JSON to `path`, creating parent directories.
    ///
    /// # Errors
    /// - Settings are invalid or the file cannot be written.
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let io_error = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_error)
    }

    /// Checks the hour range and row height.
    pub fn validate(&self) -> SettingsResult<()> {
        if self.start_hour > 24 || self.end_hour > 24 {
            return Err(SettingsError::Invalid(format!(
                "hours must be within 0..=24, got {}..{}",
                self.start_hour, self.end_hour
            )));
        }
        if self.start_hour >= self.end_hour {
            return Err(SettingsError::Invalid(format!(
                "start_hour {} must be before end_hour {}",
                self.start_hour, self.end_hour
            )));
        }
        if self.hour_height == 0 {
            return Err(SettingsError::Invalid(
                "hour_height must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn week_start(&self) -> WeekStart {
        if self.week_starts_on_monday {
            WeekStart::Monday
        } else {
            WeekStart::Sunday
        }
    }
}
