//! Runtime settings.
//!
//! Settings come from an optional TOML file; the resolution feature flag can
//! then be overridden from the environment. The flag is normalized to a bool
//! here so the builders never see the raw string.

use crate::error::{Result, ViewError};
use crate::locale::DEFAULT_LOCALE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const RESOLUTION_ENV_VAR: &str = "BREACH_RESOLUTION_ENABLED";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub breach_resolution_enabled: bool,
    pub locales_dir: Option<PathBuf>,
    pub default_locale: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            breach_resolution_enabled: false,
            locales_dir: None,
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(contents)
            .map_err(|e| ViewError::Config(format!("failed to parse settings: {}", e)))?;
        if settings.default_locale.trim().is_empty() {
            return Err(ViewError::Config("default-locale must not be empty".to_string()));
        }
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ViewError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings = Self::from_toml(&contents)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Apply a raw flag value, e.g. from `BREACH_RESOLUTION_ENABLED`.
    pub fn with_resolution_flag(mut self, raw: Option<&str>) -> Self {
        if let Some(raw) = raw {
            self.breach_resolution_enabled = parse_flag(raw);
        }
        self
    }
}

/// `1`, `true`, `yes` and `on` (any case) enable a flag; anything else disables it.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
