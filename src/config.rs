//! Runtime configuration.
//!
//! Values are resolved in layers: built-in defaults, then the TOML config file (when the
//! `config` feature is enabled), then command-line overrides. The merged result is validated
//! once before anything is built from it.

use crate::error::{ProdtuiError, Result};
use crate::render::ui::ColorTheme;
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_THEME: &str = "default";

/// Settings read from the config file and command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Root of the product service; `/products` is appended to it
    pub base_url: String,
    /// Per-request timeout, `0` disables it
    pub request_timeout_secs: u64,
    pub theme: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// Values given on the command line. `None` leaves the lower layer in place.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub theme: Option<String>,
}

impl AppConfig {
    /// Resolve the effective configuration.
    ///
    /// An explicit `config_path` must exist; the default location is only read if present.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let base = match &overrides.config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_default_location()?,
        };
        base.with_overrides(overrides).validated()
    }

    /// Apply command-line values on top of this configuration.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(base_url) = &overrides.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(timeout) = overrides.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(theme) = &overrides.theme {
            self.theme = theme.clone();
        }
        self
    }

    /// Check every value and normalize the base URL (trailing slashes removed).
    pub fn validated(mut self) -> Result<Self> {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        let url = Url::parse(&trimmed).map_err(|e| {
            ProdtuiError::config(format!("invalid base_url {:?}: {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProdtuiError::config(format!(
                "base_url must use http or https, got {:?}",
                url.scheme()
            )));
        }
        self.base_url = trimmed;

        if ColorTheme::by_name(&self.theme).is_none() {
            return Err(ProdtuiError::config(format!(
                "unknown theme {:?} (expected default, monochrome or high-contrast)",
                self.theme
            )));
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn color_theme(&self) -> ColorTheme {
        ColorTheme::by_name(&self.theme).unwrap_or_default()
    }

    /// Parse a TOML config file.
    #[cfg(feature = "config")]
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ProdtuiError::ConfigUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        toml::from_str(&content)
            .map_err(|e| ProdtuiError::config(format!("{}: {}", path.display(), e)))
    }

    #[cfg(not(feature = "config"))]
    pub fn from_file(path: &Path) -> Result<Self> {
        Err(ProdtuiError::config(format!(
            "cannot read {}: built without config file support",
            path.display()
        )))
    }

    /// `$XDG_CONFIG_HOME/prodtui/config.toml` or the platform equivalent.
    #[cfg(feature = "config")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("prodtui").join("config.toml"))
    }

    #[cfg(not(feature = "config"))]
    pub fn default_path() -> Option<PathBuf> {
        None
    }

    fn from_default_location() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::debug!("loading config from {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}
