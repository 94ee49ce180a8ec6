//! Configuration loading
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. Config file (`--config`, `PDFBOXLAB_CONFIG`, or `<config_dir>/pdfboxlab/config.toml`)
//! 3. Environment (`PDFBOX`, `PDFBOXLAB_CACHE_DIR`)

pub mod consts;
pub mod model;

pub use model::{Config, InvokerKind, RuntimeConfig, ToolkitConfig};

use crate::error::{PdfboxError, Result};
use std::path::{Path, PathBuf};

impl Config {
    /// Reads a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PdfboxError::ConfigParseError(format!("{}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| PdfboxError::ConfigParseError(format!("{}: {}", path.display(), e)))
    }

    /// Writes this config as pretty TOML
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PdfboxError::ConfigParseError(e.to_string()))?;

        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Loads config from the process environment
    ///
    /// An explicit path must exist; the implicit default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_with(explicit, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`] with an injectable environment lookup
    pub fn load_with<F>(explicit: Option<&Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = env(consts::env::CONFIG)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let mut config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Applies environment overrides on top of file values
    pub fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(jar) = env(consts::env::JAR_OVERRIDE).filter(|v| !v.is_empty()) {
            tracing::debug!("jar override from {}: {}", consts::env::JAR_OVERRIDE, jar);
            self.toolkit.jar = Some(PathBuf::from(jar));
        }

        if let Some(dir) = env(consts::env::CACHE_DIR).filter(|v| !v.is_empty()) {
            self.toolkit.cache_dir = Some(PathBuf::from(dir));
        }
    }

    /// Rejects values that cannot work at all
    pub fn validate(&self) -> Result<()> {
        if self.toolkit.index_url.trim().is_empty() {
            return Err(PdfboxError::ConfigInvalidValue {
                field: "toolkit.index_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.toolkit.index_timeout_secs == 0 || self.toolkit.download_timeout_secs == 0 {
            return Err(PdfboxError::ConfigInvalidValue {
                field: "toolkit.*_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Effective cache directory
    ///
    /// Platform-specific default:
    /// - macOS: ~/Library/Caches/pdfboxlab
    /// - Linux: ~/.cache/pdfboxlab
    /// - Windows: %LOCALAPPDATA%\pdfboxlab
    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.toolkit.cache_dir {
            return Ok(dir.clone());
        }

        let base = dirs::cache_dir().ok_or_else(|| {
            PdfboxError::Generic("Could not determine cache directory".to_string())
        })?;

        Ok(base.join(consts::paths::APP_DIR))
    }
}

/// `<config_dir>/pdfboxlab/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| {
        base.join(consts::paths::APP_DIR)
            .join(consts::paths::CONFIG_FILE)
    })
}
