//! TOML configuration file on disk.

use super::app_config::AppConfig;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while locating, reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no per-user configuration directory.
    #[error("no configuration directory available for this user")]
    NoConfigDir,

    /// Reading or writing the configuration file failed.
    #[error("config file {}: {source}", .path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration could not be rendered as TOML.
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// A configuration file at a fixed path.
///
/// A missing file is created with defaults on first load. A file that
/// fails to parse is left alone and defaults are used instead.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by `path`.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the per-user default location.
    ///
    /// # Errors
    /// Returns `NoConfigDir` when the platform has no config directory.
    pub fn user_default() -> Result<Self, ConfigError> {
        AppConfig::default_config_path()
            .map(Self::at)
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Store at `path_override` if given, else at the per-user default.
    ///
    /// # Errors
    /// Returns `NoConfigDir` when no override is given and the platform has
    /// no config directory.
    pub fn resolve(path_override: Option<&Path>) -> Result<Self, ConfigError> {
        path_override.map_or_else(Self::user_default, |path| Ok(Self::at(path)))
    }

    /// Path of the configuration file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the configuration.
    ///
    /// # Errors
    /// Returns `Io` if the file exists but cannot be read, or if the default
    /// file cannot be written.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No config file, writing defaults");
                let config = AppConfig::default();
                self.write(&config)?;
                return Ok(config);
            }
            Err(e) => return Err(self.io_error(e)),
        };

        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => {
                debug!(path = %self.path.display(), "Loaded config file");
                Ok(config)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed config file");
                Ok(AppConfig::default())
            }
        }
    }

    /// Replaces the file with `config`, creating parent directories.
    ///
    /// The content is staged in a temporary file next to the target and
    /// renamed over it, so readers never see a partial file.
    ///
    /// # Errors
    /// Returns `Render` if the config cannot be serialized and `Io` if the
    /// file cannot be written.
    pub fn write(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let rendered = toml::to_string_pretty(config)?;
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let mut staged = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        staged
            .write_all(rendered.as_bytes())
            .map_err(|e| self.io_error(e))?;
        staged
            .persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        Ok(())
    }

    fn io_error(&self, source: io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
