//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/livetree/livetree.toml`
//! 3. Local config: `<config_dir>/.livetree.toml` (only when a directory is given)
//! 4. Environment variables: `LIVETREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::value::StrDeserializer;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::TraversalOrder;
use crate::fixtures::Fixture;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid value for LIVETREE_{}: {message}", key.to_uppercase())]
    InvalidOverride { key: String, message: String },

    #[error("environment: {0}")]
    Environment(#[from] ConfigError),
}

/// Effective settings for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Tree used when a command gets no `--fixture`
    pub fixture: Fixture,
    /// Order used by `walk` when no `--order` is given
    pub order: TraversalOrder,
    /// Joins payloads on one output line
    pub separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fixture: Fixture::Sample,
            order: TraversalOrder::Pre,
            separator: " ".into(),
        }
    }
}

/// Raw settings for intermediate parsing: `None` means "not specified,
/// inherit from the layer below".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub fixture: Option<Fixture>,
    pub order: Option<TraversalOrder>,
    pub separator: Option<String>,
}

/// Get the XDG config directory for livetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "livetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("livetree.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".livetree.toml")
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_dir` - Optional directory holding a local `.livetree.toml`
    ///
    /// Every layer only replaces the fields it specifies.
    pub fn load(config_dir: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with_global(global_config_path().as_deref(), config_dir)
    }

    /// Like [`Settings::load`], but reads the global layer from
    /// `global_path` instead of the XDG location. `None` skips the global
    /// layer entirely.
    #[instrument(level = "debug")]
    pub fn load_with_global(
        global_path: Option<&Path>,
        config_dir: Option<&Path>,
    ) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!(path = %global_path.display(), "applying global config");
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        if let Some(dir) = config_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!(path = %local_path.display(), "applying local config");
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            fixture: overlay.fixture.unwrap_or(self.fixture),
            order: overlay.order.unwrap_or(self.order),
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
        }
    }

    /// Apply `LIVETREE_*` environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("LIVETREE"))
            .build()?;

        if let Some(val) = env_override(&config, "fixture")? {
            settings.fixture = val;
        }
        if let Some(val) = env_override(&config, "order")? {
            settings.order = val;
        }
        if let Some(val) = env_override(&config, "separator")? {
            settings.separator = val;
        }
        Ok(settings)
    }

    /// Render as TOML, the same format the config files use.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn env_override<V: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<V>, SettingsError> {
    let raw = match config.get_string(key) {
        Ok(raw) => raw,
        Err(ConfigError::NotFound(_)) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let deserializer: StrDeserializer<'_, serde::de::value::Error> = raw.as_str().into_deserializer();
    V::deserialize(deserializer)
        .map(Some)
        .map_err(|e| SettingsError::InvalidOverride {
            key: key.to_string(),
            message: e.to_string(),
        })
}
