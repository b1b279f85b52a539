//! Layered configuration loader.
//!
//! Discovers configuration layers (user, cwd, runtime), validates their schema,
//! merges them in precedence order, and produces a final `WhispererConfig`.

mod layer_io;
mod merge;
mod schema;


use crate::{ConfigError, WhispererConfig};
use log::{debug, info};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default config filename in the working directory.
const DEFAULT_CONFIG_FILE: &str = "exam-whisperer.json5";
/// Default config directory under the user's home.
const DEFAULT_CONFIG_DIR: &str = ".exam-whisperer";
/// Config filename inside the user config directory.
const USER_CONFIG_FILE: &str = "config.json5";

/// Effective config plus metadata about which layers were loaded.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// The merged, validated config.
    pub config: WhispererConfig,
    /// Metadata for each layer that contributed to the config.
    pub layers: Vec<ConfigLayer>,
}

/// Origin for a single config layer in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// User-specific configuration.
    User,
    /// Current working directory configuration.
    Cwd,
    /// Runtime overrides (highest precedence).
    Runtime,
}

/// Metadata about a loaded config layer.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    /// Layer origin.
    pub source: ConfigLayerSource,
    /// Location on disk.
    pub path: PathBuf,
}

/// Options controlling layered config discovery and overrides.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Working directory used to find the cwd layer.
    pub cwd: PathBuf,
    /// Optional user config path (defaults to `~/.exam-whisperer/config.json5`).
    pub user_config_path: Option<PathBuf>,
    /// Runtime override config paths applied last.
    pub runtime_paths: Vec<PathBuf>,
}

impl LayeredConfigOptions {
    /// Create options with default layer locations for the provided cwd.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            user_config_path: layer_io::default_user_config_path(),
            runtime_paths: Vec::new(),
        }
    }

    /// Add a runtime override config path that is applied last.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl WhispererConfig {
    /// Load a single config from a path (no layering).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config from path: {}", path.display());
        let contents = layer_io::read_layer(path)?;
        let value = layer_io::parse_layer(&contents, &path.display().to_string())?;
        config_from_value(value, "config")
    }

    /// Load a single config from JSON5 contents (no layering).
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value = layer_io::parse_layer(contents, "config")?;
        config_from_value(value, "config")
    }

    /// Load a layered config stack using the default layer locations.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        info!(
            "loading layered config with defaults (cwd={})",
            cwd.as_ref().display()
        );
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Load a layered config stack using explicit layer locations.
    ///
    /// Layer precedence (low -> high): user, cwd, runtime overrides.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let cwd = layer_io::normalize_path(&options.cwd)?;
        debug!("normalized cwd for config load: {}", cwd.display());
        let mut layers = Vec::new();
        let mut merged = Value::Object(serde_json::Map::new());
        let mut seen_paths = HashSet::new();

        let mut candidates = Vec::new();
        if let Some(path) = options.user_config_path {
            candidates.push((ConfigLayerSource::User, path, false));
        }
        candidates.push((ConfigLayerSource::Cwd, cwd.join(DEFAULT_CONFIG_FILE), false));
        for path in options.runtime_paths {
            candidates.push((ConfigLayerSource::Runtime, path, true));
        }

        for (source, path, required) in candidates {
            let loaded = if required {
                Some(layer_io::load_required_layer(source, &path)?)
            } else {
                layer_io::load_optional_layer(source, &path)?
            };
            let Some(loaded) = loaded else {
                continue;
            };
            if !seen_paths.insert(layer_io::unique_path(&loaded.meta.path)) {
                debug!(
                    "skipping duplicate layer (source={:?}, path={})",
                    source,
                    path.display()
                );
                continue;
            }
            merge::merge_json_values(&mut merged, &loaded.value);
            layers.push(loaded.meta);
        }

        let config = config_from_value(merged, "effective")?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let provider = &self.provider;
        if provider.endpoint.trim().is_empty() {
            return Err(invalid("provider.endpoint", "must not be empty"));
        }
        if provider.model.trim().is_empty() {
            return Err(invalid("provider.model", "must not be empty"));
        }
        if !(0.0..=2.0).contains(&provider.temperature) {
            return Err(invalid("provider.temperature", "must be within [0.0, 2.0]"));
        }
        if provider.answer_max_tokens == 0 {
            return Err(invalid("provider.answer_max_tokens", "must be positive"));
        }
        if provider.quiz_max_tokens == 0 {
            return Err(invalid("provider.quiz_max_tokens", "must be positive"));
        }
        if provider.timeout_secs == 0 {
            return Err(invalid("provider.timeout_secs", "must be positive"));
        }
        if self.history.path.as_os_str().is_empty() {
            return Err(invalid("history.path", "must not be empty"));
        }
        Ok(())
    }
}

/// Internal representation of a loaded config layer.
#[derive(Debug, Clone)]
struct LoadedLayer {
    meta: ConfigLayer,
    value: Value,
}

fn config_from_value(value: Value, label: &str) -> Result<WhispererConfig, ConfigError> {
    schema::validate_layer_schema(&value, label)?;
    let config: WhispererConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}

fn invalid(path: &str, message: &str) -> ConfigError {
    ConfigError::InvalidField {
        path: path.to_string(),
        message: message.to_string(),
    }
}
