//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/texnodes/texnodes.toml`
//! 3. Local config: `<dir>/.texnodes.toml`
//! 4. Environment variables: `TEXNODES_*` prefix
//!
//! Only the command line consumes these settings; the node tree never does.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Error, Debug)]
#[error("config error: {message}")]
pub struct SettingsError {
    pub message: String,
}

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub output_dir: Option<PathBuf>,
    pub extension: Option<String>,
}

/// Unified configuration for texnodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory for rendered files when no output path is given (default: stdout)
    pub output_dir: Option<PathBuf>,
    /// File extension of rendered files (default: "tex")
    pub extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: None,
            extension: "tex".into(),
        }
    }
}

/// Get the XDG config directory for texnodes.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "texnodes").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("texnodes.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".texnodes.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| SettingsError {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`; leaves the input untouched on failure.
fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Where a rendered manifest lands when no explicit output is given.
    pub fn output_path_for(&self, manifest: &Path) -> Option<PathBuf> {
        let dir = self.output_dir.as_ref()?;
        let stem = manifest.file_stem()?;
        Some(dir.join(stem).with_extension(&self.extension))
    }

    fn expand_paths(&mut self) {
        if let Some(dir) = &self.output_dir {
            let expanded = expand_env_vars(dir.to_string_lossy().as_ref());
            self.output_dir = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            output_dir: overlay
                .output_dir
                .clone()
                .or_else(|| self.output_dir.clone()),
            extension: overlay
                .extension
                .clone()
                .unwrap_or_else(|| self.extension.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.texnodes.toml`
    #[instrument(level = "debug")]
    pub fn load(local_dir: Option<&Path>) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config: {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply TEXNODES_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TEXNODES")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("output_dir") {
            settings.output_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("extension") {
            settings.extension = val;
        }

        Ok(settings)
    }
}

fn config_err(e: ConfigError) -> SettingsError {
    SettingsError {
        message: e.to_string(),
    }
}
