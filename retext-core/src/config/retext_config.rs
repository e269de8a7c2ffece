//! Top-level retext configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{RefineConfig, TransformConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`RETEXT_*`)
/// 2. Project config (`retext.toml` in the document's directory)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetextConfig {
    pub transform: TransformConfig,
    pub refine: RefineConfig,
}

impl RetextConfig {
    /// Load configuration for documents under `root`.
    ///
    /// A missing `retext.toml` is not an error; the compiled defaults are
    /// used. A present but invalid file is.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_path = root.join("retext.toml");
        if project_path.exists() {
            let content = std::fs::read_to_string(&project_path).map_err(|_| {
                ConfigError::FileNotFound {
                    path: project_path.display().to_string(),
                }
            })?;
            let file_config: RetextConfig =
                toml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: project_path.display().to_string(),
                    message: e.to_string(),
                })?;
            Self::merge(&mut config, &file_config);
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: RetextConfig = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &RetextConfig) -> Result<(), ConfigError> {
        if let Some(interval) = config.transform.progress_interval {
            if interval == 0 {
                return Err(ConfigError::Validation {
                    field: "transform.progress_interval".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(max_line_len) = config.refine.max_line_len {
            if max_line_len == 0 {
                return Err(ConfigError::Validation {
                    field: "refine.max_line_len".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins where it has a value.
    fn merge(base: &mut RetextConfig, other: &RetextConfig) {
        if other.transform.progress_interval.is_some() {
            base.transform.progress_interval = other.transform.progress_interval;
        }
        if other.refine.max_changed_lines.is_some() {
            base.refine.max_changed_lines = other.refine.max_changed_lines;
        }
        if other.refine.max_line_len.is_some() {
            base.refine.max_line_len = other.refine.max_line_len;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `RETEXT_REFINE_MAX_CHANGED_LINES`, etc.
    fn apply_env_overrides(config: &mut RetextConfig) {
        if let Ok(val) = std::env::var("RETEXT_TRANSFORM_PROGRESS_INTERVAL") {
            if let Ok(v) = val.parse::<usize>() {
                config.transform.progress_interval = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RETEXT_REFINE_MAX_CHANGED_LINES") {
            if let Ok(v) = val.parse::<usize>() {
                config.refine.max_changed_lines = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RETEXT_REFINE_MAX_LINE_LEN") {
            if let Ok(v) = val.parse::<usize>() {
                config.refine.max_line_len = Some(v);
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
