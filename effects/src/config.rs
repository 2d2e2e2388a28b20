//! Engine configuration, read from TOML.

use std::path::{Path, PathBuf};

use glaze_schedule::Phase;
use serde::{Deserialize, Serialize};

/// Errors loading an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunables for an [`EffectEngine`](crate::EffectEngine).
///
/// ```toml
/// update_phase = "late_update"
/// update_priority = 10
/// log_variant_creation = false
/// ```
///
/// Missing keys take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Phase the per-frame driver is registered on by `attach`.
    pub update_phase: Phase,
    /// Priority of the per-frame driver within its phase.
    pub update_priority: i32,
    /// Log each newly created material variant at debug level.
    pub log_variant_creation: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            update_phase: Phase::Update,
            update_priority: 0,
            log_variant_creation: true,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load the config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = EngineConfig::from_toml_str(
            "update_phase = \"late_update\"\nupdate_priority = -3\n",
        )
        .unwrap();
        assert_eq!(config.update_phase, Phase::LateUpdate);
        assert_eq!(config.update_priority, -3);
        assert!(config.log_variant_creation);
    }

    #[test]
    fn test_invalid_phase() {
        let err = EngineConfig::from_toml_str("update_phase = \"render\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load(Path::new("/nonexistent/glaze.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("glaze.toml"));
    }
}
