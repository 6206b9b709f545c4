//! Engine configuration.
//!
//! Loaded from JSON or YAML. `SQUAD_CONFIG_PATH` names the file picked up
//! by [`EngineConfig::from_env`]; unset or blank means defaults.

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const CONFIG_PATH_ENV: &str = "SQUAD_CONFIG_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineupConfig {
    /// Squad size given to newly scheduled match records
    pub default_squad_size: u8,
    /// When false, lineup edits never consult squad number assignments
    pub auto_squad_numbers: bool,
}

impl Default for LineupConfig {
    fn default() -> Self {
        Self { default_squad_size: 11, auto_squad_numbers: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub lineup: LineupConfig,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and validates a config file; `.yaml`/`.yml` parse as YAML,
    /// anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

        let config = if is_yaml(path) { Self::from_yaml(&content)? } else { Self::from_json(&content)? };
        config.validate()?;
        debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lineup.default_squad_size == 0 {
            return Err(ConfigError::Invalid(
                "lineup.default_squad_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref(),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.lineup.default_squad_size, 11);
        assert!(config.lineup.auto_squad_numbers);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{"lineup":{"default_squad_size":7}}"#).unwrap();
        assert_eq!(config.lineup.default_squad_size, 7);
        assert!(config.lineup.auto_squad_numbers);

        let empty = EngineConfig::from_json("{}").unwrap();
        assert_eq!(empty, EngineConfig::default());
    }

    #[test]
    fn test_zero_squad_size_is_invalid() {
        let config = EngineConfig::from_json(r#"{"lineup":{"default_squad_size":0}}"#).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "lineup:\n  default_squad_size: 9\n  auto_squad_numbers: false").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.lineup.default_squad_size, 9);
        assert!(!config.lineup.auto_squad_numbers);
    }

    #[test]
    fn test_load_json_file_rejects_invalid() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"lineup":{{"default_squad_size":0}}}}"#).unwrap();
        assert!(matches!(EngineConfig::load(file.path()), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_is_yaml_by_extension() {
        assert!(is_yaml(Path::new("a.yml")));
        assert!(is_yaml(Path::new("a.YAML")));
        assert!(!is_yaml(Path::new("a.json")));
        assert!(!is_yaml(Path::new("a")));
    }
}
