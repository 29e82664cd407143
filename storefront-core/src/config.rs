use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::ReplaceStrategy;

pub const CONFIG_FILE_NAME: &str = "storefront.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yml::Error,
    },
    #[error("invalid resource name {0:?}: use letters, digits, '-' or '_'")]
    InvalidResource(String),
    #[error("resource {0:?} is listed more than once")]
    DuplicateResource(String),
}

/// Top-level structure of storefront.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub resources: Vec<ResourceConfig>,
}

/// One list resource served under `/api/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceConfig {
    pub name: String,
    #[serde(default)]
    pub replace: ReplaceStrategy,
}

impl ResourceConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            replace: ReplaceStrategy::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            resources: vec![
                ResourceConfig::new("categories"),
                ResourceConfig::new("products"),
            ],
        }
    }
}

impl ServerConfig {
    /// Get the per-user config file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("storefront").join(CONFIG_FILE_NAME))
    }

    /// Find and load the effective configuration.
    ///
    /// An explicit path must exist. Otherwise `./storefront.yaml` is tried,
    /// then the per-user config file, then the built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return load_config(path);
        }

        let candidates = [Some(PathBuf::from(CONFIG_FILE_NAME)), Self::default_path()];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                tracing::info!("Using config {}", path.display());
                return load_config(&path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Check resource names: one non-empty path segment each, no repeats.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for resource in &self.resources {
            let valid = !resource.name.is_empty()
                && resource
                    .name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return Err(ConfigError::InvalidResource(resource.name.clone()));
            }
            if !seen.insert(resource.name.as_str()) {
                return Err(ConfigError::DuplicateResource(resource.name.clone()));
            }
        }
        Ok(())
    }
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ServerConfig =
        serde_yml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        let names: Vec<_> = config.resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["categories", "products"]);
        assert!(config
            .resources
            .iter()
            .all(|r| r.replace == ReplaceStrategy::InPlace));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"host: 0.0.0.0
port: 8080
resources:
  - name: categories
  - name: products
    replace: insert-then-remove
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.resources.len(), 2);
        assert_eq!(config.resources[0].replace, ReplaceStrategy::InPlace);
        assert_eq!(config.resources[1].name, "products");
        assert_eq!(config.resources[1].replace, ReplaceStrategy::InsertThenRemove);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "port: 9000\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.resources, ServerConfig::default().resources);
    }

    #[test]
    fn test_load_config_missing_file() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(&tmp.path().join("nope.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_resolve_explicit_missing_is_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.yaml");
        assert!(ServerConfig::resolve(Some(&missing)).is_err());
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "resources:\n  - name: tags\n    replace: shuffle\n").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn test_duplicate_resource_rejected() {
        let mut config = ServerConfig::default();
        config.resources.push(ResourceConfig::new("products"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateResource(name)) if name == "products"
        ));
    }

    #[test]
    fn test_invalid_resource_names_rejected() {
        for name in ["", "a/b", "with space"] {
            let config = ServerConfig {
                resources: vec![ResourceConfig::new(name)],
                ..ServerConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidResource(_))
            ));
        }
    }
}
