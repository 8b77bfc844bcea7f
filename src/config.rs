//! Configuration management with YAML support

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

/// Raw export backup storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory where a copy of every imported export file is kept
    #[serde(default = "default_exports_dir")]
    pub exports_dir: String,
}

// Default value functions
fn default_database_path() -> String {
    "~/.local/share/courtvault/courtvault.db".to_string()
}

fn default_exports_dir() -> String {
    "~/.local/share/courtvault/exports".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            exports_dir: default_exports_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    /// Searches in order:
    /// 1. Provided path
    /// 2. ./courtvault.yaml (current directory)
    /// 3. ~/.config/courtvault/courtvault.yaml
    pub fn load(path: &str) -> Result<Self> {
        let search_paths = vec![
            shellexpand::tilde(path).to_string(),
            "courtvault.yaml".to_string(),
            shellexpand::tilde("~/.config/courtvault/courtvault.yaml").to_string(),
        ];

        for search_path in &search_paths {
            if std::path::Path::new(search_path).exists() {
                let content = std::fs::read_to_string(search_path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        // No config file found, use defaults
        Ok(Config::default())
    }

    /// Get the database path, expanding ~ to home directory
    pub fn database_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.database.path).to_string();
        PathBuf::from(expanded)
    }

    /// Get the export backup directory, expanding ~ to home directory
    pub fn exports_dir(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.storage.exports_dir).to_string();
        PathBuf::from(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.database.path.ends_with("courtvault.db"));
        assert!(config.storage.exports_dir.ends_with("exports"));
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
database:
  path: ~/.local/share/courtvault/test.db

storage:
  exports_dir: /var/lib/courtvault/exports
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.database.path, "~/.local/share/courtvault/test.db");
        assert_eq!(config.storage.exports_dir, "/var/lib/courtvault/exports");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
database:
  path: /tmp/vault.db
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.database.path, "/tmp/vault.db");
        assert!(config.storage.exports_dir.ends_with("exports"));
    }
}
