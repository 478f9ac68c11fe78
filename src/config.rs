use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Result count requested by the home page search box.
pub const UI_SEARCH_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON file holding the raw episode dataset.
    pub data_path: PathBuf,
    /// Directory the static site is generated into.
    pub output_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// Limit used by the home page search box.
    pub search_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("episodes.json"),
            output_dir: PathBuf::from("dist"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            search_limit: UI_SEARCH_LIMIT,
        }
    }
}

impl AppConfig {
    /// Load `config_path`, or defaults when no file exists.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .context("Failed to read config file")?;

        let config: AppConfig = serde_json::from_str(&contents)
            .context("Failed to parse config file")?;

        if config.search_limit == 0 {
            anyhow::bail!("search_limit must be at least 1");
        }

        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?;

        Ok(config_dir.join("househunt-lookup").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.search_limit, 8);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = AppConfig {
            data_path: PathBuf::from("/data/episodes.json"),
            search_limit: 5,
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "output_dir": "public" }"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("public"));
        assert_eq!(config.data_path, PathBuf::from("episodes.json"));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "search_limit": 0 }"#).unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
