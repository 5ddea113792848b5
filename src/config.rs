use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{api, limits, paths};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub api: ApiConfig,

    pub snapshot: SnapshotConfig,

    pub reports: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: paths::DATABASE_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub url: String,

    /// Entries requested per page (AniList maximum is 50).
    pub page_size: u32,

    /// Request ceiling the fetch must stay under. The effective request
    /// spacing keeps a safety margin below this value.
    pub max_requests_per_minute: u32,

    pub request_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: api::ANILIST_URL.to_string(),
            page_size: api::PAGE_SIZE,
            max_requests_per_minute: api::RATE_CEILING_PER_MINUTE,
            request_timeout_seconds: api::REQUEST_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub path: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: paths::SNAPSHOT_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows in the top-rated report.
    pub top_limit: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_limit: limits::DEFAULT_TOP_LIMIT,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("anicat").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".anicat").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.page_size == 0 || self.api.page_size > api::PAGE_SIZE {
            anyhow::bail!(
                "api.page_size must be between 1 and {} (AniList perPage cap)",
                api::PAGE_SIZE
            );
        }

        if self.api.max_requests_per_minute == 0 {
            anyhow::bail!("api.max_requests_per_minute must be > 0");
        }

        if self.reports.top_limit == 0 {
            anyhow::bail!("reports.top_limit must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.url, "https://graphql.anilist.co");
        assert_eq!(config.api.page_size, 50);
        assert_eq!(config.api.max_requests_per_minute, 90);
        assert_eq!(config.reports.top_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[snapshot]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [api]
            page_size = 25
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.api.page_size, 25);

        assert_eq!(config.api.url, "https://graphql.anilist.co");
    }

    #[test]
    fn test_validate_rejects_oversized_page() {
        let mut config = Config::default();
        config.api.page_size = 200;
        assert!(config.validate().is_err());

        config.api.page_size = 50;
        config.api.max_requests_per_minute = 0;
        assert!(config.validate().is_err());
    }
}
