use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub catalog: CatalogConfig,

    pub observability: ObservabilityConfig,

    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/dramabox.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,

    /// Whether to set the Secure flag on session cookies.
    /// Set to false for local development without HTTPS.
    pub secure_cookies: bool,

    /// Sessions expire after this many minutes without a request.
    pub session_inactivity_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            cors_allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            secure_cookies: true,
            session_inactivity_minutes: 60,
        }
    }
}

/// Listing sizes and the thresholds behind the derived catalog flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub default_page_size: u64,

    pub max_page_size: u64,

    /// Page size for the admin lookup and people listings.
    pub admin_page_size: u64,

    /// Page size for the admin series and user listings.
    pub admin_large_page_size: u64,

    /// Number of entries in each home section.
    pub home_section_size: u64,

    /// `is_popular` filter: view count at or above this value.
    pub popular_view_threshold: i64,

    /// `top_searched` filter: search count at or above this value.
    pub top_searched_threshold: i64,

    /// `new_release` filter: released within this many days.
    pub new_release_days: u32,

    /// Trending threshold given to new series when none is supplied.
    pub default_trending_threshold: i64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
            admin_page_size: 20,
            admin_large_page_size: 50,
            home_section_size: 10,
            popular_view_threshold: 1000,
            top_searched_threshold: 500,
            new_release_days: 30,
            default_trending_threshold: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    pub loki_enabled: bool,

    pub loki_url: String,

    pub loki_labels: std::collections::HashMap<String, String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        let mut labels = std::collections::HashMap::new();
        labels.insert("app".to_string(), "dramabox".to_string());

        Self {
            metrics_enabled: true,
            loki_enabled: false,
            loki_url: "http://localhost:3100".to_string(),
            loki_labels: labels,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB (default: 8192 = 8MB)
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations)
    pub argon2_time_cost: u32,

    pub argon2_parallelism: u32,

    pub min_password_length: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
            min_password_length: 8,
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
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("dramabox").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".dramabox").join("config.toml"));
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
        let catalog = &self.catalog;

        if catalog.default_page_size == 0 || catalog.max_page_size == 0 {
            anyhow::bail!("Catalog page sizes must be > 0");
        }

        if catalog.default_page_size > catalog.max_page_size {
            anyhow::bail!(
                "default_page_size ({}) cannot exceed max_page_size ({})",
                catalog.default_page_size,
                catalog.max_page_size
            );
        }

        if catalog.admin_page_size == 0 || catalog.admin_large_page_size == 0 {
            anyhow::bail!("Admin page sizes must be > 0");
        }

        if catalog.home_section_size == 0 {
            anyhow::bail!("home_section_size must be > 0");
        }

        if catalog.default_trending_threshold < 0 {
            anyhow::bail!("default_trending_threshold cannot be negative");
        }

        if self.security.min_password_length == 0 {
            anyhow::bail!("min_password_length must be > 0");
        }

        if self.server.session_inactivity_minutes <= 0 {
            anyhow::bail!("session_inactivity_minutes must be > 0");
        }

        if self.observability.loki_enabled {
            url::Url::parse(&self.observability.loki_url).context("Invalid Loki URL")?;
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
        assert_eq!(config.catalog.default_page_size, 10);
        assert_eq!(config.catalog.popular_view_threshold, 1000);
        assert_eq!(config.catalog.top_searched_threshold, 500);
        assert_eq!(config.catalog.new_release_days, 30);
        assert_eq!(config.catalog.default_trending_threshold, 100);
        assert_eq!(config.security.min_password_length, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[catalog]"));
        assert!(toml_str.contains("[security]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [catalog]
            home_section_size = 5
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.catalog.home_section_size, 5);

        assert_eq!(config.catalog.max_page_size, 100);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_validate_rejects_inverted_page_sizes() {
        let mut config = Config::default();
        config.catalog.default_page_size = 200;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.catalog.home_section_size = 0;
        assert!(config.validate().is_err());
    }
}
