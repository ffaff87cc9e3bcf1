//! Configuration module
//!
//! Settings come from a TOML file (default location under the user config
//! dir) with environment overrides for the deployment-sensitive values:
//! `DATABASE_URL` and `JWT_SECRET`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub uploads: UploadsConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file. Missing sections fall back to
    /// their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./rating.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseSettings {
    /// Effective connection URL; `DATABASE_URL` wins over the file.
    pub fn connection_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.url.clone())
    }
}

/// Security settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// JWT signing secret. There is no default: signing with a well-known
    /// value would make every session forgeable, so startup refuses to
    /// proceed without a provisioned secret.
    pub jwt_secret: String,
    /// Session token lifetime in hours
    pub token_ttl_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: 1,
        }
    }
}

impl SecurityConfig {
    /// Effective signing secret: the file value, else `JWT_SECRET`, else
    /// nothing.
    pub fn resolved_secret(&self) -> Option<String> {
        if !self.jwt_secret.is_empty() {
            return Some(self.jwt_secret.clone());
        }
        std::env::var("JWT_SECRET").ok().filter(|s| !s.is_empty())
    }
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Upload (blob store) settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    /// Directory the local blob store writes into
    pub dir: String,
    /// URL prefix under which stored blobs are served
    pub public_base: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: "./uploads".to_string(),
            public_base: "/uploads".to_string(),
        }
    }
}

/// Default config file location, e.g.
/// `~/.config/rating-service/config.toml` on Linux.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rating-service")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.security.token_ttl_hours, 1);
        assert!(cfg.security.jwt_secret.is_empty());
        assert_eq!(cfg.uploads.public_base, "/uploads");
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9100

            [security]
            jwt_secret = "from-file"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.security.resolved_secret().as_deref(), Some("from-file"));
        assert_eq!(cfg.logging.level, "info");
    }
}
