use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    pub max_request_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub session_duration_hours: u64,
}

impl AuthConfig {
    pub fn session_duration_secs(&self) -> u64 {
        self.session_duration_hours * 3600
    }
}

impl Config {
    /// `ECOGUARD_CONFIG` names the file to read; without it the default path
    /// is used when present, otherwise built-in defaults. `JWT_SECRET`
    /// overrides the configured secret either way.
    pub fn load() -> Result<Self> {
        let mut config = if let Ok(config_path) = std::env::var("ECOGUARD_CONFIG") {
            Self::from_file(&config_path)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)?
        } else {
            tracing::info!("No config file found, using defaults");
            Self::default()
        };

        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.auth.jwt_secret = secret;
        }

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::info!("Loaded configuration from {}", path);
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 8080,
                static_dir: "dist".to_string(),
                max_request_size: 1024 * 1024, // 1MB
            },
            auth: AuthConfig {
                jwt_secret: "change-me-in-production".to_string(),
                session_duration_hours: 24,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_file() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000
            static_dir = "public"
            max_request_size = 1024

            [auth]
            jwt_secret = "s"
            session_duration_hours = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.session_duration_secs(), 7200);
    }
}
