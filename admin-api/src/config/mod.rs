use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub settings: SettingsConfig,
    pub probe: ProbeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiry_hours")]
    pub expiry_hours: u64,
}

/// Where global settings are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsBackend {
    File,
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingsConfig {
    #[serde(default = "default_backend")]
    pub backend: SettingsBackend,
    #[serde(default = "default_settings_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_expiry_hours() -> u64 {
    24
}

fn default_backend() -> SettingsBackend {
    SettingsBackend::File
}

fn default_settings_path() -> PathBuf {
    PathBuf::from("data/global-settings.json")
}

fn default_max_connections() -> u32 {
    5
}

fn default_probe_timeout_ms() -> u64 {
    5000
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("jwt.secret", "development-secret-change-in-production")?
            .set_default("jwt.expiry_hours", 24)?
            .set_default("settings.backend", "file")?
            .set_default("settings.path", "data/global-settings.json")?
            .set_default("settings.max_connections", 5)?
            .set_default("probe.timeout_ms", 5000)?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.jwt.secret.trim().is_empty() {
            anyhow::bail!("JWT secret is required");
        }

        if self.probe.timeout_ms == 0 {
            anyhow::bail!("Probe timeout must be greater than 0");
        }

        if self.settings.backend == SettingsBackend::Postgres
            && self
                .settings
                .database_url
                .as_deref()
                .map_or(true, |url| url.trim().is_empty())
        {
            anyhow::bail!("settings.database_url is required for the postgres backend");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                expiry_hours: 24,
            },
            settings: SettingsConfig {
                backend: SettingsBackend::File,
                path: default_settings_path(),
                database_url: None,
                max_connections: 5,
            },
            probe: ProbeConfig { timeout_ms: 5000 },
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_port_and_secret() {
        let mut config = base_config();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.jwt.secret = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_probe_timeout() {
        let mut config = base_config();
        config.probe.timeout_ms = 0;
        assert!(config.validate().is_err());
        assert_eq!(base_config().probe.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_postgres_backend_requires_url() {
        let mut config = base_config();
        config.settings.backend = SettingsBackend::Postgres;
        assert!(config.validate().is_err());

        config.settings.database_url = Some("postgres://localhost/settings".to_string());
        assert!(config.validate().is_ok());
    }
}
