//! Configuration management

use std::time::Duration;

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_IDENTITY_TIMEOUT_SECS, DEFAULT_REMOTE_DEADLINE_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    SERVICE_NAME,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub identity: IdentitySettings,
    pub provisioning: ProvisioningSettings,
    pub vault: VaultSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    /// Empty means the URL is resolved through the secret provider at startup.
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdentitySettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProvisioningSettings {
    pub remote_deadline_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VaultSettings {
    pub addr: Option<String>,
    pub token: Option<String>,
    pub secret_path: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    pub format: LogFormat,
    pub level: String,
    pub log_dir: Option<String>,
}

impl AppSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl DatabaseSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl IdentitySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl ProvisioningSettings {
    pub fn remote_deadline(&self) -> Duration {
        Duration::from_secs(self.remote_deadline_secs)
    }
}

impl VaultSettings {
    /// Vault is used only when both the address and the token are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.addr.as_deref(), self.token.as_deref()) {
            (Some(addr), Some(token)) if !addr.is_empty() && !token.is_empty() => Some((addr, token)),
            _ => None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .set_override_option("vault.addr", std::env::var("VAULT_ADDR").ok())?
            .set_override_option("vault.token", std::env::var("VAULT_TOKEN").ok())?
            .build()?;
        config.try_deserialize()
    }

    /// Builds a configuration from the defaults overlaid with a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 8080)?
            .set_default("app.name", SERVICE_NAME)?
            .set_default("app.request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_secs", 3)?
            .set_default("database.run_migrations", false)?
            .set_default("identity.base_url", "http://user-service:9001")?
            .set_default("identity.timeout_secs", DEFAULT_IDENTITY_TIMEOUT_SECS)?
            .set_default("provisioning.remote_deadline_secs", DEFAULT_REMOTE_DEADLINE_SECS)?
            .set_default("vault.secret_path", "secret/data/tenant-service")?
            .set_default("telemetry.format", "json")?
            .set_default("telemetry.level", "info")
    }
}
