use std::env;

use auth::AuthSettings;
use auth::HashingParams;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Value of `database.url` that selects the in-process store.
pub const IN_MEMORY_DATABASE_URL: &str = "memory";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.url == IN_MEMORY_DATABASE_URL
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub token_ttl_seconds: i64,
    pub hashing: HashingConfig,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("hashing", &self.hashing)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HashingConfig {
    pub cost: u32,
    pub memory_kib: u32,
    pub parallelism: u32,
}

/// Field-shape rules applied to request bodies before they reach the domain.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    pub name_min_length: usize,
    pub name_max_length: usize,
    pub password_min_length: usize,
    pub password_max_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            name_min_length: 2,
            name_max_length: 30,
            password_min_length: 6,
            password_max_length: 30,
        }
    }
}

impl AuthConfig {
    /// Settings for the authentication core.
    ///
    /// Fails if `token_ttl_seconds` cannot be represented as a duration.
    pub fn settings(&self) -> Result<AuthSettings, ConfigError> {
        let token_ttl = chrono::Duration::try_seconds(self.token_ttl_seconds).ok_or_else(|| {
            ConfigError::Message(format!(
                "auth.token_ttl_seconds out of range: {}",
                self.token_ttl_seconds
            ))
        })?;

        Ok(AuthSettings::new(self.secret.as_bytes())
            .with_token_ttl(token_ttl)
            .with_hashing(HashingParams {
                cost: self.hashing.cost,
                memory_kib: self.hashing.memory_kib,
                parallelism: self.hashing.parallelism,
            }))
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, AUTH__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults (everything except the secret and database url)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let validation = ValidationConfig::default();

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 5000)?
            .set_default("database.max_connections", 5)?
            .set_default("auth.token_ttl_seconds", 3600)?
            .set_default("auth.hashing.cost", HashingParams::DEFAULT_COST)?
            .set_default("auth.hashing.memory_kib", HashingParams::DEFAULT_MEMORY_KIB)?
            .set_default("auth.hashing.parallelism", HashingParams::DEFAULT_PARALLELISM)?
            .set_default("validation.name_min_length", validation.name_min_length as u64)?
            .set_default("validation.name_max_length", validation.name_max_length as u64)?
            .set_default(
                "validation.password_min_length",
                validation.password_min_length as u64,
            )?
            .set_default(
                "validation.password_max_length",
                validation.password_max_length as u64,
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: AUTH__SECRET=... overrides auth.secret
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
