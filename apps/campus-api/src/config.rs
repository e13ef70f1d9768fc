//! Campus API configuration module.
//!
//! Configuration is layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `campus-coffee.toml` in the working directory (optional), or the file
//!    named by `CAMPUS_CONFIG` (required when set)
//! 3. `CAMPUS__*` environment variables, e.g. `CAMPUS__DATABASE__PATH`
//!
//! ## Example
//! ```toml
//! http_addr = "127.0.0.1:8080"
//! log_filter = "campus_api=debug,info"
//!
//! [database]
//! path = "/var/lib/campus/campus-coffee.db"
//!
//! [domain]
//! name_matching = "case_insensitive"
//!
//! [admin]
//! enabled = true
//! ```

use campus_core::{DomainPolicy, ValidationRules};
use campus_db::DbConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, Source};
use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "campus-coffee.toml";

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CAMPUS_CONFIG";

const ENV_PREFIX: &str = "CAMPUS";
const ENV_SEPARATOR: &str = "__";

/// Campus API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    pub http_addr: SocketAddr,

    pub database: DatabaseSettings,

    /// Name matching and postal code rules
    pub domain: DomainPolicy,

    pub admin: AdminSettings,

    /// Default tracing filter; `RUST_LOG` wins when set
    pub log_filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file path, or `:memory:`
    pub path: PathBuf,

    pub max_connections: u32,

    /// How long a writer waits on the SQLite write lock
    pub busy_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSettings {
    /// Mounts `DELETE /api/admin/pos`
    pub enabled: bool,
}

impl AppConfig {
    /// Load configuration from defaults, the config file, and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true);

        match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::build(File::from(PathBuf::from(path)).required(true), env),
            Err(_) => Self::build(
                File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
                env,
            ),
        }
    }

    /// Load configuration from a TOML document layered over the defaults.
    ///
    /// The process environment is not consulted.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config = defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Self::finish(config)
    }

    fn build<S>(file: S, env: Environment) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let config = defaults()?.add_source(file).add_source(env).build()?;

        Self::finish(config)
    }

    fn finish(config: Config) -> Result<Self, ConfigError> {
        let app: AppConfig = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    /// Rejects settings that would only fail later, at first use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "database.max_connections".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        self.domain
            .postal_code
            .check()
            .map_err(|reason| ConfigError::InvalidValue {
                key: "domain.postal_code".to_string(),
                reason,
            })?;

        Ok(())
    }

    /// Database settings for `Database::new`.
    pub fn db_config(&self) -> DbConfig {
        let config = if self.database.path.as_os_str() == ":memory:" {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database.path)
                .max_connections(self.database.max_connections)
                .min_connections(1)
        };

        config
            .busy_timeout(Duration::from_millis(self.database.busy_timeout_ms))
            .name_matching(self.domain.name_matching)
    }

    /// Validation rules for `PosService`.
    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules::from(&self.domain)
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("http_addr", "0.0.0.0:8080")?
        .set_default("database.path", "campus-coffee.db")?
        .set_default("database.max_connections", 5_i64)?
        .set_default("database.busy_timeout_ms", 5000_i64)?
        .set_default("domain.name_matching", "exact")?
        .set_default("domain.postal_code.min_digits", 4_i64)?
        .set_default("domain.postal_code.max_digits", 5_i64)?
        .set_default("admin.enabled", false)?
        .set_default("log_filter", "info")?)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
