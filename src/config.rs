//! Runtime configuration loaded from environment variables.

use thiserror::Error;

/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Environment variable holding the connection pool size.
pub const POOL_MAX_SIZE_VAR: &str = "QUEUE_POOL_MAX_SIZE";
/// Environment variable enabling seed data insertion.
pub const SEED_VAR: &str = "QUEUE_SEED";

const DEFAULT_POOL_MAX_SIZE: u32 = 4;

/// Errors returned while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be parsed.
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        /// Offending variable name.
        key: &'static str,
        /// Raw value found in the environment.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Execution queue configuration.
///
/// | Env Var               | Default  |
/// |-----------------------|----------|
/// | `DATABASE_URL`        | required |
/// | `QUEUE_POOL_MAX_SIZE` | `4`      |
/// | `QUEUE_SEED`          | `false`  |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub pool_max_size: u32,
    /// Whether to insert the seed records after creating the schema.
    pub seed: bool,
}

impl QueueConfig {
    /// Loads configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is missing or malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;

        let pool_max_size = match lookup(POOL_MAX_SIZE_VAR) {
            None => DEFAULT_POOL_MAX_SIZE,
            Some(raw) => parse_pool_size(&raw)?,
        };

        let seed = match lookup(SEED_VAR) {
            None => false,
            Some(raw) => parse_flag(SEED_VAR, &raw)?,
        };

        Ok(Self {
            database_url,
            pool_max_size,
            seed,
        })
    }
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason| ConfigError::Invalid {
        key: POOL_MAX_SIZE_VAR,
        value: raw.to_owned(),
        reason,
    };
    let size = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| invalid("expected an unsigned integer"))?;
    if size == 0 {
        return Err(invalid("pool size must be at least 1"));
    }
    Ok(size)
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_owned(),
            reason: "expected a boolean flag",
        }),
    }
}
