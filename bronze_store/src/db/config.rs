//! Connection settings for the bronze PostgreSQL database.

use std::fmt::Write as _;

use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::{
    MissingEnvVarError, get_env_var, get_env_var_or, or_default, required,
};
use thiserror::Error;

pub const ENV_HOST: &str = "POSTGRES_HOST";
pub const ENV_PORT: &str = "POSTGRES_PORT";
pub const ENV_USER: &str = "POSTGRES_USER";
pub const ENV_PASSWORD: &str = "POSTGRES_PASSWORD";
pub const ENV_DB: &str = "POSTGRES_DB";
pub const ENV_POOL_SIZE: &str = "POSTGRES_POOL_SIZE";

pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_POOL_SIZE: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Missing(#[from] MissingEnvVarError),

    #[error("Invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything needed to open connections to the bronze database.
#[derive(Debug)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: SecretString,
    pub database: String,
    pub pool_size: usize,
}

/// Variables as read, before parsing. Defaults are already applied.
struct RawSettings {
    host: String,
    port: String,
    user: String,
    password: String,
    database: String,
    pool_size: String,
}

impl DbConfig {
    /// Reads the `POSTGRES_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_raw(RawSettings {
            host: get_env_var(ENV_HOST)?,
            user: get_env_var(ENV_USER)?,
            database: get_env_var(ENV_DB)?,
            port: get_env_var_or(ENV_PORT, &DEFAULT_PORT.to_string()),
            password: get_env_var_or(ENV_PASSWORD, ""),
            pool_size: get_env_var_or(ENV_POOL_SIZE, &DEFAULT_POOL_SIZE.to_string()),
        })
    }

    /// Builds the config from an arbitrary variable lookup.
    ///
    /// Host, user and database are required; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_raw(RawSettings {
            host: required(ENV_HOST, lookup(ENV_HOST))?,
            user: required(ENV_USER, lookup(ENV_USER))?,
            database: required(ENV_DB, lookup(ENV_DB))?,
            port: or_default(lookup(ENV_PORT), &DEFAULT_PORT.to_string()),
            password: or_default(lookup(ENV_PASSWORD), ""),
            pool_size: or_default(lookup(ENV_POOL_SIZE), &DEFAULT_POOL_SIZE.to_string()),
        })
    }

    fn from_raw(raw: RawSettings) -> Result<Self, ConfigError> {
        let port = parse(ENV_PORT, &raw.port)?;
        let pool_size = parse(ENV_POOL_SIZE, &raw.pool_size)?;
        if pool_size == 0 {
            return Err(ConfigError::Invalid {
                name: ENV_POOL_SIZE,
                value: raw.pool_size,
                reason: "pool size must be at least 1".into(),
            });
        }

        Ok(Self {
            host: raw.host.trim().to_string(),
            port,
            user: raw.user.trim().to_string(),
            password: SecretString::new(raw.password.into()),
            database: raw.database.trim().to_string(),
            pool_size,
        })
    }

    /// libpq-style `key=value` connection string. Holds the password, so it
    /// stays wrapped until handed to the driver.
    pub fn database_url(&self) -> SecretString {
        let mut url = String::new();
        let port = self.port.to_string();
        let pairs = [
            ("host", self.host.as_str()),
            ("port", port.as_str()),
            ("user", self.user.as_str()),
            ("password", self.password.expose_secret()),
            ("dbname", self.database.as_str()),
        ];
        for (key, value) in pairs {
            if key == "password" && value.is_empty() {
                continue;
            }
            if !url.is_empty() {
                url.push(' ');
            }
            let _ = write!(url, "{key}={}", quote(value));
        }
        SecretString::new(url.into())
    }

    /// `host:port/database`, safe to log.
    pub fn display_target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}

fn parse<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}
