//! Service configuration.
//!
//! Loaded from environment variables (and a `.env` file, if present) and
//! validated at startup.

use crate::error::ServiceError;
use crate::telemetry::{LogFormat, TelemetryConfig};
use std::env;
use std::path::PathBuf;

/// Database file used when `DB_PATH` is unset.
pub const DEFAULT_DB_PATH: &str = "totally_not_my_privateKeys.db";

/// JWKS server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// SQLite key store location
    pub db_path: PathBuf,
    /// Logging setup
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ServiceError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var(&lookup, "PORT", 8080)?;
        let db_path = lookup("DB_PATH")
            .filter(|path| !path.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from);

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let format = lookup("LOG_FORMAT")
            .map(|f| LogFormat::parse(&f))
            .transpose()?
            .unwrap_or_default();

        let telemetry = TelemetryConfig::default()
            .with_log_level(log_level)
            .with_format(format);

        Ok(Self {
            host,
            port,
            db_path,
            telemetry,
        })
    }

    /// `host:port` for the listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a variable, falling back to `default` when unset.
fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ServiceError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(val) => val
            .parse()
            .map_err(|e| ServiceError::config(format!("Invalid {name}: {e}"))),
        None => Ok(default),
    }
}
