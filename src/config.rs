//! Environment configuration for the server and the viewer client.
//!
//! Every setting has a default except the admin password. Missing variables
//! are logged and defaulted; present but unparsable ones are an error.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_FRONTEND_URL: &str = "*";
pub const DEFAULT_STORAGE_DIR: &str = "public";
pub const DEFAULT_UPLOAD_API_URL: &str = "https://api.fufu4u.com/stock/upload";
pub const DEFAULT_STOCK_BASE_URL: &str = "http://localhost:4000";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Upload server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `PORT`
    pub port: u16,
    /// `FRONTEND_URL`: allowed CORS origin, `*` for any.
    pub frontend_url: String,
    /// `STORAGE_DIR`: where branch files are written.
    pub storage_dir: PathBuf,
    /// `DIST_DIR`: built frontend to serve, if any.
    pub dist_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            dist_dir: None,
        }
    }
}

impl ServerConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load(&lookup, "PORT", DEFAULT_PORT)?,
            frontend_url: try_load(&lookup, "FRONTEND_URL", DEFAULT_FRONTEND_URL.to_string())?,
            storage_dir: try_load(&lookup, "STORAGE_DIR", DEFAULT_STORAGE_DIR.to_string())?.into(),
            dist_dir: optional(&lookup, "DIST_DIR").map(PathBuf::from),
        })
    }

    /// Address to bind, on all interfaces.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Viewer-side settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `UPLOAD_API_URL`: full URL of the upload endpoint.
    pub upload_url: String,
    /// `STOCK_BASE_URL`: origin the branch files are fetched from.
    pub stock_base_url: String,
    /// `ADMIN_USERNAME`
    pub admin_username: String,
    /// `ADMIN_PASSWORD`: without one, nobody can log in.
    pub admin_password: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_UPLOAD_API_URL.to_string(),
            stock_base_url: DEFAULT_STOCK_BASE_URL.to_string(),
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: None,
        }
    }
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            upload_url: try_load(&lookup, "UPLOAD_API_URL", DEFAULT_UPLOAD_API_URL.to_string())?,
            stock_base_url: try_load(&lookup, "STOCK_BASE_URL", DEFAULT_STOCK_BASE_URL.to_string())?,
            admin_username: try_load(&lookup, "ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME.to_string())?,
            admin_password: optional(&lookup, "ADMIN_PASSWORD"),
        })
    }
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match optional(lookup, key) {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
