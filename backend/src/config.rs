//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from the command line, a config file or `PANTRY_*`
//! environment variables. The database is addressed either by a full
//! `database_url` or by the discrete `db_*` parts, the URL winning when both
//! are present.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MODEL_PATH: &str = "improved_shelf_life_model.json";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Neither `database_url` nor `db_name` was provided.
    #[error("no database configured: set PANTRY_DATABASE_URL or PANTRY_DB_NAME")]
    MissingDatabase,
    /// The discrete parts do not form a valid URL.
    #[error("invalid database setting {field}: {message}")]
    InvalidDatabase {
        field: &'static str,
        message: String,
    },
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value}: {message}")]
    InvalidBindAddr { value: String, message: String },
    /// `pool_max_size` is zero.
    #[error("pool_max_size must be greater than zero")]
    EmptyPool,
}

/// Runtime settings for the server binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PANTRY")]
pub struct AppSettings {
    /// Full PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Database name, used when no URL is given.
    pub db_name: Option<String>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    /// Database host; defaults to `localhost`.
    pub db_host: Option<String>,
    /// Database port; defaults to 5432.
    pub db_port: Option<u16>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Path of the shelf-life model artifact.
    pub model_path: Option<PathBuf>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl AppSettings {
    /// Connection URL, assembled from the discrete parts when needed.
    ///
    /// # Errors
    ///
    /// [`SettingsError::MissingDatabase`] when neither a URL nor a database
    /// name is configured.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        if let Some(url) = self.database_url.as_deref().filter(|url| !url.is_empty()) {
            return Ok(url.to_owned());
        }
        let name = self
            .db_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(SettingsError::MissingDatabase)?;

        let mut url = Url::parse("postgres://localhost/").map_err(|err| invalid("url", &err))?;
        url.set_host(Some(self.db_host.as_deref().unwrap_or(DEFAULT_DB_HOST)))
            .map_err(|err| invalid("db_host", &err))?;
        url.set_port(Some(self.db_port.unwrap_or(DEFAULT_DB_PORT)))
            .map_err(|()| invalid("db_port", &"cannot carry a port"))?;
        if let Some(user) = self.db_user.as_deref() {
            url.set_username(user)
                .map_err(|()| invalid("db_user", &"cannot carry a user name"))?;
        }
        if let Some(password) = self.db_password.as_deref() {
            url.set_password(Some(password))
                .map_err(|()| invalid("db_password", &"cannot carry a password"))?;
        }
        url.set_path(name);
        Ok(url.into())
    }

    /// Bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
    }

    /// Connection pool size, falling back to 10.
    ///
    /// # Errors
    ///
    /// [`SettingsError::EmptyPool`] when the configured size is zero.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE) {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }
}

fn invalid(field: &'static str, err: &dyn std::fmt::Display) -> SettingsError {
    SettingsError::InvalidDatabase {
        field,
        message: err.to_string(),
    }
}
