//! Runtime configuration loaded via OrthoConfig.
//!
//! Database connection values use the `DB_` prefix; server values use the
//! `USERDIR_` prefix.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_NAME: &str = "userdir";
const DEFAULT_DB_SSLMODE: &str = "disable";

const DEFAULT_TEMPLATES_DIR: &str = "templates";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised while assembling a connection URL from settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseUrlError {
    /// The host could not be used in a URL.
    #[error("invalid database host {host}: {message}")]
    Host { host: String, message: String },
    /// Credentials could not be attached to the URL.
    #[error("invalid database credentials")]
    Credentials,
}

/// Connection settings for the PostgreSQL record store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DB")]
pub struct DatabaseSettings {
    /// Database host name or address.
    pub host: Option<String>,
    /// Database port.
    pub port: Option<u16>,
    /// Role used to connect.
    pub user: Option<String>,
    /// Password for `user`; omitted from the URL when unset.
    pub password: Option<String>,
    /// Database name.
    pub name: Option<String>,
    /// libpq `sslmode` value.
    pub sslmode: Option<String>,
}

impl DatabaseSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_DB_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_DB_PORT)
    }

    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or(DEFAULT_DB_USER)
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_DB_NAME)
    }

    pub fn sslmode(&self) -> &str {
        self.sslmode.as_deref().unwrap_or(DEFAULT_DB_SSLMODE)
    }

    /// Assemble a `postgres://` URL with percent-encoded credentials.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseUrlError`] when the host or credentials cannot be
    /// represented in a URL.
    ///
    /// # Examples
    /// ```
    /// use userdir::settings::DatabaseSettings;
    ///
    /// let settings = DatabaseSettings {
    ///     host: Some("db".into()),
    ///     port: None,
    ///     user: Some("app".into()),
    ///     password: Some("p@ss word".into()),
    ///     name: Some("people".into()),
    ///     sslmode: None,
    /// };
    /// assert_eq!(
    ///     settings.database_url().expect("valid url"),
    ///     "postgres://app:p%40ss%20word@db:5432/people?sslmode=disable"
    /// );
    /// ```
    pub fn database_url(&self) -> Result<String, DatabaseUrlError> {
        let host_error = |message: String| DatabaseUrlError::Host {
            host: self.host().to_owned(),
            message,
        };
        let mut url = Url::parse("postgres://localhost").map_err(|err| host_error(err.to_string()))?;
        url.set_host(Some(self.host()))
            .map_err(|err| host_error(err.to_string()))?;
        url.set_port(Some(self.port()))
            .map_err(|()| host_error("port not permitted".to_owned()))?;
        url.set_username(self.user())
            .map_err(|()| DatabaseUrlError::Credentials)?;
        url.set_password(self.password.as_deref())
            .map_err(|()| DatabaseUrlError::Credentials)?;
        url.set_path(self.name());
        url.query_pairs_mut().append_pair("sslmode", self.sslmode());
        Ok(url.into())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERDIR")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// Directory holding the view templates and the landing page.
    pub templates_dir: Option<PathBuf>,
    /// Register the latency histogram and `/metrics`.
    #[ortho_config(default = true)]
    pub metrics_enabled: bool,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)))
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.templates_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR))
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}
