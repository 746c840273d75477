//! Application settings and the resolved server configuration.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use book_reviews::outbound::openlibrary::OpenLibraryCredentials;
use book_reviews::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_OPENLIBRARY_URL: &str = "https://openlibrary.org";
const DEFAULT_OPENLIBRARY_TIMEOUT_SECS: u64 = 5;

/// Settings loaded via OrthoConfig from CLI flags, `BOOK_REVIEWS_*`
/// environment variables and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOK_REVIEWS")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; fixtures are served when absent.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    pub openlibrary_url: Option<String>,
    pub openlibrary_timeout_secs: Option<u64>,
    /// Value for the `X-Custom-Auth` header.
    pub openlibrary_custom_auth: Option<String>,
    /// Value for the `X-Customer-Id` header.
    pub openlibrary_customer_id: Option<String>,
    /// Shared HS256 secret for bearer tokens.
    pub jwt_secret: Option<String>,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,
}

/// Errors raised while turning [`AppSettings`] into a [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value}: {message}")]
    BindAddr { value: String, message: String },
    #[error("invalid OpenLibrary URL {value}: {message}")]
    OpenLibraryUrl { value: String, message: String },
}

impl AppSettings {
    /// Socket address to bind, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    /// OpenLibrary base URL, falling back to the public service.
    pub fn openlibrary_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .openlibrary_url
            .as_deref()
            .unwrap_or(DEFAULT_OPENLIBRARY_URL);
        Url::parse(value).map_err(|err| SettingsError::OpenLibraryUrl {
            value: value.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn openlibrary_timeout(&self) -> Duration {
        Duration::from_secs(
            self.openlibrary_timeout_secs
                .unwrap_or(DEFAULT_OPENLIBRARY_TIMEOUT_SECS),
        )
    }

    pub fn openlibrary_credentials(&self) -> OpenLibraryCredentials {
        OpenLibraryCredentials {
            custom_auth: self.openlibrary_custom_auth.clone(),
            customer_id: self.openlibrary_customer_id.clone(),
        }
    }
}

/// Bearer token verification settings.
#[derive(Clone)]
pub struct JwtConfig {
    pub(crate) secret: Vec<u8>,
    pub(crate) issuer: Option<String>,
    pub(crate) audience: Option<String>,
}

/// OpenLibrary client settings.
#[derive(Debug, Clone)]
pub struct OpenLibraryConfig {
    pub(crate) base_url: Url,
    pub(crate) timeout: Duration,
    pub(crate) credentials: OpenLibraryCredentials,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt: JwtConfig,
    pub(crate) openlibrary: OpenLibraryConfig,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt: JwtConfig, openlibrary: OpenLibraryConfig) -> Self {
        Self {
            bind_addr,
            jwt,
            openlibrary,
            db_pool: None,
        }
    }

    /// Attach a database pool so Diesel adapters replace the fixtures.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<Vec<u8>>, issuer: Option<String>, audience: Option<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer,
            audience,
        }
    }
}

impl OpenLibraryConfig {
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            base_url: settings.openlibrary_url()?,
            timeout: settings.openlibrary_timeout(),
            credentials: settings.openlibrary_credentials(),
        })
    }
}
