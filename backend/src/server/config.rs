//! Server settings loaded via OrthoConfig and the validated configuration
//! derived from them.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use pagination::PageSizeLimits;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use url::Url;
use zeroize::Zeroize;

use teams_plugin::inbound::http::links::PlatformLinks;
use teams_plugin::inbound::http::routes::{ServiceVariant, UnknownServiceVariant};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_URL_PREFIX: &str = "/platform-plugin-teams";
const DEFAULT_PLATFORM_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TOPICS_PAGE_SIZE: usize = 12;
const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Raw settings from CLI flags, `TEAMS_PLUGIN_*` environment variables and
/// the optional configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TEAMS_PLUGIN")]
pub struct ServerSettings {
    /// Listener address.
    pub bind_addr: Option<String>,
    /// `lms`, `cms` or `both`.
    pub service_variant: Option<String>,
    /// Mount prefix for every course-scoped route.
    pub url_prefix: Option<String>,
    /// Base of the host platform used to render `url` fields.
    pub platform_base_url: Option<String>,
    /// JSON fixture seeding the in-memory platform.
    pub fixture_path: Option<PathBuf>,
    /// Cookie-session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`; on unless set to `false`.
    pub cookie_secure: Option<bool>,
    /// Default topic page size.
    pub topics_page_size: Option<usize>,
    /// Upper bound for `page_size`.
    pub max_page_size: Option<usize>,
}

/// Start-up configuration errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    ServiceVariant(#[from] UnknownServiceVariant),
    #[error("invalid platform base url {value:?}: {source}")]
    PlatformBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to read session key {path}: {source}")]
    SessionKeyRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("session key {path} is unusable: {reason}")]
    SessionKey { path: String, reason: String },
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn service_variant(&self) -> Result<ServiceVariant, SettingsError> {
        match self.service_variant.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(ServiceVariant::default()),
        }
    }

    pub fn url_prefix(&self) -> &str {
        self.url_prefix.as_deref().unwrap_or(DEFAULT_URL_PREFIX)
    }

    pub fn platform_base_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .platform_base_url
            .as_deref()
            .unwrap_or(DEFAULT_PLATFORM_BASE_URL);
        Url::parse(value).map_err(|source| SettingsError::PlatformBaseUrl {
            value: value.to_owned(),
            source,
        })
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    pub fn page_limits(&self) -> PageSizeLimits {
        PageSizeLimits::new(
            self.topics_page_size.unwrap_or(DEFAULT_TOPICS_PAGE_SIZE),
            self.max_page_size.unwrap_or(DEFAULT_MAX_PAGE_SIZE),
        )
    }
}

/// Read the cookie-session key, or generate an ephemeral one when no file is
/// configured.
fn load_session_key(path: Option<&Path>) -> Result<Key, SettingsError> {
    let Some(path) = path else {
        warn!("no session key file configured; using an ephemeral key");
        return Ok(Key::generate());
    };
    let mut bytes = std::fs::read(path).map_err(|source| SettingsError::SessionKeyRead {
        path: path.display().to_string(),
        source,
    })?;
    let key = Key::try_from(bytes.as_slice()).map_err(|err| SettingsError::SessionKey {
        path: path.display().to_string(),
        reason: err.to_string(),
    });
    bytes.zeroize();
    key
}

/// Validated configuration consumed by [`super::create_server`].
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) service_variant: ServiceVariant,
    pub(crate) url_prefix: String,
    pub(crate) links: PlatformLinks,
    pub(crate) page_limits: PageSizeLimits,
    pub(crate) fixture_path: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            key: load_session_key(settings.session_key_file.as_deref())?,
            cookie_secure: settings.cookie_secure(),
            bind_addr: settings.bind_addr()?,
            service_variant: settings.service_variant()?,
            url_prefix: settings.url_prefix().to_owned(),
            links: PlatformLinks::new(settings.platform_base_url()?),
            page_limits: settings.page_limits(),
            fixture_path: settings.fixture_path.clone(),
        })
    }
}
