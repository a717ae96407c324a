//! Configuration for connecting to a Firepower Management Center.
//!
//! A [`FirepowerClientConfig`] names the management center, the domain whose
//! objects are managed, optional credentials and transport settings. It can be
//! built in code, deserialized, or read from `FMC_*` environment variables.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;
use uuid::Uuid;
use validator::Validate;

/// UUID of the built-in `Global` domain present on every management center.
pub const GLOBAL_DOMAIN_UUID: Uuid = Uuid::from_u128(0xe276_abec_e0f2_11e3_8169_6d9e_d49b_625f);

/// Path prefix of the configuration API, relative to the management center URL.
pub const CONFIG_API_PREFIX: &str = "api/fmc_config/v1/domain";

/// Environment variable holding the management center URL.
pub const ENV_URL: &str = "FMC_URL";
/// Environment variable holding the domain UUID.
pub const ENV_DOMAIN_UUID: &str = "FMC_DOMAIN_UUID";
/// Environment variable holding a pre-issued access token.
pub const ENV_ACCESS_TOKEN: &str = "FMC_ACCESS_TOKEN";
/// Environment variable toggling TLS verification.
pub const ENV_TLS_VERIFY: &str = "FMC_TLS_VERIFY";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "FMC_TIMEOUT_SECS";

/// Configuration for a Firepower client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FirepowerClientConfig {
    /// Management center base URL (e.g. `https://fmc.example.com`)
    #[validate(url)]
    pub fmc_url: String,

    /// Domain whose objects are managed
    #[serde(default = "default_domain_uuid")]
    pub domain_uuid: Uuid,

    /// Pre-issued `X-auth-access-token` value
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_domain_uuid() -> Uuid {
    GLOBAL_DOMAIN_UUID
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl FirepowerClientConfig {
    /// Create a new client configuration for the given management center.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(fmc_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            fmc_url: fmc_url.into(),
            domain_uuid: default_domain_uuid(),
            access_token: None,
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: default_request_timeout_secs(),
        };

        config.validated()
    }

    /// Load configuration from `FMC_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `FMC_URL` is missing or any variable is malformed.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is missing or any value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fmc_url =
            lookup(ENV_URL).ok_or_else(|| Error::Config(format!("{ENV_URL} is not set")))?;

        let mut config = Self {
            fmc_url,
            domain_uuid: default_domain_uuid(),
            access_token: lookup(ENV_ACCESS_TOKEN).filter(|token| !token.is_empty()),
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: default_request_timeout_secs(),
        };

        if let Some(domain) = lookup(ENV_DOMAIN_UUID) {
            config.domain_uuid = Uuid::parse_str(domain.trim())?;
        }

        if let Some(verify) = lookup(ENV_TLS_VERIFY) {
            config.tls_verify = verify.trim().parse().map_err(|_| {
                Error::Config(format!("{ENV_TLS_VERIFY} must be true or false, got `{verify}`"))
            })?;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            config.request_timeout_secs = secs.trim().parse().map_err(|_| {
                Error::Config(format!("{ENV_TIMEOUT_SECS} must be a number, got `{secs}`"))
            })?;
        }

        config.validated()
    }

    fn validated(self) -> Result<Self, Error> {
        self.validate()
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;
        Ok(self)
    }

    /// Set the domain whose objects are managed.
    #[must_use]
    pub const fn with_domain_uuid(mut self, domain_uuid: Uuid) -> Self {
        self.domain_uuid = domain_uuid;
        self
    }

    /// Set a pre-issued access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL every object path is resolved against:
    /// `{fmc_url}/api/fmc_config/v1/domain/{domain_uuid}/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the management center URL cannot be parsed.
    pub fn api_base_url(&self) -> Result<Url, Error> {
        let mut root = Url::parse(&self.fmc_url)
            .map_err(|e| Error::Config(format!("Invalid FMC URL: {e}")))?;

        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }

        root.join(&format!("{CONFIG_API_PREFIX}/{}/", self.domain_uuid))
            .map_err(|e| Error::Config(format!("Invalid FMC URL: {e}")))
    }
}
