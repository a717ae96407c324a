//! Shared HTTP client for the Firepower management API.
//!
//! [`ServiceClient`] is the collaborator every resource facade delegates to.
//! It resolves relative paths against the domain base URL, serializes request
//! bodies, hands the request to a [`RequestExecutor`], checks the status and
//! decodes the JSON body. Each call is exactly one round trip: nothing is
//! retried, cached or paged here.

use crate::config::FirepowerClientConfig;
use crate::error::{ApiErrorBody, Error, Result};
use crate::response::ResponseMeta;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;
use validator::Validate;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Header carrying the management center access token.
pub const AUTH_TOKEN_HEADER: &str = "X-auth-access-token";

const JSON: &str = "application/json";
const DEFAULT_USER_AGENT: &str = concat!("firepower-core/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration.
///
/// Configures timeouts, connection pooling, logging and compression of the
/// underlying reqwest client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connect timeout
    pub connect_timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable request/response logging
    pub enable_logging: bool,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_logging: true,
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable logging.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully resolved request, ready to hand to a [`RequestExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including the query string
    pub url: Url,
    /// Serialized JSON body
    pub body: Option<Vec<u8>>,
}

/// Undecoded response returned by a [`RequestExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// Status, headers and URL of the response
    pub meta: ResponseMeta,
    /// Raw body bytes
    pub body: Vec<u8>,
}

/// Transport seam: performs one HTTP exchange.
///
/// Implementations must honour `cancel` while waiting on the network and
/// return [`Error::Cancelled`] when it fires. They must not interpret the
/// status code; that is the job of [`ServiceClient::do_request`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute the request and collect the full response body.
    ///
    /// # Errors
    ///
    /// Returns transport errors, or [`Error::Cancelled`] if the token fired.
    async fn execute(&self, request: ApiRequest, cancel: &CancellationToken)
        -> Result<RawResponse>;
}

#[derive(Debug)]
enum Credentials {
    Token(SecretString),
    Basic {
        username: String,
        password: SecretString,
    },
}

enum Auth {
    Header(HeaderValue),
    Basic {
        username: String,
        password: SecretString,
    },
}

/// [`RequestExecutor`] backed by a pooled reqwest client.
pub struct ReqwestExecutor {
    http: Client,
    auth: Option<Auth>,
}

impl ReqwestExecutor {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Some(Auth::Header(value)) => request.header(AUTH_TOKEN_HEADER, value.clone()),
            Some(Auth::Basic { username, password }) => {
                request.basic_auth(username, Some(password.expose_secret()))
            }
            None => request,
        }
    }
}

#[async_trait]
impl RequestExecutor for ReqwestExecutor {
    async fn execute(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<RawResponse> {
        let ApiRequest { method, url, body } = request;

        let mut builder = self.http.request(method, url).header(ACCEPT, JSON);
        if let Some(body) = body {
            builder = builder.header(CONTENT_TYPE, JSON).body(body);
        }
        builder = self.authorize(builder);

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            result = builder.send() => result?,
        };

        let meta = ResponseMeta::new(
            response.status(),
            response.url().clone(),
            response.headers().clone(),
        );

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            result = response.bytes() => result?,
        };

        Ok(RawResponse {
            meta,
            body: body.to_vec(),
        })
    }
}

/// Builder for [`ServiceClient`].
pub struct ServiceClientBuilder {
    base_url: Url,
    http_config: ClientConfig,
    user_agent: String,
    credentials: Option<Credentials>,
    tls_verify: bool,
    tls_ca_cert: Option<PathBuf>,
    executor: Option<Arc<dyn RequestExecutor>>,
}

impl fmt::Debug for ServiceClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClientBuilder")
            .field("base_url", &self.base_url.as_str())
            .field("http_config", &self.http_config)
            .field("user_agent", &self.user_agent)
            .field("credentials", &self.credentials)
            .field("tls_verify", &self.tls_verify)
            .field("tls_ca_cert", &self.tls_ca_cert)
            .field("custom_executor", &self.executor.is_some())
            .finish()
    }
}

impl ServiceClientBuilder {
    /// Create a builder for the given API base URL.
    ///
    /// Relative request paths are resolved below this URL, so a trailing
    /// slash is added when missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL cannot be parsed.
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())
            .map_err(|e| Error::Config(format!("Invalid base URL: {e}")))?;

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            http_config: ClientConfig::new().with_timeout(timeout),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            credentials: None,
            tls_verify: true,
            tls_ca_cert: None,
            executor: None,
        })
    }

    /// Create a builder from a validated [`FirepowerClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration fails validation or the
    /// configured URL is unusable.
    pub fn from_config(config: &FirepowerClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder =
            Self::new(config.api_base_url()?, config.timeout())?.with_tls_verify(config.tls_verify);

        if let Some(path) = &config.tls_ca_cert {
            builder = builder.with_ca_cert(path.clone());
        }
        if let Some(token) = &config.access_token {
            builder = builder.with_token(token.clone());
        }

        Ok(builder)
    }

    /// Override the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Configure HTTP basic authentication credentials.
    #[must_use]
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::Basic {
            username: username.into(),
            password: SecretString::from(password.into()),
        });
        self
    }

    /// Configure an `X-auth-access-token` header.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::Token(SecretString::from(token.into())));
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Trust an additional PEM-encoded CA certificate.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Replace the reqwest transport with a custom executor.
    ///
    /// Credentials and TLS settings only apply to the built-in transport.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn RequestExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the CA certificate or credentials are
    /// unusable, or the HTTP client cannot be created.
    pub fn build(self) -> Result<ServiceClient> {
        let enable_logging = self.http_config.enable_logging;
        let executor = match self.executor {
            Some(executor) => executor,
            None => Arc::new(build_reqwest_executor(
                &self.http_config,
                &self.user_agent,
                self.credentials,
                self.tls_verify,
                self.tls_ca_cert.as_ref(),
            )?),
        };

        Ok(ServiceClient {
            base_url: self.base_url,
            executor,
            enable_logging,
        })
    }
}

fn build_reqwest_executor(
    http_config: &ClientConfig,
    user_agent: &str,
    credentials: Option<Credentials>,
    tls_verify: bool,
    tls_ca_cert: Option<&PathBuf>,
) -> Result<ReqwestExecutor> {
    let mut builder = ClientBuilder::new()
        .user_agent(user_agent)
        .timeout(http_config.timeout)
        .connect_timeout(http_config.connect_timeout)
        .pool_idle_timeout(http_config.pool_idle_timeout)
        .pool_max_idle_per_host(http_config.pool_max_idle_per_host)
        .gzip(http_config.enable_compression);

    if !tls_verify {
        warn!("TLS verification disabled for FMC client");
        builder = builder.danger_accept_invalid_certs(true);
    }

    if let Some(ca_cert) = tls_ca_cert {
        debug!("loading FMC CA certificate from {}", ca_cert.display());
        let bytes = std::fs::read(ca_cert).map_err(|err| {
            Error::Config(format!(
                "Failed to read FMC CA certificate {}: {err}",
                ca_cert.display()
            ))
        })?;
        let cert = reqwest::Certificate::from_pem(&bytes)
            .map_err(|err| Error::Config(format!("Invalid FMC CA certificate: {err}")))?;
        builder = builder.add_root_certificate(cert);
    }

    let http = builder
        .build()
        .map_err(|err| Error::Config(format!("Failed to build FMC HTTP client: {err}")))?;

    let auth = match credentials {
        Some(Credentials::Token(token)) => {
            let mut value = HeaderValue::from_str(token.expose_secret())
                .map_err(|_| Error::Config("Access token is not a valid header value".into()))?;
            value.set_sensitive(true);
            Some(Auth::Header(value))
        }
        Some(Credentials::Basic { username, password }) => Some(Auth::Basic { username, password }),
        None => None,
    };

    Ok(ReqwestExecutor { http, auth })
}

/// Shared client bound to one API base URL.
#[derive(Clone)]
pub struct ServiceClient {
    base_url: Url,
    executor: Arc<dyn RequestExecutor>,
    enable_logging: bool,
}

impl fmt::Debug for ServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ServiceClient {
    /// Start a builder for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL cannot be parsed.
    pub fn builder(base_url: impl AsRef<str>, timeout: Duration) -> Result<ServiceClientBuilder> {
        ServiceClientBuilder::new(base_url, timeout)
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a request for `path` relative to the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequestBuild`] for unparsable paths, paths that
    /// resolve outside the base URL and bodies that cannot be serialized.
    pub fn new_request<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<ApiRequest>
    where
        B: Serialize + ?Sized,
    {
        if path.starts_with('/') || path.contains("://") {
            return Err(Error::RequestBuild(format!(
                "path `{path}` must be relative to the API base URL"
            )));
        }

        let mut url = self
            .base_url
            .join(path)
            .map_err(|err| Error::RequestBuild(format!("Invalid FMC path `{path}`: {err}")))?;

        // `join` accepts scheme-relative and scheme-only forms, and `..`
        // climbs out of the domain.
        if url.origin() != self.base_url.origin()
            || !url.path().starts_with(self.base_url.path())
        {
            return Err(Error::RequestBuild(format!(
                "path `{path}` resolves outside the API base URL"
            )));
        }

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|err| Error::RequestBuild(format!("Failed to encode request body: {err}")))?;

        Ok(ApiRequest { method, url, body })
    }

    /// Execute a request once and decode its JSON body into `T`.
    ///
    /// # Errors
    ///
    /// - [`Error::Cancelled`] if `cancel` fires before or during the call
    /// - [`Error::Transport`] / [`Error::Timeout`] for network failures
    /// - [`Error::RemoteStatus`] for non-success statuses
    /// - [`Error::Decode`] when the body does not match `T`
    pub async fn do_request<T>(
        &self,
        cancel: &CancellationToken,
        request: ApiRequest,
    ) -> Result<(T, ResponseMeta)>
    where
        T: DeserializeOwned,
    {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        if self.enable_logging {
            info!(method = %request.method, path = %request.url.path(), "Sending FMC request");
        }

        let RawResponse { meta, body } = self.executor.execute(request, cancel).await?;

        if !meta.is_success() {
            let details = serde_json::from_slice::<ApiErrorBody>(&body).ok();
            let message = details
                .as_ref()
                .map(ApiErrorBody::summary)
                .filter(|summary| !summary.is_empty())
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());

            warn!(status = %meta.status, path = %meta.url.path(), %message, "FMC request failed");
            return Err(Error::RemoteStatus {
                meta: Box::new(meta),
                message,
                details,
            });
        }

        debug!(status = %meta.status, bytes = body.len(), "FMC response received");

        match serde_json::from_slice::<T>(&body) {
            Ok(value) => Ok((value, meta)),
            Err(err) => {
                warn!(path = %meta.url.path(), error = %err, "FMC response did not match schema");
                Err(Error::Decode {
                    meta: Some(Box::new(meta)),
                    message: err.to_string(),
                })
            }
        }
    }
}
