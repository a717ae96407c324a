//! Asynchronous object service.

use crate::kind::ObjectKind;
use crate::models::{Item, Object, ObjectListOptions, ObjectRequest};
use crate::Result;
use firepower_core::client::{ClientConfig, RequestExecutor, ServiceClient, ServiceClientBuilder};
use firepower_core::config::FirepowerClientConfig;
use firepower_core::{CancellationToken, ResponseMeta};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("firepower-objects/", env!("CARGO_PKG_VERSION"));

/// Default timeout for object requests, in seconds.
pub const OBJECTS_DEFAULT_TIMEOUT: u64 = 20;

/// Builder for [`ObjectService`].
#[derive(Debug)]
pub struct ObjectServiceBuilder {
    inner: ServiceClientBuilder,
}

impl ObjectServiceBuilder {
    /// Create a builder for the specified domain base URL
    /// (`.../api/fmc_config/v1/domain/{uuid}/`).
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let builder =
            ServiceClientBuilder::new(base_url, Duration::from_secs(OBJECTS_DEFAULT_TIMEOUT))?
                .with_user_agent(USER_AGENT);

        Ok(Self { inner: builder })
    }

    /// Create a builder from a validated configuration.
    pub fn from_config(config: &FirepowerClientConfig) -> Result<Self> {
        let builder = ServiceClientBuilder::from_config(config)?.with_user_agent(USER_AGENT);
        Ok(Self { inner: builder })
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Configure HTTP basic authentication credentials.
    #[must_use]
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.inner = self.inner.with_basic_auth(username, password);
        self
    }

    /// Configure an `X-auth-access-token` header.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.with_token(token);
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.inner = self.inner.with_tls_verify(verify);
        self
    }

    /// Trust an additional PEM-encoded CA certificate.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.inner = self.inner.with_ca_cert(path);
        self
    }

    /// Replace the HTTP transport.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn RequestExecutor>) -> Self {
        self.inner = self.inner.with_executor(executor);
        self
    }

    /// Build the service.
    pub fn build(self) -> Result<ObjectService> {
        let inner = self.inner.build()?;
        Ok(ObjectService { inner })
    }
}

/// Stateless facade over the object endpoints of one domain.
///
/// Every method performs exactly one request. Errors from the shared client
/// are returned unchanged; status and decode errors carry the
/// [`ResponseMeta`] of the failed response.
#[derive(Debug, Clone)]
pub struct ObjectService {
    inner: ServiceClient,
}

impl ObjectService {
    /// Construct a service directly from the domain base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        ObjectServiceBuilder::new(base_url)?.build()
    }

    /// Construct a service from a validated configuration.
    pub fn from_config(config: &FirepowerClientConfig) -> Result<Self> {
        ObjectServiceBuilder::from_config(config)?.build()
    }

    /// Wrap an existing shared client.
    #[must_use]
    pub const fn with_client(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// List host objects (`GET object/hosts`).
    pub async fn list_hosts(
        &self,
        cancel: &CancellationToken,
        opts: Option<&ObjectListOptions>,
    ) -> Result<(Object, ResponseMeta)> {
        self.list_objects(cancel, ObjectKind::Hosts, opts).await
    }

    /// Fetch a host object by ID (`GET object/hosts/{id}`).
    ///
    /// The ID is passed through as-is; unknown IDs surface as a
    /// `RemoteStatus` error with the server's status.
    pub async fn get_host(
        &self,
        cancel: &CancellationToken,
        host_id: &str,
        opts: Option<&ObjectListOptions>,
    ) -> Result<(Item, ResponseMeta)> {
        self.get_object(cancel, ObjectKind::Hosts, host_id, opts)
            .await
    }

    /// Create a host object and return only the response metadata.
    ///
    /// The created item is decoded but dropped; use [`Self::insert_object`]
    /// or re-fetch when the server-assigned ID is needed.
    pub async fn insert_host(
        &self,
        cancel: &CancellationToken,
        item: &Item,
    ) -> Result<ResponseMeta> {
        let (created, meta) = self
            .insert_object(cancel, &ObjectKind::Hosts.collection_path(), item, None)
            .await?;
        debug!(id = ?created.id, status = %meta.status, "host created");
        Ok(meta)
    }

    /// POST an item to an arbitrary relative collection path.
    pub async fn insert_object(
        &self,
        cancel: &CancellationToken,
        path: &str,
        item: &Item,
        opts: Option<&ObjectListOptions>,
    ) -> Result<(Item, ResponseMeta)> {
        self.send_json(cancel, Method::POST, path, Some(item), &option_pairs(opts))
            .await
    }

    /// List objects of any kind (`GET object/{kind}`).
    pub async fn list_objects(
        &self,
        cancel: &CancellationToken,
        kind: ObjectKind,
        opts: Option<&ObjectListOptions>,
    ) -> Result<(Object, ResponseMeta)> {
        self.send_json::<(), Object>(
            cancel,
            Method::GET,
            &kind.collection_path(),
            None,
            &option_pairs(opts),
        )
        .await
    }

    /// Fetch one object of any kind (`GET object/{kind}/{id}`).
    pub async fn get_object(
        &self,
        cancel: &CancellationToken,
        kind: ObjectKind,
        id: &str,
        opts: Option<&ObjectListOptions>,
    ) -> Result<(Item, ResponseMeta)> {
        self.send_json::<(), Item>(
            cancel,
            Method::GET,
            &kind.item_path(id)?,
            None,
            &option_pairs(opts),
        )
        .await
    }

    /// Create an object of any kind from a partial payload.
    pub async fn create_object(
        &self,
        cancel: &CancellationToken,
        kind: ObjectKind,
        request: &ObjectRequest,
    ) -> Result<(Item, ResponseMeta)> {
        self.send_json(
            cancel,
            Method::POST,
            &kind.collection_path(),
            Some(request),
            &[],
        )
        .await
    }

    /// Update an object (`PUT object/{kind}/{id}`); only set fields are sent.
    pub async fn update_object(
        &self,
        cancel: &CancellationToken,
        kind: ObjectKind,
        id: &str,
        request: &ObjectRequest,
    ) -> Result<(Item, ResponseMeta)> {
        self.send_json(cancel, Method::PUT, &kind.item_path(id)?, Some(request), &[])
            .await
    }

    /// Delete an object (`DELETE object/{kind}/{id}`), returning the removed item.
    pub async fn delete_object(
        &self,
        cancel: &CancellationToken,
        kind: ObjectKind,
        id: &str,
    ) -> Result<(Item, ResponseMeta)> {
        self.send_json::<(), Item>(cancel, Method::DELETE, &kind.item_path(id)?, None, &[])
            .await
    }

    async fn send_json<B, R>(
        &self,
        cancel: &CancellationToken,
        method: Method,
        path: &str,
        body: Option<&B>,
        params: &[(&'static str, String)],
    ) -> Result<(R, ResponseMeta)>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.inner.new_request(method, path, params, body)?;
        self.inner.do_request(cancel, request).await
    }
}

fn option_pairs(opts: Option<&ObjectListOptions>) -> Vec<(&'static str, String)> {
    opts.map(ObjectListOptions::to_pairs).unwrap_or_default()
}
