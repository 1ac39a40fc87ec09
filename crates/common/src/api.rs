//! JSON API client for the Veritas backend services

use crate::registry::{Service, ServiceRegistry};
use crate::{Error, Result};
use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Whole-request timeout used by [`ApiClient::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin JSON-over-HTTP client.
///
/// Every call sends `Content-Type: application/json`, fails with
/// [`Error::Http`] on a non-2xx status and logs the failure before handing
/// it back. There is no retry; a request that outlives the client timeout
/// fails with [`Error::Transport`].
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    registry: ServiceRegistry,
}

impl ApiClient {
    pub fn new(registry: ServiceRegistry) -> Self {
        Self::with_timeout(registry, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(registry: ServiceRegistry, timeout: Duration) -> Self {
        let http = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            warn!("HTTP client setup failed ({}), using defaults", e);
            Client::new()
        });
        Self::with_client(http, registry)
    }

    pub fn with_client(http: Client, registry: ServiceRegistry) -> Self {
        Self { http, registry }
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub async fn get<T: DeserializeOwned>(&self, service: Service, endpoint: &str) -> Result<T> {
        let url = self.resolve(service, endpoint)?;
        self.call::<(), T>(Method::GET, &url, None).await
    }

    pub async fn post<B, T>(&self, service: Service, endpoint: &str, data: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.resolve(service, endpoint)?;
        self.call(Method::POST, &url, Some(data)).await
    }

    pub async fn put<B, T>(&self, service: Service, endpoint: &str, data: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.resolve(service, endpoint)?;
        self.call(Method::PUT, &url, Some(data)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, service: Service, endpoint: &str) -> Result<T> {
        let url = self.resolve(service, endpoint)?;
        self.call::<(), T>(Method::DELETE, &url, None).await
    }

    /// GET an absolute URL.
    pub async fn get_url<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.call::<(), T>(Method::GET, url, None).await
    }

    /// POST to an absolute URL.
    pub async fn post_url<B, T>(&self, url: &str, data: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Method::POST, url, Some(data)).await
    }

    fn resolve(&self, service: Service, endpoint: &str) -> Result<String> {
        self.registry.url(service, endpoint).map_err(|e| {
            error!("API call failed: {}", e);
            e
        })
    }

    async fn call<B, T>(&self, method: Method, url: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        match self.send(method.clone(), url, body).await {
            Ok(value) => Ok(value),
            Err(e) => {
                error!(%method, url, "API call failed: {}", e);
                Err(e)
            }
        }
    }

    async fn send<B, T>(&self, method: Method, url: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(%method, url, "api call");

        let mut req = self
            .http
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            req = req.body(serde_json::to_vec(body)?);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = resp.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
