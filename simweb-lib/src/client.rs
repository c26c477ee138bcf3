//! HTTP client for the simulation web backend

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;

/// Thin JSON / form-data client rooted at a base URL and a path prefix.
///
/// This client is cheap to clone (uses `Arc` internally). [`Api::scoped`]
/// derives a client for a sub-path that shares the same connection pool.
///
/// # Example
///
/// ```ignore
/// let api = Api::builder()
///     .url("http://127.0.0.1:5000")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let templates = api.scoped("/forms");
/// let template: FormTemplate = templates.get_json("simulation.json").await?;
/// ```
#[derive(Clone)]
pub struct Api {
    inner: Arc<ApiInner>,
    prefix: String,
}

struct ApiInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api")
            .field("base_url", &self.inner.base_url.as_str())
            .field("prefix", &self.prefix)
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

/// Join path segments with single slashes, dropping empty segments.
fn join_path<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

impl Api {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ApiBuilder<Missing> {
        ApiBuilder::new()
    }

    /// Returns the base URL of the backend.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Returns the path prefix every request of this client is sent under.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns a client for `prefix`, relative to this client's prefix.
    pub fn scoped(&self, prefix: &str) -> Api {
        Api {
            inner: Arc::clone(&self.inner),
            prefix: join_path([self.prefix.as_str(), prefix]),
        }
    }

    /// Full URL for `path` under this client's prefix.
    pub fn url(&self, path: &str) -> String {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let path = join_path([self.prefix.as_str(), path]);
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    /// GET `path` and return the response body.
    pub async fn get_text(&self, path: &str) -> Result<String, ApiError> {
        let url = self.url(path);
        info!("GET {url}");
        self.send(self.inner.http_client.get(&url)).await
    }

    /// GET `path` and parse the response body as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.get_text(path).await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(format!("Invalid JSON from {path}: {e}"), body))
    }

    /// POST `form` as `application/x-www-form-urlencoded` and return the response body.
    pub async fn post_form<T: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &T,
    ) -> Result<String, ApiError> {
        let url = self.url(path);
        info!("POST {url} (form)");
        self.send(self.inner.http_client.post(&url).form(form)).await
    }

    /// POST `body` as JSON and return the response body.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<String, ApiError> {
        let url = self.url(path);
        info!("POST {url} (json)");
        self.send(self.inner.http_client.post(&url).json(body)).await
    }

    async fn send(&self, mut request: RequestBuilder) -> Result<String, ApiError> {
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();

        if status.is_success() {
            response.text().await.map_err(|e| self.map_error(e))
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            warn!("HTTP {} from {}: {message}", status.as_u16(), self.base_url());
            Err(ApiError::http(status.as_u16(), message))
        }
    }

    fn map_error(&self, error: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`Api`].
///
/// Uses the typestate pattern to ensure the base URL is set at compile time.
pub struct ApiBuilder<U> {
    url: U,
    prefix: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ApiBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            prefix: String::new(),
            timeout: None,
            connect_timeout: None,
        }
    }

    /// Sets the backend base URL.
    pub fn url(self, url: impl Into<String>) -> ApiBuilder<Set<String>> {
        ApiBuilder {
            url: Set(url.into()),
            prefix: self.prefix,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
        }
    }
}

impl Default for ApiBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ApiBuilder<U> {
    /// Sets the path prefix for all requests.
    pub fn prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.prefix = join_path([prefix.as_ref()]);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}

impl ApiBuilder<Set<String>> {
    /// Builds the [`Api`].
    ///
    /// Fails if the URL is not an absolute `http`/`https` URL.
    pub fn build(self) -> Result<Api, ApiError> {
        let raw = self.url.0;
        let base_url =
            Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{raw}: unsupported scheme {}",
                base_url.scheme()
            )));
        }

        let mut http_client = Client::builder();
        if let Some(timeout) = self.connect_timeout {
            http_client = http_client.connect_timeout(timeout);
        }
        let http_client = http_client.build()?;

        Ok(Api {
            inner: Arc::new(ApiInner {
                base_url,
                http_client,
                timeout: self.timeout,
            }),
            prefix: self.prefix,
        })
    }
}
