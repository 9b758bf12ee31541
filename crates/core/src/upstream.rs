//! Bolna Upstream Client
//!
//! A thin HTTP client for the Bolna REST API. Every call carries the static
//! bearer token and a JSON content type, has its own timeout, and is made
//! exactly once. Failures are logged here and handed back as an
//! [`UpstreamError`] so each operation can decide what an absent result means.

use async_trait::async_trait;
use reqwest::{
    Client, Method, StatusCode, Url,
    header::{self, HeaderMap, HeaderValue},
};
use serde_json::Value;
use std::{fmt, time::Duration};
use tracing::{debug, error};

/// Per-call deadline applied when no other timeout is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The HTTP verbs used by the Bolna API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// Why a call to the Bolna API produced no usable result.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP error occurred: {status} from {url}")]
    Status { status: StatusCode, url: String },
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {url} was not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid upstream URL '{0}'")]
    InvalidUrl(String),
    #[error("API key cannot be used as a header value")]
    InvalidApiKey,
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// The contract for anything that can execute a request against the Bolna API.
///
/// `path` is relative to the API base URL (e.g. `agent/all`). The body, when
/// present, is sent as JSON exactly as given.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BolnaApi: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, UpstreamError>;
}

/// Connection settings for [`BolnaClient`], built once at startup.
#[derive(Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// A `reqwest`-backed implementation of [`BolnaApi`].
#[derive(Clone)]
pub struct BolnaClient {
    client: Client,
    base_url: String,
}

impl BolnaClient {
    /// Creates a client with the bearer token and content type baked into
    /// its default headers.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|_| UpstreamError::InvalidUrl(config.base_url.clone()))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| UpstreamError::InvalidApiKey)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(UpstreamError::Build)?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
    ) -> Result<Value, UpstreamError> {
        let mut request = self.client.request(method.into(), url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|source| {
            if source.is_timeout() {
                UpstreamError::Timeout {
                    url: url.to_string(),
                }
            } else {
                UpstreamError::Transport {
                    url: url.to_string(),
                    source,
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status,
                url: url.to_string(),
            });
        }

        response.json::<Value>().await.map_err(|source| {
            if source.is_timeout() {
                UpstreamError::Timeout {
                    url: url.to_string(),
                }
            } else {
                UpstreamError::Decode {
                    url: url.to_string(),
                    source,
                }
            }
        })
    }
}

#[async_trait]
impl BolnaApi for BolnaClient {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, UpstreamError> {
        let url = self.endpoint(path);
        debug!(%method, %url, "Sending Bolna API request");

        let result = self.send(method, &url, body).await;
        if let Err(e) = &result {
            error!(%method, %url, error = %e, "Bolna API request failed");
        }
        result
    }
}
