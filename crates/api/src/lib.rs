//! Stackwatch backend API client.
//!
//! This crate provides a lightweight client for the monitored backend. It
//! focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Validating the configured base URL
//! - Building requests with a consistent User-Agent and Accept headers
//! - Decoding the health, overview, record and cache payloads
//!
//! The primary entry point is [`StackwatchClient`]. The dashboard talks to it
//! through the [`DashboardBackend`] trait so tests can substitute a stub.
//!
//! # Example
//!
//! ```ignore
//! use stackwatch_api::{ClientOptions, DashboardBackend, StackwatchClient};
//!
//! async fn check() -> Result<(), stackwatch_api::ClientError> {
//!     let client = StackwatchClient::new(ClientOptions::new("http://localhost:3000"))?;
//!     let health = client.health().await?;
//!     println!("overall: {:?}", health.overall());
//!     Ok(())
//! }
//! ```

mod backend;
mod cache;
mod error;

use std::env;
use std::time::{Duration, Instant};

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub use backend::DashboardBackend;
pub use error::ClientError;

/// Hostnames treated as local development targets.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1", "[::1]", "::1"];

pub const DEFAULT_API_PREFIX: &str = "/api";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Construction parameters for [`StackwatchClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub api_prefix: String,
    pub connect_timeout: Duration,
    /// Total per-request timeout. `None` lets a hung request wait forever,
    /// which is what the dashboard's refresh loop expects.
    pub request_timeout: Option<Duration>,
}

impl ClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: None,
        }
    }

    pub fn with_api_prefix(mut self, api_prefix: impl Into<String>) -> Self {
        self.api_prefix = api_prefix.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Thin wrapper around a configured `reqwest::Client` for backend access.
///
/// The client pre-configures default headers and builds requests against a
/// validated base URL.
#[derive(Debug, Clone)]
pub struct StackwatchClient {
    pub base_url: String,
    pub api_prefix: String,
    pub http: Client,
    pub user_agent: String,
}

impl StackwatchClient {
    /// Build a client from [`ClientOptions`], validating the base URL first.
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        validate_base_url(&options.base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(default_headers)
            .connect_timeout(options.connect_timeout);
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            base_url: options.base_url.trim_end_matches('/').to_string(),
            api_prefix: normalize_prefix(&options.api_prefix),
            http,
            user_agent: format!("stackwatch/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    /// Build a `reqwest::RequestBuilder` for a method and a server-relative
    /// path (for example `/health`).
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "building request");

        self.http.request(method, url).header(header::USER_AGENT, &self.user_agent)
    }

    /// Server-relative path for an endpoint under the API prefix.
    pub fn api_path(&self, suffix: &str) -> String {
        format!("{}{}", self.api_prefix, suffix)
    }

    /// Send a request and log its lifecycle.
    pub(crate) async fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<Response, ClientError> {
        let start = Instant::now();
        debug!(method = %method, path = %path, "http request started");
        match builder.send().await {
            Ok(response) => {
                debug!(
                    method = %method,
                    path = %path,
                    status = %response.status(),
                    duration_ms = start.elapsed().as_millis(),
                    "http request completed"
                );
                Ok(response)
            }
            Err(error) => {
                warn!(
                    method = %method,
                    path = %path,
                    error = %error,
                    duration_ms = start.elapsed().as_millis(),
                    "http request failed"
                );
                Err(ClientError::Network(error))
            }
        }
    }

    /// GET a server-relative path and decode its body regardless of status.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<(StatusCode, T), ClientError> {
        let response = self.send(Method::GET, path, self.request(Method::GET, path)).await?;
        read_json(response, path).await
    }
}

/// Read a response body and decode it as JSON, keeping the status.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, path: &str) -> Result<(StatusCode, T), ClientError> {
    let status = response.status();
    let body = response.text().await?;
    let parsed = serde_json::from_str(&body).map_err(|source| {
        warn!(path = %path, status = %status, body_len = body.len(), error = %source, "http response JSON parse failed");
        ClientError::Decode {
            path: path.to_string(),
            source,
        }
    })?;
    Ok((status, parsed))
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - the URL must parse and include a host
/// - the scheme must be `http` or `https`
/// - plain `http` to a non-local host is allowed but logged
pub fn validate_base_url(base: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidBaseUrl {
        url: base.to_string(),
        reason,
    };
    let parsed_base_url = Url::parse(base).map_err(|error| invalid(error.to_string()))?;

    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| invalid("URL must include a host".to_string()))?
        .to_string();

    match parsed_base_url.scheme() {
        "https" => {}
        "http" => {
            let is_local = LOCALHOST_DOMAINS.iter().any(|&allowed| host_name.eq_ignore_ascii_case(allowed));
            if !is_local {
                warn!(host = %host_name, "backend base URL uses plain http for a non-local host");
            }
        }
        other => return Err(invalid(format!("unsupported scheme '{other}://'"))),
    }

    Ok(parsed_base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_schemes_and_hosts() {
        assert!(validate_base_url("http://localhost:3000").is_ok());
        assert!(validate_base_url("https://status.example.com").is_ok());
        assert!(validate_base_url("http://10.0.0.4:3000").is_ok());
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
        assert!(validate_base_url("file:///tmp/x").is_err());
    }

    #[test]
    fn api_paths_join_prefix_and_suffix() {
        let client = StackwatchClient::new(ClientOptions::new("http://localhost:3000/").with_api_prefix("api/")).unwrap();
        assert_eq!(client.base_url, "http://localhost:3000");
        assert_eq!(client.api_path("/test"), "/api/test");

        let bare = StackwatchClient::new(ClientOptions::new("http://localhost:3000").with_api_prefix("")).unwrap();
        assert_eq!(bare.api_path("/system/overview"), "/system/overview");
    }

    #[test]
    fn user_agent_names_the_client() {
        let client = StackwatchClient::new(ClientOptions::new("http://127.0.0.1:1")).unwrap();
        assert!(client.user_agent.starts_with("stackwatch/"));
    }
}
