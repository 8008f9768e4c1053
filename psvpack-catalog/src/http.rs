//! Blocking HTTP access behind a narrow trait.
//!
//! Catalog refreshes and package downloads only ever need a GET with a
//! streamed body and the `Last-Modified` header, so that is all the trait
//! exposes. [`ReqwestClient`] is the production implementation.

use std::io::Read;
use std::time::Duration;

use reqwest::header::LAST_MODIFIED;

use crate::error::CatalogError;

const USER_AGENT: &str = concat!("psvpack/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// A response whose body has not been consumed yet.
pub struct HttpResponse {
    pub status: u16,
    pub last_modified: Option<String>,
    pub content_length: Option<u64>,
    body: Box<dyn Read>,
}

impl HttpResponse {
    pub fn new(status: u16, body: Box<dyn Read>) -> Self {
        Self {
            status,
            last_modified: None,
            content_length: None,
            body,
        }
    }

    pub fn with_last_modified(mut self, value: impl Into<String>) -> Self {
        self.last_modified = Some(value.into());
        self
    }

    pub fn with_content_length(mut self, len: u64) -> Self {
        self.content_length = Some(len);
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Consume the response, yielding the streaming body.
    pub fn into_body(self) -> Box<dyn Read> {
        self.body
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("last_modified", &self.last_modified)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Minimal blocking GET client.
pub trait HttpClient {
    /// Issue a GET request. Non-2xx responses are returned, not turned into
    /// errors; only transport failures produce `Err`.
    fn get(&self, url: &str) -> Result<HttpResponse, CatalogError>;
}

/// [`HttpClient`] backed by `reqwest::blocking`.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, CatalogError> {
        // Packages run to several GiB, so no overall request timeout.
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| CatalogError::http(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse, CatalogError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| CatalogError::http(format!("GET {url}: {e}")))?;

        let status = response.status().as_u16();
        let last_modified = response
            .headers()
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_length = response.content_length();

        Ok(HttpResponse {
            status,
            last_modified,
            content_length,
            body: Box::new(response),
        })
    }
}
