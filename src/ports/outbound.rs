//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::DomainError;
use serde_json::Value;

/// Per-request options handed to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Extra request headers, applied in order.
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    /// True for 2xx statuses.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON. Does not look at the status.
    pub fn json(&self) -> Result<Value, DomainError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// HTTP GET capability. The only I/O seam of the resolver.
///
/// Timeouts, retries, proxying and whether a non-2xx status is an error are
/// the implementation's business.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, DomainError>;
}
