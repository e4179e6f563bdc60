//! reqwest-backed transport. Implements `HttpTransport`.
//!
//! In strict mode any non-2xx response is turned into `DomainError::Http`
//! carrying the first part of the body, so callers fail instead of decoding an
//! error page.

use crate::domain::DomainError;
use crate::ports::{HttpResponse, HttpTransport, RequestOptions};
use std::time::Duration;
use tracing::{debug, warn};

/// Characters of a rejected response body kept in the error.
const ERROR_BODY_PREVIEW: usize = 200;

pub struct ReqwestTransport {
    client: reqwest::Client,
    accept: String,
    strict: bool,
}

impl ReqwestTransport {
    /// Create a new transport.
    ///
    /// # Arguments
    /// * `user_agent` - Default `User-Agent`; a per-request header overrides it
    /// * `accept` - `Accept` header sent with every request
    /// * `timeout` - Whole-request timeout
    /// * `strict` - Reject non-2xx responses
    pub fn new(
        user_agent: &str,
        accept: &str,
        timeout: Duration,
        strict: bool,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Transport(format!("HTTP client init failed: {}", e)))?;
        Ok(Self {
            client,
            accept: accept.to_string(),
            strict,
        })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, options: &RequestOptions) -> Result<HttpResponse, DomainError> {
        debug!(url, "GET");

        let mut request = self.client.get(url).header("Accept", self.accept.as_str());
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to read body: {}", e)))?;
        let response = HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        };

        if self.strict && !response.ok() {
            warn!(url, status = response.status, "upstream returned error status");
            return Err(rejection(response));
        }

        Ok(response)
    }
}

fn rejection(response: HttpResponse) -> DomainError {
    DomainError::Http {
        status: response.status,
        status_text: response.status_text,
        body: response.body.chars().take(ERROR_BODY_PREVIEW).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_truncates_body() {
        let err = rejection(HttpResponse {
            status: 502,
            status_text: "Bad Gateway".to_string(),
            body: "x".repeat(500),
        });
        let msg = err.to_string();
        assert!(msg.starts_with("HTTP 502 Bad Gateway\n"));
        assert_eq!(msg.lines().nth(1).map(str::len), Some(ERROR_BODY_PREVIEW));
    }

    #[test]
    fn test_new_builds_client() {
        let transport = ReqwestTransport::new(
            "polis-deets-test",
            "application/json",
            Duration::from_secs(5),
            true,
        );
        assert!(transport.is_ok());
    }
}
