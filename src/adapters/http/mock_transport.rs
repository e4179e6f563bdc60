//! Mock transport for testing without network calls.
//!
//! Routes a request to the first registered reply whose pattern is a substring
//! of the URL, and records every URL it was asked for.

use crate::domain::DomainError;
use crate::ports::{HttpResponse, HttpTransport, RequestOptions};
use serde_json::Value;
use std::sync::Mutex;
use tracing::info;

/// Canned reply for a route.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 200 with the value as JSON body.
    Json(Value),
    /// Arbitrary status and raw body.
    Status(u16, String),
    /// Transport-level failure with this message.
    Fail(String),
}

#[derive(Default)]
pub struct MockTransport {
    routes: Vec<(String, MockReply)>,
    calls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reply for URLs containing `pattern`. Earlier routes win.
    pub fn route(mut self, pattern: impl Into<String>, reply: MockReply) -> Self {
        self.routes.push((pattern.into(), reply));
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of requested URLs containing `pattern`.
    pub fn call_count(&self, pattern: &str) -> usize {
        self.calls().iter().filter(|u| u.contains(pattern)).count()
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str, _options: &RequestOptions) -> Result<HttpResponse, DomainError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }

        let reply = self
            .routes
            .iter()
            .find(|(pattern, _)| url.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone());
        info!(url, matched = reply.is_some(), "[MOCK] GET");

        match reply {
            Some(MockReply::Json(value)) => Ok(HttpResponse {
                status: 200,
                status_text: "OK".to_string(),
                body: value.to_string(),
            }),
            Some(MockReply::Status(status, body)) => Ok(HttpResponse {
                status,
                status_text: String::new(),
                body,
            }),
            Some(MockReply::Fail(message)) => Err(DomainError::Transport(message)),
            None => Err(DomainError::Transport(format!("no mock route for {}", url))),
        }
    }
}
