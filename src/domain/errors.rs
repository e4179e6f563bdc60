//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx response rejected by a strict transport.
    #[error("HTTP {status} {status_text}\n{body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Decode(err.to_string())
    }
}

/// Hard failures of conversation resolution. Everything else degrades.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    #[error("Report lookup failed")]
    ReportLookup { cause: String },

    #[error("No conversation ID resolved")]
    NoConversationId,
}

impl ResolveFailure {
    pub fn cause(&self) -> Option<&str> {
        match self {
            ResolveFailure::ReportLookup { cause } => Some(cause),
            ResolveFailure::NoConversationId => None,
        }
    }
}
