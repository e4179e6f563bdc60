//! Core domain layer. No external I/O dependencies.
//!
//! Entities, input parsing and error types live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod input;

pub use entities::{
    CommentRecord, ConversationRecord, ConversationSummary, Fetched, MathRecord, ParsedInput,
    RenderedSummary, UNKNOWN,
};
pub use errors::{DomainError, ResolveFailure};
pub use input::{DEFAULT_DOMAIN, parse_input};
