//! Infrastructure adapters. Implement outbound ports.
//!
//! HTTP transports and terminal output. Map errors to DomainError.

pub mod http;
pub mod ui;
