//! HTTP adapters. Implement HttpTransport.
//!
//! Provides a reqwest-backed transport and a mock transport for testing.

pub mod mock_transport;
pub mod reqwest_transport;

pub use mock_transport::{MockReply, MockTransport};
pub use reqwest_transport::ReqwestTransport;
