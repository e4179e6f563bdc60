//! Port traits. API boundaries for the hexagon.
//!
//! - Outbound: Called by application into infrastructure (HTTP)

pub mod outbound;

pub use outbound::{HttpResponse, HttpTransport, RequestOptions};
