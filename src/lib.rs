//! polis-deets: resolve a Polis conversation or report identifier into a summary,
//! with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
