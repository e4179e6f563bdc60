//! Application use cases. Orchestrate domain logic via ports.

pub mod json_fetcher;
pub mod language_aggregator;
pub mod resolver_service;

pub use json_fetcher::fetch_json;
pub use language_aggregator::{aggregate_languages, rank_languages};
pub use resolver_service::{ConversationResolver, ResolveOptions};
