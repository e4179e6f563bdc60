pub mod report;

pub use report::{format_failure, format_summary};
