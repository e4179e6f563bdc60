//! Thin JSON GET on top of the injected transport.

use crate::domain::DomainError;
use crate::ports::{HttpTransport, RequestOptions};
use serde_json::Value;
use tracing::debug;

/// Identifying user agent sent by the fetcher.
pub const FETCHER_USER_AGENT: &str = "polis-utils";

/// GET `url` and decode the body as JSON.
///
/// Transport errors and decode errors propagate unchanged. The status is not
/// checked here: a lenient transport may hand back an error body, which is
/// decoded like any other.
pub async fn fetch_json(transport: &dyn HttpTransport, url: &str) -> Result<Value, DomainError> {
    let options = RequestOptions::default().with_header("User-Agent", FETCHER_USER_AGENT);
    let response = transport.get(url, &options).await?;
    debug!(url, status = response.status, bytes = response.body.len(), "fetched");
    response.json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::{MockReply, MockTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_json_decodes_body() {
        let mock = MockTransport::new().route("x", MockReply::Json(json!([1, 2])));
        let value = fetch_json(&mock, "https://pol.is/x").await.unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[tokio::test]
    async fn test_fetch_json_decodes_error_body_without_status_check() {
        let mock = MockTransport::new().route(
            "x",
            MockReply::Status(500, r#"{"error":"polis_err"}"#.to_string()),
        );
        let value = fetch_json(&mock, "https://pol.is/x").await.unwrap();
        assert_eq!(value["error"], "polis_err");
    }

    #[tokio::test]
    async fn test_fetch_json_propagates_decode_failure() {
        let mock = MockTransport::new().route("x", MockReply::Status(200, "<html>".to_string()));
        let err = fetch_json(&mock, "https://pol.is/x").await.unwrap_err();
        assert!(matches!(err, DomainError::Decode(_)));
    }
}
