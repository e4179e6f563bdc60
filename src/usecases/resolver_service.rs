//! Conversation resolution. Orchestrates the lookup workflow.
//!
//! Coordinates input parsing, report lookup, metadata/analytics fetches and
//! language aggregation, then merges everything into one summary.

use crate::domain::{
    ConversationRecord, ConversationSummary, DomainError, Fetched, MathRecord, ParsedInput,
    ResolveFailure, parse_input,
};
use crate::ports::HttpTransport;
use crate::usecases::json_fetcher::fetch_json;
use crate::usecases::language_aggregator::aggregate_languages;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Per-call knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Skip metadata and language enrichment; only analytics counts are fetched.
    pub minimal: bool,
}

/// Service resolving a conversation identifier into a summary.
///
/// Orchestrates the flow:
/// 1. Parse the input
/// 2. Resolve a report id to its conversation id (hard failure)
/// 3. Fetch metadata and analytics (soft failures)
/// 4. Rank comment languages (soft failure)
/// 5. Merge into a `ConversationSummary`
///
/// Holds no state between calls.
pub struct ConversationResolver {
    transport: Arc<dyn HttpTransport>,
}

impl ConversationResolver {
    /// Create a resolver on top of a caller-supplied transport.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub async fn resolve(
        &self,
        input: &str,
        options: &ResolveOptions,
    ) -> Result<ConversationSummary, ResolveFailure> {
        let parsed = parse_input(input);
        debug!(?parsed, minimal = options.minimal, "parsed input");

        let conversation_id = match &parsed.report_id {
            Some(report_id) => self
                .conversation_for_report(&parsed.base_url, report_id)
                .await
                .map_err(|e| ResolveFailure::ReportLookup {
                    cause: e.to_string(),
                })?,
            None => parsed.conversation_id.clone(),
        };
        let conversation_id = conversation_id.ok_or(ResolveFailure::NoConversationId)?;

        let conversation = if options.minimal {
            Fetched::Degraded
        } else {
            self.fetch_conversation(&parsed.base_url, &conversation_id)
                .await
        };
        let math = self.fetch_math(&parsed.base_url, &conversation_id).await;
        debug!(
            metadata_degraded = conversation.is_degraded(),
            math_degraded = math.is_degraded(),
            "enrichment fetched"
        );

        let conversation = conversation.into_inner_or_default();
        let math = math.into_inner_or_default();
        let lang = if options.minimal {
            conversation.lang.clone()
        } else {
            match aggregate_languages(self.transport.as_ref(), &parsed.base_url, &conversation_id)
                .await
            {
                Ok(ranked) => Some(ranked),
                Err(e) => {
                    warn!(conversation_id, error = %e, "Language detection failed");
                    conversation.lang.clone()
                }
            }
        };

        let summary = merge(&parsed, &conversation_id, &conversation, &math, lang);
        info!(conversation_id, url = %summary.convo_url, "conversation resolved");
        Ok(summary)
    }

    /// First report's `conversation_id`, if any.
    async fn conversation_for_report(
        &self,
        base_url: &str,
        report_id: &str,
    ) -> Result<Option<String>, DomainError> {
        let url = format!("{}api/v3/reports?report_id={}", base_url, report_id);
        let reports = fetch_json(self.transport.as_ref(), &url).await?;
        let conversation_id = reports
            .get(0)
            .and_then(|r| r.get("conversation_id"))
            .and_then(|id| match id {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            });
        debug!(report_id, ?conversation_id, "report resolved");
        Ok(conversation_id)
    }

    async fn fetch_conversation(
        &self,
        base_url: &str,
        conversation_id: &str,
    ) -> Fetched<ConversationRecord> {
        let url = format!(
            "{}api/v3/conversations?conversation_id={}",
            base_url, conversation_id
        );
        match fetch_json(self.transport.as_ref(), &url).await {
            Ok(payload) => Fetched::Ok(ConversationRecord::from_payload(&payload)),
            Err(e) => {
                warn!(conversation_id, error = %e, "conversation metadata unavailable");
                Fetched::Degraded
            }
        }
    }

    async fn fetch_math(&self, base_url: &str, conversation_id: &str) -> Fetched<MathRecord> {
        let url = format!(
            "{}api/v3/math/pca2?conversation_id={}",
            base_url, conversation_id
        );
        match fetch_json(self.transport.as_ref(), &url).await {
            Ok(payload) => Fetched::Ok(MathRecord::from_payload(&payload)),
            Err(e) => {
                warn!(conversation_id, error = %e, "conversation analytics unavailable");
                Fetched::Degraded
            }
        }
    }
}

/// Field-by-field merge, first available value wins.
fn merge(
    parsed: &ParsedInput,
    conversation_id: &str,
    convo: &ConversationRecord,
    math: &MathRecord,
    lang: Option<String>,
) -> ConversationSummary {
    let report_url = parsed
        .report_id
        .as_deref()
        .or(convo.report_id.as_deref())
        .map(|id| format!("{}report/{}", parsed.base_url, id));

    ConversationSummary {
        date: convo.created_date(),
        title: convo.topic.clone().or_else(|| convo.title.clone()),
        convo_url: format!("{}{}", parsed.base_url, conversation_id),
        visible: convo.vis_type == Some(1),
        // missing is_active means open
        closed: convo.is_active == Some(false),
        report_url,
        voters: math.voters,
        groups: math.group_clusters.or(convo.group_count),
        comments: math.comments.or(convo.comment_count),
        meta: math.meta_tids,
        lang,
        owner: convo.ownername.clone().or_else(|| convo.owner.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::{MockReply, MockTransport};
    use crate::domain::UNKNOWN;
    use serde_json::json;

    fn resolver(mock: &Arc<MockTransport>) -> ConversationResolver {
        ConversationResolver::new(Arc::clone(mock) as Arc<dyn HttpTransport>)
    }

    fn full_mock() -> MockTransport {
        MockTransport::new()
            .route(
                "api/v3/conversations",
                MockReply::Json(json!({
                    "created": 1700000000000i64,
                    "topic": "Test",
                    "vis_type": 1,
                    "is_active": true,
                    "ownername": "alice"
                })),
            )
            .route(
                "api/v3/math/pca2",
                MockReply::Json(json!({"n": 42, "group-clusters": [1, 2], "n-cmts": 10})),
            )
            .route(
                "api/v3/comments",
                MockReply::Json(json!([{"lang": "en", "mod": 0}])),
            )
    }

    #[tokio::test]
    async fn test_resolve_bare_id_full_summary() {
        let mock = Arc::new(full_mock());
        let summary = resolver(&mock)
            .resolve("abc123", &ResolveOptions::default())
            .await
            .unwrap();
        let out = summary.render();

        assert_eq!(out.date, "2023-11-14");
        assert_eq!(out.title, "Test");
        assert_eq!(out.convo_url, "https://pol.is/abc123");
        assert_eq!(out.visible, "✅ yes");
        assert_eq!(out.closed, "❌ no");
        assert_eq!(out.report_url, UNKNOWN);
        assert_eq!(out.voters, "42");
        assert_eq!(out.groups, "2");
        assert_eq!(out.comments, "10");
        assert_eq!(out.meta, UNKNOWN);
        assert_eq!(out.lang, "en");
        assert_eq!(out.owner, "alice");
    }

    #[tokio::test]
    async fn test_minimal_skips_metadata_and_languages() {
        let mock = Arc::new(full_mock());
        let summary = resolver(&mock)
            .resolve("abc123", &ResolveOptions { minimal: true })
            .await
            .unwrap();

        assert_eq!(mock.call_count("api/v3/conversations"), 0);
        assert_eq!(mock.call_count("api/v3/comments"), 0);
        assert_eq!(mock.call_count("api/v3/math/pca2"), 1);
        assert_eq!(summary.voters, Some(42));
        assert_eq!(summary.title, None);
        assert_eq!(summary.lang, None);
    }

    #[tokio::test]
    async fn test_report_lookup_failure_stops_pipeline() {
        let mock = Arc::new(
            MockTransport::new().route("api/v3/reports", MockReply::Fail("connection reset".to_string())),
        );
        let failure = resolver(&mock)
            .resolve("https://pol.is/report/r4abc", &ResolveOptions::default())
            .await
            .unwrap_err();

        assert_eq!(failure.to_string(), "Report lookup failed");
        assert!(failure.cause().is_some_and(|c| c.contains("connection reset")));
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_report_resolves_to_conversation() {
        let mock = Arc::new(
            full_mock().route(
                "api/v3/reports?report_id=r4abc",
                MockReply::Json(json!([{"conversation_id": "7xyz", "report_id": "r4abc"}])),
            ),
        );
        let summary = resolver(&mock)
            .resolve("https://demo.polis.example/report/r4abc", &ResolveOptions::default())
            .await
            .unwrap();

        assert_eq!(summary.convo_url, "https://demo.polis.example/7xyz");
        assert_eq!(
            summary.report_url.as_deref(),
            Some("https://demo.polis.example/report/r4abc")
        );
        assert_eq!(
            mock.call_count("api/v3/conversations?conversation_id=7xyz"),
            1
        );
    }

    #[tokio::test]
    async fn test_empty_report_list_means_no_conversation() {
        let mock = Arc::new(MockTransport::new().route("api/v3/reports", MockReply::Json(json!([]))));
        let failure = resolver(&mock)
            .resolve("report_id=r9", &ResolveOptions::default())
            .await
            .unwrap_err();
        assert_eq!(failure, ResolveFailure::NoConversationId);
    }

    #[tokio::test]
    async fn test_unrecognized_input_fails_without_fetching() {
        let mock = Arc::new(MockTransport::new());
        let failure = resolver(&mock)
            .resolve("https://pol.is/not-an-id/", &ResolveOptions::default())
            .await
            .unwrap_err();
        assert_eq!(failure.to_string(), "No conversation ID resolved");
        assert_eq!(failure.cause(), None);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_metadata_failure_degrades_but_keeps_counts() {
        let mock = Arc::new(
            MockTransport::new()
                .route("api/v3/conversations", MockReply::Fail("timeout".to_string()))
                .route(
                    "api/v3/math/pca2",
                    MockReply::Json(json!({"n": 5, "group-clusters": [0], "n-cmts": 3, "meta-tids": [1, 2]})),
                )
                .route("api/v3/comments", MockReply::Json(json!([]))),
        );
        let out = resolver(&mock)
            .resolve("abc123", &ResolveOptions::default())
            .await
            .unwrap()
            .render();

        assert_eq!(out.title, UNKNOWN);
        assert_eq!(out.owner, UNKNOWN);
        assert_eq!(out.report_url, UNKNOWN);
        assert_eq!(out.date, UNKNOWN);
        assert_eq!(out.visible, "✖️ no");
        assert_eq!(out.closed, "❌ no");
        assert_eq!(out.voters, "5");
        assert_eq!(out.groups, "1");
        assert_eq!(out.comments, "3");
        assert_eq!(out.meta, "2");
        assert_eq!(out.lang, "unknown");
    }

    #[tokio::test]
    async fn test_math_failure_falls_back_to_metadata_counts() {
        let mock = Arc::new(
            MockTransport::new()
                .route(
                    "api/v3/conversations",
                    MockReply::Json(json!([{"conversation": {
                        "title": "Fallback title",
                        "is_active": false,
                        "report_id": "r1meta",
                        "owner": 77,
                        "group_count": 4,
                        "comment_count": 12
                    }}])),
                )
                .route("api/v3/math/pca2", MockReply::Status(200, "not json".to_string()))
                .route("api/v3/comments", MockReply::Json(json!([]))),
        );
        let out = resolver(&mock)
            .resolve("https://pol.is/abc123", &ResolveOptions::default())
            .await
            .unwrap()
            .render();

        assert_eq!(out.title, "Fallback title");
        assert_eq!(out.closed, "✅ yes");
        assert_eq!(out.report_url, "https://pol.is/report/r1meta");
        assert_eq!(out.owner, "77");
        assert_eq!(out.voters, UNKNOWN);
        assert_eq!(out.groups, "4");
        assert_eq!(out.comments, "12");
        assert_eq!(out.meta, UNKNOWN);
    }

    #[tokio::test]
    async fn test_language_failure_falls_back_to_declared_lang() {
        let mock = Arc::new(
            MockTransport::new()
                .route("api/v3/conversations", MockReply::Json(json!({"lang": "de"})))
                .route("api/v3/math/pca2", MockReply::Json(json!({})))
                .route("api/v3/comments", MockReply::Fail("503".to_string())),
        );
        let summary = resolver(&mock)
            .resolve("abc123", &ResolveOptions::default())
            .await
            .unwrap();
        assert_eq!(summary.lang.as_deref(), Some("de"));
    }
}
