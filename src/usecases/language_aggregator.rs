//! Language profile of a conversation, computed from its comments.

use crate::domain::{CommentRecord, DomainError};
use crate::ports::HttpTransport;
use crate::usecases::json_fetcher::fetch_json;
use serde_json::Value;
use tracing::debug;

/// Stand-in tally used when no comment qualifies.
const NO_LANGUAGE: &str = "unknown";

/// Fetch all comments of a conversation and rank their languages.
///
/// Errors (transport, decode, a payload that is not a sequence) propagate; the
/// caller owns the fallback.
pub async fn aggregate_languages(
    transport: &dyn HttpTransport,
    base_url: &str,
    conversation_id: &str,
) -> Result<String, DomainError> {
    let url = format!(
        "{}api/v3/comments?conversation_id={}&moderation=true&include_voting_patterns=true",
        base_url, conversation_id
    );
    let payload = fetch_json(transport, &url).await?;
    let items = match payload {
        Value::Array(items) => items,
        other => {
            return Err(DomainError::Decode(format!(
                "comments payload is not a list: {}",
                kind_of(&other)
            )));
        }
    };

    let comments: Vec<CommentRecord> = items.iter().map(CommentRecord::from_value).collect();
    let ranked = rank_languages(&comments);
    debug!(conversation_id, comments = comments.len(), languages = %ranked, "languages ranked");
    Ok(ranked)
}

/// Comma-joined languages, most frequent first.
///
/// Ties keep first-seen order. Moderated-out (`mod == -1`) and untagged
/// comments are ignored; if nothing qualifies the result is `"unknown"`.
pub fn rank_languages(comments: &[CommentRecord]) -> String {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for lang in comments
        .iter()
        .filter(|c| c.counts_for_language())
        .filter_map(|c| c.lang.as_deref())
    {
        match tally.iter_mut().find(|(seen, _)| *seen == lang) {
            Some((_, count)) => *count += 1,
            None => tally.push((lang, 1)),
        }
    }

    if tally.is_empty() {
        tally.push((NO_LANGUAGE, 1));
    }

    // sort_by is stable
    tally.sort_by(|a, b| b.1.cmp(&a.1));
    tally
        .into_iter()
        .map(|(lang, _)| lang)
        .collect::<Vec<_>>()
        .join(", ")
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
