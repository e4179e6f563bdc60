//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP types here. Raw upstream payloads are loosely typed, so records are
//! built from `serde_json::Value` with best-effort field access: a field of the
//! wrong type is treated the same as a missing one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

/// Sentinel rendered for any value the upstream did not provide.
pub const UNKNOWN: &str = "---";

/// Result of splitting a free-form identifier into host and ids.
///
/// At most one of `report_id` / `conversation_id` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    pub domain: String,
    /// Always `https://{domain}/`.
    pub base_url: String,
    pub report_id: Option<String>,
    pub conversation_id: Option<String>,
}

/// Outcome of an enrichment fetch. `Degraded` means the call failed and the
/// merge step must fall back to sentinels.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Ok(T),
    Degraded,
}

impl<T: Default> Fetched<T> {
    pub fn into_inner_or_default(self) -> T {
        match self {
            Fetched::Ok(value) => value,
            Fetched::Degraded => T::default(),
        }
    }
}

impl<T> Fetched<T> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Fetched::Degraded)
    }
}

/// Conversation metadata from `api/v3/conversations`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationRecord {
    /// Creation time, epoch milliseconds.
    pub created: Option<i64>,
    pub topic: Option<String>,
    pub title: Option<String>,
    pub vis_type: Option<i64>,
    pub is_active: Option<bool>,
    pub report_id: Option<String>,
    pub ownername: Option<String>,
    pub owner: Option<String>,
    pub lang: Option<String>,
    pub group_count: Option<u64>,
    pub comment_count: Option<u64>,
}

impl ConversationRecord {
    /// Normalize whatever the conversations endpoint returned into one record.
    ///
    /// Accepted shapes: a bare object, an object wrapped as
    /// `{"conversation": {...}}`, or a sequence whose first element is either of
    /// those. Anything else (including an empty sequence) yields an empty record.
    pub fn from_payload(payload: &Value) -> Self {
        let candidate = match payload {
            Value::Array(items) => match items.first() {
                Some(first) => first,
                None => return Self::default(),
            },
            other => other,
        };
        let inner = match candidate.get("conversation") {
            Some(wrapped) if is_truthy(wrapped) => wrapped,
            _ => candidate,
        };
        Self::from_object(inner)
    }

    fn from_object(v: &Value) -> Self {
        if !v.is_object() {
            return Self::default();
        }
        Self {
            created: v.get("created").and_then(epoch_millis),
            topic: non_empty_str(v, "topic"),
            title: non_empty_str(v, "title"),
            vis_type: v.get("vis_type").and_then(as_integer),
            is_active: v.get("is_active").and_then(Value::as_bool),
            report_id: v.get("report_id").and_then(id_string),
            ownername: non_empty_str(v, "ownername"),
            owner: v.get("owner").and_then(id_string),
            lang: v
                .get("lang")
                .filter(|l| !l.is_null())
                .map(display_value),
            group_count: v.get("group_count").and_then(Value::as_u64),
            comment_count: v.get("comment_count").and_then(Value::as_u64),
        }
    }

    /// Creation date as a UTC calendar day. Out-of-range epochs give `None`.
    pub fn created_date(&self) -> Option<NaiveDate> {
        self.created
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.date_naive())
    }
}

/// Analytics payload from `api/v3/math/pca2`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MathRecord {
    /// Voter count (`n`).
    pub voters: Option<u64>,
    /// Length of `group-clusters`.
    pub group_clusters: Option<u64>,
    /// `n-cmts`.
    pub comments: Option<u64>,
    /// Length of `meta-tids`.
    pub meta_tids: Option<u64>,
}

impl MathRecord {
    pub fn from_payload(v: &Value) -> Self {
        let seq_len = |key: &str| {
            v.get(key)
                .and_then(Value::as_array)
                .map(|items| items.len() as u64)
        };
        Self {
            voters: v.get("n").and_then(Value::as_u64),
            group_clusters: seq_len("group-clusters"),
            comments: v.get("n-cmts").and_then(Value::as_u64),
            meta_tids: seq_len("meta-tids"),
        }
    }
}

/// One entry of `api/v3/comments`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentRecord {
    pub lang: Option<String>,
    /// Moderation status; `-1` means moderated out.
    pub moderation: Option<i64>,
}

impl CommentRecord {
    pub fn from_value(v: &Value) -> Self {
        Self {
            lang: non_empty_str(v, "lang"),
            moderation: v.get("mod").and_then(as_integer),
        }
    }

    /// Counted towards the language tally iff tagged and not moderated out.
    pub fn counts_for_language(&self) -> bool {
        self.lang.is_some() && self.moderation != Some(-1)
    }
}

/// Merged per-request snapshot of a conversation.
///
/// Unknown values stay `None` until [`ConversationSummary::render`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSummary {
    pub date: Option<NaiveDate>,
    pub title: Option<String>,
    pub convo_url: String,
    pub visible: bool,
    pub closed: bool,
    pub report_url: Option<String>,
    pub voters: Option<u64>,
    pub groups: Option<u64>,
    pub comments: Option<u64>,
    pub meta: Option<u64>,
    pub lang: Option<String>,
    pub owner: Option<String>,
}

/// Display form of a summary: every field is text, unknowns are [`UNKNOWN`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSummary {
    pub date: String,
    pub title: String,
    pub convo_url: String,
    pub visible: String,
    pub closed: String,
    pub report_url: String,
    pub voters: String,
    pub groups: String,
    pub comments: String,
    pub meta: String,
    pub lang: String,
    pub owner: String,
}

impl ConversationSummary {
    pub fn render(&self) -> RenderedSummary {
        fn or_unknown<T: ToString>(v: &Option<T>) -> String {
            v.as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| UNKNOWN.to_string())
        }

        RenderedSummary {
            date: self
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            title: or_unknown(&self.title),
            convo_url: self.convo_url.clone(),
            visible: if self.visible { "✅ yes" } else { "✖️ no" }.to_string(),
            closed: if self.closed { "✅ yes" } else { "❌ no" }.to_string(),
            report_url: or_unknown(&self.report_url),
            voters: or_unknown(&self.voters),
            groups: or_unknown(&self.groups),
            comments: or_unknown(&self.comments),
            meta: or_unknown(&self.meta),
            lang: or_unknown(&self.lang),
            owner: or_unknown(&self.owner),
        }
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn non_empty_str(v: &Value, key: &str) -> Option<String> {
    v.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Integers, including whole floats such as `1.0`.
fn as_integer(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| {
        v.as_f64()
            .filter(|f| f.fract() == 0.0 && f.is_finite())
            .map(|f| f as i64)
    })
}

/// Identifier-like fields arrive as strings or numbers.
fn id_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if is_truthy(v) => Some(n.to_string()),
        _ => None,
    }
}

fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `created` is either a number or a numeric string. Strings are read like a
/// base-10 integer prefix (`"1700000000000abc"` -> 1700000000000). Zero counts
/// as absent.
fn epoch_millis(v: &Value) -> Option<i64> {
    let ms = match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => leading_integer(s),
        _ => None,
    }?;
    (ms != 0).then_some(ms)
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
