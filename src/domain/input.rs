//! Input parsing. Turns a URL, report URL, report id or bare conversation id
//! into a canonical host plus id. Pure, total, no I/O.

use crate::domain::ParsedInput;
use regex::Regex;
use std::sync::LazyLock;

/// Host used when the input carries no `http(s)://host` prefix.
pub const DEFAULT_DOMAIN: &str = "pol.is";

static DOMAIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://([^/]+)").expect("valid domain regex"));
static REPORT_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"report/([A-Za-z0-9]+)").expect("valid report path regex"));
static REPORT_QUERY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"report_id=([A-Za-z0-9]+)").expect("valid report query regex"));

/// Parse a free-form identifier.
///
/// Report ids win over conversation ids: `report/<id>` is tried first, then
/// `report_id=<id>`. Without a report marker the last `/`-separated segment is
/// the conversation id if it is non-empty and purely alphanumeric.
pub fn parse_input(input: &str) -> ParsedInput {
    let domain = DOMAIN_RE
        .captures(input)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_DOMAIN.to_string());
    let base_url = format!("https://{}/", domain);

    let report_id = [&*REPORT_PATH_RE, &*REPORT_QUERY_RE]
        .iter()
        .find_map(|re| re.captures(input).and_then(|c| c.get(1)))
        .map(|m| m.as_str().to_string());

    let conversation_id = match report_id {
        Some(_) => None,
        None => input
            .rsplit('/')
            .next()
            .filter(|tail| !tail.is_empty() && tail.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(str::to_string),
    };

    ParsedInput {
        domain,
        base_url,
        report_id,
        conversation_id,
    }
}
