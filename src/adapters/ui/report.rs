//! Terminal rendering of a resolved conversation. Fixed labels, emoji prefixes.

use crate::domain::{RenderedSummary, ResolveFailure};

const SEPARATOR: &str = "------------------------------";

/// Render a summary as the labelled block printed on stdout.
pub fn format_summary(s: &RenderedSummary) -> String {
    let lines = [
        format!("📅 Date:      {}", s.date),
        format!("📝 Title:     {}", s.title),
        format!("🔗 URL:       {}", s.convo_url),
        format!("👀 Visible?:  {}", s.visible),
        format!("🔒 Closed?:   {}", s.closed),
        SEPARATOR.to_string(),
        format!("🙋 Voters:    {}", s.voters),
        format!("👥 Groups:    {}", s.groups),
        format!("💬 Comments:  {}", s.comments),
        format!("🧩 Meta cmts: {}", s.meta),
        format!("🌐 Lang:      {}", s.lang),
        format!("👤 Owner:     {}", s.owner),
    ];
    lines.join("\n")
}

/// One-line failure message for stderr.
pub fn format_failure(failure: &ResolveFailure) -> String {
    match failure.cause() {
        Some(cause) => format!("❌ Error: {} - {}", failure, cause),
        None => format!("❌ Error: {}", failure),
    }
}
