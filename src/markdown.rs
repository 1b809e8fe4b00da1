//! Markdown export: all session records as one downloadable document.
//!
//! A pure formatting function over [`crate::session::SessionStore::get`]
//! output — no LLM involvement. Each record becomes a `##`-headed section
//! separated by a horizontal rule.

use crate::session::SummaryRecord;

/// Suggested filename for the exported document.
pub const EXPORT_FILENAME: &str = "all_summaries.md";

/// Render all records into one Markdown document.
///
/// An empty record slice yields just the header; callers that want to
/// treat that as "nothing to export" check the store first.
pub fn export_markdown(records: &[SummaryRecord]) -> String {
    let mut doc = String::from("# Course Summaries\n\n");
    for record in records {
        doc.push_str(&format!(
            "## {}\n\n{}\n\n---\n\n",
            record.source_name, record.summary
        ));
    }
    doc
}
