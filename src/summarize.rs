//! Summarization pipeline: one PDF in, one session record out.
//!
//! The contract with the store matters more than the sequencing: the
//! record is appended only after generation succeeds, so a failed extract
//! or LLM call leaves the session exactly as it was. The caller can retry
//! the document without first cleaning anything up.

use crate::error::CramdownError;
use crate::pipeline::{extract, llm::Generator};
use crate::prompts;
use crate::session::{SessionStore, SummaryRecord};
use std::sync::Arc;
use tracing::info;

/// Summarize one PDF and append the result to the session.
///
/// # Arguments
/// * `pdf_bytes`    — Raw bytes of a parseable PDF
/// * `source_name`  — Display name used as the record key, e.g. the
///   uploaded filename
/// * `user_context` — Optional free-text requirements forwarded to the
///   model ahead of the document text
/// * `session_id`   — Session to append to (created on first append)
///
/// Returns the appended [`SummaryRecord`].
pub async fn summarize_pdf(
    generator: &Arc<dyn Generator>,
    store: &SessionStore,
    pdf_bytes: &[u8],
    source_name: &str,
    user_context: Option<&str>,
    session_id: &str,
) -> Result<SummaryRecord, CramdownError> {
    let text = extract::extract_text(pdf_bytes, source_name)?;

    let user_message = build_user_message(source_name, user_context, &text);
    let summary = generator
        .generate(prompts::individual_summary_prompt(), &user_message)
        .await?;

    let record = SummaryRecord::new(source_name, summary);
    store.append(session_id, record.clone());

    info!(
        source = source_name,
        session = session_id,
        summary_chars = record.summary.len(),
        "summarized document"
    );
    Ok(record)
}

/// Assemble the user message: source name, optional requirements, then the
/// full extracted text.
fn build_user_message(source_name: &str, user_context: Option<&str>, text: &str) -> String {
    let mut message = format!("PDF Filename: {source_name}\n\n");
    if let Some(context) = user_context.filter(|c| !c.trim().is_empty()) {
        message.push_str(&format!("User Requirements:\n{context}\n\n"));
    }
    message.push_str(&format!("PDF Content:\n{text}"));
    message
}
