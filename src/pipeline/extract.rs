//! Text extraction: raw PDF bytes to plain text.
//!
//! A thin wrapper over the `pdf-extract` crate, which walks the page tree
//! and concatenates each page's text in page order with newlines between
//! pages. No rasterisation, no OCR — garbled extraction from scanned PDFs
//! is out of scope; the LLM sees whatever the content streams contain.
//!
//! Pure function over bytes: no side effects, nothing touches disk.

use crate::error::CramdownError;
use tracing::debug;

/// Extract the plain text of every page, in page order.
///
/// Fails with [`CramdownError::Extraction`] wrapping the parser's own
/// message when the input is encrypted, corrupt, or not a PDF — the
/// original cause is what makes those three distinguishable to a user.
///
/// An extraction that succeeds but yields only whitespace is still a
/// success: judging text quality is the summarizer's job, not this
/// stage's.
pub fn extract_text(bytes: &[u8], source_name: &str) -> Result<String, CramdownError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| CramdownError::Extraction {
            source_name: source_name.to_string(),
            detail: e.to_string(),
        })?;

    debug!(
        source = source_name,
        chars = text.len(),
        "extracted PDF text"
    );
    Ok(text)
}
