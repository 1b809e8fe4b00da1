//! Document synthesis: all session records → one LaTeX study document.
//!
//! The synthesizer is the only consumer that sees the whole session at
//! once. It renders the combined content deterministically — external
//! summaries first, then each record as a labeled section in session
//! order — so the final document's section order is exactly the order
//! documents were summarized in.
//!
//! [`synthesize`] stops at LaTeX text; [`synthesize_artifact`] additionally
//! runs the best-effort compiler and packages the outcome with a suggested
//! filename.

use crate::config::{DocumentKind, SynthesisRequest};
use crate::error::CramdownError;
use crate::pipeline::compile::{CompilationResult, LatexCompiler};
use crate::pipeline::{fence, llm::Generator};
use crate::prompts;
use crate::session::{SessionStore, SummaryRecord};
use std::sync::Arc;
use tracing::info;

/// The synthesized study document, compiled when possible.
#[derive(Debug, Clone)]
pub struct StudyArtifact {
    /// The LaTeX source, always present.
    pub latex: String,
    /// Compiled PDF bytes, absent when compilation degraded.
    pub pdf: Option<Vec<u8>>,
    /// Suggested download filename: `{kind}_notes.pdf` or `{kind}_notes.tex`.
    pub filename: String,
}

impl StudyArtifact {
    pub fn has_pdf(&self) -> bool {
        self.pdf.is_some()
    }
}

/// Synthesize the LaTeX source for a study document.
///
/// Fails with [`CramdownError::NoContent`] when the session is empty and
/// the request carries no external summaries either.
pub async fn synthesize(
    generator: &Arc<dyn Generator>,
    store: &SessionStore,
    request: &SynthesisRequest,
) -> Result<String, CramdownError> {
    let records = store.get(&request.session_id);

    let external = request
        .external_summaries
        .as_deref()
        .filter(|s| !s.trim().is_empty());

    if records.is_empty() && external.is_none() {
        return Err(CramdownError::NoContent {
            session_id: request.session_id.clone(),
        });
    }

    let combined = combine_content(external, &records);
    let user_message = build_user_message(request.instructions.as_deref(), &combined);

    let system_prompt = match request.kind {
        DocumentKind::Exam => prompts::exam_prompt(request.page_limit),
        DocumentKind::Memorize => prompts::memorize_prompt().to_string(),
    };

    info!(
        session = %request.session_id,
        kind = %request.kind,
        records = records.len(),
        "synthesizing study document"
    );

    let response = generator.generate(&system_prompt, &user_message).await?;
    Ok(fence::extract_latex_body(&response).to_string())
}

/// Synthesize, compile best-effort, and package the result.
pub async fn synthesize_artifact(
    generator: &Arc<dyn Generator>,
    store: &SessionStore,
    compiler: &LatexCompiler,
    request: &SynthesisRequest,
) -> Result<StudyArtifact, CramdownError> {
    let latex = synthesize(generator, store, request).await?;

    let artifact = match compiler.compile(&latex).await {
        CompilationResult::Compiled(pdf) => StudyArtifact {
            latex,
            pdf: Some(pdf),
            filename: format!("{}_notes.pdf", request.kind.slug()),
        },
        CompilationResult::SourceOnly(latex) => StudyArtifact {
            latex,
            pdf: None,
            filename: format!("{}_notes.tex", request.kind.slug()),
        },
    };

    info!(
        filename = %artifact.filename,
        compiled = artifact.has_pdf(),
        "study artifact ready"
    );
    Ok(artifact)
}

/// Render the combined content block: external summaries first, then each
/// record as a `##`-headed section in session order.
fn combine_content(external: Option<&str>, records: &[SummaryRecord]) -> String {
    let mut combined = String::new();

    if let Some(external) = external {
        combined.push_str("## User-Provided Summaries\n\n");
        combined.push_str(external);
        combined.push_str("\n\n");
    }

    for record in records {
        combined.push_str(&format!(
            "## {}\n\n{}\n\n",
            record.source_name, record.summary
        ));
    }

    combined
}

/// Optional free-text instructions, then the combined content.
fn build_user_message(instructions: Option<&str>, combined: &str) -> String {
    let mut message = String::new();
    if let Some(instructions) = instructions.filter(|i| !i.trim().is_empty()) {
        message.push_str(&format!(
            "Additional Context/Requirements:\n{instructions}\n\n"
        ));
    }
    message.push_str(combined);
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_content_orders_sections_by_session_order() {
        let records = vec![
            SummaryRecord::new("a.pdf", "summary A"),
            SummaryRecord::new("b.pdf", "summary B"),
        ];
        let combined = combine_content(None, &records);
        let a_at = combined.find("## a.pdf").unwrap();
        let b_at = combined.find("## b.pdf").unwrap();
        assert!(a_at < b_at);
        assert!(combined.contains("summary A"));
    }

    #[test]
    fn external_summaries_render_first() {
        let records = vec![SummaryRecord::new("a.pdf", "A")];
        let combined = combine_content(Some("my own notes"), &records);
        let ext_at = combined.find("## User-Provided Summaries").unwrap();
        let rec_at = combined.find("## a.pdf").unwrap();
        assert!(ext_at < rec_at);
        assert!(combined.contains("my own notes"));
    }

    #[test]
    fn instructions_precede_combined_content() {
        let message = build_user_message(Some("two columns please"), "## a.pdf\n\nA\n\n");
        assert!(message.starts_with("Additional Context/Requirements:\ntwo columns please\n\n"));
        assert!(message.ends_with("## a.pdf\n\nA\n\n"));
    }

    #[test]
    fn blank_instructions_are_dropped() {
        let message = build_user_message(Some("  "), "content");
        assert_eq!(message, "content");
    }
}
