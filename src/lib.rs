//! # cramdown
//!
//! Condense course-material PDFs into study artifacts with an LLM:
//! per-document Markdown summaries accumulated in an in-memory session,
//! then a synthesized LaTeX study document — a full memorization pack or a
//! page-capped exam sheet — compiled to PDF by an external service when
//! possible.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDFs
//!  │
//!  ├─ 1. Extract    PDF bytes → plain text (pdf-extract)
//!  ├─ 2. Summarize  one LLM call per document → SummaryRecord in a session
//!  ├─ 3. Condense   (optional) re-compress every record, all-or-nothing
//!  ├─ 4. Synthesize all records (+ extra notes) → one LaTeX document
//!  └─ 5. Compile    best-effort LaTeX → PDF, degrading to source-only
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cramdown::{
//!     summarize_pdf, synthesize_artifact, AnthropicClient, Generator, LatexCompiler,
//!     LlmConfig, SessionStore, SynthesisRequest,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LlmConfig::builder()
//!         .api_key(std::env::var("ANTHROPIC_API_KEY")?)
//!         .build()?;
//!     let generator: Arc<dyn Generator> = Arc::new(AnthropicClient::new(&config)?);
//!     let store = SessionStore::new();
//!
//!     let bytes = std::fs::read("lecture1.pdf")?;
//!     summarize_pdf(&generator, &store, &bytes, "lecture1.pdf", None, "s1").await?;
//!
//!     let artifact = synthesize_artifact(
//!         &generator,
//!         &store,
//!         &LatexCompiler::new(),
//!         &SynthesisRequest::new("s1"),
//!     )
//!     .await?;
//!     println!("{} ({} bytes of PDF)", artifact.filename,
//!         artifact.pdf.as_ref().map_or(0, Vec::len));
//!     Ok(())
//! }
//! ```
//!
//! ## Design notes
//!
//! * Sessions are volatile: the store lives as long as the process and is
//!   always passed in explicitly — see [`SessionStore`].
//! * All pipelines call the model through the [`Generator`] trait object,
//!   so tests (and alternative providers) plug in without touching the
//!   orchestration.
//! * Compilation is the single place failures are absorbed instead of
//!   propagated — see [`CompilationResult`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod condense;
pub mod config;
pub mod error;
pub mod markdown;
pub mod pipeline;
pub mod prompts;
pub mod session;
pub mod summarize;
pub mod synthesize;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use condense::condense_session;
pub use config::{DocumentKind, LlmConfig, LlmConfigBuilder, SynthesisRequest, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use error::CramdownError;
pub use markdown::{export_markdown, EXPORT_FILENAME};
pub use pipeline::compile::{CompilationResult, LatexCompiler, DEFAULT_COMPILE_ENDPOINT};
pub use pipeline::extract::extract_text;
pub use pipeline::fence::extract_latex_body;
pub use pipeline::llm::{AnthropicClient, Generator};
pub use session::{SessionStore, SummaryRecord};
pub use summarize::summarize_pdf;
pub use synthesize::{synthesize, synthesize_artifact, StudyArtifact};
