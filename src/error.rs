//! Error types for the cramdown library.
//!
//! One enum covers the whole crate. Every variant carries enough context to
//! diagnose the failure without a debugger — the source document name, the
//! session id, or the verbatim upstream detail. Nothing here is retried
//! automatically: a single failure aborts the enclosing operation and the
//! caller decides whether to run the pipeline step again.
//!
//! The one deliberate exception to "fail loudly" is LaTeX compilation,
//! which never produces an error at all — see
//! [`crate::pipeline::compile::CompilationResult`].

use thiserror::Error;

/// All errors returned by the cramdown library.
#[derive(Debug, Error)]
pub enum CramdownError {
    /// The PDF could not be parsed into text (encrypted, corrupt, or not a
    /// PDF at all). The detail is the underlying parser's message.
    #[error("Failed to extract text from '{source_name}': {detail}")]
    Extraction { source_name: String, detail: String },

    /// The LLM call failed — authentication, transport, rate limit, or a
    /// response shape we could not interpret. The upstream detail is
    /// preserved verbatim.
    #[error("LLM generation failed: {detail}")]
    Generation { detail: String },

    /// An API key is required but none was provided.
    #[error("Missing API key: set one on LlmConfig (or ANTHROPIC_API_KEY for the CLI)")]
    MissingCredentials,

    /// Condensation was requested for a session with no records.
    #[error("Session '{session_id}' has no summaries to condense")]
    EmptySession { session_id: String },

    /// Synthesis was requested but the session is empty and no external
    /// summary text was supplied either.
    #[error(
        "Nothing to synthesize: session '{session_id}' is empty and no external summaries were provided"
    )]
    NoContent { session_id: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
