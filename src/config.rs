//! Configuration types for LLM calls and synthesis requests.
//!
//! Everything the network layer needs to know lives in [`LlmConfig`], built
//! via its [`LlmConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config across pipeline steps and to diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only the API key and rely on documented
//! defaults for the rest, and it gives validation a single choke point —
//! an empty key fails at `build()` rather than deep inside a request.

use crate::error::CramdownError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default LLM endpoint base address.
///
/// A caller-supplied endpoint that is blank or equal to this value is
/// treated as "use the default" — forwarding it would just be redundant
/// configuration.
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";

/// Default model identifier used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5";

/// Configuration for the LLM boundary.
///
/// Built via [`LlmConfig::builder()`].
///
/// # Example
/// ```rust
/// use cramdown::LlmConfig;
///
/// let config = LlmConfig::builder()
///     .api_key("sk-ant-…")
///     .model("claude-sonnet-4-5")
///     .concurrency(4)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct LlmConfig {
    /// API key for the LLM endpoint. Required; never logged.
    pub api_key: String,

    /// Endpoint base address override. `None`, blank, or a value equal to
    /// [`DEFAULT_ENDPOINT`] all mean "use the default".
    pub endpoint: Option<String>,

    /// Model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Maximum tokens the LLM may generate per call. Default: 16000.
    ///
    /// Synthesis produces a complete LaTeX document in one response, so the
    /// ceiling is much higher than a chat application would use. Setting it
    /// too low silently truncates the document mid-environment.
    pub max_tokens: u32,

    /// Per-call timeout in seconds. Default: 300.
    ///
    /// The user message can carry the full extracted text of a lecture-note
    /// PDF, so both upload and generation run long. A generous timeout
    /// avoids aborting calls that are slow but healthy.
    pub timeout_secs: u64,

    /// Number of concurrent LLM calls during condensation. Default: 4.
    ///
    /// Per-record condensation calls are independent, but upstream rate
    /// limits punish a thundering herd. Four in flight is a safe default
    /// for metered API keys; raise it if yours has headroom.
    pub concurrency: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 16_000,
            timeout_secs: 300,
            concurrency: 4,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl LlmConfig {
    /// Create a new builder for `LlmConfig`.
    pub fn builder() -> LlmConfigBuilder {
        LlmConfigBuilder {
            config: Self::default(),
        }
    }

    /// The endpoint base address to actually use, with the default-equal
    /// normalisation applied and any trailing slash removed.
    pub fn effective_endpoint(&self) -> &str {
        match self.endpoint.as_deref().map(|e| e.trim().trim_end_matches('/')) {
            Some(e) if !e.is_empty() && e != DEFAULT_ENDPOINT => e,
            _ => DEFAULT_ENDPOINT,
        }
    }
}

/// Builder for [`LlmConfig`].
#[derive(Debug)]
pub struct LlmConfigBuilder {
    config: LlmConfig,
}

impl LlmConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = Some(endpoint.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn max_tokens(mut self, n: u32) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<LlmConfig, CramdownError> {
        let c = &self.config;
        if c.api_key.trim().is_empty() {
            return Err(CramdownError::MissingCredentials);
        }
        if c.max_tokens == 0 {
            return Err(CramdownError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        if c.concurrency == 0 {
            return Err(CramdownError::InvalidConfig(
                "concurrency must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Synthesis request types ──────────────────────────────────────────────

/// Which study document to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Full memorization document: mnemonics, concept tables, decision
    /// trees, self-test. No page cap.
    #[default]
    Memorize,
    /// Ultra-dense exam sheet capped at a page limit.
    Exam,
}

impl DocumentKind {
    /// Short lowercase name, used in suggested filenames and CLI parsing.
    pub fn slug(&self) -> &'static str {
        match self {
            DocumentKind::Memorize => "memorize",
            DocumentKind::Exam => "exam",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = CramdownError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memorize" | "memorise" => Ok(DocumentKind::Memorize),
            "exam" => Ok(DocumentKind::Exam),
            other => Err(CramdownError::InvalidConfig(format!(
                "unknown document kind '{other}' (expected 'memorize' or 'exam')"
            ))),
        }
    }
}

/// Everything the synthesizer needs for one final-document request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Session whose accumulated summaries feed the document.
    pub session_id: String,

    /// Document flavour. Default: [`DocumentKind::Memorize`].
    pub kind: DocumentKind,

    /// Page cap for the exam variant. Ignored for memorize. Default: 2.
    pub page_limit: usize,

    /// Free-text instructions prepended to the user message.
    pub instructions: Option<String>,

    /// Summary text supplied by the caller directly, rendered before the
    /// session's own records. Lets a user mix in notes that never went
    /// through the summarization pipeline.
    pub external_summaries: Option<String>,
}

impl SynthesisRequest {
    /// A memorize-kind request for the given session with defaults.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            kind: DocumentKind::default(),
            page_limit: 2,
            instructions: None,
            external_summaries: None,
        }
    }

    pub fn kind(mut self, kind: DocumentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn page_limit(mut self, pages: usize) -> Self {
        self.page_limit = pages.max(1);
        self
    }

    pub fn instructions(mut self, text: impl Into<String>) -> Self {
        self.instructions = Some(text.into());
        self
    }

    pub fn external_summaries(mut self, text: impl Into<String>) -> Self {
        self.external_summaries = Some(text.into());
        self
    }
}
