//! Pipeline stages shared by the summarization, condensation, and
//! synthesis flows.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap an
//! implementation (e.g. a different extraction backend or compilation
//! service) without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ llm ──▶ fence ──▶ compile
//! (pdf→text)  (LLM)   (```latex) (best-effort PDF)
//! ```
//!
//! 1. [`extract`] — PDF bytes to plain text, page order preserved
//! 2. [`llm`]     — the [`llm::Generator`] seam and the HTTP client behind
//!    it; the only stage with mandatory network I/O
//! 3. [`fence`]   — pull the LaTeX body out of a fenced model response
//! 4. [`compile`] — delegate LaTeX→PDF to an external service, degrading
//!    to source-only output on any failure

pub mod compile;
pub mod extract;
pub mod fence;
pub mod llm;
