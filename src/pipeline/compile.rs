//! Best-effort LaTeX→PDF compilation via an external HTTP service.
//!
//! Compilation is the one stage where "fail loudly" is deliberately
//! inverted: a study sheet that arrives as LaTeX source is still useful,
//! so every failure mode — non-2xx status, transport error, timeout, even
//! a client that cannot be built — degrades to [`CompilationResult::SourceOnly`]
//! carrying the input unchanged. [`LatexCompiler::compile`] cannot return
//! an error.
//!
//! The two-variant result makes the degraded path structurally visible:
//! callers match on it instead of probing an `Option` sentinel.

use std::time::Duration;
use tracing::{debug, warn};

/// Default compilation endpoint (no API key needed).
pub const DEFAULT_COMPILE_ENDPOINT: &str = "https://latexonline.cc/compile";

/// Default per-compilation timeout in seconds.
pub const DEFAULT_COMPILE_TIMEOUT_SECS: u64 = 90;

/// Outcome of a compilation attempt. There is no error variant by design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilationResult {
    /// The service returned a 2xx; the payload is taken as PDF bytes,
    /// unvalidated.
    Compiled(Vec<u8>),
    /// Compilation was not possible; the LaTeX source is passed through
    /// unchanged for the caller to compile elsewhere.
    SourceOnly(String),
}

impl CompilationResult {
    pub fn is_compiled(&self) -> bool {
        matches!(self, CompilationResult::Compiled(_))
    }
}

/// Adapter for the external compilation service.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    endpoint: String,
    timeout_secs: u64,
}

impl Default for LatexCompiler {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_COMPILE_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_COMPILE_TIMEOUT_SECS,
        }
    }
}

impl LatexCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point at a different compilation service (used by tests and
    /// self-hosted deployments).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Compile LaTeX source to PDF bytes, degrading on any failure.
    pub async fn compile(&self, latex: &str) -> CompilationResult {
        match self.try_compile(latex).await {
            Ok(bytes) => {
                debug!(pdf_bytes = bytes.len(), "compilation succeeded");
                CompilationResult::Compiled(bytes)
            }
            Err(detail) => {
                warn!(%detail, "LaTeX compilation unavailable, returning source only");
                CompilationResult::SourceOnly(latex.to_string())
            }
        }
    }

    async fn try_compile(&self, latex: &str) -> Result<Vec<u8>, String> {
        // The client is built per call so a construction failure lands on
        // the same degradation path as a network failure.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .no_proxy()
            .build()
            .map_err(|e| e.to_string())?;

        let response = client
            .get(&self.endpoint)
            .query(&[("text", latex), ("command", "pdflatex")])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }

        let bytes = response.bytes().await.map_err(|e| e.to_string())?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\\documentclass{article}\\begin{document}x\\end{document}";

    #[tokio::test]
    async fn unreachable_endpoint_degrades_to_source_only() {
        // Reserved TEST-NET-1 address: connection fails fast, no service
        // involved.
        let compiler =
            LatexCompiler::with_endpoint("http://192.0.2.1/compile").timeout_secs(1);
        match compiler.compile(DOC).await {
            CompilationResult::SourceOnly(latex) => assert_eq!(latex, DOC),
            CompilationResult::Compiled(_) => panic!("must not compile against TEST-NET"),
        }
    }

    #[tokio::test]
    async fn invalid_endpoint_degrades_to_source_only() {
        let compiler = LatexCompiler::with_endpoint("not a url");
        let result = compiler.compile(DOC).await;
        assert_eq!(result, CompilationResult::SourceOnly(DOC.to_string()));
    }

    #[tokio::test]
    async fn successful_response_yields_exact_response_bytes() {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        const BODY: &[u8] = b"%PDF-1.4 fake compiled output";

        // One-shot canned HTTP server: read the request, write a fixed
        // 200, close.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 8192];
            let _ = stream.read(&mut request);
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                BODY.len()
            );
            stream.write_all(header.as_bytes()).unwrap();
            stream.write_all(BODY).unwrap();
        });

        let compiler =
            LatexCompiler::with_endpoint(format!("http://{addr}/compile")).timeout_secs(5);
        let result = compiler.compile(DOC).await;
        server.join().unwrap();

        assert_eq!(result, CompilationResult::Compiled(BODY.to_vec()));
    }

    #[test]
    fn source_only_preserves_input_exactly() {
        let result = CompilationResult::SourceOnly(DOC.to_string());
        assert!(!result.is_compiled());
        match result {
            CompilationResult::SourceOnly(latex) => assert_eq!(latex, DOC),
            _ => unreachable!(),
        }
    }
}
