//! Integration tests for the cramdown pipelines.
//!
//! Everything runs against a scripted [`Generator`] and a local
//! [`SessionStore`] — no network, no API key. The network-adjacent tests
//! point the compiler at a TEST-NET address (degradation) or a local
//! canned-response listener (success), so both halves of the compiler
//! contract run deterministically.

use async_trait::async_trait;
use cramdown::{
    condense_session, export_markdown, extract_latex_body, synthesize, synthesize_artifact,
    CramdownError, DocumentKind, Generator, LatexCompiler, SessionStore, SummaryRecord,
    SynthesisRequest,
};
use std::sync::{Arc, Mutex};

// ── Test helpers ─────────────────────────────────────────────────────────

/// A generator that records every call and replies with a fixed response.
struct ScriptedGenerator {
    response: String,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedGenerator {
    fn replying(response: &str) -> Arc<Self> {
        Arc::new(Self {
            response: response.to_string(),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, CramdownError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_message.to_string()));
        Ok(self.response.clone())
    }
}

fn as_generator(scripted: &Arc<ScriptedGenerator>) -> Arc<dyn Generator> {
    Arc::clone(scripted) as Arc<dyn Generator>
}

// ── Session scenarios ────────────────────────────────────────────────────

#[test]
fn single_append_is_visible_in_order() {
    let store = SessionStore::new();
    store.append(
        "s1",
        SummaryRecord::new("lecture1.pdf", "# Topic\n- point"),
    );

    let records = store.get("s1");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source_name, "lecture1.pdf");
    assert_eq!(records[0].summary, "# Topic\n- point");
}

#[tokio::test]
async fn condensing_empty_session_fails_and_creates_nothing() {
    let store = SessionStore::new();
    let scripted = ScriptedGenerator::replying("should never be called");

    let err = condense_session(&as_generator(&scripted), &store, "empty", 4)
        .await
        .unwrap_err();

    assert!(matches!(err, CramdownError::EmptySession { .. }));
    assert!(store.get("empty").is_empty());
    assert!(scripted.calls().is_empty(), "no LLM calls for empty session");
}

#[tokio::test]
async fn condensation_preserves_count_names_and_order() {
    let store = SessionStore::new();
    for name in ["a.pdf", "b.pdf", "c.pdf"] {
        store.append("s1", SummaryRecord::new(name, format!("long text for {name}")));
    }

    let scripted = ScriptedGenerator::replying("condensed");
    let count = condense_session(&as_generator(&scripted), &store, "s1", 8)
        .await
        .unwrap();
    assert_eq!(count, 3);

    let records = store.get("s1");
    let names: Vec<&str> = records.iter().map(|r| r.source_name.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "b.pdf", "c.pdf"]);
    assert!(records.iter().all(|r| r.summary == "condensed"));
}

// ── Synthesis scenarios ──────────────────────────────────────────────────

#[tokio::test]
async fn memorize_synthesis_orders_sections_by_session_order() {
    let store = SessionStore::new();
    store.append("s1", SummaryRecord::new("A.pdf", "alpha content"));
    store.append("s1", SummaryRecord::new("B.pdf", "beta content"));

    let scripted = ScriptedGenerator::replying("\\documentclass{article}");
    let request = SynthesisRequest::new("s1"); // memorize by default
    synthesize(&as_generator(&scripted), &store, &request)
        .await
        .unwrap();

    let calls = scripted.calls();
    assert_eq!(calls.len(), 1);
    let (system, user) = &calls[0];

    // Memorize prompt selected, session content verbatim, A before B.
    assert!(system.contains("MNEMONICS"));
    assert!(user.contains("alpha content"));
    assert!(user.contains("beta content"));
    assert!(user.find("## A.pdf").unwrap() < user.find("## B.pdf").unwrap());
}

#[tokio::test]
async fn synthesis_on_empty_session_without_external_fails() {
    let store = SessionStore::new();
    let scripted = ScriptedGenerator::replying("unused");

    let err = synthesize(
        &as_generator(&scripted),
        &store,
        &SynthesisRequest::new("empty"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CramdownError::NoContent { .. }));
    assert!(scripted.calls().is_empty());
}

#[tokio::test]
async fn external_summaries_alone_are_enough_and_render_first() {
    let store = SessionStore::new();
    store.append("s1", SummaryRecord::new("a.pdf", "A"));

    let scripted = ScriptedGenerator::replying("doc");
    let request = SynthesisRequest::new("s1").external_summaries("hand-written notes");
    synthesize(&as_generator(&scripted), &store, &request)
        .await
        .unwrap();

    let calls = scripted.calls();
    let (_, user) = &calls[0];
    assert!(
        user.find("## User-Provided Summaries").unwrap() < user.find("## a.pdf").unwrap()
    );
    assert!(user.contains("hand-written notes"));

    // And with nothing in the session at all:
    let store = SessionStore::new();
    let request = SynthesisRequest::new("nope").external_summaries("only these");
    synthesize(&as_generator(&scripted), &store, &request)
        .await
        .unwrap();
}

#[tokio::test]
async fn exam_synthesis_with_page_limit_one_mentions_one_page() {
    let store = SessionStore::new();
    store.append("s1", SummaryRecord::new("a.pdf", "A"));

    let scripted = ScriptedGenerator::replying("doc");
    let request = SynthesisRequest::new("s1")
        .kind(DocumentKind::Exam)
        .page_limit(1);
    synthesize(&as_generator(&scripted), &store, &request)
        .await
        .unwrap();

    let calls = scripted.calls();
    let (system, _) = &calls[0];
    assert!(system.contains("1 page"), "got system prompt: {system}");
    assert!(system.contains("KEY FORMULAS"));
}

#[tokio::test]
async fn instructions_come_before_combined_content() {
    let store = SessionStore::new();
    store.append("s1", SummaryRecord::new("a.pdf", "A"));

    let scripted = ScriptedGenerator::replying("doc");
    let request = SynthesisRequest::new("s1").instructions("keep it to tables");
    synthesize(&as_generator(&scripted), &store, &request)
        .await
        .unwrap();

    let calls = scripted.calls();
    let (_, user) = &calls[0];
    assert!(user.starts_with("Additional Context/Requirements:\nkeep it to tables\n\n"));
}

// ── Fence extraction properties ──────────────────────────────────────────

#[test]
fn fence_extraction_properties() {
    // Tagged block with surrounding prose.
    assert_eq!(
        extract_latex_body("prose ```latex\nDOC\n``` trailing"),
        "DOC"
    );
    // No fences: verbatim.
    let plain = "\\documentclass{article} no fences here";
    assert_eq!(extract_latex_body(plain), plain);
    // Unterminated fence: everything after the opening marker.
    assert_eq!(extract_latex_body("intro\n```latex\nTAIL"), "TAIL");
}

#[tokio::test]
async fn fenced_synthesis_response_is_unwrapped() {
    let store = SessionStore::new();
    store.append("s1", SummaryRecord::new("a.pdf", "A"));

    let scripted =
        ScriptedGenerator::replying("Sure!\n```latex\n\\documentclass{article}\n```\nEnjoy!");
    let latex = synthesize(
        &as_generator(&scripted),
        &store,
        &SynthesisRequest::new("s1"),
    )
    .await
    .unwrap();
    assert_eq!(latex, "\\documentclass{article}");
}

// ── Artifact assembly ────────────────────────────────────────────────────

#[tokio::test]
async fn unreachable_compiler_yields_tex_artifact_with_source_intact() {
    let store = SessionStore::new();
    store.append("s1", SummaryRecord::new("a.pdf", "A"));

    let scripted = ScriptedGenerator::replying("```latex\n\\documentclass{article}\n```");
    let compiler = LatexCompiler::with_endpoint("http://192.0.2.1/compile").timeout_secs(1);
    let request = SynthesisRequest::new("s1").kind(DocumentKind::Exam);

    let artifact = synthesize_artifact(&as_generator(&scripted), &store, &compiler, &request)
        .await
        .unwrap();

    assert!(!artifact.has_pdf());
    assert_eq!(artifact.filename, "exam_notes.tex");
    assert_eq!(artifact.latex, "\\documentclass{article}");
}

#[tokio::test]
async fn reachable_compiler_yields_pdf_artifact_with_response_bytes() {
    use std::io::{Read, Write};
    use std::net::TcpListener;

    const BODY: &[u8] = b"%PDF-1.4 canned";

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

    let store = SessionStore::new();
    store.append("s1", SummaryRecord::new("a.pdf", "A"));

    let scripted = ScriptedGenerator::replying("```latex\n\\documentclass{article}\n```");
    let compiler = LatexCompiler::with_endpoint(format!("http://{addr}/compile")).timeout_secs(5);
    let request = SynthesisRequest::new("s1");

    let artifact = synthesize_artifact(&as_generator(&scripted), &store, &compiler, &request)
        .await
        .unwrap();
    server.join().unwrap();

    assert!(artifact.has_pdf());
    assert_eq!(artifact.filename, "memorize_notes.pdf");
    assert_eq!(artifact.pdf.as_deref(), Some(BODY));
    assert_eq!(artifact.latex, "\\documentclass{article}");
}

// ── Markdown export ──────────────────────────────────────────────────────

#[test]
fn markdown_export_matches_session_order() {
    let store = SessionStore::new();
    store.append("s1", SummaryRecord::new("first.pdf", "one"));
    store.append("s1", SummaryRecord::new("second.pdf", "two"));

    let doc = export_markdown(&store.get("s1"));
    assert!(doc.starts_with("# Course Summaries\n\n"));
    assert!(doc.find("## first.pdf").unwrap() < doc.find("## second.pdf").unwrap());
    assert!(doc.contains("one\n\n---\n\n"));
}
