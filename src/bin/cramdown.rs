//! CLI binary for cramdown.
//!
//! A thin shim over the library crate: summarize every input PDF into one
//! in-memory session, optionally condense, then export Markdown and/or
//! synthesize the final study document. Sessions are volatile, so one
//! invocation covers the whole flow.

use anyhow::{bail, Context, Result};
use clap::Parser;
use cramdown::{
    condense_session, export_markdown, summarize_pdf, synthesize_artifact, AnthropicClient,
    DocumentKind, Generator, LatexCompiler, LlmConfig, SessionStore, SynthesisRequest,
    EXPORT_FILENAME,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summarize two lecture PDFs and build the memorization document
  cramdown lecture1.pdf lecture2.pdf -o out/

  # Page-capped exam sheet, with extra guidance for the model
  cramdown notes/*.pdf --kind exam --pages 1 \
      --instructions "focus on the statistics chapters" -o out/

  # Re-compress summaries before synthesis (cheaper final call)
  cramdown notes/*.pdf --condense --kind exam -o out/

  # Just the combined Markdown summaries, no LaTeX at all
  cramdown notes/*.pdf --markdown --no-synthesize -o out/

  # Mix in notes that never went through summarization
  cramdown lecture1.pdf --extra-summaries my_notes.md -o out/

  # Skip the compilation service, keep the .tex source
  cramdown lecture1.pdf --no-compile -o out/

ENVIRONMENT VARIABLES:
  ANTHROPIC_API_KEY   API key (or pass --api-key)
  CRAMDOWN_ENDPOINT   Override the LLM endpoint base address
  CRAMDOWN_MODEL      Override the model ID

OUTPUT FILES (written to --output, default "."):
  all_summaries.md     combined per-document summaries  (--markdown)
  memorize_notes.pdf   compiled study document          (or .tex when
  exam_notes.pdf       compilation is unavailable)
"#;

/// Condense course-material PDFs into study notes using an LLM.
#[derive(Parser, Debug)]
#[command(
    name = "cramdown",
    version,
    about = "Condense course-material PDFs into study notes using an LLM",
    long_about = "Summarize each input PDF with an LLM, accumulate the summaries, and \
synthesize them into a memorization document or a page-capped exam sheet as LaTeX, \
compiled to PDF by latexonline.cc when reachable.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input PDF files, summarized in the given order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory to write output files into.
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// API key for the LLM endpoint.
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: String,

    /// LLM endpoint base address (default: the provider's standard host).
    #[arg(long, env = "CRAMDOWN_ENDPOINT")]
    endpoint: Option<String>,

    /// Model ID.
    #[arg(long, env = "CRAMDOWN_MODEL", default_value = cramdown::DEFAULT_MODEL)]
    model: String,

    /// Free-text context forwarded to every summarization call.
    #[arg(long)]
    context: Option<String>,

    /// Re-compress all summaries before synthesis.
    #[arg(long)]
    condense: bool,

    /// Concurrent LLM calls during condensation.
    #[arg(short, long, default_value_t = 4)]
    concurrency: usize,

    /// Study document kind: memorize or exam.
    #[arg(long, default_value = "memorize")]
    kind: String,

    /// Page cap for the exam document.
    #[arg(long, default_value_t = 2)]
    pages: usize,

    /// Free-text instructions for the synthesis call.
    #[arg(long)]
    instructions: Option<String>,

    /// Markdown file with extra summaries to include ahead of the session's own.
    #[arg(long)]
    extra_summaries: Option<PathBuf>,

    /// Also write the combined summaries as Markdown.
    #[arg(long)]
    markdown: bool,

    /// Skip synthesis entirely (useful with --markdown).
    #[arg(long)]
    no_synthesize: bool,

    /// Skip the compilation service; always write .tex source.
    #[arg(long)]
    no_compile: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn" // the progress bar is the user-facing feedback
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let kind: DocumentKind = cli.kind.parse().context("invalid --kind")?;

    // ── Wire up the pipeline ─────────────────────────────────────────────
    let mut config = LlmConfig::builder()
        .api_key(&cli.api_key)
        .model(&cli.model)
        .concurrency(cli.concurrency);
    if let Some(ref endpoint) = cli.endpoint {
        config = config.endpoint(endpoint);
    }
    let config = config.build().context("invalid LLM configuration")?;

    let generator: Arc<dyn Generator> =
        Arc::new(AnthropicClient::new(&config).context("failed to build LLM client")?);
    let store = SessionStore::new();
    let session_id = "cli";

    tokio::fs::create_dir_all(&cli.output)
        .await
        .with_context(|| format!("failed to create output dir {}", cli.output.display()))?;

    // ── Summarize each input ─────────────────────────────────────────────
    let bar = progress_bar(cli.quiet, cli.inputs.len() as u64);
    for input in &cli.inputs {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        bar.set_message(name.clone());

        let bytes = tokio::fs::read(input)
            .await
            .with_context(|| format!("failed to read {}", input.display()))?;

        summarize_pdf(
            &generator,
            &store,
            &bytes,
            &name,
            cli.context.as_deref(),
            session_id,
        )
        .await
        .with_context(|| format!("failed to summarize {name}"))?;

        bar.inc(1);
    }
    bar.finish_and_clear();
    if !cli.quiet {
        eprintln!("✔ summarized {} document(s)", cli.inputs.len());
    }

    // ── Optional condensation ────────────────────────────────────────────
    if cli.condense {
        let count = condense_session(&generator, &store, session_id, config.concurrency)
            .await
            .context("condensation failed")?;
        if !cli.quiet {
            eprintln!("✔ condensed {count} summar{}", if count == 1 { "y" } else { "ies" });
        }
    }

    // ── Markdown export ──────────────────────────────────────────────────
    if cli.markdown {
        let path = cli.output.join(EXPORT_FILENAME);
        let doc = export_markdown(&store.get(session_id));
        tokio::fs::write(&path, doc)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        if !cli.quiet {
            eprintln!("✔ wrote {}", path.display());
        }
    }

    if cli.no_synthesize {
        if !cli.markdown {
            bail!("--no-synthesize without --markdown produces no output");
        }
        return Ok(());
    }

    // ── Synthesis ────────────────────────────────────────────────────────
    let mut request = SynthesisRequest::new(session_id)
        .kind(kind)
        .page_limit(cli.pages);
    if let Some(ref instructions) = cli.instructions {
        request = request.instructions(instructions);
    }
    if let Some(ref path) = cli.extra_summaries {
        let extra = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        request = request.external_summaries(extra);
    }

    let artifact = if cli.no_compile {
        let latex = cramdown::synthesize(&generator, &store, &request)
            .await
            .context("synthesis failed")?;
        cramdown::StudyArtifact {
            filename: format!("{}_notes.tex", kind.slug()),
            latex,
            pdf: None,
        }
    } else {
        synthesize_artifact(&generator, &store, &LatexCompiler::new(), &request)
            .await
            .context("synthesis failed")?
    };

    let path = cli.output.join(&artifact.filename);
    match &artifact.pdf {
        Some(pdf) => tokio::fs::write(&path, pdf).await,
        None => tokio::fs::write(&path, &artifact.latex).await,
    }
    .with_context(|| format!("failed to write {}", path.display()))?;

    if !cli.quiet {
        if artifact.has_pdf() {
            eprintln!("✔ wrote {}", path.display());
        } else {
            eprintln!(
                "⚠ compilation unavailable — wrote LaTeX source to {}",
                path.display()
            );
        }
    }

    Ok(())
}

/// A per-document progress bar, hidden in quiet mode.
fn progress_bar(quiet: bool, total: u64) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} Summarizing  [{bar:42.green/238}] {pos}/{len}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    bar
}
