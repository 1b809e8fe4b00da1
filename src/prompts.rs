//! System prompts for the three LLM tasks: per-document summarization,
//! corpus condensation, and study-document synthesis.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — the LLM's output structure depends on
//!    this exact wording, so changing behaviour means editing exactly one
//!    place.
//!
//! 2. **Testability** — unit tests can inspect the prompts directly and
//!    pin the load-bearing phrases (the page cap, the section skeletons)
//!    without spinning up a real LLM.
//!
//! The summarization prompt is the token-efficient variant: summaries get
//! re-fed to the model during condensation and synthesis, so every wasted
//! word in a summary is paid for two more times downstream.

/// System prompt for summarizing one extracted PDF into Markdown.
pub const INDIVIDUAL_SUMMARY_PROMPT: &str = r#"You are an expert at distilling course materials into compact, information-dense study summaries.

Analyze the provided PDF content and produce a Markdown summary that:

1. CONTENT
   - Captures every key concept, definition, formula, and theorem
   - Records distinctions between similar concepts (when to use which)
   - Keeps exact numbers, thresholds, and named algorithms/laws

2. FORM
   - Headings and sub-headings mirroring the document's own structure
   - Bullet points and tables, never paragraphs of prose
   - Token-efficient: no filler words, no restating the obvious

3. DO NOT include
   - Worked examples or exercises
   - Verbose explanations or motivation sections
   - Anything the document itself marks as optional or background

Output only the Markdown summary."#;

/// System prompt for re-compressing an existing summary.
pub const CONDENSATION_PROMPT: &str = r#"You are re-compressing an existing course summary to reduce its size.

Rules:

1. PRESERVE every fact: all concepts, definitions, formulas, numbers, and
   distinctions must survive the compression.
2. CUT words, not content: drop filler, merge overlapping bullets, shorten
   phrasing to the minimum that still reads unambiguously.
3. PREFER tables over paragraphs and bullet lists wherever the material is
   comparative or enumerable.
4. KEEP the Markdown structure (headings may be shortened but not removed).

Output only the compressed Markdown summary."#;

/// System prompt for synthesizing the full memorization document.
///
/// The section skeleton and styling rules are load-bearing: downstream the
/// document is compiled as-is with pdflatex, so the prompt pins the
/// packages and layout conventions the compilation service supports.
pub const MEMORIZE_PROMPT: &str = r#"I have course notes for the provided course and I need to memorize them efficiently. Transform them into a complete, compilable LaTeX document designed for memorization.

Create a document with the following structure:

## 1. MNEMONICS & MEMORY HOOKS
Invent mnemonics, acronyms, and vivid associations for the hardest-to-remember material. One table: item, mnemonic, what it unpacks to.

## 2. CORE CONCEPTS
Every major concept as a compact definition block: name, one-sentence definition, the key property or formula, one distinguishing fact.

## 3. TRADE-OFF TABLES
For every family of competing approaches, a booktabs table comparing them along the axes that matter (cost, speed, accuracy, applicability).

## 4. DECISION-TREE DIAGRAMS
Simple TikZ decision trees for "which technique do I pick" questions. Keep the trees shallow (max depth 3) and label every edge with the deciding condition.

## 5. QUICK REFERENCE
A one-page cheat-sheet section: all formulas and definitions in two-column small print for final review.

## 6. EXAM TRAPS
Bullet list of misconceptions and classic mistakes, each with the one-line correction.

## 7. SELF-TEST
Ten short recall questions (no answers inline; answers in a flushed-right footnotesize block at the end).

## Style requirements:
- A complete compilable document: \documentclass{article}, all needed \usepackage lines, \begin{document} … \end{document}
- Tables with booktabs (\toprule, \midrule, \bottomrule), never vertical rules
- Color highlighting via the xcolor package: \colorbox{yellow!30} for definitions, \textcolor{red} for warnings and traps
- Section numbering as given above
- 11pt font, standard margins

Here are the course notes:"#;

/// Build the exam-sheet synthesis prompt with the page cap substituted.
///
/// The literal "{page_limit} page(s)" phrasing is asserted by tests — the
/// cap is the single most behaviour-shaping line in the prompt.
pub fn exam_prompt(page_limit: usize) -> String {
    format!(
        r#"I have course summaries that I need to transform into concise exam preparation notes as a LaTeX PDF.

CRITICAL CONSTRAINT: The final document must be MAXIMUM {page_limit} page(s). Be extremely selective and concise.

Please create a document with the following structure:

## 1. KEY FORMULAS & DEFINITIONS
A compact table with only the most essential formulas and definitions that will be tested.

## 2. CRITICAL CONCEPTS CHEAT SHEET
One paragraph per major concept - just enough to trigger memory recall. Focus on:
- What distinguishes this from similar concepts
- When/why to use it
- Common mistakes to avoid

## 3. QUICK DECISION TABLE
"If X situation → Use Y approach" table for rapid exam lookup.

## 4. EXAM TRAPS & GOTCHAS
Bullet list of common mistakes and misconceptions with brief explanations.

## 5. MEMORIZATION AIDS
- Key mnemonics (create them if needed)
- Quick recall phrases
- Important numbers/thresholds to remember

## Style requirements:
- COMPACT: Use small margins, 10pt font, multi-column layout where possible
- Tables with booktabs for clean look
- Color highlighting for critical terms (yellow for definitions, red for warnings)
- NO unnecessary whitespace
- NO lengthy explanations - just what's needed for exam recall
- NO space-expensive diagram packages (no TikZ, no pgfplots)

## DO NOT include:
- Examples (unless absolutely critical for understanding)
- Background theory
- Anything obvious or already known
- Derivations or proofs

The goal is MAXIMUM information density for exam day. Here are the course summaries:"#
    )
}

/// System prompt for summarizing one extracted PDF into Markdown.
pub fn individual_summary_prompt() -> &'static str {
    INDIVIDUAL_SUMMARY_PROMPT
}

/// System prompt for re-compressing an existing summary.
pub fn condensation_prompt() -> &'static str {
    CONDENSATION_PROMPT
}

/// System prompt for the full memorization document.
pub fn memorize_prompt() -> &'static str {
    MEMORIZE_PROMPT
}
