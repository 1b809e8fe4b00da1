//! Fence extraction: pull the LaTeX body out of a fenced model response.
//!
//! Models frequently wrap generated documents in ```` ```latex ```` fences
//! with prose before and after, despite prompts asking for the bare
//! document. This module is the deterministic repair step between the raw
//! response and the compiler.
//!
//! Implemented as a small explicit scan (find opening marker, optional
//! language tag, find closing marker or end of input) rather than ad hoc
//! index arithmetic, so the edge cases — missing closer, tag-less fences,
//! fences mid-prose — are each testable in isolation.
//!
//! Selection order:
//! 1. the first fenced block tagged `latex`, if any;
//! 2. otherwise the first fenced block of any tag;
//! 3. otherwise the response verbatim.
//!
//! A fence with no closing marker runs to end of input. Nothing in here
//! can fail; the worst case is returning the input unchanged.

const FENCE: &str = "```";

/// One fenced block found in a response.
#[derive(Debug, PartialEq, Eq)]
struct FencedBlock<'a> {
    /// The language tag after the opening fence, if any ("latex", "tex", …).
    tag: &'a str,
    /// The block interior, fences excluded, untrimmed.
    body: &'a str,
}

/// Extract the most plausible LaTeX body from a raw model response.
pub fn extract_latex_body(response: &str) -> &str {
    let blocks = scan_blocks(response);

    let chosen = blocks
        .iter()
        .find(|b| b.tag.eq_ignore_ascii_case("latex"))
        .or_else(|| blocks.first());

    match chosen {
        Some(block) => block.body.trim(),
        None => response,
    }
}

/// Scan the response for fenced blocks, tolerating a missing final closer.
fn scan_blocks(input: &str) -> Vec<FencedBlock<'_>> {
    let mut blocks = Vec::new();
    let mut rest = input;

    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];

        // The language tag is whatever sits between the opening fence and
        // the first newline. An unterminated tag line (fence at the very
        // end of input) means an empty block.
        let (tag, body_start) = match after_open.find('\n') {
            Some(nl) => (after_open[..nl].trim(), &after_open[nl + 1..]),
            None => (after_open.trim(), ""),
        };

        // A "tag" with spaces is not a language tag; the fence likely
        // closes an earlier inline snippet. Treat the line as untagged.
        let tag = if tag.contains(char::is_whitespace) { "" } else { tag };

        match body_start.find(FENCE) {
            Some(close) => {
                blocks.push(FencedBlock {
                    tag,
                    body: &body_start[..close],
                });
                rest = &body_start[close + FENCE.len()..];
            }
            None => {
                // No closer: the block runs to end of input.
                blocks.push(FencedBlock {
                    tag,
                    body: body_start,
                });
                break;
            }
        }
    }

    blocks
}
