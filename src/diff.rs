//! Comparison-failure message augmentation
//!
//! For assertion errors carrying long `expected`/`actual` values, the plain
//! message is hard to eyeball. This module consumes a precomputed semantic
//! diff (the diff engine itself is external) and rewrites the stack's
//! message segment with a `Differences:` summary; the frame lines are left
//! untouched.

use crate::classify::LineClassifier;
use crate::transform;

/// Minimum length of each compared value before a diff summary is worth
/// adding; shorter values are readable as-is
pub const MIN_COMPARISON_LEN: usize = 40;

/// Kind of one diff chunk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffKind {
    Equal,
    Added,
    Removed,
}

/// One chunk of a semantic diff between an expected and an actual value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffChunk {
    pub kind: DiffKind,
    pub text: String,
}

impl DiffChunk {
    pub fn new(kind: DiffKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}

/// Build the `Differences:` summary line. Removed chunks describe the
/// expected value, added chunks the actual one; each side is a
/// comma-separated list of double-quoted chunk texts, and an empty side is
/// omitted entirely.
pub fn diff_summary(diff: &[DiffChunk]) -> String {
    let mut expected = String::new();
    let mut actual = String::new();
    for chunk in diff {
        let side = match chunk.kind {
            DiffKind::Removed => &mut expected,
            DiffKind::Added => &mut actual,
            DiffKind::Equal => continue,
        };
        if !side.is_empty() {
            side.push_str(", ");
        }
        side.push('"');
        side.push_str(&chunk.text);
        side.push('"');
    }

    let mut summary = String::from("Differences: ");
    if !expected.is_empty() {
        summary.push_str("'expected': ");
        summary.push_str(&expected);
    }
    if !actual.is_empty() {
        if !expected.is_empty() {
            summary.push_str(", ");
        }
        summary.push_str("'actual': ");
        summary.push_str(&actual);
    }
    summary
}

/// Replace the message segment with a single space-joined message line
/// followed by the diff summary, keeping all frame lines unchanged.
///
/// Only applies when both `expected` and `actual` reach
/// [`MIN_COMPARISON_LEN`]; below that the original stack is returned
/// unchanged.
pub fn augment_comparison(
    stack: &str,
    expected: &str,
    actual: &str,
    diff: &[DiffChunk],
    classifier: &LineClassifier,
) -> String {
    if expected.len() < MIN_COMPARISON_LEN || actual.len() < MIN_COMPARISON_LEN {
        return stack.to_string();
    }
    let lines: Vec<&str> = stack.split('\n').collect();
    let message_len = transform::message_line_count(&lines, classifier);

    let mut out: Vec<String> = Vec::with_capacity(lines.len() - message_len + 2);
    out.push(lines[..message_len].join(" "));
    out.push(diff_summary(diff));
    out.extend(lines[message_len..].iter().map(|line| line.to_string()));
    out.join("\n")
}
