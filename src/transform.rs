//! Stack transformations
//!
//! The three composable frame transforms (range selection, pattern filter,
//! pattern highlight) plus the message highlighter. Each consumes stack
//! text and produces new stack text; none of them mutates its input or any
//! shared state, and the message segment is never dropped.
//!
//! The message segment is the leading run of lines the [`LineClassifier`]
//! does not recognize as frames; everything after the first frame line is
//! the frame segment. All transforms share that segmentation, so composing
//! them can never disagree about where the message ends.

use serde::{Deserialize, Serialize};

use crate::classify::LineClassifier;
use crate::pattern::PatternSet;
use crate::styles;

/// Whether pattern-matched lines are the ones acted on, or their complement
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Matched lines are kept / highlighted
    #[default]
    Include,
    /// Matched lines are dropped / left unhighlighted
    Exclude,
}

impl MatchPolicy {
    /// True when a line with the given match status is acted on
    pub fn selects(self, matched: bool) -> bool {
        match self {
            MatchPolicy::Include => matched,
            MatchPolicy::Exclude => !matched,
        }
    }
}

/// Number of leading message lines in `lines`; at least 1 for a non-empty
/// stack, since line 0 always classifies as message.
pub(crate) fn message_line_count(lines: &[&str], classifier: &LineClassifier) -> usize {
    let mut count = 0;
    for (index, line) in lines.iter().enumerate() {
        if classifier.is_message_line(line, index) {
            count += 1;
        } else {
            break;
        }
    }
    count
}

/// Return the message segment plus a contiguous sub-range of frame lines.
///
/// `start` is the offset of the first retained frame line, counted from the
/// first frame line of the stack, not from line 0. `depth` caps how many
/// frame lines are kept; `None` keeps everything from `start` on. A `start`
/// at or past the end of the frame segment degrades to an empty frame set,
/// and a `depth` overshooting the end is clamped, so `select_range(stack,
/// 0, None)` and any `depth` covering the whole segment reproduce the input
/// exactly.
pub fn select_range(
    stack: &str,
    start: usize,
    depth: Option<usize>,
    classifier: &LineClassifier,
) -> String {
    let lines: Vec<&str> = stack.split('\n').collect();
    let message_len = message_line_count(&lines, classifier);
    let frames = &lines[message_len..];

    let start = start.min(frames.len());
    let end = match depth {
        Some(depth) => start.saturating_add(depth).min(frames.len()),
        None => frames.len(),
    };

    let mut kept: Vec<&str> = Vec::with_capacity(message_len + end - start);
    kept.extend_from_slice(&lines[..message_len]);
    kept.extend_from_slice(&frames[start..end]);
    kept.join("\n")
}

/// Drop frame lines whose match status against `patterns` disagrees with
/// `policy`. The message segment always passes through verbatim and is
/// never itself matched. An empty pattern set leaves the whole stack
/// untouched regardless of `policy`; surviving frames keep their order.
pub fn filter_frames(
    stack: &str,
    patterns: &PatternSet,
    policy: MatchPolicy,
    classifier: &LineClassifier,
) -> String {
    if patterns.is_empty() {
        return stack.to_string();
    }
    let lines: Vec<&str> = stack.split('\n').collect();
    let message_len = message_line_count(&lines, classifier);

    let mut kept: Vec<&str> = lines[..message_len].to_vec();
    for &line in &lines[message_len..] {
        if policy.selects(patterns.matches(line)) {
            kept.push(line);
        }
    }
    kept.join("\n")
}

/// Wrap frame lines whose match status against `patterns` agrees with
/// `policy` in the marker prefix and [`styles::RESET`] suffix; all other
/// lines pass through byte-identical. Line count and order never change.
/// An empty marker set is a no-op (nothing to draw).
pub fn highlight_frames<S: AsRef<str>>(
    stack: &str,
    patterns: &PatternSet,
    markers: &[S],
    policy: MatchPolicy,
    classifier: &LineClassifier,
) -> String {
    if markers.is_empty() {
        return stack.to_string();
    }
    let prefix = styles::marker_prefix(markers);
    let lines: Vec<&str> = stack.split('\n').collect();
    let message_len = message_line_count(&lines, classifier);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for (index, &line) in lines.iter().enumerate() {
        if index >= message_len && policy.selects(patterns.matches(line)) {
            out.push(format!("{}{}{}", prefix, line, styles::RESET));
        } else {
            out.push(line.to_string());
        }
    }
    out.join("\n")
}

/// Wrap every message line in the marker prefix and [`styles::RESET`]
/// suffix; frame lines pass through unchanged. An empty marker set is a
/// no-op.
pub fn highlight_message<S: AsRef<str>>(
    stack: &str,
    markers: &[S],
    classifier: &LineClassifier,
) -> String {
    if markers.is_empty() {
        return stack.to_string();
    }
    let prefix = styles::marker_prefix(markers);
    let lines: Vec<&str> = stack.split('\n').collect();
    let message_len = message_line_count(&lines, classifier);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for (index, &line) in lines.iter().enumerate() {
        if index < message_len {
            out.push(format!("{}{}{}", prefix, line, styles::RESET));
        } else {
            out.push(line.to_string());
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::LineClassifier;

    fn stack_with_frames(message: &str, frames: usize) -> String {
        let mut lines = vec![message.to_string()];
        for i in 0..frames {
            lines.push(format!("    at frame{} (src/module{}.rs:{}:5)", i, i, i + 1));
        }
        lines.join("\n")
    }

    #[test]
    fn test_range_keeps_message_and_caps_depth() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("Error: an error", 10);

        let formatted = select_range(&stack, 0, Some(5), &classifier);
        let lines: Vec<&str> = formatted.split('\n').collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Error: an error");
        assert!(lines[1].contains("frame0"));
        assert!(lines[5].contains("frame4"));

        let formatted = select_range(&stack, 0, Some(1), &classifier);
        let lines: Vec<&str> = formatted.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("frame0"));
    }

    #[test]
    fn test_range_start_is_frame_relative() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("Error: an error", 10);

        let formatted = select_range(&stack, 1, None, &classifier);
        let lines: Vec<&str> = formatted.split('\n').collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[1].contains("frame1"));
        assert!(lines[9].contains("frame9"));
    }

    #[test]
    fn test_range_full_is_identity() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("Error: an error", 10);

        assert_eq!(select_range(&stack, 0, None, &classifier), stack);
        assert_eq!(select_range(&stack, 0, Some(10), &classifier), stack);
        assert_eq!(select_range(&stack, 0, Some(200), &classifier), stack);
    }

    #[test]
    fn test_range_past_end_keeps_only_message() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("Error: an error", 10);

        assert_eq!(select_range(&stack, 10, None, &classifier), "Error: an error");
        assert_eq!(select_range(&stack, 50, Some(3), &classifier), "Error: an error");
    }

    #[test]
    fn test_range_multi_line_message() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("a multi\nline\nerror\nmessage", 6);

        let formatted = select_range(&stack, 0, Some(5), &classifier);
        let lines: Vec<&str> = formatted.split('\n').collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "a multi");
        assert_eq!(lines[3], "message");
        assert!(lines[4].contains("frame0"));
    }

    #[test]
    fn test_filter_includes_matching_frames() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("Error: an error", 10);
        let patterns = PatternSet::new(&["module3"]).unwrap();

        let formatted = filter_frames(&stack, &patterns, MatchPolicy::Include, &classifier);
        let lines: Vec<&str> = formatted.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Error: an error");
        assert!(lines[1].contains("module3"));
    }

    #[test]
    fn test_filter_partitions_frames() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("Error: an error", 10);
        let patterns = PatternSet::new(&[r"module[0-4]\."]).unwrap();

        let included = filter_frames(&stack, &patterns, MatchPolicy::Include, &classifier);
        let excluded = filter_frames(&stack, &patterns, MatchPolicy::Exclude, &classifier);
        let included: Vec<&str> = included.split('\n').skip(1).collect();
        let excluded: Vec<&str> = excluded.split('\n').skip(1).collect();
        assert_eq!(included.len(), 5);
        assert_eq!(excluded.len(), 5);

        // Every original frame survives in exactly one half
        for line in stack.split('\n').skip(1) {
            assert!(included.contains(&line) != excluded.contains(&line));
        }
    }

    #[test]
    fn test_filter_empty_patterns_is_identity() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("Error: an error", 10);
        let patterns = PatternSet::empty();

        assert_eq!(filter_frames(&stack, &patterns, MatchPolicy::Include, &classifier), stack);
        assert_eq!(filter_frames(&stack, &patterns, MatchPolicy::Exclude, &classifier), stack);
    }

    #[test]
    fn test_filter_never_drops_multi_line_message() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("a multi\nline\nerror\nmessage", 6);
        let patterns = PatternSet::new(&["module"]).unwrap();

        let formatted = filter_frames(&stack, &patterns, MatchPolicy::Exclude, &classifier);
        assert_eq!(formatted, "a multi\nline\nerror\nmessage");
    }

    #[test]
    fn test_highlight_wraps_matching_frames() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("Error: an error", 10);
        let patterns = PatternSet::new(&["module3"]).unwrap();

        let formatted =
            highlight_frames(&stack, &patterns, &[styles::RED], MatchPolicy::Include, &classifier);
        let lines: Vec<&str> = formatted.split('\n').collect();
        assert_eq!(lines.len(), 11);
        for (index, line) in lines.iter().enumerate() {
            if index == 4 {
                assert!(line.starts_with(styles::RED));
                assert!(line.ends_with(styles::RESET));
                assert!(line.contains("module3"));
            } else {
                // Untouched lines are byte-identical to the input
                assert_eq!(*line, stack.split('\n').nth(index).unwrap());
            }
        }
    }

    #[test]
    fn test_highlight_marker_order() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("Error: an error", 2);
        let patterns = PatternSet::new(&["module0"]).unwrap();

        let formatted = highlight_frames(
            &stack,
            &patterns,
            &[styles::GREEN, styles::BOLD],
            MatchPolicy::Include,
            &classifier,
        );
        let lines: Vec<&str> = formatted.split('\n').collect();
        assert_eq!(lines[1].find(styles::GREEN), Some(0));
        assert_eq!(lines[1].find(styles::BOLD), Some(styles::GREEN.len()));
        assert!(lines[1].ends_with(styles::RESET));
        assert!(!lines[2].contains(styles::GREEN));
    }

    #[test]
    fn test_highlight_is_reversible() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("Error: an error", 10);
        let patterns = PatternSet::new(&["frame"]).unwrap();

        let formatted =
            highlight_frames(&stack, &patterns, &[styles::RED], MatchPolicy::Include, &classifier);
        let stripped = formatted.replace(styles::RED, "").replace(styles::RESET, "");
        assert_eq!(stripped, stack);
    }

    #[test]
    fn test_highlight_empty_markers_is_identity() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("Error: an error", 10);
        let patterns = PatternSet::new(&["frame"]).unwrap();

        let formatted =
            highlight_frames(&stack, &patterns, &[] as &[&str], MatchPolicy::Include, &classifier);
        assert_eq!(formatted, stack);
    }

    #[test]
    fn test_highlight_exclude_wraps_the_complement() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("Error: an error", 4);
        let patterns = PatternSet::new(&["module0"]).unwrap();

        let formatted =
            highlight_frames(&stack, &patterns, &[styles::RED], MatchPolicy::Exclude, &classifier);
        let lines: Vec<&str> = formatted.split('\n').collect();
        assert!(!lines[0].contains(styles::RED));
        assert!(!lines[1].contains(styles::RED));
        for line in &lines[2..] {
            assert!(line.starts_with(styles::RED));
        }
    }

    #[test]
    fn test_highlight_message_wraps_whole_segment() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("a multi\nline\nerror\nmessage", 4);

        let formatted = highlight_message(&stack, &[styles::CYAN, styles::BOLD], &classifier);
        let lines: Vec<&str> = formatted.split('\n').collect();
        for line in &lines[..4] {
            assert_eq!(line.find(styles::CYAN), Some(0));
            assert_eq!(line.find(styles::BOLD), Some(styles::CYAN.len()));
            assert!(line.ends_with(styles::RESET));
        }
        for line in &lines[4..] {
            assert!(!line.contains(styles::CYAN));
            assert!(!line.contains(styles::RESET));
        }
    }

    #[test]
    fn test_highlight_message_empty_markers_is_identity() {
        let classifier = LineClassifier::default();
        let stack = stack_with_frames("Error: an error", 4);

        assert_eq!(highlight_message(&stack, &[] as &[&str], &classifier), stack);
    }
}
