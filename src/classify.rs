//! Stack line classification
//!
//! Decides, per line and position, whether a line belongs to the message
//! part of a stack trace or to the frame part. Two policies exist:
//!
//! - **Structural** (default): a line is a frame when it matches the
//!   `at <identifier> (<file>:<line>:<col> | <location>)` shape.
//! - **Heuristic**: a line is a frame when it is long (measured in display
//!   columns), contains a path separator and carries a source-file
//!   reference (`.ext`, optionally `:line`).
//!
//! Under either policy line 0 is always a message line, and a canonical
//! frame line (`    at functionName (path/to/file.ext:12:34)`) always
//! classifies as a frame at any later index.

use regex::Regex;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthStr;

/// Structural frame shape: `at`, an optional identifier, then either a
/// `file:line:col` triple or an opaque location, optionally parenthesized
static FRAME_SHAPE: OnceLock<Regex> = OnceLock::new();

/// Source-file reference used by the heuristic policy
static SOURCE_SUFFIX: OnceLock<Regex> = OnceLock::new();

/// Minimum display width for the heuristic policy to call a line a frame
const HEURISTIC_MIN_WIDTH: usize = 24;

fn frame_shape() -> &'static Regex {
    FRAME_SHAPE.get_or_init(|| {
        Regex::new(r"at (?:\S+\s+)?\(?(?:.+?:\d+:\d+|[^)]+)\)?")
            .expect("Failed to compile frame shape regex")
    })
}

fn source_suffix() -> &'static Regex {
    SOURCE_SUFFIX.get_or_init(|| {
        // `.ext` optionally followed by `:line`
        Regex::new(r"\.[A-Za-z][A-Za-z0-9]*(?::\d+)?")
            .expect("Failed to compile source suffix regex")
    })
}

/// Classification policy for telling message lines apart from frame lines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClassifyPolicy {
    /// Match the structural frame shape
    #[default]
    Structural,
    /// Long line with a path separator and a source-file reference
    Heuristic,
}

/// Pure per-line predicate shared by every stack transformation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineClassifier {
    policy: ClassifyPolicy,
}

impl LineClassifier {
    pub fn new(policy: ClassifyPolicy) -> Self {
        Self { policy }
    }

    /// Whether `line` at `index` belongs to the message segment.
    ///
    /// Line 0 is always a message line; any later line is a message line
    /// exactly when it does not have frame shape.
    pub fn is_message_line(&self, line: &str, index: usize) -> bool {
        index == 0 || !self.has_frame_shape(line)
    }

    /// Negation of [`is_message_line`](Self::is_message_line); always false
    /// at index 0.
    pub fn is_frame_line(&self, line: &str, index: usize) -> bool {
        !self.is_message_line(line, index)
    }

    fn has_frame_shape(&self, line: &str) -> bool {
        match self.policy {
            ClassifyPolicy::Structural => frame_shape().is_match(line),
            ClassifyPolicy::Heuristic => {
                line.width() >= HEURISTIC_MIN_WIDTH
                    && (line.contains('/') || line.contains('\\'))
                    && source_suffix().is_match(line)
            }
        }
    }
}
