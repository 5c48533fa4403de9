//! Stack themes
//!
//! A [`Theme`] bundles the optional transformations (frame range, pattern
//! filter, frame highlight, message highlight) and applies them in that
//! fixed order. The order is a contract: filtering after ranging means
//! patterns only ever see the already-truncated frame set, and highlighting
//! after filtering means markers are never spent on dropped lines.
//!
//! Themes are plain data and deserialize from TOML, so a test runner can
//! ship them as configuration:
//!
//! ```toml
//! filter_policy = "exclude"
//! filter_patterns = ["vendor/"]
//! highlight_patterns = ["my_crate"]
//! frame_highlights = ["\u001b[1m"]
//! message_highlights = ["\u001b[31m", "\u001b[1m"]
//!
//! [range]
//! start = 0
//! depth = 12
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::LineClassifier;
use crate::pattern::{PatternError, PatternSet};
use crate::styles;
use crate::transform::{self, MatchPolicy};

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse theme: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Contiguous sub-range of frame lines. Offsets count from the first frame
/// line of the stack, never from line 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameRange {
    /// First frame line to keep
    pub start: usize,
    /// Number of frame lines to keep from `start`; `None` keeps the rest
    pub depth: Option<usize>,
}

/// Bundled, ordered, optional set of stack transformations
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Frame range to keep; present means the range stage runs, even for
    /// `start = 0`
    pub range: Option<FrameRange>,
    /// Patterns deciding which frame lines survive filtering
    pub filter_patterns: Option<Vec<String>>,
    /// Whether filter matches are kept or dropped
    pub filter_policy: MatchPolicy,
    /// Patterns deciding which frame lines are highlighted
    pub highlight_patterns: Option<Vec<String>>,
    /// Markers applied to highlighted frame lines
    pub frame_highlights: Option<Vec<String>>,
    /// Whether highlight matches or their complement get the markers
    pub highlight_policy: MatchPolicy,
    /// Markers applied to the message segment
    pub message_highlights: Option<Vec<String>>,
}

impl Theme {
    /// Bold message plus bold frame lines matching `pattern`
    pub fn bold_module(pattern: &str) -> Self {
        Self {
            message_highlights: Some(vec![styles::BOLD.to_string()]),
            highlight_patterns: Some(vec![pattern.to_string()]),
            frame_highlights: Some(vec![styles::BOLD.to_string()]),
            ..Self::default()
        }
    }

    /// Message markers plus pattern-driven frame markers in one theme
    pub fn with_highlights<S: AsRef<str>>(
        message_highlights: &[S],
        frame_highlights: &[S],
        patterns: &[S],
        policy: MatchPolicy,
    ) -> Self {
        Self {
            message_highlights: Some(to_owned(message_highlights)),
            frame_highlights: Some(to_owned(frame_highlights)),
            highlight_patterns: Some(to_owned(patterns)),
            highlight_policy: policy,
            ..Self::default()
        }
    }

    /// Parse a theme from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ThemeError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a theme from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading stack theme");
        Ok(toml::from_str(&fs::read_to_string(path)?)?)
    }

    /// Apply the configured stages in order: range selection, pattern
    /// filter, frame highlight, message highlight. Absent stages are
    /// skipped, so the all-default theme returns the input unchanged.
    pub fn apply(&self, stack: &str, classifier: &LineClassifier) -> Result<String, ThemeError> {
        tracing::trace!(
            range = self.range.is_some(),
            filter = self.filter_patterns.is_some(),
            highlight = self.frame_highlights.is_some(),
            message = self.message_highlights.is_some(),
            "applying stack theme"
        );

        let mut themed = stack.to_string();
        if let Some(range) = self.range {
            themed = transform::select_range(&themed, range.start, range.depth, classifier);
        }
        if let Some(patterns) = &self.filter_patterns {
            let patterns = PatternSet::new(patterns)?;
            themed = transform::filter_frames(&themed, &patterns, self.filter_policy, classifier);
        }
        if let Some(markers) = &self.frame_highlights {
            let patterns = match &self.highlight_patterns {
                Some(patterns) => PatternSet::new(patterns)?,
                None => PatternSet::empty(),
            };
            themed = transform::highlight_frames(
                &themed,
                &patterns,
                markers,
                self.highlight_policy,
                classifier,
            );
        }
        if let Some(markers) = &self.message_highlights {
            themed = transform::highlight_message(&themed, markers, classifier);
        }
        Ok(themed)
    }
}

fn to_owned<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values.iter().map(|value| value.as_ref().to_string()).collect()
}
