//! Stack trace formatting and highlighting.
//!
//! stackfmt transforms the textual representation of an error's call stack
//! (a message part followed by an ordered list of frame lines) by selecting
//! a sub-range of frames, filtering frames in or out by pattern, and
//! applying highlight markers to matched frames or to the message. It is
//! aimed at test runners and loggers that want readable, annotated failure
//! output.
//!
//! # Architecture
//!
//! ```text
//! stack text
//! └── Theme::apply
//!     ├── select_range       (keep a contiguous frame window)
//!     ├── filter_frames      (keep or drop frames by pattern)
//!     ├── highlight_frames   (mark frames by pattern)
//!     └── highlight_message  (mark the message segment)
//! ```
//!
//! Every stage consumes and produces plain stack text; the
//! [`LineClassifier`] is the shared primitive that tells message lines from
//! frame lines inside each stage. All operations are pure: they allocate
//! only per-call data, never mutate their inputs, and are safe to call from
//! any number of threads at once.
//!
//! # Example
//!
//! ```
//! use stackfmt::{styles, LineClassifier, MatchPolicy, PatternSet};
//!
//! let classifier = LineClassifier::default();
//! let stack = "Error: an error\n    at run (src/app.rs:10:5)\n    at poll (vendor/rt.rs:99:1)";
//!
//! let patterns = PatternSet::new(&["vendor/"]).unwrap();
//! let trimmed = stackfmt::filter_frames(stack, &patterns, MatchPolicy::Exclude, &classifier);
//! assert_eq!(trimmed, "Error: an error\n    at run (src/app.rs:10:5)");
//!
//! let marked = stackfmt::highlight_message(&trimmed, &[styles::BOLD], &classifier);
//! assert!(marked.starts_with(styles::BOLD));
//! ```

pub mod classify;
pub mod diff;
pub mod frame;
pub mod pattern;
pub mod styles;
pub mod theme;
pub mod transform;

pub use classify::{ClassifyPolicy, LineClassifier};
pub use diff::{augment_comparison, diff_summary, DiffChunk, DiffKind};
pub use frame::{format_stack, render_frame, Frame, FrameComponent, FormattedStack, StackFormat};
pub use pattern::{PatternError, PatternSet};
pub use theme::{FrameRange, Theme, ThemeError};
pub use transform::{
    filter_frames, highlight_frames, highlight_message, select_range, MatchPolicy,
};
