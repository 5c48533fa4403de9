//! Highlight marker tokens
//!
//! Markers are opaque style-open tokens concatenated as a line prefix and
//! paired with one [`RESET`] token appended as the suffix. These constants
//! cover the common SGR styles; callers may pass any tokens of their own.

pub const RED: &str = "\u{1b}[31m";
pub const GREEN: &str = "\u{1b}[32m";
pub const YELLOW: &str = "\u{1b}[33m";
pub const BLUE: &str = "\u{1b}[34m";
pub const MAGENTA: &str = "\u{1b}[35m";
pub const CYAN: &str = "\u{1b}[36m";
pub const BOLD: &str = "\u{1b}[1m";

/// Resets color and intensity, leaving other attributes alone
pub const RESET: &str = "\u{1b}[39m\u{1b}[22m";

/// Concatenate marker tokens, in order, into a single highlight prefix
pub fn marker_prefix<S: AsRef<str>>(markers: &[S]) -> String {
    let mut prefix = String::new();
    for marker in markers {
        prefix.push_str(marker.as_ref());
    }
    prefix
}
