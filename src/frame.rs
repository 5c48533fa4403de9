//! Structured frame rendering
//!
//! Renders frame metadata records into stack lines according to a
//! [`StackFormat`]. The metadata itself comes from an external stack
//! extractor; this module only decides how present fields are laid out.
//! Punctuation (`.`, `(`, `:`, `)`) is inserted between present fields
//! only; an omitted field omits its punctuation rather than leaving an
//! empty marker behind.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default frame line prefix
const DEFAULT_PREFIX: &str = "    at";

/// Structured metadata for one call frame, as produced by an external
/// stack extractor
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub type_name: Option<String>,
    pub function_name: Option<String>,
    pub method_name: Option<String>,
    pub file_name: Option<String>,
    pub line_number: Option<u32>,
    pub column_number: Option<u32>,
}

/// One renderable field of a frame line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameComponent {
    TypeName,
    FunctionName,
    MethodName,
    FileName,
    LineNumber,
    ColumnNumber,
}

/// Format specification for rendered frame lines: a leading prefix token
/// and the ordered list of components to include
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackFormat {
    pub prefix: String,
    pub components: Vec<FrameComponent>,
}

impl Default for StackFormat {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            components: vec![
                FrameComponent::TypeName,
                FrameComponent::FunctionName,
                FrameComponent::MethodName,
                FrameComponent::FileName,
                FrameComponent::LineNumber,
                FrameComponent::ColumnNumber,
            ],
        }
    }
}

/// Render one frame line according to `format`
pub fn render_frame(frame: &Frame, format: &StackFormat) -> String {
    let mut line = format!("{} ", format.prefix);
    let mut wrap_file_details = false;
    let mut type_rendered = false;
    let mut function_rendered = false;
    let mut file_rendered = false;
    let mut line_rendered = false;

    for component in &format.components {
        match component {
            FrameComponent::TypeName => {
                if let Some(type_name) = present(&frame.type_name) {
                    line.push_str(type_name);
                    type_rendered = true;
                    wrap_file_details = true;
                }
            }
            FrameComponent::FunctionName => {
                if let Some(function_name) = present(&frame.function_name) {
                    // Drop a repeated `Type.` prefix so the pair never
                    // renders as `Type.Type.func`
                    let function_name = match present(&frame.type_name) {
                        Some(type_name) => function_name
                            .strip_prefix(type_name)
                            .and_then(|rest| rest.strip_prefix('.'))
                            .unwrap_or(function_name),
                        None => function_name,
                    };
                    if type_rendered {
                        line.push('.');
                    }
                    line.push_str(function_name);
                    function_rendered = true;
                    wrap_file_details = true;
                }
            }
            FrameComponent::MethodName => {
                if let Some(method_name) = present(&frame.method_name) {
                    let repeated = frame
                        .function_name
                        .as_deref()
                        .map(|function_name| method_name.contains(function_name))
                        .unwrap_or(false);
                    if !repeated {
                        if type_rendered || function_rendered {
                            line.push('.');
                        }
                        line.push_str(method_name);
                        wrap_file_details = true;
                    }
                }
            }
            FrameComponent::FileName => {
                if let Some(file_name) = present(&frame.file_name) {
                    if wrap_file_details {
                        line.push_str(" (");
                    }
                    line.push_str(file_name);
                    file_rendered = true;
                }
            }
            FrameComponent::LineNumber => {
                if let Some(line_number) = frame.line_number {
                    if file_rendered {
                        line.push(':');
                    }
                    line.push_str(&line_number.to_string());
                    line_rendered = true;
                }
            }
            FrameComponent::ColumnNumber => {
                if let Some(column_number) = frame.column_number {
                    if file_rendered || line_rendered {
                        line.push(':');
                    }
                    line.push_str(&column_number.to_string());
                }
            }
        }
    }
    if file_rendered && wrap_file_details {
        line.push(')');
    }
    line
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Immutable result of rendering a message plus structured frames
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormattedStack {
    /// Message segment, verbatim
    pub message: String,
    /// Rendered frame lines, in call order
    pub frames: Vec<String>,
}

impl FormattedStack {
    /// Full stack text: the message followed by one line per frame
    pub fn render(&self) -> String {
        if self.frames.is_empty() {
            self.message.clone()
        } else {
            format!("{}\n{}", self.message, self.frames.join("\n"))
        }
    }
}

impl fmt::Display for FormattedStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Render structured frames under a message
pub fn format_stack(message: &str, frames: &[Frame], format: &StackFormat) -> FormattedStack {
    FormattedStack {
        message: message.to_string(),
        frames: frames.iter().map(|frame| render_frame(frame, format)).collect(),
    }
}
