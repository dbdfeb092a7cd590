//! The repair request sent for one failing window.
//!
//! The user message carries the error, its location, the numbered window, the
//! failing line, and the valid component names. Nothing else from the
//! document is sent.

use std::fmt::Write as _;

use uiml_markup::ParseError;
use uiml_source::ContextWindow;

use crate::chat::ChatMessage;
use crate::chat::ChatRequest;

pub const SYSTEM_PROMPT: &str = "You repair component markup. Fix only the stated error. \
Reply with the corrected lines only: no explanation, no line numbers, no markers.";

#[derive(Debug)]
pub struct RepairPrompt<'a> {
    error: &'a ParseError,
    window: &'a ContextWindow,
    component_names: &'a [String],
}

impl<'a> RepairPrompt<'a> {
    #[must_use]
    pub fn new(
        error: &'a ParseError,
        window: &'a ContextWindow,
        component_names: &'a [String],
    ) -> Self {
        Self {
            error,
            window,
            component_names,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Error: {}", self.error.message);
        let _ = writeln!(
            out,
            "Location: line {}, column {}",
            self.error.line, self.error.column
        );
        let _ = writeln!(
            out,
            "\nLines {}-{} ('>' marks the failing line):",
            self.window.start_line(),
            self.window.end_line()
        );
        let _ = writeln!(out, "{}", self.window.numbered());
        let _ = writeln!(out, "\nFailing line:\n{}", self.window.failing_line());
        let _ = writeln!(
            out,
            "\nValid components: {}",
            self.component_names.join(", ")
        );
        let _ = write!(
            out,
            "\nReturn replacement text for lines {}-{}.",
            self.window.start_line(),
            self.window.end_line()
        );
        out
    }

    #[must_use]
    pub fn request(&self, max_output_tokens: u32, temperature: Option<f64>) -> ChatRequest {
        ChatRequest {
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(self.user_message()),
            ],
            max_output_tokens,
            temperature,
        }
    }
}

/// Drop a leading ```` ```lang ```` line and a trailing ```` ``` ```` line, if
/// the reply came back fenced.
#[must_use]
pub fn strip_code_fences(reply: &str) -> &str {
    let mut text = reply.trim_matches(|c| c == '\n' || c == '\r');

    if text.trim_start().starts_with("```") {
        text = text.trim_start();
        text = match text.find('\n') {
            Some(newline) => &text[newline + 1..],
            None => "",
        };
    }

    let trimmed_end = text.trim_end();
    if let Some(body) = trimmed_end.strip_suffix("```") {
        text = body.trim_end_matches([' ', '\t']);
        text = text
            .strip_suffix("\r\n")
            .or_else(|| text.strip_suffix('\n'))
            .unwrap_or(text);
    }

    text
}
