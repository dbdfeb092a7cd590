//! Line windows around an error location.
//!
//! A [`ContextWindow`] is the slice of source lines shown to a reader (or a
//! language model) around a failure, and [`splice_window`] swaps that same
//! slice for replacement text while leaving every other byte alone.

use std::fmt::Write as _;

use serde::Serialize;

/// Number of lines kept on each side of the error line.
pub const CONTEXT_RADIUS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextLine {
    pub number: u32,
    pub text: String,
    pub is_error: bool,
}

/// The error line plus up to [`CONTEXT_RADIUS`] lines either side, clipped to
/// the document. Line numbers are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextWindow {
    start_line: u32,
    end_line: u32,
    error_line: u32,
    lines: Vec<ContextLine>,
}

impl ContextWindow {
    #[must_use]
    pub fn around(source: &str, error_line: u32) -> Self {
        let all: Vec<&str> = source.split('\n').collect();
        let total = u32::try_from(all.len()).unwrap_or(u32::MAX);
        let error_line = error_line.clamp(1, total);
        let start_line = error_line.saturating_sub(CONTEXT_RADIUS).max(1);
        let end_line = error_line.saturating_add(CONTEXT_RADIUS).min(total);

        let lines = (start_line..=end_line)
            .map(|number| ContextLine {
                number,
                text: all[(number - 1) as usize].to_string(),
                is_error: number == error_line,
            })
            .collect();

        Self {
            start_line,
            end_line,
            error_line,
            lines,
        }
    }

    #[must_use]
    pub fn start_line(&self) -> u32 {
        self.start_line
    }

    #[must_use]
    pub fn end_line(&self) -> u32 {
        self.end_line
    }

    #[must_use]
    pub fn error_line(&self) -> u32 {
        self.error_line
    }

    #[must_use]
    pub fn lines(&self) -> &[ContextLine] {
        &self.lines
    }

    /// The raw text of the line the error sits on.
    #[must_use]
    pub fn failing_line(&self) -> &str {
        self.lines
            .iter()
            .find(|line| line.is_error)
            .map_or("", |line| trim_cr(&line.text))
    }

    /// Gutter-numbered listing with `>` marking the error line.
    #[must_use]
    pub fn numbered(&self) -> String {
        self.render(None)
    }

    /// Like [`ContextWindow::numbered`], with a caret under `column` of the
    /// error line.
    #[must_use]
    pub fn with_caret(&self, column: u32) -> String {
        self.render(Some(column))
    }

    fn render(&self, caret: Option<u32>) -> String {
        let width = self.end_line.to_string().len();
        let mut out = String::new();

        for line in &self.lines {
            let marker = if line.is_error { '>' } else { ' ' };
            let _ = writeln!(
                out,
                "{marker} {:>width$} | {}",
                line.number,
                trim_cr(&line.text)
            );

            if let (true, Some(column)) = (line.is_error, caret) {
                let pad: String = trim_cr(&line.text)
                    .chars()
                    .take(column.saturating_sub(1) as usize)
                    .map(|c| if c == '\t' { '\t' } else { ' ' })
                    .collect();
                let _ = writeln!(out, "  {:>width$} | {pad}^", "");
            }
        }

        out.truncate(out.trim_end_matches('\n').len());
        out
    }
}

/// Replace the lines covered by `window` in `source` with `replacement`.
///
/// Lines outside the window are carried over byte-for-byte, line endings
/// included. A single trailing newline on `replacement` is dropped so the
/// splice does not grow a blank line.
#[must_use]
pub fn splice_window(source: &str, window: &ContextWindow, replacement: &str) -> String {
    let lines: Vec<&str> = source.split('\n').collect();
    let start = (window.start_line() as usize).saturating_sub(1).min(lines.len());
    let end = (window.end_line() as usize).clamp(start, lines.len());

    let replacement = replacement
        .strip_suffix("\r\n")
        .or_else(|| replacement.strip_suffix('\n'))
        .unwrap_or(replacement);

    let mut spliced: Vec<&str> = Vec::with_capacity(lines.len());
    spliced.extend_from_slice(&lines[..start]);
    spliced.extend(replacement.split('\n'));
    spliced.extend_from_slice(&lines[end..]);
    spliced.join("\n")
}

fn trim_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}
