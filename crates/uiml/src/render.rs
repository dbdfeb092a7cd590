use std::io::IsTerminal;

use uiml_markup::ErrorCategory;
use uiml_markup::ParseError;
use uiml_source::Diagnostic;
use uiml_source::DiagnosticRenderer;
use uiml_source::LineIndex;
use uiml_source::Severity;
use uiml_source::Span;

/// Render a parse error against its source with the error's code.
pub fn render_parse_error(
    source: &str,
    path: &str,
    error: &ParseError,
    fmt: &DiagnosticRenderer,
) -> String {
    let index = LineIndex::new(source);
    let offset = index
        .offset(source, error.position())
        .unwrap_or(source.len());
    let width = source[offset..].chars().next().map_or(0, char::len_utf8);

    let label = match error.category() {
        ErrorCategory::Lexical => "syntax error here",
        ErrorCategory::Semantic => "not allowed here",
        ErrorCategory::DesignToken => "value outside the design scale",
    };

    let diag = Diagnostic::new(
        source,
        path,
        error.kind.code(),
        &error.message,
        Severity::Error,
        Span::from_parts(offset, width),
        label,
    );
    fmt.render(&diag)
}

pub fn pick_renderer() -> DiagnosticRenderer {
    if std::io::stdout().is_terminal() {
        DiagnosticRenderer::styled()
    } else {
        DiagnosticRenderer::plain()
    }
}
