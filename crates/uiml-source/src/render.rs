use annotate_snippets::AnnotationKind;
use annotate_snippets::Level;
use annotate_snippets::Renderer;
use annotate_snippets::Snippet;

use crate::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Help,
}

/// A labelled span. Primary annotations are underlined with `^^^`, context
/// annotations with `---`.
#[derive(Debug, Clone)]
pub struct DiagnosticAnnotation<'a> {
    pub span: Span,
    pub label: &'a str,
    pub primary: bool,
}

impl DiagnosticAnnotation<'_> {
    /// Byte range clamped to a source of `len` bytes.
    fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.span.start_usize().min(len);
        let end = start.saturating_add(self.span.length_usize()).min(len);
        start..end
    }
}

/// Everything needed to print one located error.
///
/// Built by callers from their own error types; nothing here knows about
/// markup.
#[derive(Debug)]
pub struct Diagnostic<'a> {
    pub source: &'a str,
    pub path: &'a str,
    pub code: &'a str,
    pub message: &'a str,
    pub severity: Severity,
    pub annotations: Vec<DiagnosticAnnotation<'a>>,
    pub notes: Vec<&'a str>,
}

impl<'a> Diagnostic<'a> {
    #[must_use]
    pub fn new(
        source: &'a str,
        path: &'a str,
        code: &'a str,
        message: &'a str,
        severity: Severity,
        span: Span,
        label: &'a str,
    ) -> Self {
        Self {
            source,
            path,
            code,
            message,
            severity,
            annotations: Vec::new(),
            notes: Vec::new(),
        }
        .annotation(span, label, true)
    }

    #[must_use]
    pub fn annotation(mut self, span: Span, label: &'a str, primary: bool) -> Self {
        self.annotations.push(DiagnosticAnnotation {
            span,
            label,
            primary,
        });
        self
    }

    #[must_use]
    pub fn note(mut self, note: &'a str) -> Self {
        self.notes.push(note);
        self
    }
}

/// `annotate-snippets` output, plain for pipes and tests or styled for a
/// terminal.
#[derive(Debug)]
pub struct DiagnosticRenderer {
    renderer: Renderer,
}

impl DiagnosticRenderer {
    #[must_use]
    pub fn plain() -> Self {
        Self {
            renderer: Renderer::plain(),
        }
    }

    #[must_use]
    pub fn styled() -> Self {
        Self {
            renderer: Renderer::styled(),
        }
    }

    #[must_use]
    pub fn render(&self, diagnostic: &Diagnostic<'_>) -> String {
        let source = diagnostic.source;
        let snippet = diagnostic.annotations.iter().fold(
            Snippet::source(source).path(diagnostic.path).line_start(1),
            |snippet, ann| {
                let kind = if ann.primary {
                    AnnotationKind::Primary
                } else {
                    AnnotationKind::Context
                };
                snippet.annotation(kind.span(ann.range(source.len())).label(ann.label))
            },
        );

        let level = match diagnostic.severity {
            Severity::Error => Level::ERROR,
            Severity::Warning => Level::WARNING,
            Severity::Help => Level::HELP,
        };
        let group = diagnostic.notes.iter().fold(
            level
                .primary_title(diagnostic.message)
                .id(diagnostic.code)
                .element(snippet),
            |group, note| group.element(Level::NOTE.message(*note)),
        );

        self.renderer.render(&[group])
    }
}
