mod position;
mod render;
mod window;

pub use position::LineCol;
pub use position::LineIndex;
pub use position::Span;
pub use render::Diagnostic;
pub use render::DiagnosticAnnotation;
pub use render::DiagnosticRenderer;
pub use render::Severity;
pub use window::splice_window;
pub use window::ContextLine;
pub use window::ContextWindow;
pub use window::CONTEXT_RADIUS;
