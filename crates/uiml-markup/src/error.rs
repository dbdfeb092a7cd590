use serde::Serialize;
use thiserror::Error;
use uiml_source::ContextWindow;
use uiml_source::LineCol;

/// Broad family an error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    Lexical,
    Semantic,
    DesignToken,
}

#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
pub enum ParseErrorKind {
    /// A character that cannot start or continue the construct being read.
    #[error("Unexpected character '{found}', expected {expected}")]
    UnexpectedCharacter { found: char, expected: String },

    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("Unclosed string literal in attribute '{attribute}'")]
    UnclosedString { attribute: String },

    #[error("Unclosed expression in attribute '{attribute}': missing '}}'")]
    UnclosedExpression { attribute: String },

    /// The closing tag does not name the element it closes.
    ///
    /// ```text
    /// <Button>OK</Butto>
    /// ```
    #[error("Mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedClosingTag { expected: String, found: String },

    #[error("Unclosed tag <{name}>: expected </{name}> before end of input")]
    UnclosedTag { name: String },

    #[error("Unexpected closing tag </{name}> with no open component")]
    UnexpectedClosingTag { name: String },

    #[error("Expected a component name after '<'")]
    EmptyComponentName,

    #[error("Expected a component name after '</', to close <{expected}>")]
    EmptyClosingTagName { expected: String },

    #[error("Elements nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("Invalid component name '{found}': component names start with an uppercase letter")]
    InvalidComponentName { found: String },

    /// The tag names something neither the registry nor the reserved `Table`
    /// type knows about. The message lists the registry names plus `Table`
    /// so the author can correct it in one go.
    #[error("Unknown component '{name}'. Valid components: {}", .known.join(", "))]
    UnknownComponent { name: String, known: Vec<String> },

    /// Precomposed components expand to a fixed subtree and cannot hold
    /// children of their own.
    #[error("<{name}> is a precomposed component and must be self-closing: <{name} ... />")]
    PrecomposedWithChildren { name: String },

    #[error("<{name}> does not accept child components")]
    ChildrenNotAccepted { name: String },

    #[error("Invalid expression in attribute '{attribute}': {{{expression}}}")]
    InvalidExpression { attribute: String, expression: String },

    #[error("Invalid {attribute} value {value}. Allowed values: {}", join_scale(.allowed))]
    InvalidSpacing {
        attribute: String,
        value: String,
        allowed: Vec<u32>,
    },

    #[error("Invalid gridColumnSpan value {value}: must be an integer from 1 to 12")]
    InvalidGridColumnSpan { value: String },

    #[error("Invalid gridRowSpan value {value}: must be a positive integer")]
    InvalidGridRowSpan { value: String },

    #[error("Invalid Grid columns value {value}: Grid must declare exactly 12 columns")]
    InvalidGridColumns { value: String },
}

impl ParseErrorKind {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnexpectedCharacter { .. }
            | Self::UnexpectedEnd { .. }
            | Self::UnclosedString { .. }
            | Self::UnclosedExpression { .. }
            | Self::MismatchedClosingTag { .. }
            | Self::UnclosedTag { .. }
            | Self::UnexpectedClosingTag { .. }
            | Self::EmptyComponentName
            | Self::EmptyClosingTagName { .. }
            | Self::NestingTooDeep { .. }
            | Self::InvalidComponentName { .. } => ErrorCategory::Lexical,
            Self::UnknownComponent { .. }
            | Self::PrecomposedWithChildren { .. }
            | Self::ChildrenNotAccepted { .. }
            | Self::InvalidExpression { .. } => ErrorCategory::Semantic,
            Self::InvalidSpacing { .. }
            | Self::InvalidGridColumnSpan { .. }
            | Self::InvalidGridRowSpan { .. }
            | Self::InvalidGridColumns { .. } => ErrorCategory::DesignToken,
        }
    }

    /// Stable diagnostic code, used when rendering errors for people.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnexpectedCharacter { .. } => "M100",
            Self::UnexpectedEnd { .. } => "M101",
            Self::UnclosedString { .. } => "M102",
            Self::UnclosedExpression { .. } => "M103",
            Self::MismatchedClosingTag { .. } => "M104",
            Self::UnclosedTag { .. } => "M105",
            Self::UnexpectedClosingTag { .. } => "M106",
            Self::EmptyComponentName => "M107",
            Self::InvalidComponentName { .. } => "M108",
            Self::EmptyClosingTagName { .. } => "M109",
            Self::NestingTooDeep { .. } => "M110",
            Self::UnknownComponent { .. } => "M200",
            Self::PrecomposedWithChildren { .. } => "M201",
            Self::ChildrenNotAccepted { .. } => "M202",
            Self::InvalidExpression { .. } => "M203",
            Self::InvalidSpacing { .. } => "M300",
            Self::InvalidGridColumnSpan { .. } => "M301",
            Self::InvalidGridRowSpan { .. } => "M302",
            Self::InvalidGridColumns { .. } => "M303",
        }
    }
}

fn join_scale(scale: &[u32]) -> String {
    scale
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A located parse failure.
///
/// This is the only way a parse reports failure: the message, the 1-based
/// line and column, and a numbered excerpt of the surrounding source with a
/// caret under the offending column.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
#[error("{message} (line {line}, column {column})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub context: String,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, position: LineCol, source: &str) -> Self {
        let context = ContextWindow::around(source, position.line()).with_caret(position.column());
        Self {
            message: kind.to_string(),
            kind,
            line: position.line(),
            column: position.column(),
            context,
        }
    }

    #[must_use]
    pub fn position(&self) -> LineCol {
        LineCol::new(self.line, self.column)
    }

    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_component_lists_names() {
        let kind = ParseErrorKind::UnknownComponent {
            name: "Widget".to_string(),
            known: vec!["Card".to_string(), "Table".to_string()],
        };
        insta::assert_snapshot!(kind.to_string(), @"Unknown component 'Widget'. Valid components: Card, Table");
    }

    #[test]
    fn spacing_lists_scale() {
        let kind = ParseErrorKind::InvalidSpacing {
            attribute: "gap".to_string(),
            value: "7".to_string(),
            allowed: vec![0, 1, 2],
        };
        insta::assert_snapshot!(kind.to_string(), @"Invalid gap value 7. Allowed values: 0, 1, 2");
    }

    #[test]
    fn expression_message_keeps_braces() {
        let kind = ParseErrorKind::InvalidExpression {
            attribute: "data".to_string(),
            expression: "foo(".to_string(),
        };
        assert_eq!(kind.to_string(), "Invalid expression in attribute 'data': {foo(}");
        assert_eq!(kind.category(), ErrorCategory::Semantic);
    }

    #[test]
    fn error_carries_location_and_context() {
        let source = "<VStack>\n  <Button>OK</Butto>\n</VStack>";
        let error = ParseError::new(
            ParseErrorKind::MismatchedClosingTag {
                expected: "Button".to_string(),
                found: "Butto".to_string(),
            },
            LineCol::new(2, 13),
            source,
        );
        assert_eq!(error.line, 2);
        assert_eq!(error.column, 13);
        assert!(error.context.contains("> 2 |   <Button>OK</Butto>"));
        assert!(error.context.lines().nth(2).is_some_and(|l| l.ends_with('^')));
        assert_eq!(error.kind.code(), "M104");
    }
}
