use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use uiml_source::LineCol;

use crate::design_tokens;
use crate::error::ParseError;
use crate::error::ParseErrorKind;
use crate::expression::coerce_quoted;
use crate::expression::resolve_expression;
use crate::factory::NodeFactory;
use crate::ids::IdGenerator;
use crate::node::ComponentNode;
use crate::node::Properties;
use crate::node::TextBearing;
use crate::precomposed::Precomposed;
use crate::registry::ComponentRegistry;
use crate::registry::RESERVED_TABLE;
use crate::state::ParseState;

/// Deepest element nesting a document may use.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Outcome of parsing markup: the top-level nodes, or the first error.
pub type ParseResult = Result<Vec<ComponentNode>, ParseError>;

/// Parses markup against a fixed component registry.
///
/// Parsing holds no state between calls; each call gets its own cursor and id
/// generator, so one parser can be shared across threads.
#[derive(Clone)]
pub struct MarkupParser {
    registry: Arc<dyn ComponentRegistry>,
}

impl MarkupParser {
    #[must_use]
    pub fn new(registry: Arc<dyn ComponentRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &dyn ComponentRegistry {
        self.registry.as_ref()
    }

    pub fn parse(&self, source: &str) -> ParseResult {
        parse_markup(source, self.registry.as_ref())
    }

    /// Names accepted as component tags: the registry's plus `Table`.
    #[must_use]
    pub fn valid_component_names(&self) -> Vec<String> {
        valid_component_names(self.registry.as_ref())
    }
}

impl std::fmt::Debug for MarkupParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkupParser")
            .field("components", &self.registry.component_names().len())
            .finish()
    }
}

pub fn parse_markup(source: &str, registry: &dyn ComponentRegistry) -> ParseResult {
    let result = Parser::new(source, registry, IdGenerator::new()).parse();
    match &result {
        Ok(nodes) => debug!(nodes = nodes.len(), "parsed markup"),
        Err(error) => debug!(line = error.line, column = error.column, "markup failed to parse: {}", error.message),
    }
    result
}

#[must_use]
pub fn valid_component_names(registry: &dyn ComponentRegistry) -> Vec<String> {
    let mut names = registry.component_names();
    if !names.iter().any(|name| name == RESERVED_TABLE) {
        names.push(RESERVED_TABLE.to_string());
        names.sort();
    }
    names
}

struct Attribute {
    name: String,
    value: Value,
    position: LineCol,
}

/// Recursive-descent parser for one markup document.
pub(crate) struct Parser<'s, 'r> {
    state: ParseState<'s>,
    factory: NodeFactory<'r>,
    depth: usize,
}

impl<'s, 'r> Parser<'s, 'r> {
    pub(crate) fn new(source: &'s str, registry: &'r dyn ComponentRegistry, ids: IdGenerator) -> Self {
        Self {
            state: ParseState::new(source),
            factory: NodeFactory::new(registry, ids),
            depth: 0,
        }
    }

    pub(crate) fn parse(mut self) -> ParseResult {
        let mut nodes = Vec::new();

        loop {
            self.state.skip_whitespace();
            match self.state.peek() {
                None => break,
                Some('<') if self.state.starts_with("</") => {
                    let position = self.state.line_col();
                    self.state.advance_n(2);
                    let name = self.state.take_while(is_name_char).to_string();
                    return Err(self.error_at(ParseErrorKind::UnexpectedClosingTag { name }, position));
                }
                Some('<') => nodes.push(self.parse_element()?),
                Some(found) => {
                    return Err(self.error(ParseErrorKind::UnexpectedCharacter {
                        found,
                        expected: "'<' to start a component".to_string(),
                    }));
                }
            }
        }

        Ok(nodes)
    }

    fn parse_element(&mut self) -> Result<ComponentNode, ParseError> {
        let start = self.state.line_col();
        if self.depth == MAX_NESTING_DEPTH {
            return Err(self.error_at(
                ParseErrorKind::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                start,
            ));
        }

        self.depth += 1;
        let element = self.parse_tag(start);
        self.depth -= 1;
        element
    }

    fn parse_tag(&mut self, start: LineCol) -> Result<ComponentNode, ParseError> {
        self.state.advance(); // <

        let name = self.parse_component_name()?;
        let attributes = self.parse_attributes(&name)?;
        let self_closing = self.parse_tag_end(&name)?;

        for attribute in &attributes {
            design_tokens::check_attribute(&name, &attribute.name, &attribute.value)
                .map_err(|kind| self.error_at(kind, attribute.position))?;
        }

        let mut properties: Properties = attributes
            .into_iter()
            .map(|attribute| (attribute.name, attribute.value))
            .collect();

        if let Some(shorthand) = Precomposed::from_name(&name) {
            if !self_closing {
                return Err(self.error_at(ParseErrorKind::PrecomposedWithChildren { name }, start));
            }
            return Ok(shorthand.expand(&properties, &mut self.factory));
        }

        let Some(spec) = self.factory.spec(&name) else {
            let known = valid_component_names(self.factory.registry());
            return Err(self.error_at(ParseErrorKind::UnknownComponent { name, known }, start));
        };

        let text_bearing = TextBearing::from_type(&name);
        let children = if self_closing {
            Vec::new()
        } else {
            let accepts_children = spec.accepts_children && text_bearing.is_none();
            let (children, text) = self.parse_children(&name, accepts_children)?;

            if let Some(kind) = text_bearing {
                let text = text.trim();
                if !text.is_empty() {
                    properties.insert(kind.text_property().to_string(), Value::String(text.to_string()));
                }
            }
            children
        };

        Ok(self.factory.build(&name, &spec, properties, children))
    }

    fn parse_component_name(&mut self) -> Result<String, ParseError> {
        match self.state.peek() {
            None => Err(self.error(ParseErrorKind::UnexpectedEnd {
                expected: "a component name after '<'".to_string(),
            })),
            Some(c) if c.is_ascii_uppercase() => Ok(self.state.take_while(is_name_char).to_string()),
            Some(c) if c.is_alphanumeric() || c == '_' => {
                let position = self.state.line_col();
                let found = self.state.take_while(is_name_char).to_string();
                Err(self.error_at(ParseErrorKind::InvalidComponentName { found }, position))
            }
            Some(_) => Err(self.error(ParseErrorKind::EmptyComponentName)),
        }
    }

    fn parse_attributes(&mut self, component: &str) -> Result<Vec<Attribute>, ParseError> {
        let mut attributes: Vec<Attribute> = Vec::new();

        loop {
            self.state.skip_whitespace();
            match self.state.peek() {
                Some(c) if is_attribute_start(c) => {
                    let attribute = self.parse_attribute()?;
                    attributes.retain(|existing| existing.name != attribute.name);
                    attributes.push(attribute);
                }
                Some('>' | '/') => return Ok(attributes),
                Some(found) => {
                    return Err(self.error(ParseErrorKind::UnexpectedCharacter {
                        found,
                        expected: format!("an attribute name, '>' or '/>' in <{component}>"),
                    }));
                }
                None => {
                    return Err(self.error(ParseErrorKind::UnexpectedEnd {
                        expected: format!("'>' or '/>' to finish <{component}>"),
                    }));
                }
            }
        }
    }

    fn parse_attribute(&mut self) -> Result<Attribute, ParseError> {
        let position = self.state.line_col();
        let name = self.state.take_while(is_attribute_char).to_string();

        self.state.skip_whitespace();
        if self.state.peek() != Some('=') {
            return Ok(Attribute {
                name,
                value: Value::Bool(true),
                position,
            });
        }
        self.state.advance(); // =
        self.state.skip_whitespace();

        let value = match self.state.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_quoted(quote, &name)?,
            Some('{') => self.parse_expression(&name)?,
            Some(found) => {
                return Err(self.error(ParseErrorKind::UnexpectedCharacter {
                    found,
                    expected: format!("a quoted string or {{expression}} for attribute '{name}'"),
                }));
            }
            None => {
                return Err(self.error(ParseErrorKind::UnexpectedEnd {
                    expected: format!("a value for attribute '{name}'"),
                }));
            }
        };

        Ok(Attribute {
            name,
            value,
            position,
        })
    }

    fn parse_quoted(&mut self, quote: char, attribute: &str) -> Result<Value, ParseError> {
        let start = self.state.line_col();
        self.state.advance(); // opening quote
        let mut raw = String::new();

        loop {
            match self.state.advance() {
                None => {
                    return Err(self.error_at(
                        ParseErrorKind::UnclosedString {
                            attribute: attribute.to_string(),
                        },
                        start,
                    ));
                }
                Some('\\') => match self.state.advance() {
                    Some('n') => raw.push('\n'),
                    Some('t') => raw.push('\t'),
                    Some('r') => raw.push('\r'),
                    Some(escaped) => raw.push(escaped),
                    None => {
                        return Err(self.error_at(
                            ParseErrorKind::UnclosedString {
                                attribute: attribute.to_string(),
                            },
                            start,
                        ));
                    }
                },
                Some(c) if c == quote => break,
                Some(c) => raw.push(c),
            }
        }

        Ok(coerce_quoted(raw))
    }

    /// `{ ... }` with nested braces and quoted strings skipped over.
    fn parse_expression(&mut self, attribute: &str) -> Result<Value, ParseError> {
        let start = self.state.line_col();
        self.state.advance(); // {
        let content_start = self.state.position();

        let mut depth = 1usize;
        let mut quote: Option<char> = None;

        let content_end = loop {
            let before = self.state.position();
            let Some(c) = self.state.advance() else {
                return Err(self.error_at(
                    ParseErrorKind::UnclosedExpression {
                        attribute: attribute.to_string(),
                    },
                    start,
                ));
            };

            match (quote, c) {
                (Some(_), '\\') => {
                    self.state.advance();
                }
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'' | '`') => quote = Some(c),
                (None, '{') => depth += 1,
                (None, '}') => {
                    depth -= 1;
                    if depth == 0 {
                        break before;
                    }
                }
                (None, _) => {}
            }
        };

        let expression = &self.state.source()[content_start..content_end];
        resolve_expression(expression).ok_or_else(|| {
            self.error_at(
                ParseErrorKind::InvalidExpression {
                    attribute: attribute.to_string(),
                    expression: expression.trim().to_string(),
                },
                start,
            )
        })
    }

    /// Consume `>` or `/>`, returning whether the tag closed itself.
    fn parse_tag_end(&mut self, component: &str) -> Result<bool, ParseError> {
        if self.state.starts_with("/>") {
            self.state.advance_n(2);
            return Ok(true);
        }
        if self.state.peek() == Some('>') {
            self.state.advance();
            return Ok(false);
        }
        match self.state.peek() {
            Some(found) => Err(self.error(ParseErrorKind::UnexpectedCharacter {
                found,
                expected: format!("'>' or '/>' to finish <{component}>"),
            })),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd {
                expected: format!("'>' or '/>' to finish <{component}>"),
            })),
        }
    }

    /// Children up to and including the matching closing tag.
    ///
    /// Returns the nested nodes and the concatenated raw text between them.
    fn parse_children(
        &mut self,
        name: &str,
        accepts_children: bool,
    ) -> Result<(Vec<ComponentNode>, String), ParseError> {
        let mut children = Vec::new();
        let mut text = String::new();

        loop {
            if self.state.is_at_end() {
                return Err(self.error(ParseErrorKind::UnclosedTag {
                    name: name.to_string(),
                }));
            }

            if self.state.starts_with("</") {
                self.parse_closing_tag(name)?;
                return Ok((children, text));
            }

            if self.state.peek() == Some('<') {
                if !accepts_children {
                    return Err(self.error(ParseErrorKind::ChildrenNotAccepted {
                        name: name.to_string(),
                    }));
                }
                children.push(self.parse_element()?);
                continue;
            }

            text.push_str(self.state.take_while(|c| c != '<'));
        }
    }

    fn parse_closing_tag(&mut self, expected: &str) -> Result<(), ParseError> {
        let position = self.state.line_col();
        self.state.advance_n(2); // </

        let found = self.state.take_while(is_name_char).to_string();
        if found.is_empty() {
            return Err(self.error(ParseErrorKind::EmptyClosingTagName {
                expected: expected.to_string(),
            }));
        }
        if found != expected {
            return Err(self.error_at(
                ParseErrorKind::MismatchedClosingTag {
                    expected: expected.to_string(),
                    found,
                },
                position,
            ));
        }

        self.state.skip_whitespace();
        match self.state.peek() {
            Some('>') => {
                self.state.advance();
                Ok(())
            }
            Some(found) => Err(self.error(ParseErrorKind::UnexpectedCharacter {
                found,
                expected: format!("'>' to finish </{expected}>"),
            })),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd {
                expected: format!("'>' to finish </{expected}>"),
            })),
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(kind, self.state.line_col())
    }

    fn error_at(&self, kind: ParseErrorKind, position: LineCol) -> ParseError {
        ParseError::new(kind, position, self.state.source())
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_attribute_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_attribute_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':')
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::registry::ComponentSpecs;

    fn registry() -> ComponentSpecs {
        ComponentSpecs::builtin().unwrap()
    }

    fn parse(source: &str) -> ParseResult {
        let registry = registry();
        Parser::new(source, &registry, IdGenerator::with_suffix("test")).parse()
    }

    fn parse_one(source: &str) -> ComponentNode {
        let mut nodes = parse(source).unwrap();
        assert_eq!(nodes.len(), 1, "expected a single root node");
        nodes.remove(0)
    }

    fn parse_err(source: &str) -> ParseError {
        parse(source).unwrap_err()
    }

    mod elements {
        use super::*;

        #[test]
        fn test_self_closing() {
            let node = parse_one("<Divider />");
            assert_eq!(node.type_name(), "Divider");
            assert!(node.children().is_empty());
        }

        #[test]
        fn test_nested_tree() {
            let node = parse_one(
                "<VStack spacing={2}>\n  <HStack>\n    <Icon name=\"star\"/>\n  </HStack>\n  <Divider/>\n</VStack>",
            );
            assert_eq!(node.count(), 4);
            let types: Vec<&str> = node.descendants().map(ComponentNode::type_name).collect();
            assert_eq!(types, vec!["VStack", "HStack", "Icon", "Divider"]);
        }

        #[test]
        fn test_multiple_roots() {
            let nodes = parse("<Divider/>\n<Spacer/>").unwrap();
            assert_eq!(nodes.len(), 2);
        }

        #[test]
        fn test_empty_input() {
            assert_eq!(parse("  \n\t ").unwrap(), Vec::new());
        }

        #[test]
        fn test_ids_and_names() {
            let node = parse_one("<VStack><Divider/><Divider/></VStack>");
            assert_eq!(node.children()[0].id(), "divider-1-test");
            assert_eq!(node.children()[1].name(), "Divider 2");
            assert_eq!(node.id(), "vstack-3-test");
            assert_eq!(node.name(), "VStack 1");
        }

        #[test]
        fn test_reserved_table() {
            let node = parse_one("<Table columns={[\"a\", \"b\"]}><VStack/></Table>");
            assert_eq!(node.type_name(), "Table");
            assert_eq!(node.property("columns"), Some(&json!(["a", "b"])));
            assert_eq!(node.children().len(), 1);
        }

        #[test]
        fn test_crlf_source() {
            let node = parse_one("<VStack>\r\n  <Divider/>\r\n</VStack>\r\n");
            assert_eq!(node.count(), 2);
        }
    }

    mod attributes {
        use super::*;

        #[test]
        fn test_value_forms() {
            let node = parse_one(
                r#"<Input disabled placeholder="Email" size={3} meta={{ a: 'x' }} tags='["a"]' label='it\'s' />"#,
            );
            assert_eq!(node.property("disabled"), Some(&json!(true)));
            assert_eq!(node.property("placeholder"), Some(&json!("Email")));
            assert_eq!(node.property("size"), Some(&json!(3)));
            assert_eq!(node.property("meta"), Some(&json!({"a": "x"})));
            assert_eq!(node.property("tags"), Some(&json!(["a"])));
            assert_eq!(node.property("label"), Some(&json!("it's")));
        }

        #[test]
        fn test_defaults_then_attributes() {
            let node = parse_one(r#"<Button variant="ghost" />"#);
            assert_eq!(node.property("variant"), Some(&json!("ghost")));
            assert_eq!(node.property("size"), Some(&json!("md")));
            assert_eq!(node.property("text"), Some(&json!("Button")));
        }

        #[test]
        fn test_later_duplicate_wins() {
            let node = parse_one(r#"<Icon name="a" name="b" />"#);
            assert_eq!(node.property("name"), Some(&json!("b")));
        }

        #[test]
        fn test_interactions_attribute() {
            let node = parse_one(
                r#"<Button interactions={[{ trigger: 'click', action: 'navigate' }]}>Go</Button>"#,
            );
            assert_eq!(
                node.interactions(),
                &[json!({"trigger": "click", "action": "navigate"})]
            );
            assert!(node.property("interactions").is_none());
        }

        #[test]
        fn test_multiline_attributes() {
            let node = parse_one("<Card\n  variant=\"outline\"\n  padding={6}\n/>");
            assert_eq!(node.property("padding"), Some(&json!(6)));
        }

        #[test]
        fn test_escaped_newline_in_string() {
            let node = parse_one(r#"<Text children="a\nb" />"#);
            assert_eq!(node.property("children"), Some(&json!("a\nb")));
        }
    }

    mod text {
        use super::*;

        #[test]
        fn test_heading_folds_text() {
            let node = parse_one("<Heading level={2}>Hi</Heading>");
            assert_eq!(node.type_name(), "Heading");
            assert!(node.children().is_empty());
            assert_eq!(node.property("children"), Some(&json!("Hi")));
            assert_eq!(node.property("level"), Some(&json!(2)));
        }

        #[test]
        fn test_button_folds_into_text_property() {
            let node = parse_one("<Button>\n   Save changes \n</Button>");
            assert_eq!(node.property("text"), Some(&json!("Save changes")));
            assert!(node.property("children").is_none());
        }

        #[test]
        fn test_empty_text_keeps_default() {
            let node = parse_one("<Badge>   </Badge>");
            assert_eq!(node.property("children"), Some(&json!("")));
        }

        #[test]
        fn test_container_text_is_discarded() {
            let node = parse_one("<VStack>stray <Divider/> words</VStack>");
            assert_eq!(node.children().len(), 1);
            assert!(node.property("children").is_none());
            assert!(node.property("text").is_none());
        }

        #[test]
        fn test_text_bearing_rejects_elements() {
            let err = parse_err("<Text>Hello <Badge>x</Badge></Text>");
            assert!(matches!(err.kind, ParseErrorKind::ChildrenNotAccepted { ref name } if name == "Text"));
        }

        #[test]
        fn test_leaf_component_rejects_elements() {
            let err = parse_err("<Icon><Divider/></Icon>");
            assert_eq!(err.message, "<Icon> does not accept child components");
        }
    }

    mod precomposed {
        use super::*;

        #[test]
        fn test_shorthand_expands() {
            let node = parse_one(r#"<MetricCard title="Users" value="1,204" />"#);
            assert_eq!(node.type_name(), "Card");
            assert_eq!(node.count(), Precomposed::MetricCard.node_count());
        }

        #[test]
        fn test_shorthand_must_self_close() {
            let err = parse_err("<VStack>\n  <InfoCard title=\"x\">\n    <Text>no</Text>\n  </InfoCard>\n</VStack>");
            assert!(matches!(err.kind, ParseErrorKind::PrecomposedWithChildren { .. }));
            assert_eq!((err.line, err.column), (2, 3));
        }

        #[test]
        fn test_shorthand_attributes_are_token_checked() {
            let err = parse_err(r#"<ActionCard gridColumnSpan={13} />"#);
            assert!(matches!(err.kind, ParseErrorKind::InvalidGridColumnSpan { .. }));
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_mismatched_closing_tag() {
            let err = parse_err("<VStack>\n  <Button>OK</Butto>\n</VStack>");
            assert_eq!(err.line, 2);
            assert_eq!(err.column, 13);
            assert!(err.message.contains("Button"));
            assert!(err.message.contains("Butto"));
        }

        #[test]
        fn test_unclosed_tag() {
            let err = parse_err("<VStack>\n  <Divider/>\n");
            assert_eq!(err.kind, ParseErrorKind::UnclosedTag { name: "VStack".to_string() });
            assert_eq!(err.line, 3);
        }

        #[test]
        fn test_unknown_component_lists_known_names() {
            let err = parse_err("<Widget />");
            let ParseErrorKind::UnknownComponent { name, known } = &err.kind else {
                panic!("unexpected error: {err:?}");
            };
            assert_eq!(name, "Widget");
            assert!(known.contains(&"Table".to_string()));
            assert!(known.contains(&"VStack".to_string()));
            assert!(err.message.contains("Table"));
            assert!(err.message.contains("VStack"));
        }

        #[test]
        fn test_spacing_token() {
            let err = parse_err("<VStack spacing={7}>");
            assert!(matches!(err.kind, ParseErrorKind::InvalidSpacing { .. }));
            assert!(err.message.contains("0, 1, 2, 3, 4, 5, 6, 8, 10, 12, 16, 20, 24"));
            assert!(err.message.contains('7'));
            assert_eq!((err.line, err.column), (1, 9));
        }

        #[test]
        fn test_grid_columns_token() {
            let err = parse_err("<Grid columns={4}></Grid>");
            assert!(matches!(err.kind, ParseErrorKind::InvalidGridColumns { .. }));
        }

        #[test]
        fn test_invalid_expression() {
            let err = parse_err("<Button onClick={handle()} />");
            assert_eq!(
                err.kind,
                ParseErrorKind::InvalidExpression {
                    attribute: "onClick".to_string(),
                    expression: "handle()".to_string(),
                }
            );
        }

        #[test]
        fn test_unclosed_string() {
            let err = parse_err("<Text variant=\"body>\n</Text>");
            assert!(matches!(err.kind, ParseErrorKind::UnclosedString { .. }));
            assert_eq!((err.line, err.column), (1, 15));
        }

        #[test]
        fn test_unclosed_expression() {
            let err = parse_err("<Text size={ {a: 1} />");
            assert!(matches!(err.kind, ParseErrorKind::UnclosedExpression { .. }));
        }

        #[test]
        fn test_empty_component_name() {
            let err = parse_err("< VStack/>");
            assert_eq!(err.kind, ParseErrorKind::EmptyComponentName);
            assert_eq!((err.line, err.column), (1, 2));
        }

        #[test]
        fn test_lowercase_component_name() {
            let err = parse_err("<div></div>");
            assert_eq!(err.kind, ParseErrorKind::InvalidComponentName { found: "div".to_string() });
        }

        #[test]
        fn test_stray_closing_tag() {
            let err = parse_err("<Divider/>\n</VStack>");
            assert_eq!(err.kind, ParseErrorKind::UnexpectedClosingTag { name: "VStack".to_string() });
            assert_eq!(err.line, 2);
        }

        #[test]
        fn test_empty_closing_tag_name() {
            let err = parse_err("<VStack></");
            assert_eq!(
                err.kind,
                ParseErrorKind::EmptyClosingTagName {
                    expected: "VStack".to_string()
                }
            );
            assert_eq!(err.message, "Expected a component name after '</', to close <VStack>");
            assert_eq!((err.line, err.column), (1, 11));
        }

        #[test]
        fn test_nesting_at_the_limit_parses() {
            let source = format!(
                "{}{}",
                "<VStack>".repeat(MAX_NESTING_DEPTH),
                "</VStack>".repeat(MAX_NESTING_DEPTH)
            );
            assert_eq!(parse_one(&source).count(), MAX_NESTING_DEPTH);
        }

        #[test]
        fn test_nesting_past_the_limit_fails() {
            let depth = 10_000;
            let source = format!("{}{}", "<VStack>".repeat(depth), "</VStack>".repeat(depth));
            let err = parse_err(&source);
            assert_eq!(
                err.kind,
                ParseErrorKind::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH
                }
            );
            let column = u32::try_from(MAX_NESTING_DEPTH * "<VStack>".len() + 1).unwrap();
            assert_eq!((err.line, err.column), (1, column));
        }

        #[test]
        fn test_grid_float_tokens() {
            let node = parse_one("<Grid columns={12.0}><Card gridColumnSpan={6.0} /></Grid>");
            assert_eq!(node.property("columns"), Some(&json!(12.0)));
            let err = parse_err("<Grid columns={12.5}></Grid>");
            assert!(matches!(err.kind, ParseErrorKind::InvalidGridColumns { .. }));
        }

        #[test]
        fn test_top_level_text() {
            let err = parse_err("hello");
            assert!(matches!(err.kind, ParseErrorKind::UnexpectedCharacter { found: 'h', .. }));
        }

        #[test]
        fn test_bad_attribute_character() {
            let err = parse_err("<Card =\"x\" />");
            assert!(matches!(err.kind, ParseErrorKind::UnexpectedCharacter { found: '=', .. }));
            assert_eq!(err.column, 7);
        }

        #[test]
        fn test_unquoted_attribute_value() {
            let err = parse_err("<Card variant=outline />");
            assert!(matches!(err.kind, ParseErrorKind::UnexpectedCharacter { found: 'o', .. }));
        }

        #[test]
        fn test_failure_is_repeatable() {
            let source = "<VStack>\n  <Button>OK</Butto>\n</VStack>";
            let registry = registry();
            let first = parse_markup(source, &registry).unwrap_err();
            let second = parse_markup(source, &registry).unwrap_err();
            assert_eq!(first, second);
        }
    }

    mod parser {
        use super::*;

        #[test]
        fn test_shared_parser_gives_disjoint_trees() {
            let parser = MarkupParser::new(Arc::new(registry()));
            let a = parser.parse("<Divider/>").unwrap();
            let b = parser.parse("<Divider/>").unwrap();
            assert_ne!(a[0].id(), b[0].id());
        }

        #[test]
        fn test_valid_names_include_table_once() {
            let parser = MarkupParser::new(Arc::new(registry()));
            let names = parser.valid_component_names();
            assert_eq!(names.iter().filter(|n| *n == "Table").count(), 1);
        }

        #[test]
        fn test_parser_is_send_and_sync() {
            fn assert_send_sync<T: Send + Sync>() {}
            assert_send_sync::<MarkupParser>();
        }
    }
}
