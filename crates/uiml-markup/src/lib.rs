//! Component markup parsing.
//!
//! Turns JSX-like markup into a tree of typed [`ComponentNode`]s checked
//! against a [`ComponentRegistry`].
//!
//! ## Pipeline
//!
//! A single recursive-descent pass over a [`ParseState`] cursor:
//!
//! 1. **Tags**: `<Name attr=... />` or `<Name ...>children</Name>`
//! 2. **Attributes**: quoted strings, `{expression}` values, bare flags
//! 3. **Design tokens**: spacing and grid values are checked as attributes are read
//! 4. **Precomposed shorthands**: `<MetricCard ... />` and friends expand in place
//!
//! The first problem stops the parse and comes back as a [`ParseError`] with
//! a line, a column and a context excerpt.
//!
//! ## Example
//!
//! ```
//! use uiml_markup::parse_markup;
//! use uiml_markup::ComponentSpecs;
//!
//! let registry = ComponentSpecs::builtin().unwrap();
//! let nodes = parse_markup("<VStack><Heading level={2}>Hi</Heading></VStack>", &registry).unwrap();
//!
//! assert_eq!(nodes[0].children()[0].property("children"), Some(&"Hi".into()));
//! ```

pub mod design_tokens;
mod error;
mod expression;
mod factory;
mod ids;
mod node;
mod parser;
mod precomposed;
mod registry;
mod state;

pub use error::ErrorCategory;
pub use error::ParseError;
pub use error::ParseErrorKind;
pub use ids::IdGenerator;
pub use node::ComponentNode;
pub use node::Properties;
pub use node::PropertyValue;
pub use node::TextBearing;
pub use parser::parse_markup;
pub use parser::valid_component_names;
pub use parser::MAX_NESTING_DEPTH;
pub use parser::MarkupParser;
pub use parser::ParseResult;
pub use precomposed::Precomposed;
pub use registry::is_component_name;
pub use registry::ComponentRegistry;
pub use registry::ComponentSpec;
pub use registry::ComponentSpecs;
pub use registry::RegistryError;
pub use registry::RESERVED_TABLE;
pub use state::ParseState;
