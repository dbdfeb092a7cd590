use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// A property value: string, number, boolean, null, array, or object.
pub type PropertyValue = Value;

/// Ordered property mapping; iteration follows source order.
pub type Properties = Map<String, PropertyValue>;

/// A typed node of a parsed component tree.
///
/// Nodes are built once per parse and never shared between parses; every
/// node of a tree carries an id generated by that parse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    id: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    properties: Properties,
    #[serde(default)]
    children: Vec<ComponentNode>,
    #[serde(default)]
    interactions: Vec<Value>,
}

impl ComponentNode {
    pub(crate) fn new(
        id: String,
        type_name: String,
        name: String,
        properties: Properties,
        children: Vec<ComponentNode>,
        interactions: Vec<Value>,
    ) -> Self {
        Self {
            id,
            type_name,
            name,
            properties,
            children,
            interactions,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    #[must_use]
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    #[must_use]
    pub fn children(&self) -> &[ComponentNode] {
        &self.children
    }

    #[must_use]
    pub fn interactions(&self) -> &[Value] {
        &self.interactions
    }

    /// Number of nodes in this subtree, this node included.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ComponentNode::count).sum::<usize>()
    }

    /// Depth-first iterator over this subtree, starting with `self`.
    pub fn descendants(&self) -> impl Iterator<Item = &ComponentNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

/// Types whose text content folds into a property instead of child nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBearing {
    Text,
    Heading,
    Badge,
    Button,
}

impl TextBearing {
    #[must_use]
    pub fn from_type(type_name: &str) -> Option<Self> {
        match type_name {
            "Text" => Some(Self::Text),
            "Heading" => Some(Self::Heading),
            "Badge" => Some(Self::Badge),
            "Button" => Some(Self::Button),
            _ => None,
        }
    }

    /// The property the trimmed text content is stored under.
    #[must_use]
    pub fn text_property(self) -> &'static str {
        match self {
            Self::Text | Self::Heading | Self::Badge => "children",
            Self::Button => "text",
        }
    }
}
