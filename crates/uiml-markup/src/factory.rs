use serde_json::Value;

use crate::ids::IdGenerator;
use crate::node::ComponentNode;
use crate::node::Properties;
use crate::registry::ComponentRegistry;
use crate::registry::ComponentSpec;
use crate::registry::RESERVED_TABLE;

/// Builds nodes for one parse: registry defaults first, then attributes.
pub(crate) struct NodeFactory<'r> {
    registry: &'r dyn ComponentRegistry,
    ids: IdGenerator,
}

impl<'r> NodeFactory<'r> {
    pub(crate) fn new(registry: &'r dyn ComponentRegistry, ids: IdGenerator) -> Self {
        Self { registry, ids }
    }

    pub(crate) fn registry(&self) -> &'r dyn ComponentRegistry {
        self.registry
    }

    /// Registry entry for `type_name`, with `Table` always resolvable.
    pub(crate) fn spec(&self, type_name: &str) -> Option<ComponentSpec> {
        self.registry
            .lookup(type_name)
            .or_else(|| (type_name == RESERVED_TABLE).then(ComponentSpec::container))
    }

    pub(crate) fn build(
        &mut self,
        type_name: &str,
        spec: &ComponentSpec,
        attributes: Properties,
        children: Vec<ComponentNode>,
    ) -> ComponentNode {
        let mut properties = spec.defaults.clone();
        let mut interactions = Vec::new();

        for (key, value) in attributes {
            match value {
                Value::Array(items) if key == "interactions" => interactions = items,
                value => {
                    properties.insert(key, value);
                }
            }
        }

        ComponentNode::new(
            self.ids.next_id(type_name),
            type_name.to_string(),
            self.ids.next_name(type_name),
            properties,
            children,
            interactions,
        )
    }

    /// Build a node for a generated subtree; unknown types get no defaults.
    pub(crate) fn node(
        &mut self,
        type_name: &str,
        attributes: Properties,
        children: Vec<ComponentNode>,
    ) -> ComponentNode {
        let spec = self.spec(type_name).unwrap_or_else(ComponentSpec::container);
        self.build(type_name, &spec, attributes, children)
    }
}
