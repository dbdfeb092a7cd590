//! Shorthand components that expand into fixed multi-node subtrees.
//!
//! Each shorthand always produces the same tree shape; attributes only fill
//! in the text and icon values. Grid placement attributes given on the
//! shorthand are carried onto the generated root `Card`.

use serde_json::json;
use serde_json::Value;

use crate::factory::NodeFactory;
use crate::node::ComponentNode;
use crate::node::Properties;

const FORWARDED: [&str; 2] = ["gridColumnSpan", "gridRowSpan"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Precomposed {
    ActionCard,
    MetricCard,
    PricingCard,
    InfoCard,
}

impl Precomposed {
    pub const ALL: [Self; 4] = [
        Self::ActionCard,
        Self::MetricCard,
        Self::PricingCard,
        Self::InfoCard,
    ];

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ActionCard => "ActionCard",
            Self::MetricCard => "MetricCard",
            Self::PricingCard => "PricingCard",
            Self::InfoCard => "InfoCard",
        }
    }

    /// Number of nodes one expansion produces.
    #[must_use]
    pub fn node_count(self) -> usize {
        match self {
            Self::ActionCard | Self::MetricCard => 7,
            Self::PricingCard => 10,
            Self::InfoCard => 6,
        }
    }

    pub(crate) fn expand(self, attrs: &Properties, factory: &mut NodeFactory<'_>) -> ComponentNode {
        let root = match self {
            Self::ActionCard => action_card(attrs, factory),
            Self::MetricCard => metric_card(attrs, factory),
            Self::PricingCard => pricing_card(attrs, factory),
            Self::InfoCard => info_card(attrs, factory),
        };
        debug_assert_eq!(root.count(), self.node_count());
        root
    }
}

/// Card > CardHeader(Icon, Heading) + CardContent(Text, Button)
fn action_card(attrs: &Properties, f: &mut NodeFactory<'_>) -> ComponentNode {
    let icon = f.node("Icon", props([("name", attr_or(attrs, "icon", "zap"))]), vec![]);
    let heading = f.node(
        "Heading",
        props([("level", json!(3)), ("children", attr_or(attrs, "title", ""))]),
        vec![],
    );
    let header = f.node("CardHeader", Properties::new(), vec![icon, heading]);

    let description = f.node(
        "Text",
        props([
            ("children", attr_or(attrs, "description", "")),
            ("variant", json!("muted")),
        ]),
        vec![],
    );
    let mut button_props = props([
        ("text", first_of(attrs, &["actionText", "buttonText"], "Get started")),
        ("variant", json!("primary")),
    ]);
    if let Some(href) = attrs.get("href") {
        button_props.insert("href".to_string(), href.clone());
    }
    let button = f.node("Button", button_props, vec![]);
    let content = f.node("CardContent", Properties::new(), vec![description, button]);

    card(attrs, f, Properties::new(), vec![header, content])
}

/// Card > VStack(HStack(Text, Icon), Heading, Text)
fn metric_card(attrs: &Properties, f: &mut NodeFactory<'_>) -> ComponentNode {
    let label = f.node(
        "Text",
        props([
            ("children", attr_or(attrs, "title", "")),
            ("variant", json!("muted")),
        ]),
        vec![],
    );
    let icon = f.node(
        "Icon",
        props([("name", attr_or(attrs, "icon", "trending-up"))]),
        vec![],
    );
    let top = f.node(
        "HStack",
        props([("justify", json!("between"))]),
        vec![label, icon],
    );

    let value = f.node(
        "Heading",
        props([("level", json!(2)), ("children", attr_or(attrs, "value", ""))]),
        vec![],
    );

    let tone = match attrs.get("trend").and_then(Value::as_str) {
        Some("up") => "success",
        Some("down") => "danger",
        _ => "muted",
    };
    let change = f.node(
        "Text",
        props([
            ("children", attr_or(attrs, "change", "")),
            ("color", json!(tone)),
        ]),
        vec![],
    );

    let body = f.node(
        "VStack",
        props([("spacing", json!(2))]),
        vec![top, value, change],
    );
    card(attrs, f, Properties::new(), vec![body])
}

/// Card > CardHeader(Heading, Text) + CardContent(HStack(Heading, Text), Text, Button)
fn pricing_card(attrs: &Properties, f: &mut NodeFactory<'_>) -> ComponentNode {
    let plan = f.node(
        "Heading",
        props([
            ("level", json!(3)),
            ("children", first_of(attrs, &["plan", "title"], "")),
        ]),
        vec![],
    );
    let blurb = f.node(
        "Text",
        props([
            ("children", attr_or(attrs, "description", "")),
            ("variant", json!("muted")),
        ]),
        vec![],
    );
    let header = f.node("CardHeader", Properties::new(), vec![plan, blurb]);

    let price = f.node(
        "Heading",
        props([("level", json!(2)), ("children", attr_or(attrs, "price", ""))]),
        vec![],
    );
    let period = f.node(
        "Text",
        props([
            ("children", attr_or(attrs, "period", "/month")),
            ("variant", json!("muted")),
        ]),
        vec![],
    );
    let price_row = f.node(
        "HStack",
        props([("spacing", json!(1)), ("align", json!("baseline"))]),
        vec![price, period],
    );

    let features = f.node(
        "Text",
        props([("children", json!(feature_list(attrs.get("features"))))]),
        vec![],
    );
    let button = f.node(
        "Button",
        props([
            ("text", attr_or(attrs, "buttonText", "Choose plan")),
            ("variant", json!("primary")),
        ]),
        vec![],
    );
    let content = f.node(
        "CardContent",
        Properties::new(),
        vec![price_row, features, button],
    );

    let mut root = Properties::new();
    if let Some(highlighted) = attrs.get("highlighted") {
        root.insert("highlighted".to_string(), highlighted.clone());
    }
    card(attrs, f, root, vec![header, content])
}

/// Card > HStack(Icon, VStack(Heading, Text))
fn info_card(attrs: &Properties, f: &mut NodeFactory<'_>) -> ComponentNode {
    let icon = f.node("Icon", props([("name", attr_or(attrs, "icon", "info"))]), vec![]);
    let title = f.node(
        "Heading",
        props([("level", json!(4)), ("children", attr_or(attrs, "title", ""))]),
        vec![],
    );
    let text = f.node(
        "Text",
        props([("children", first_of(attrs, &["description", "content"], ""))]),
        vec![],
    );
    let stack = f.node("VStack", props([("spacing", json!(1))]), vec![title, text]);
    let row = f.node(
        "HStack",
        props([("spacing", json!(3)), ("align", json!("start"))]),
        vec![icon, stack],
    );

    let root = props([("variant", attr_or(attrs, "variant", "info"))]);
    card(attrs, f, root, vec![row])
}

fn card(
    attrs: &Properties,
    f: &mut NodeFactory<'_>,
    mut properties: Properties,
    children: Vec<ComponentNode>,
) -> ComponentNode {
    for key in FORWARDED {
        if let Some(value) = attrs.get(key) {
            properties.insert(key.to_string(), value.clone());
        }
    }
    f.node("Card", properties, children)
}

fn props<const N: usize>(entries: [(&str, Value); N]) -> Properties {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn attr_or(attrs: &Properties, key: &str, fallback: &str) -> Value {
    attrs.get(key).cloned().unwrap_or_else(|| json!(fallback))
}

fn first_of(attrs: &Properties, keys: &[&str], fallback: &str) -> Value {
    keys.iter()
        .find_map(|key| attrs.get(*key).cloned())
        .unwrap_or_else(|| json!(fallback))
}

fn feature_list(features: Option<&Value>) -> String {
    match features {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdGenerator;
    use crate::registry::ComponentSpecs;

    fn expand(shorthand: Precomposed, attrs: Properties) -> ComponentNode {
        let registry = ComponentSpecs::builtin().unwrap();
        let mut factory = NodeFactory::new(&registry, IdGenerator::with_suffix("t"));
        shorthand.expand(&attrs, &mut factory)
    }

    #[test]
    fn names_round_trip() {
        for shorthand in Precomposed::ALL {
            assert_eq!(Precomposed::from_name(shorthand.name()), Some(shorthand));
        }
        assert_eq!(Precomposed::from_name("Card"), None);
    }

    #[test]
    fn expansions_have_fixed_size() {
        for shorthand in Precomposed::ALL {
            let root = expand(shorthand, Properties::new());
            assert_eq!(root.count(), shorthand.node_count(), "{}", shorthand.name());
            assert_eq!(root.type_name(), "Card");
        }
    }

    #[test]
    fn metric_card_fills_text() {
        let root = expand(
            Precomposed::MetricCard,
            props([
                ("title", json!("Revenue")),
                ("value", json!("$12k")),
                ("change", json!("+4%")),
                ("trend", json!("up")),
            ]),
        );
        let texts: Vec<&Value> = root
            .descendants()
            .filter_map(|n| n.property("children"))
            .collect();
        assert_eq!(texts, vec![&json!("Revenue"), &json!("$12k"), &json!("+4%")]);

        let change = root.descendants().last().unwrap();
        assert_eq!(change.property("color"), Some(&json!("success")));
    }

    #[test]
    fn pricing_features_fold_into_text() {
        let root = expand(
            Precomposed::PricingCard,
            props([("features", json!(["SSO", "Audit log"]))]),
        );
        assert!(root
            .descendants()
            .any(|n| n.property("children") == Some(&json!("SSO\nAudit log"))));
    }

    #[test]
    fn grid_placement_moves_to_root() {
        let root = expand(
            Precomposed::InfoCard,
            props([("gridColumnSpan", json!(6)), ("title", json!("Heads up"))]),
        );
        assert_eq!(root.property("gridColumnSpan"), Some(&json!(6)));
        assert_eq!(root.property("variant"), Some(&json!("info")));
    }

    #[test]
    fn generated_ids_are_unique() {
        let root = expand(Precomposed::PricingCard, Properties::new());
        let mut ids: Vec<&str> = root.descendants().map(ComponentNode::id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Precomposed::PricingCard.node_count());
    }

    #[test]
    fn action_button_picks_up_registry_defaults() {
        let root = expand(Precomposed::ActionCard, Properties::new());
        let button = root
            .descendants()
            .find(|n| n.type_name() == "Button")
            .unwrap();
        assert_eq!(button.property("text"), Some(&json!("Get started")));
        assert_eq!(button.property("size"), Some(&json!("md")));
    }
}
