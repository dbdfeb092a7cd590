use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::node::Properties;

/// The type name usable even when the registry does not list it.
pub const RESERVED_TABLE: &str = "Table";

const BUILTIN_COMPONENTS: &str = include_str!("../components/builtin.toml");

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read component specs: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse component specs TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid component name '{0}': names must match [A-Z][A-Za-z0-9_]*")]
    InvalidName(String),
}

/// What the parser needs to know about a component type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    #[serde(default = "accepts_children_default")]
    pub accepts_children: bool,
    #[serde(default)]
    pub defaults: Properties,
}

fn accepts_children_default() -> bool {
    true
}

impl ComponentSpec {
    /// Spec used for the reserved [`RESERVED_TABLE`] type when the registry
    /// has no entry for it.
    #[must_use]
    pub fn container() -> Self {
        Self {
            accepts_children: true,
            defaults: Properties::new(),
        }
    }
}

/// Read-only view of the available component types.
///
/// A parser consults one registry for the whole of a parse; implementations
/// backed by mutable state should hand the parser a snapshot.
pub trait ComponentRegistry: Send + Sync {
    fn lookup(&self, name: &str) -> Option<ComponentSpec>;

    /// Every known component name, sorted.
    fn component_names(&self) -> Vec<String>;
}

#[derive(Debug, Deserialize)]
struct SpecsFile {
    #[serde(default)]
    components: BTreeMap<String, ComponentSpec>,
}

/// Component specs loaded from TOML.
///
/// ```toml
/// [components.VStack]
/// accepts_children = true
///
/// [components.VStack.defaults]
/// spacing = 4
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentSpecs(BTreeMap<String, ComponentSpec>);

impl ComponentSpecs {
    pub fn from_toml(content: &str) -> Result<Self, RegistryError> {
        let file: SpecsFile = toml::from_str(content)?;

        if let Some(bad) = file.components.keys().find(|name| !is_component_name(name)) {
            return Err(RegistryError::InvalidName(bad.clone()));
        }

        Ok(Self(file.components))
    }

    pub fn load_from_path(path: &Path) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_toml(BUILTIN_COMPONENTS)
    }

    /// Merge another set of specs into this one, with the other taking precedence.
    pub fn merge(&mut self, other: ComponentSpecs) -> &mut Self {
        self.0.extend(other.0);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ComponentSpec> {
        self.0.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ComponentRegistry for ComponentSpecs {
    fn lookup(&self, name: &str) -> Option<ComponentSpec> {
        self.0.get(name).cloned()
    }

    fn component_names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }
}

/// `[A-Z][A-Za-z0-9_]*`
#[must_use]
pub fn is_component_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_can_load_builtins() -> Result<(), RegistryError> {
        let specs = ComponentSpecs::builtin()?;

        assert!(!specs.is_empty());
        for name in ["VStack", "HStack", "Grid", "Card", "Text", "Heading", "Badge", "Button", "Icon"] {
            assert!(specs.get(name).is_some(), "'{name}' should be present");
        }
        assert!(specs.get(RESERVED_TABLE).is_none());
        Ok(())
    }

    #[test]
    fn test_text_bearing_builtins_take_no_children() -> Result<(), RegistryError> {
        let specs = ComponentSpecs::builtin()?;
        for name in ["Text", "Heading", "Badge", "Button"] {
            assert!(!specs.lookup(name).unwrap().accepts_children, "{name}");
        }
        Ok(())
    }

    #[test]
    fn test_names_are_sorted() -> Result<(), RegistryError> {
        let names = ComponentSpecs::builtin()?.component_names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        Ok(())
    }

    #[test]
    fn test_defaults_and_missing_fields() -> Result<(), RegistryError> {
        let specs = ComponentSpecs::from_toml(
            r#"
[components.Panel]

[components.Chip]
accepts_children = false

[components.Chip.defaults]
label = "chip"
size = 2
"#,
        )?;

        let panel = specs.lookup("Panel").unwrap();
        assert!(panel.accepts_children);
        assert!(panel.defaults.is_empty());

        let chip = specs.lookup("Chip").unwrap();
        assert!(!chip.accepts_children);
        assert_eq!(chip.defaults.get("label"), Some(&json!("chip")));
        assert_eq!(chip.defaults.get("size"), Some(&json!(2)));
        Ok(())
    }

    #[test]
    fn test_rejects_lowercase_names() {
        let result = ComponentSpecs::from_toml("[components.panel]\n");
        assert!(matches!(result, Err(RegistryError::InvalidName(name)) if name == "panel"));
    }

    #[test]
    fn test_merge_prefers_other() -> Result<(), RegistryError> {
        let mut specs = ComponentSpecs::builtin()?;
        let before = specs.len();
        let user = ComponentSpecs::from_toml(
            "[components.Text]\naccepts_children = true\n[components.Chart]\n",
        )?;
        specs.merge(user);

        assert_eq!(specs.len(), before + 1);
        assert!(specs.lookup("Text").unwrap().accepts_children);
        assert!(specs.lookup("Chart").is_some());
        Ok(())
    }

    #[test]
    fn test_load_from_path() -> Result<(), RegistryError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("components.toml");
        fs::write(&path, "[components.Map]\naccepts_children = false\n")?;

        let specs = ComponentSpecs::load_from_path(&path)?;
        assert_eq!(specs.component_names(), vec!["Map".to_string()]);
        Ok(())
    }

    #[test]
    fn test_component_name_rule() {
        assert!(is_component_name("Card"));
        assert!(is_component_name("H1_Title"));
        assert!(!is_component_name("card"));
        assert!(!is_component_name(""));
        assert!(!is_component_name("Card-Header"));
    }
}
