use rustc_hash::FxHashMap;
use uuid::Uuid;

/// Per-parse source of node ids and semantic names.
///
/// Ids combine a monotonic counter with a random suffix chosen when the
/// generator is created, so trees from separate parses never share ids.
#[derive(Debug)]
pub struct IdGenerator {
    suffix: String,
    next: u64,
    per_type: FxHashMap<String, u32>,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        let suffix = Uuid::new_v4().simple().to_string()[..8].to_string();
        Self::with_suffix(suffix)
    }

    #[must_use]
    pub fn with_suffix(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            next: 0,
            per_type: FxHashMap::default(),
        }
    }

    /// `<type>-<n>-<suffix>`, e.g. `button-3-1f0c9a2e`.
    pub fn next_id(&mut self, type_name: &str) -> String {
        self.next += 1;
        format!(
            "{}-{}-{}",
            type_name.to_ascii_lowercase(),
            self.next,
            self.suffix
        )
    }

    /// `<Type> <n>`, counted per type, e.g. `Button 2`.
    pub fn next_name(&mut self, type_name: &str) -> String {
        let count = self.per_type.entry(type_name.to_string()).or_insert(0);
        *count += 1;
        format!("{type_name} {count}")
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic_and_suffixed() {
        let mut ids = IdGenerator::with_suffix("abc");
        assert_eq!(ids.next_id("Button"), "button-1-abc");
        assert_eq!(ids.next_id("VStack"), "vstack-2-abc");
    }

    #[test]
    fn names_count_per_type() {
        let mut ids = IdGenerator::with_suffix("abc");
        assert_eq!(ids.next_name("Text"), "Text 1");
        assert_eq!(ids.next_name("Card"), "Card 1");
        assert_eq!(ids.next_name("Text"), "Text 2");
    }

    #[test]
    fn separate_generators_differ() {
        let mut a = IdGenerator::new();
        let mut b = IdGenerator::new();
        assert_ne!(a.next_id("Text"), b.next_id("Text"));
    }
}
