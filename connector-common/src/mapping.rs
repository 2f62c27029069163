use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered mapping of property name to value.
///
/// For extract operations the keys double as the select-field list, so the
/// caller-supplied order is preserved and duplicates are the caller's
/// responsibility. For load operations the entries form the properties
/// payload sent to the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mapping {
    items: IndexMap<String, Value>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.items.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.items.get(key)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The entries as a JSON object, in insertion order.
    pub fn to_properties(&self) -> Value {
        Value::Object(
            self.items
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl FromIterator<(String, Value)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_preserve_insertion_order() {
        let mut mapping = Mapping::new();
        mapping.insert("domain", Value::Null);
        mapping.insert("name", Value::Null);
        mapping.insert("createdate", Value::Null);

        assert_eq!(mapping.keys(), vec!["domain", "name", "createdate"]);
    }

    #[test]
    fn test_to_properties_keeps_values() {
        let mut mapping = Mapping::new();
        mapping.insert("name", json!("Example Inc"));
        mapping.insert("domain", json!("example.com"));

        assert_eq!(
            mapping.to_properties(),
            json!({"name": "Example Inc", "domain": "example.com"})
        );
    }

    #[test]
    fn test_from_iterator_round_trip() {
        let mapping: Mapping = vec![
            ("a".to_string(), json!(1)),
            ("b".to_string(), json!(2)),
        ]
        .into_iter()
        .collect();

        let pairs: Vec<(String, Value)> = mapping.into_iter().collect();
        assert_eq!(
            pairs,
            vec![("a".to_string(), json!(1)), ("b".to_string(), json!(2))]
        );
    }
}
