use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordering requested for an extract operation.
///
/// An unset or empty `column` means no explicit ordering; the service default
/// applies (creation order, oldest first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

impl Default for OrderBy {
    fn default() -> Self {
        Self {
            column: None,
            ascending: true,
        }
    }
}

impl OrderBy {
    pub fn new(column: impl Into<String>, ascending: bool) -> Self {
        Self {
            column: Some(column.into()),
            ascending,
        }
    }

    pub fn is_unordered(&self) -> bool {
        self.column.as_deref().map_or(true, str::is_empty)
    }
}

/// Caller-facing description of a single operation against one record type.
///
/// `query` carries the raw `{"where": {...}}` JSON; `operation` is the
/// operation token ("select", "create", "update") resolved by the
/// integration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordLocator {
    pub record_type: String,
    #[serde(default)]
    pub record_id: Option<String>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub query: Option<Value>,
    #[serde(default)]
    pub order_by: OrderBy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_by_defaults_to_unordered_ascending() {
        let order_by = OrderBy::default();
        assert!(order_by.is_unordered());
        assert!(order_by.ascending);
    }

    #[test]
    fn test_order_by_empty_column_is_unordered() {
        let order_by = OrderBy {
            column: Some(String::new()),
            ascending: false,
        };
        assert!(order_by.is_unordered());
    }

    #[test]
    fn test_record_locator_deserializes_with_defaults() {
        let locator: RecordLocator = serde_json::from_value(json!({
            "record_type": "companies",
            "query": {"where": {"left": "domain", "op": "=", "right": "example.com"}}
        }))
        .unwrap();

        assert_eq!(locator.record_type, "companies");
        assert!(locator.record_id.is_none());
        assert!(locator.operation.is_none());
        assert!(locator.query.is_some());
        assert!(locator.order_by.is_unordered());
    }
}
