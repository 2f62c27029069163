use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifies a single record in a remote system: the record id plus the
/// record type (object type) it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordKey {
    pub record_id: String,
    pub record_type: String,
}

impl RecordKey {
    pub fn new(record_id: impl Into<String>, record_type: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            record_type: record_type.into(),
        }
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.record_type, self.record_id)
    }
}

/// A single record as returned by the remote service. `data` holds the raw
/// JSON object verbatim so callers can reach any attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub key: RecordKey,
    pub data: Value,
}

impl Record {
    pub fn new(key: RecordKey, data: Value) -> Self {
        Self { key, data }
    }
}

/// Ordered collection of records, in the order the service returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recordset {
    pub records: Vec<Record>,
}

impl Recordset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }
}

impl IntoIterator for Recordset {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Recordset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recordset_keeps_insertion_order() {
        let mut recordset = Recordset::new();
        recordset.push(Record::new(
            RecordKey::new("1", "companies"),
            json!({"id": "1"}),
        ));
        recordset.push(Record::new(
            RecordKey::new("2", "companies"),
            json!({"id": "2"}),
        ));

        assert_eq!(recordset.len(), 2);
        assert_eq!(recordset.first().unwrap().key.record_id, "1");
        let ids: Vec<String> = recordset.into_iter().map(|r| r.key.record_id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_record_key_display() {
        let key = RecordKey::new("42", "contacts");
        assert_eq!(key.to_string(), "contacts/42");
    }
}
