//! Session record types.
//!
//! A session record is a flat JSON document: the `id` key plus any number of
//! top-level data fields. The record with zero data fields has no stored
//! representation; saving it deletes the document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the primary key field in every stored document.
pub const ID_FIELD: &str = "id";

/// Open-ended field map carried by a session.
pub type SessionData = Map<String, Value>;

/// Raw document as exchanged with a document store.
pub type Document = Map<String, Value>;

/// A persisted session, keyed by its session key.
///
/// `data` never contains an `id` entry; the key lives only in `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    #[serde(flatten)]
    pub data: SessionData,
}

impl SessionRecord {
    /// The default record for a key with nothing stored: `{id: key}`.
    pub fn empty(key: impl Into<String>) -> Self {
        Self {
            id: key.into(),
            data: SessionData::new(),
        }
    }

    /// Build a record from a stored document, forcing its id to `key`.
    pub fn from_document(key: impl Into<String>, mut document: Document) -> Self {
        document.remove(ID_FIELD);
        Self {
            id: key.into(),
            data: document,
        }
    }

    /// Flatten into the stored shape `{id, field: value, ...}`.
    pub fn into_document(self) -> Document {
        let mut document = Document::with_capacity(self.data.len() + 1);
        document.insert(ID_FIELD.to_string(), Value::String(self.id));
        for (field, value) in self.data {
            if field != ID_FIELD {
                document.insert(field, value);
            }
        }
        document
    }

    /// Whether the record has no data fields besides `id`.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A table qualified by the database that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef {
    pub db: String,
    pub table: String,
}

impl TableRef {
    pub fn new(db: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            table: table.into(),
        }
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.db, self.table)
    }
}

/// Check a database or table name: non-empty, ASCII letters, digits and `_` only.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_record_serializes_to_id_only() {
        let record = SessionRecord::empty("10:20");
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"id": "10:20"}));
        assert!(record.is_empty());
    }

    #[test]
    fn test_record_fields_serialize_flat() {
        let mut record = SessionRecord::empty("10:20");
        record.data.insert("name".to_string(), json!("Alice"));
        record.data.insert("cart".to_string(), json!({"items": [1, 2]}));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({"id": "10:20", "name": "Alice", "cart": {"items": [1, 2]}})
        );
    }

    #[test]
    fn test_record_deserialize_keeps_id_out_of_data() {
        let record: SessionRecord =
            serde_json::from_value(json!({"id": "1:2", "count": 3})).unwrap();
        assert_eq!(record.id, "1:2");
        assert_eq!(record.data.len(), 1);
        assert_eq!(record.data["count"], json!(3));
    }

    #[test]
    fn test_from_document_forces_key() {
        let document = json!({"id": "stale", "lang": "en"});
        let Value::Object(document) = document else {
            unreachable!()
        };
        let record = SessionRecord::from_document("7:8", document);
        assert_eq!(record.id, "7:8");
        assert!(!record.data.contains_key(ID_FIELD));
        assert_eq!(record.data["lang"], json!("en"));
    }

    #[test]
    fn test_into_document_uses_key_and_drops_stray_id() {
        let mut record = SessionRecord::empty("k");
        record.data.insert("id".to_string(), json!("other"));
        record.data.insert("x".to_string(), json!(1));

        let document = record.into_document();
        assert_eq!(document.get(ID_FIELD), Some(&json!("k")));
        assert_eq!(document.len(), 2);
    }

    #[test]
    fn test_table_ref_display() {
        let table = TableRef::new("test", "_telegraf_sessions");
        assert_eq!(table.to_string(), "test._telegraf_sessions");
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_valid_identifier("_telegraf_sessions"));
        assert!(is_valid_identifier("test"));
        assert!(is_valid_identifier("db2"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("bad-name"));
        assert!(!is_valid_identifier("drop table;"));
        assert!(!is_valid_identifier("sessions\""));
    }
}
