use super::fields::flatten_field;
use super::mapping::RECORD_STORE_LABELS;
use crate::matching::{ProfileField, RawValue};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Student item as listed by the record store: an identifier plus opaque field values keyed
/// by caller-defined field identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(default, deserialize_with = "identifier_as_string")]
    pub item_id: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

/// Record-store list payloads arrive either bare or wrapped in `items`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RecordBatch {
    Wrapped { items: Vec<StudentRecord> },
    Bare(Vec<StudentRecord>),
}

impl RecordBatch {
    pub(crate) fn into_records(self) -> Vec<StudentRecord> {
        match self {
            RecordBatch::Wrapped { items } => items,
            RecordBatch::Bare(items) => items,
        }
    }
}

/// Which field identifier each profile field is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    identifiers: BTreeMap<ProfileField, String>,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            identifiers: ProfileField::ordered()
                .into_iter()
                .map(|field| (field, field.key().to_string()))
                .collect(),
        }
    }
}

impl FieldMapping {
    /// Identifiers equal to the record store's display labels.
    pub fn record_store_labels() -> Self {
        Self {
            identifiers: RECORD_STORE_LABELS
                .iter()
                .map(|(field, label)| (*field, label.to_string()))
                .collect(),
        }
    }

    pub fn with(mut self, field: ProfileField, identifier: impl Into<String>) -> Self {
        self.identifiers.insert(field, identifier.into());
        self
    }

    pub fn identifier(&self, field: ProfileField) -> Option<&str> {
        self.identifiers.get(&field).map(String::as_str)
    }
}

impl StudentRecord {
    pub(crate) fn value(&self, mapping: &FieldMapping, field: ProfileField) -> Option<&Value> {
        mapping
            .identifier(field)
            .and_then(|identifier| self.fields.get(identifier))
    }

    pub(crate) fn raw(&self, mapping: &FieldMapping, field: ProfileField) -> Option<RawValue> {
        self.value(mapping, field).and_then(flatten_field)
    }
}

fn identifier_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}
