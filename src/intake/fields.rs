use crate::matching::RawValue;
use serde_json::Value;

/// Flatten a record-store field value into a scalar.
///
/// Single-select values arrive as objects carrying a `text` property and multi-select values
/// as lists of objects carrying `name`; both collapse to text here. Any other structured
/// value is passed on as its JSON text so that coercion reports it downstream.
pub fn flatten_field(value: &Value) -> Option<RawValue> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(RawValue::Bool(*flag)),
        Value::Number(number) => match number.as_f64() {
            Some(number) => Some(RawValue::Number(number)),
            None => Some(RawValue::Text(number.to_string())),
        },
        Value::String(text) => Some(RawValue::Text(text.clone())),
        Value::Object(object) => match object.get("text") {
            Some(text) => flatten_field(text),
            None => Some(RawValue::Text(value.to_string())),
        },
        Value::Array(items) if items.is_empty() => None,
        Value::Array(items) if items[0].is_object() => {
            let names: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("name").and_then(Value::as_str))
                .collect();
            Some(RawValue::Text(names.join(", ")))
        }
        Value::Array(_) => Some(RawValue::Text(value.to_string())),
    }
}
