use super::*;

pub const QUERY_TEXT_KEYS: [&str; 4] = ["query", "text", "question", "prompt"];
pub const GROUND_TRUTH_KEYS: [&str; 3] = ["fields", "ground_truth", "expected"];
pub const RETRIEVED_KEYS: [&str; 3] = ["retrieved", "top", "fields"];

/// Which wrapper keys a field-list record is searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldListContext {
    GroundTruth,
    Retrieved,
}

impl FieldListContext {
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Self::GroundTruth => &GROUND_TRUTH_KEYS,
            Self::Retrieved => &RETRIEVED_KEYS,
        }
    }
}

pub fn normalize_query_text(item: &Value) -> String {
    match item {
        Value::String(text) => text.clone(),
        // Records without a string-valued known key normalize to "", not their JSON text.
        Value::Object(record) => first_string_field(record, &QUERY_TEXT_KEYS)
            .map(ToOwned::to_owned)
            .unwrap_or_default(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) => String::new(),
    }
}

/// Elements are passed through untouched; the set matcher discards non-strings.
pub fn normalize_field_list(item: &Value, context: FieldListContext) -> Vec<Value> {
    match item {
        Value::Array(items) => items.clone(),
        Value::Object(record) => first_array_field(record, context.keys())
            .map(<[Value]>::to_vec)
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn first_string_field<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(Value::as_str))
}

fn first_array_field<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a [Value]> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
}

/// Compact JSON text of a normalized list, in input order.
pub fn render_field_list(items: &[Value]) -> String {
    serde_json::to_string(items).unwrap_or_default()
}
