//! Defensive coercion of loose JSON request bodies.
//!
//! Callers may send any shape; fields are coerced into well-defined records
//! here, before the store sees them. Validation proper (trimming, emptiness)
//! stays in the service layer.

use serde_json::Value;

use common::types::TodoUpdate;

/// Pull a candidate title out of a create body. Absent body, absent key,
/// `null`, or a non-string value all coerce to the empty string, which the
/// store then rejects as missing.
pub fn create_title(body: Option<&Value>) -> String {
    body.and_then(|v| v.get("title"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Build the typed update record from a loose body. A key counts as supplied
/// only when present and non-null; `completed` coerces by JSON truthiness.
pub fn update_record(body: Option<&Value>) -> TodoUpdate {
    let field = |name: &str| body.and_then(|v| v.get(name)).filter(|v| !v.is_null());

    TodoUpdate {
        title: field("title").map(coerce_string),
        completed: field("completed").map(truthy),
    }
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
