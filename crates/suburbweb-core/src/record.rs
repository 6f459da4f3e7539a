//! Helpers for pulling flat rows out of semi-structured JSON

use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};

/// A flattened JSON object, keys in first-seen order
pub type Record = Map<String, Value>;

/// Flatten nested objects into one level, joining key paths with `sep`.
/// Arrays and scalars are kept as values.
pub fn flatten(object: &Map<String, Value>, sep: &str) -> Record {
    let mut out = Record::new();
    flatten_into(&mut out, None, object, sep);
    out
}

fn flatten_into(out: &mut Record, prefix: Option<&str>, object: &Map<String, Value>, sep: &str) {
    for (key, value) in object {
        let name = match prefix {
            Some(p) => format!("{}{}{}", p, sep, key),
            None => key.clone(),
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(out, Some(&name), inner, sep),
            _ => {
                out.insert(name, value.clone());
            }
        }
    }
}

/// The array under `key` of an object body. Missing or null means no rows.
pub fn rows<'a>(body: &'a Value, key: &str) -> CoreResult<&'a [Value]> {
    let object = body
        .as_object()
        .ok_or_else(|| CoreError::malformed(format!("expected a JSON object, got {}", kind(body))))?;

    match object.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(CoreError::malformed(format!(
            "expected '{}' to be a list, got {}",
            key,
            kind(other)
        ))),
    }
}

/// Require every row to be an object
pub fn objects<'a>(rows: &'a [Value], what: &str) -> CoreResult<Vec<&'a Map<String, Value>>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            row.as_object().ok_or_else(|| {
                CoreError::malformed(format!("{} row {} is {}, not an object", what, i, kind(row)))
            })
        })
        .collect()
}

/// Numeric value of a field. Strings such as "$1,250,000" are coerced.
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != '$' && *c != ',').collect();
            cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

/// Text value of a field; numbers are rendered, null and containers are not text
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn field_number(object: &Map<String, Value>, key: &str) -> Option<f64> {
    object.get(key).and_then(number)
}

pub fn field_text(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(text)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
