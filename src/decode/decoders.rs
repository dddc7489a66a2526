//! Envelope decoding
//!
//! Normalizes list and detail response bodies.

use super::types::{Envelope, ROOT_PATH};
use crate::error::{Error, Result};
use crate::pagination::Page;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Decode a list response body into a page.
///
/// A missing (or `null`) items field is an empty page. An items field that
/// is not an array, or an item that does not deserialize, is an error.
/// Items beyond `limit` are dropped.
pub fn decode_page<T: DeserializeOwned>(
    body: &Value,
    envelope: &Envelope,
    limit: u32,
    offset: u64,
) -> Result<Page<T>> {
    let mut items = Vec::new();

    if let Some((path, found)) = first_present(body, &envelope.items) {
        let array = found.as_array().ok_or_else(|| {
            Error::decode(format!("Expected an array at '{path}', found {}", kind_of(found)))
        })?;

        items.reserve(array.len());
        for (index, item) in array.iter().enumerate() {
            let item = T::deserialize(item)
                .map_err(|e| Error::decode(format!("Item {index} at '{path}': {e}")))?;
            items.push(item);
        }
    }

    if items.len() > limit as usize {
        debug!(
            "Backend returned {} items for limit {limit}, truncating",
            items.len()
        );
        items.truncate(limit as usize);
    }

    let total = envelope
        .total
        .iter()
        .find_map(|path| extract_path(body, path).and_then(extract_u64));

    Ok(Page::new(items, limit, offset).with_total(total))
}

/// Decode a detail response, optionally unwrapping an envelope field
pub fn decode_detail<T: DeserializeOwned>(body: &Value, field: Option<&str>) -> Result<T> {
    let target = match field {
        Some(field) => match extract_path(body, field) {
            Some(Value::Null) | None => {
                return Err(Error::decode(format!("Missing field '{field}' in response")))
            }
            Some(value) => value,
        },
        None => body,
    };

    T::deserialize(target).map_err(|e| Error::decode(e.to_string()))
}

/// Extract a value by dotted path (`pagination.total`, `$.data`, `$`)
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path == ROOT_PATH {
        return Some(value);
    }

    let path = path.strip_prefix("$.").unwrap_or(path);
    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

/// Read a non-negative count from a number or numeric string
pub fn extract_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn first_present<'a, 'p>(body: &'a Value, paths: &'p [String]) -> Option<(&'p str, &'a Value)> {
    paths.iter().find_map(|path| match extract_path(body, path) {
        None | Some(Value::Null) => None,
        Some(found) => Some((path.as_str(), found)),
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
