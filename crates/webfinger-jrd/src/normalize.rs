use serde_json::Value;

use crate::error::JrdError;
use crate::types::{JrdIndex, JrdProperties, Link, LinkIndex, LookupResult};
use crate::NAME_PROPERTY;

/// Parse a raw response body into an indexed [`LookupResult`].
///
/// The body must be a JSON object with a `links` member. A `links` member
/// that is an object or `null` rather than an array is indexed as empty.
/// Links whose `rel` is not in the relation table are dropped.
///
/// # Errors
/// Returns [`JrdError::ServerReported`] when an unusable body carries an
/// `error` member, and [`JrdError::UnknownResponseShape`] otherwise.
pub fn normalize(raw: &str) -> Result<LookupResult, JrdError> {
    let object: Value = serde_json::from_str(raw).map_err(|_| JrdError::UnknownResponseShape)?;

    let links: &[Value] = match object.get("links") {
        Some(Value::Array(links)) => links.as_slice(),
        Some(Value::Object(_) | Value::Null) => &[],
        _ => return Err(reported_error(&object)),
    };

    let mut index = LinkIndex::new();
    for link in links.iter().filter_map(Link::from_entry) {
        index.push(link);
    }

    let name = object
        .get("properties")
        .and_then(Value::as_object)
        .and_then(|props| props.get(NAME_PROPERTY))
        .filter(|value| is_truthy(value))
        .cloned();

    Ok(LookupResult {
        json: raw.to_string(),
        idx: JrdIndex {
            links: index,
            properties: JrdProperties { name },
        },
        object,
    })
}

fn reported_error(object: &Value) -> JrdError {
    match object.get("error") {
        Some(Value::String(message)) => JrdError::ServerReported {
            message: message.clone(),
        },
        Some(other) => JrdError::ServerReported {
            message: other.to_string(),
        },
        None => JrdError::UnknownResponseShape,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
