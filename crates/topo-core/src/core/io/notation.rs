use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotationError {
    #[error("Invalid list notation '{raw}': {source}")]
    Syntax {
        raw: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("List element {index} in '{raw}' must be a string or an integer")]
    Element { raw: String, index: usize },
}

/// Decodes the bracketed, single-quoted list notation used by the source table,
/// e.g. `['5 10', '20 45']`, into its string elements.
///
/// Single quotes are rewritten to double quotes and the result is read as a JSON array.
/// Integer elements are accepted and rendered in decimal. A blank field decodes to an
/// empty list.
pub fn decode_list(raw: &str) -> Result<Vec<String>, NotationError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let normalized = raw.replace('\'', "\"");
    let values: Vec<Value> =
        serde_json::from_str(&normalized).map_err(|e| NotationError::Syntax {
            raw: raw.into(),
            source: e,
        })?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::String(s) => Ok(s),
            Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
            _ => Err(NotationError::Element {
                raw: raw.into(),
                index,
            }),
        })
        .collect()
}

/// Encodes a list of strings as a compact JSON array, the form conflict fields take in reports.
///
/// `serde_json` cannot fail when writing a string slice into a `String` (no map keys, no
/// I/O), so the `[]` fallback is unreachable.
pub fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| String::from("[]"))
}
