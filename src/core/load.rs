// Memoria - core/load.rs
//
// Parsing of memories documents. Pure: takes the text, never touches disk.
// The source path is only carried for error messages.

use crate::core::model::Memory;
use crate::util::constants::MAX_MEMORIES;
use crate::util::error::LoadError;
use serde_json::Value;
use std::path::Path;

/// Parse a JSON document into memories.
///
/// Accepted top-level shapes:
/// - an array of memory objects
/// - `null`, meaning no memories
/// - an object with a `memories` array (list endpoint response)
pub fn parse_memories(json: &str, source: &Path) -> Result<Vec<Memory>, LoadError> {
    let value: Value = serde_json::from_str(json).map_err(|e| LoadError::Json {
        path: source.to_path_buf(),
        source: e,
    })?;

    let records = match value {
        Value::Null => {
            tracing::debug!(path = %source.display(), "Document is null; no memories");
            return Ok(Vec::new());
        }
        Value::Array(records) => records,
        Value::Object(mut obj) => match obj.remove("memories") {
            Some(Value::Array(records)) => records,
            Some(Value::Null) => Vec::new(),
            Some(other) => {
                return Err(LoadError::UnexpectedShape {
                    path: source.to_path_buf(),
                    found: json_kind(&other),
                })
            }
            None => {
                return Err(LoadError::UnexpectedShape {
                    path: source.to_path_buf(),
                    found: "an object without a \"memories\" key",
                })
            }
        },
        other => {
            return Err(LoadError::UnexpectedShape {
                path: source.to_path_buf(),
                found: json_kind(&other),
            })
        }
    };

    if records.len() > MAX_MEMORIES {
        return Err(LoadError::TooManyMemories {
            count: records.len(),
            max: MAX_MEMORIES,
        });
    }

    let memories = records
        .into_iter()
        .map(serde_json::from_value::<Memory>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LoadError::Json {
            path: source.to_path_buf(),
            source: e,
        })?;

    tracing::debug!(
        path = %source.display(),
        count = memories.len(),
        "Parsed memories document"
    );

    Ok(memories)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
