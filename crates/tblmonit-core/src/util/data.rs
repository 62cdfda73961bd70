//! YAML, JSON, and TOML document handling.

use serde_json::{Map, Value};
use std::path::Path;
use tblmonit_types::{ConfigFormat, Result, TblmonitError};

/// Parse a configuration document into a JSON value.
///
/// Blank documents are an empty mapping. Anything other than a mapping at
/// the top level is rejected.
pub fn parse_document(content: &str, format: ConfigFormat, path: &Path) -> Result<Value> {
    if content.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let parsed: std::result::Result<Value, String> = match format {
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };

    let value = parsed.map_err(|message| TblmonitError::ConfigParse {
        path: path.to_path_buf(),
        message,
    })?;

    match value {
        Value::Object(_) => Ok(value),
        Value::Null => Ok(Value::Object(Map::new())),
        other => Err(TblmonitError::ConfigParse {
            path: path.to_path_buf(),
            message: format!("expected a mapping at the top level, found {}", kind_of(&other)),
        }),
    }
}

/// Lowercase every mapping key, recursively.
///
/// Keys are matched case-insensitively, so `timeZone` and `TIMEZONE` land on
/// the same entry. When two keys collide, the later one wins.
pub fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

/// Deep merge two values.
/// Recursively merges objects, with overlay values taking precedence.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_val) => deep_merge(base_val, overlay_val),
                    None => overlay_val,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, overlay_val) => overlay_val,
    }
}

/// Short human name for a JSON value's type.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
