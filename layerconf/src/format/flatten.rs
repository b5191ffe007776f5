//! Flattening of hierarchical JSON and YAML documents.

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use super::Entries;

/// Flattens a JSON object into uppercased, dot-joined keys.
///
/// Arrays are flattened with their index as the key segment and `null`
/// leaves are dropped.
///
/// # Errors
///
/// Returns an error if the top-level value is not an object.
///
/// # Examples
///
/// ```
/// use layerconf::format::flatten_json;
///
/// let value = serde_json::json!({"server": {"port": 8080}, "hosts": ["a", "b"]});
/// let entries = flatten_json(&value).unwrap();
///
/// assert!(entries.contains(&("SERVER.PORT".to_string(), "8080".to_string())));
/// assert!(entries.contains(&("HOSTS.1".to_string(), "b".to_string())));
/// ```
pub fn flatten_json(value: &JsonValue) -> Result<Entries, String> {
    let JsonValue::Object(map) = value else {
        return Err(format!("expected a JSON object, found {}", json_kind(value)));
    };

    let mut entries = Entries::new();
    for (key, child) in map {
        walk_json(key, child, &mut entries);
    }
    Ok(entries)
}

fn walk_json(path: &str, value: &JsonValue, out: &mut Entries) {
    match value {
        JsonValue::Object(map) => {
            for (key, child) in map {
                walk_json(&join(path, key), child, out);
            }
        }
        JsonValue::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                walk_json(&join(path, &index.to_string()), child, out);
            }
        }
        JsonValue::Null => {}
        JsonValue::String(s) => out.push((path.to_uppercase(), s.clone())),
        JsonValue::Bool(b) => out.push((path.to_uppercase(), b.to_string())),
        JsonValue::Number(n) => out.push((path.to_uppercase(), n.to_string())),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Flattens a YAML mapping into uppercased, dot-joined keys.
///
/// An empty document is treated as an empty mapping. Non-string keys use
/// their textual form and tagged values are flattened by their inner value.
///
/// # Errors
///
/// Returns an error if the top-level value is neither a mapping nor empty.
pub fn flatten_yaml(value: &YamlValue) -> Result<Entries, String> {
    let map = match value {
        YamlValue::Mapping(map) => map,
        YamlValue::Null => return Ok(Entries::new()),
        YamlValue::Tagged(tagged) => return flatten_yaml(&tagged.value),
        other => return Err(format!("expected a YAML mapping, found {}", yaml_kind(other))),
    };

    let mut entries = Entries::new();
    for (key, child) in map {
        if let Some(key) = yaml_key(key) {
            walk_yaml(&key, child, &mut entries);
        }
    }
    Ok(entries)
}

fn walk_yaml(path: &str, value: &YamlValue, out: &mut Entries) {
    match value {
        YamlValue::Mapping(map) => {
            for (key, child) in map {
                if let Some(key) = yaml_key(key) {
                    walk_yaml(&join(path, &key), child, out);
                }
            }
        }
        YamlValue::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                walk_yaml(&join(path, &index.to_string()), child, out);
            }
        }
        YamlValue::Tagged(tagged) => walk_yaml(path, &tagged.value, out),
        YamlValue::Null => {}
        YamlValue::String(s) => out.push((path.to_uppercase(), s.clone())),
        YamlValue::Bool(b) => out.push((path.to_uppercase(), b.to_string())),
        YamlValue::Number(n) => out.push((path.to_uppercase(), n.to_string())),
    }
}

/// Textual form of a scalar mapping key; container keys are skipped.
fn yaml_key(key: &YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Tagged(tagged) => yaml_key(&tagged.value),
        _ => None,
    }
}

fn yaml_kind(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a sequence",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}

fn join(parent: &str, child: &str) -> String {
    format!("{parent}.{child}")
}
