//! Output formatter implementations.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value as JsonValue;

use crate::{Error, Result};

use super::{OutputEntry, OutputFormatter};

/// Serializes entries as a map in their given order.
struct OrderedEntries<'a>(&'a [OutputEntry]);

impl Serialize for OrderedEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn plain(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Formatter for JSON output.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, entries: &[OutputEntry]) -> Result<String> {
        serde_json::to_string_pretty(&OrderedEntries(entries))
            .map_err(|e| Error::Serialize(format!("JSON: {e}")))
    }
}

/// Formatter for YAML output.
pub struct YamlFormatter;

impl OutputFormatter for YamlFormatter {
    fn format(&self, entries: &[OutputEntry]) -> Result<String> {
        if entries.is_empty() {
            return Ok("{}".to_string());
        }
        serde_yaml::to_string(&OrderedEntries(entries))
            .map(|s| s.trim_end().to_string())
            .map_err(|e| Error::Serialize(format!("YAML: {e}")))
    }
}

/// Formatter for dotenv (.env file) format.
///
/// Names are uppercased with `.` and `-` replaced by `_`. Values containing
/// whitespace, `#` or quotes are double-quoted.
pub struct DotenvFormatter;

impl DotenvFormatter {
    fn var_name(name: &str) -> String {
        name.to_uppercase().replace(['.', '-'], "_")
    }

    fn quote(value: &str) -> String {
        let needs_quotes = value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\''));
        if !needs_quotes {
            return value.to_string();
        }
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    }
}

impl OutputFormatter for DotenvFormatter {
    fn format(&self, entries: &[OutputEntry]) -> Result<String> {
        let lines: Vec<String> = entries
            .iter()
            .map(|(name, value)| {
                format!("{}={}", Self::var_name(name), Self::quote(&plain(value)))
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

/// Formatter for human-readable output.
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format(&self, entries: &[OutputEntry]) -> Result<String> {
        if entries.is_empty() {
            return Ok("No configuration values.".to_string());
        }

        let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        let lines: Vec<String> = entries
            .iter()
            .map(|(name, value)| format!("{name:<width$} = {}", plain(value)))
            .collect();
        Ok(lines.join("\n"))
    }
}
