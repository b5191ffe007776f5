//! Configuration file formats.
//!
//! Every supported format is parsed into a flat list of `(KEY, value)`
//! entries: keys are uppercased and nested structure is joined with `.`.
//!
//! The format is chosen from the file extension when it is one of the known
//! ones. Otherwise the content is sniffed: JSON first, then YAML (only when
//! the document is a mapping and the text does not already look like
//! `KEY=VALUE` lines), then key-value lines.

mod flatten;
mod keyvalue;

use std::fmt;
use std::path::Path;

pub use flatten::{flatten_json, flatten_yaml};
pub use keyvalue::parse_key_value;

/// Flat configuration entries.
///
/// Key-value and YAML entries keep document order; JSON entries are sorted
/// by key within each object.
pub type Entries = Vec<(String, String)>;

/// A configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// A JSON object.
    Json,
    /// A YAML mapping.
    Yaml,
    /// `KEY=VALUE` lines with `#` comments.
    KeyValue,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
            Self::KeyValue => write!(f, "key-value"),
        }
    }
}

impl FileFormat {
    /// Picks a format from a path's extension.
    ///
    /// Returns `None` when the extension is missing or unknown, in which case
    /// the caller should sniff the content with [`detect_and_parse`].
    ///
    /// # Examples
    ///
    /// ```
    /// use layerconf::FileFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(FileFormat::from_path(Path::new("app.JSON")), Some(FileFormat::Json));
    /// assert_eq!(FileFormat::from_path(Path::new("app.yml")), Some(FileFormat::Yaml));
    /// assert_eq!(FileFormat::from_path(Path::new(".env")), Some(FileFormat::KeyValue));
    /// assert_eq!(FileFormat::from_path(Path::new("settings")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        // `Path::extension` reports nothing for dotfiles like `.env`.
        if path.file_name().and_then(|n| n.to_str()) == Some(".env") {
            return Some(Self::KeyValue);
        }

        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "env" | "txt" | "conf" => Some(Self::KeyValue),
            _ => None,
        }
    }

    /// Parses content in this format.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure when the content is malformed or,
    /// for JSON and YAML, when the top-level value is not an object.
    pub fn parse(self, content: &str) -> Result<Entries, String> {
        match self {
            Self::Json => {
                let value: serde_json::Value =
                    serde_json::from_str(content).map_err(|e| e.to_string())?;
                flatten_json(&value)
            }
            Self::Yaml => {
                let value: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| e.to_string())?;
                flatten_yaml(&value)
            }
            Self::KeyValue => Ok(parse_key_value(content)),
        }
    }
}

/// Sniffs the format of content with no usable extension and parses it.
///
/// # Errors
///
/// Fails only when no format accepts the content; the key-value parser's
/// failure is the one reported.
pub fn detect_and_parse(content: &str) -> Result<(FileFormat, Entries), String> {
    if let Ok(entries) = FileFormat::Json.parse(content) {
        return Ok((FileFormat::Json, entries));
    }

    if !looks_like_key_value(content) {
        if let Ok(entries) = FileFormat::Yaml.parse(content) {
            return Ok((FileFormat::Yaml, entries));
        }
    }

    FileFormat::KeyValue
        .parse(content)
        .map(|entries| (FileFormat::KeyValue, entries))
}

/// Whether every meaningful line is a `KEY=VALUE` assignment.
///
/// Such text can occasionally also be read as a YAML mapping
/// (`MSG=a: b` is the key `MSG=a`), so it is routed to the key-value parser.
fn looks_like_key_value(content: &str) -> bool {
    let mut assignments = 0;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, _)) = line.split_once('=') else {
            return false;
        };
        let key = key.trim();
        let key = key.strip_prefix("export ").map_or(key, str::trim);
        if !is_assignment_key(key) {
            return false;
        }
        assignments += 1;
    }

    assignments > 0
}

fn is_assignment_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}
