//! Runtime schemas for binding fields that are only known at run time.
//!
//! A schema is a YAML or JSON document listing fields, either as a sequence:
//!
//! ```yaml
//! - name: port
//!   type: int
//!   default: "8080"
//! - name: token
//!   env: API_TOKEN
//! ```
//!
//! or as a mapping from field name to attributes:
//!
//! ```yaml
//! port: { type: int, default: "8080" }
//! token: { env: API_TOKEN }
//! ```
//!
//! Binding a schema produces a [`Record`] in declaration order. JSON mappings
//! are read in key order; use the sequence form to control ordering there.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::{Binder, FieldSpec, FieldValue};
use crate::coerce::format_duration;
use crate::error::{Error, Result};
use crate::format::FileFormat;

const INLINE_SCHEMA: &str = "<schema>";

/// The type a schema field converts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any string (`string` or `text`).
    String,
    /// A signed 64-bit integer.
    Int,
    /// An unsigned 64-bit integer.
    Uint,
    /// A boolean, parsed leniently.
    Bool,
    /// A 64-bit float.
    Float,
    /// A duration literal.
    Duration,
}

impl FieldKind {
    /// Looks up a type name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "string" | "text" => Some(Self::String),
            "int" => Some(Self::Int),
            "uint" => Some(Self::Uint),
            "bool" => Some(Self::Bool),
            "float" => Some(Self::Float),
            "duration" => Some(Self::Duration),
            _ => None,
        }
    }

    /// The value a field of this kind holds when nothing resolves.
    #[must_use]
    pub fn zero(self) -> Value {
        match self {
            Self::String => Value::String(String::new()),
            Self::Int => Value::Int(0),
            Self::Uint => Value::Uint(0),
            Self::Bool => Value::Bool(false),
            Self::Float => Value::Float(0.0),
            Self::Duration => Value::Duration(Duration::ZERO),
        }
    }

    fn convert(self, raw: &str) -> std::result::Result<Value, String> {
        Ok(match self {
            Self::String => Value::String(String::from_config(raw)?),
            Self::Int => Value::Int(i64::from_config(raw)?),
            Self::Uint => Value::Uint(u64::from_config(raw)?),
            Self::Bool => Value::Bool(bool::from_config(raw)?),
            Self::Float => Value::Float(f64::from_config(raw)?),
            Self::Duration => Value::Duration(Duration::from_config(raw)?),
        })
    }
}

/// A typed value produced by schema binding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string value.
    String(String),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    Uint(u64),
    /// A boolean.
    Bool(bool),
    /// A float.
    Float(f64),
    /// A duration.
    Duration(Duration),
}

impl Value {
    /// Converts into a JSON value; durations render as literals like `1m30s`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::from(s.as_str()),
            Self::Int(n) => serde_json::Value::from(*n),
            Self::Uint(n) => serde_json::Value::from(*n),
            Self::Bool(b) => serde_json::Value::from(*b),
            Self::Float(x) => serde_json::Value::from(*x),
            Self::Duration(d) => serde_json::Value::from(format_duration(*d)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Uint(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Duration(d) => f.write_str(&format_duration(*d)),
        }
    }
}

/// Bound field values in schema declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Iterates over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.fields {
            writeln!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}

/// Attributes shared by both schema document forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldAttributes {
    #[serde(rename = "type")]
    type_name: Option<String>,
    config: Option<String>,
    env: Option<String>,
    default: Option<String>,
    file: Option<PathBuf>,
}

/// Sequence-form entry: the attributes plus the field's own name.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NamedField {
    name: String,
    #[serde(rename = "type")]
    type_name: Option<String>,
    config: Option<String>,
    env: Option<String>,
    default: Option<String>,
    file: Option<PathBuf>,
}

impl NamedField {
    fn into_field(self) -> Result<SchemaField> {
        let attributes = FieldAttributes {
            type_name: self.type_name,
            config: self.config,
            env: self.env,
            default: self.default,
            file: self.file,
        };
        SchemaField::new(self.name, attributes)
    }
}

/// One field of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    /// Field name, used in errors and as the record key.
    pub name: String,
    /// Declared type name; `string` when omitted.
    pub type_name: String,
    /// Configuration key; the lowercased name when omitted.
    pub config: Option<String>,
    /// Exact environment variable name.
    pub env: Option<String>,
    /// Default literal.
    pub default: Option<String>,
    /// File to load before resolving.
    pub file: Option<PathBuf>,
}

impl SchemaField {
    fn new(name: String, attributes: FieldAttributes) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::InvalidTarget {
                reason: "schema field with an empty name".to_string(),
            });
        }
        Ok(Self {
            name,
            type_name: attributes.type_name.unwrap_or_else(|| "string".to_string()),
            config: attributes.config,
            env: attributes.env,
            default: attributes.default,
            file: attributes.file,
        })
    }

    fn spec(&self) -> FieldSpec {
        let mut spec = FieldSpec::new(self.name.clone());
        if let Some(key) = &self.config {
            spec = spec.key(key.clone());
        }
        if let Some(env) = &self.env {
            spec = spec.env(env.clone());
        }
        if let Some(default) = &self.default {
            spec = spec.default(default.clone());
        }
        if let Some(file) = &self.file {
            spec = spec.file(file.clone());
        }
        spec
    }
}

/// A list of fields to bind at run time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<SchemaField>,
}

impl Schema {
    /// Builds a schema from already constructed fields.
    #[must_use]
    pub fn new(fields: Vec<SchemaField>) -> Self {
        Self { fields }
    }

    /// The declared fields in order.
    #[must_use]
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Parses a YAML schema document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed YAML and
    /// [`Error::InvalidTarget`] when the document does not describe fields.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Self::parse_yaml(Path::new(INLINE_SCHEMA), content)
    }

    /// Parses a JSON schema document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed JSON and
    /// [`Error::InvalidTarget`] when the document does not describe fields.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::parse_json(Path::new(INLINE_SCHEMA), content)
    }

    /// Reads a schema file; `.json` files are JSON, everything else YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileRead`] when the file cannot be read, otherwise as
    /// for [`from_yaml_str`](Self::from_yaml_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        if FileFormat::from_path(path) == Some(FileFormat::Json) {
            Self::parse_json(path, &content)
        } else {
            Self::parse_yaml(path, &content)
        }
    }

    fn parse_yaml(path: &Path, content: &str) -> Result<Self> {
        let doc: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| Error::parse(path, FileFormat::Yaml, e.to_string()))?;

        let fields = match doc {
            serde_yaml::Value::Sequence(items) => items
                .into_iter()
                .map(|item| {
                    let named: NamedField = serde_yaml::from_value(item).map_err(invalid_field)?;
                    named.into_field()
                })
                .collect::<Result<Vec<_>>>()?,
            serde_yaml::Value::Mapping(map) => map
                .into_iter()
                .map(|(key, attrs)| {
                    let name = match key {
                        serde_yaml::Value::String(name) => name,
                        other => {
                            return Err(Error::InvalidTarget {
                                reason: format!(
                                    "schema field names must be strings, found {}",
                                    yaml_kind(&other)
                                ),
                            })
                        }
                    };
                    let attributes = if attrs.is_null() {
                        FieldAttributes::default()
                    } else {
                        serde_yaml::from_value(attrs).map_err(invalid_field)?
                    };
                    SchemaField::new(name, attributes)
                })
                .collect::<Result<Vec<_>>>()?,
            other => return Err(not_a_record(yaml_kind(&other))),
        };

        Ok(Self { fields })
    }

    fn parse_json(path: &Path, content: &str) -> Result<Self> {
        let doc: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| Error::parse(path, FileFormat::Json, e.to_string()))?;

        let fields = match doc {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| {
                    let named: NamedField = serde_json::from_value(item).map_err(invalid_field)?;
                    named.into_field()
                })
                .collect::<Result<Vec<_>>>()?,
            serde_json::Value::Object(map) => map
                .into_iter()
                .map(|(name, attrs)| {
                    let attributes = if attrs.is_null() {
                        FieldAttributes::default()
                    } else {
                        serde_json::from_value(attrs).map_err(invalid_field)?
                    };
                    SchemaField::new(name, attributes)
                })
                .collect::<Result<Vec<_>>>()?,
            serde_json::Value::Null => return Err(not_a_record("null")),
            serde_json::Value::Bool(_) => return Err(not_a_record("a boolean")),
            serde_json::Value::Number(_) => return Err(not_a_record("a number")),
            serde_json::Value::String(_) => return Err(not_a_record("a string")),
        };

        Ok(Self { fields })
    }

    /// Resolves every field through `binder`.
    ///
    /// Field types are checked before anything is resolved, so an unsupported
    /// type fails without loading any field files.
    pub(crate) fn bind(&self, binder: &mut Binder<'_>) -> Result<Record> {
        let kinds = self
            .fields
            .iter()
            .map(|field| {
                FieldKind::from_name(&field.type_name).ok_or_else(|| Error::UnsupportedType {
                    field: field.name.clone(),
                    type_name: field.type_name.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut record = Record::default();
        for (field, kind) in self.fields.iter().zip(kinds) {
            let value = match binder.resolve(&field.spec()) {
                Some(raw) => kind
                    .convert(&raw)
                    .map_err(|message| Error::coercion(&field.name, &raw, message))?,
                None => kind.zero(),
            };
            record.fields.push((field.name.clone(), value));
        }
        Ok(record)
    }
}

fn invalid_field(err: impl fmt::Display) -> Error {
    Error::InvalidTarget {
        reason: format!("malformed schema field: {err}"),
    }
}

fn not_a_record(kind: &str) -> Error {
    Error::InvalidTarget {
        reason: format!("expected a list or mapping of fields, found {kind}"),
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "an empty document",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
