//! Error types for the layerconf library.
//!
//! This module provides the error hierarchy for file loading and struct
//! binding, using `thiserror` for ergonomic error handling. Typed accessors
//! on [`Resolver`](crate::Resolver) never surface these errors; they fall back
//! to the caller's default instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::format::FileFormat;

/// Result type alias for operations that may fail with a layerconf error.
///
/// # Examples
///
/// ```
/// use layerconf::{Error, Result};
///
/// fn example_operation() -> Result<u16> {
///     Ok(8080)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the layerconf library.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    FileRead {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A configuration file was read but its content could not be parsed.
    #[error("failed to parse {format} config {}: {message}", path.display())]
    Parse {
        /// The file being parsed (or `<inline>` for in-memory content).
        path: PathBuf,
        /// The format the parser was attempting.
        format: FileFormat,
        /// A description of the parse failure.
        message: String,
    },

    /// The binding target does not describe a record of fields.
    #[error("invalid binding target: {reason}")]
    InvalidTarget {
        /// Why the target was rejected.
        reason: String,
    },

    /// A field declares a type with no coercion rule.
    #[error("unsupported type '{type_name}' for field {field}")]
    UnsupportedType {
        /// The field name.
        field: String,
        /// The declared type name.
        type_name: String,
    },

    /// A resolved value could not be converted into the field's type.
    #[error("failed to set field {field} from '{value}': {message}")]
    FieldCoercion {
        /// The field name.
        field: String,
        /// The raw value that failed to convert.
        value: String,
        /// A description of the conversion failure.
        message: String,
    },

    /// A required value resolved to nothing.
    #[error("required configuration {env_var} is not set")]
    MissingRequired {
        /// The fully qualified environment variable that was consulted.
        env_var: String,
    },

    /// Output could not be serialized.
    #[error("failed to serialize output: {0}")]
    Serialize(String),
}

impl Error {
    /// Create a parse error for the given path and format.
    pub fn parse(path: impl Into<PathBuf>, format: FileFormat, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            format,
            message: message.into(),
        }
    }

    /// Create a field coercion error.
    pub fn coercion(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::FieldCoercion {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_read_error_names_path() {
        let err = Error::FileRead {
            path: PathBuf::from("/etc/app/config.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/app/config.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_parse_error_names_format() {
        let err = Error::parse("settings.yaml", FileFormat::Yaml, "bad indentation");
        assert_eq!(
            err.to_string(),
            "failed to parse YAML config settings.yaml: bad indentation"
        );
    }

    #[test]
    fn test_coercion_error_names_field() {
        let err = Error::coercion("Port", "abc", "invalid digit found in string");
        let msg = err.to_string();
        assert!(msg.contains("Port"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_missing_required_names_env_var() {
        let err = Error::MissingRequired {
            env_var: "APP_API_KEY".to_string(),
        };
        assert_eq!(err.to_string(), "required configuration APP_API_KEY is not set");
    }

    #[test]
    fn test_unsupported_type_error() {
        let err = Error::UnsupportedType {
            field: "tags".to_string(),
            type_name: "list".to_string(),
        };
        assert!(err.to_string().contains("tags"));
        assert!(err.to_string().contains("list"));
    }
}
