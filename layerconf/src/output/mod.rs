//! Output formatting for resolved configuration.
//!
//! Formatters render an ordered list of `(name, value)` entries as
//! human-readable text, JSON, YAML or dotenv lines.

mod formatters;

use clap::ValueEnum;
use serde_json::Value as JsonValue;

use crate::Result;

pub use formatters::{DotenvFormatter, HumanFormatter, JsonFormatter, YamlFormatter};

/// One named value to render. Strings print verbatim in text formats.
pub type OutputEntry = (String, JsonValue);

/// Trait for rendering entries into an output format.
pub trait OutputFormatter {
    /// Format the entries, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`](crate::Error::Serialize) if a structured
    /// format cannot be produced.
    fn format(&self, entries: &[OutputEntry]) -> Result<String>;
}

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `NAME = value` lines.
    #[default]
    Human,
    /// A JSON object.
    Json,
    /// A YAML mapping.
    Yaml,
    /// `NAME=value` lines suitable for a `.env` file.
    Dotenv,
}

impl OutputFormat {
    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Human => Box::new(HumanFormatter),
            Self::Json => Box::new(JsonFormatter),
            Self::Yaml => Box::new(YamlFormatter),
            Self::Dotenv => Box::new(DotenvFormatter),
        }
    }
}

/// Converts string pairs into output entries.
#[must_use]
pub fn string_entries(pairs: Vec<(String, String)>) -> Vec<OutputEntry> {
    pairs
        .into_iter()
        .map(|(name, value)| (name, JsonValue::String(value)))
        .collect()
}
