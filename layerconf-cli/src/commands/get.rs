//! Command to print the resolved value of a key.

use crate::error::CliError;
use crate::utils::{build_resolver, GlobalOptions};
use clap::{Args, ValueEnum};
use layerconf::coerce::{format_duration, parse_bool, parse_duration};
use std::time::Duration;

/// How the value is interpreted before printing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    /// Print the raw string.
    #[default]
    String,
    /// Base-10 integer.
    Int,
    /// true/false, yes/no, on/off or 1/0.
    Bool,
    /// Floating point number.
    Float,
    /// Duration literal such as 30s or 1h30m.
    Duration,
}

/// Print the resolved value of a key.
///
/// Values that do not parse as the requested type fall back to the default.
#[derive(Args)]
pub struct GetCommand {
    /// Configuration key (case-insensitive, dots for nesting)
    pub key: String,

    /// Type used to interpret the value
    #[arg(long = "type", value_enum, default_value_t = ValueType::String)]
    pub value_type: ValueType,

    /// Value printed when the key is unset or does not parse
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,
}

impl GetCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = build_resolver(global)?;
        let key = self.key.as_str();
        let default = self.default.as_deref();

        let value = match self.value_type {
            ValueType::String => resolver.string(key, default.unwrap_or_default()),
            ValueType::Int => resolver
                .int(key, parse_default(default, |s| s.parse().ok(), 0)?)
                .to_string(),
            ValueType::Bool => resolver
                .bool(key, parse_default(default, parse_bool, false)?)
                .to_string(),
            ValueType::Float => resolver
                .float(key, parse_default(default, |s| s.parse().ok(), 0.0)?)
                .to_string(),
            ValueType::Duration => format_duration(resolver.duration(
                key,
                parse_default(default, |s| parse_duration(s).ok(), Duration::ZERO)?,
            )),
        };

        println!("{value}");
        Ok(())
    }
}

/// Parse the `--default` argument, or use `zero` when it was not given.
fn parse_default<T>(
    default: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
    zero: T,
) -> Result<T, CliError> {
    match default {
        None => Ok(zero),
        Some(raw) => parse(raw).ok_or_else(|| {
            CliError::InvalidArguments(format!("default '{raw}' does not match the requested type"))
        }),
    }
}
