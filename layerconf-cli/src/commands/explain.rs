//! Command to show how a key resolves.

use crate::error::CliError;
use crate::utils::{build_resolver, print_entries, GlobalOptions};
use clap::Args;
use layerconf::output::{string_entries, OutputFormat};
use layerconf::{Resolved, Source};

/// Show the environment variable consulted for a key, the layer that
/// supplied its value, and the value itself.
#[derive(Args)]
pub struct ExplainCommand {
    /// Configuration key
    pub key: String,

    /// Default to report when no layer supplies a value
    #[arg(long, value_name = "VALUE")]
    pub default: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

impl ExplainCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = build_resolver(global)?;

        let resolved = resolver.lookup(&self.key).or_else(|| {
            self.default.clone().map(|value| Resolved {
                value,
                source: Source::Default,
            })
        });
        let (source, value) = match resolved {
            Some(r) => (r.source.to_string(), r.value),
            None => ("unset".to_string(), String::new()),
        };

        let entries = string_entries(vec![
            ("key".to_string(), self.key.to_uppercase()),
            ("env_var".to_string(), resolver.env_var_name(&self.key)),
            ("source".to_string(), source),
            ("value".to_string(), value),
        ]);
        print_entries(&entries, self.format)
    }
}
