//! Command to bind a schema file.

use crate::error::CliError;
use crate::utils::{build_resolver, print_entries, GlobalOptions};
use clap::Args;
use layerconf::output::OutputFormat;
use layerconf::Schema;
use std::path::PathBuf;

/// Resolve every field declared in a schema file and print the typed result.
#[derive(Args)]
pub struct BindCommand {
    /// Schema file (YAML, or JSON with a .json extension)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

impl BindCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let schema = Schema::from_file(&self.schema)?;
        let resolver = build_resolver(global)?;
        let record = resolver.load_schema(&schema)?;

        let entries: Vec<_> = record
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect();
        print_entries(&entries, self.format)
    }
}
