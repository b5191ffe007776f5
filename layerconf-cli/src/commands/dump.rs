//! Command to print the merged file values.

use crate::error::CliError;
use crate::utils::{build_resolver, print_entries, GlobalOptions};
use clap::Args;
use layerconf::output::{string_entries, OutputFormat};

/// Print every key loaded from the configuration files, sorted by key.
///
/// Environment variables are not included.
#[derive(Args)]
pub struct DumpCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

impl DumpCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = build_resolver(global)?;
        print_entries(&string_entries(resolver.file_values()), self.format)
    }
}
