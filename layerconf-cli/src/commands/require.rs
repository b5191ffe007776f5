//! Command to print a value that must be present.

use crate::error::CliError;
use crate::utils::{build_resolver, GlobalOptions};
use clap::Args;

/// Print a required value, failing with exit code 1 when it is unset.
#[derive(Args)]
pub struct RequireCommand {
    /// Configuration key
    pub key: String,
}

impl RequireCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = build_resolver(global)?;
        let value = resolver.try_required(&self.key)?;
        println!("{value}");
        Ok(())
    }
}
