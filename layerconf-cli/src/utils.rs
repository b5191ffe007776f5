//! Utility functions for CLI operations.
//!
//! This module provides helpers shared by the commands: building the
//! resolver from global options and printing formatted output.

use crate::error::CliError;
use layerconf::output::{OutputEntry, OutputFormat};
use layerconf::Resolver;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // verbosity is consumed by the logger before commands run
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Environment variable prefix.
    pub prefix: String,

    /// Configuration files, loaded in order.
    pub files: Vec<PathBuf>,

    /// Fail on the first file that cannot be loaded.
    pub strict: bool,
}

/// Build a resolver and load the configured files.
///
/// A file that fails to load is logged as a warning and skipped, unless
/// `--strict` was given.
pub fn build_resolver(global: &GlobalOptions) -> Result<Resolver, CliError> {
    let resolver = Resolver::new(&global.prefix);

    for path in &global.files {
        match resolver.load_file(path) {
            Ok(()) => log::info!("loaded {}", path.display()),
            Err(e) if global.strict => return Err(e.into()),
            Err(e) => log::warn!("{e}"),
        }
    }

    Ok(resolver)
}

/// Render entries in the requested format and print them to stdout.
pub fn print_entries(entries: &[OutputEntry], format: OutputFormat) -> Result<(), CliError> {
    let output = format.create_formatter().format(entries)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_resolver_skips_missing_files() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.env");
        fs::write(&good, "NAME=svc\n").unwrap();

        let global = GlobalOptions {
            files: vec![dir.path().join("missing.env"), good],
            ..GlobalOptions::default()
        };
        let resolver = build_resolver(&global).unwrap();
        assert_eq!(resolver.loaded_files().len(), 1);
    }

    #[test]
    fn test_build_resolver_strict_fails() {
        let dir = TempDir::new().unwrap();
        let global = GlobalOptions {
            files: vec![dir.path().join("missing.env")],
            strict: true,
            ..GlobalOptions::default()
        };
        let err = build_resolver(&global).unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }
}
