//! Main entry point for the layerconf CLI.
//!
//! This is the command-line interface to the layerconf resolver. It provides
//! commands for inspecting configuration:
//! - `get`: Print the resolved value of a key
//! - `require`: Print a value that must be set
//! - `explain`: Show where a key's value comes from
//! - `dump`: Print the merged file values
//! - `bind`: Bind a schema file and print the record

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Route library diagnostics through a logger sized by the verbosity flags
    let logger = layerconf::init_logger(cli.verbose, cli.quiet);
    logger.install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        prefix: cli.prefix,
        files: cli.files,
        strict: cli.strict,
    };

    let result = match cli.command {
        cli::Command::Get(cmd) => cmd.execute(&global),
        cli::Command::Require(cmd) => cmd.execute(&global),
        cli::Command::Explain(cmd) => cmd.execute(&global),
        cli::Command::Dump(cmd) => cmd.execute(&global),
        cli::Command::Bind(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
