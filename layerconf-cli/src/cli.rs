//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{BindCommand, DumpCommand, ExplainCommand, GetCommand, RequireCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for resolving layered configuration.
#[derive(Parser)]
#[command(name = "layerconf")]
#[command(
    version,
    about = "Resolve configuration from environment variables, files and defaults",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Environment variable prefix (PREFIX_KEY)
    #[arg(
        long,
        value_name = "PREFIX",
        global = true,
        env = "LAYERCONF_PREFIX",
        default_value = ""
    )]
    pub prefix: String,

    /// Configuration file to load; repeat to load several in order
    #[arg(long = "file", short = 'f', value_name = "PATH", global = true)]
    pub files: Vec<PathBuf>,

    /// Fail if any configuration file cannot be loaded
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the resolved value of a key
    Get(GetCommand),

    /// Print a value that must be set, failing otherwise
    Require(RequireCommand),

    /// Show where a key's value comes from
    Explain(ExplainCommand),

    /// Print every value loaded from configuration files
    Dump(DumpCommand),

    /// Bind the fields of a schema file and print the result
    Bind(BindCommand),
}
