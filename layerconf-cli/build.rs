//! Build script for layerconf-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .help("Output format")
        .value_parser(["human", "json", "yaml", "dotenv"])
        .default_value("human")
}

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("layerconf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve configuration from environment variables, files and defaults")
        .long_about(
            "Resolve configuration values in the order environment variable, \
             configuration file, default",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .help("Environment variable prefix (PREFIX_KEY)")
                .value_name("PREFIX")
                .global(true)
                .env("LAYERCONF_PREFIX"),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .help("Configuration file to load; repeat to load several in order")
                .value_name("PATH")
                .global(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail if any configuration file cannot be loaded")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("get")
                .about("Print the resolved value of a key")
                .arg(Arg::new("key").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["string", "int", "bool", "float", "duration"]),
                )
                .arg(Arg::new("default").long("default").value_name("VALUE")),
            Command::new("require")
                .about("Print a value that must be set, failing otherwise")
                .arg(Arg::new("key").required(true)),
            Command::new("explain")
                .about("Show where a key's value comes from")
                .arg(Arg::new("key").required(true))
                .arg(Arg::new("default").long("default").value_name("VALUE"))
                .arg(format_arg()),
            Command::new("dump")
                .about("Print every value loaded from configuration files")
                .arg(format_arg()),
            Command::new("bind")
                .about("Bind the fields of a schema file and print the result")
                .arg(Arg::new("schema").value_name("SCHEMA").required(true))
                .arg(format_arg()),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("layerconf.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
