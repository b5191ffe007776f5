#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # layerconf
//!
//! Layered configuration resolution for services.
//!
//! Every value is looked up in a fixed order: the environment variable
//! `PREFIX_KEY`, then values loaded from configuration files (JSON, YAML or
//! `KEY=VALUE`), then the default supplied by the caller. Keys are
//! case-insensitive and nested file structure flattens to dotted keys
//! (`server.port`).
//!
//! ## Core Types
//!
//! - [`Resolver`]: typed lookups and file loading
//! - [`Bind`], [`Binder`] and [`FieldSpec`]: binding whole structs
//! - [`Schema`] and [`Record`]: binding fields declared at run time
//! - [`AppEnv`] and [`StandardConfig`]: common service settings plus a logger
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use layerconf::{FileFormat, MapEnv, Resolver};
//! use std::time::Duration;
//!
//! let env = MapEnv::new().with("APP_DEBUG", "yes");
//! let resolver = Resolver::with_env("app", env);
//! resolver
//!     .load_str("port: 9000\ntimeouts:\n  read: 15s\n", FileFormat::Yaml)
//!     .unwrap();
//!
//! assert_eq!(resolver.int("port", 8080), 9000);
//! assert_eq!(resolver.duration("timeouts.read", Duration::ZERO), Duration::from_secs(15));
//! assert!(resolver.bool("debug", false));
//! assert_eq!(resolver.string("host", "0.0.0.0"), "0.0.0.0");
//! ```

pub mod app;
pub mod binding;
pub mod coerce;
pub mod environment;
pub mod error;
pub mod format;
pub mod logging;
pub mod output;
pub mod resolver;

// Re-export key types at crate root for convenience
pub use app::{AppEnv, StandardConfig};
pub use binding::{
    Bind, BindReport, Binder, Diagnostic, FieldKind, FieldSpec, FieldValue, Record, Schema,
    SchemaField, Value,
};
pub use environment::{EnvSource, MapEnv, ProcessEnv};
pub use error::{Error, Result};
pub use format::FileFormat;
pub use logging::{init_logger, LogLevel, Logger};
pub use output::{OutputFormat, OutputFormatter};
pub use resolver::{Resolved, Resolver, Source};
