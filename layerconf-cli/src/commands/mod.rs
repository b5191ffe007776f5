//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `get`: Print the resolved value of a key
//! - `require`: Print a value that must be set
//! - `explain`: Show where a key's value comes from
//! - `dump`: Print the merged file values
//! - `bind`: Bind a schema file and print the record

pub mod bind;
pub mod dump;
pub mod explain;
pub mod get;
pub mod require;

pub use bind::BindCommand;
pub use dump::DumpCommand;
pub use explain::ExplainCommand;
pub use get::GetCommand;
pub use require::RequireCommand;
