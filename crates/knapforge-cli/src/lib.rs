//! Library half of the `knapforge` binary: argument definitions, catalog
//! loading, command execution and report rendering.

pub mod args;
pub mod commands;
pub mod error;
pub mod exitcode;
pub mod input;
pub mod output;

pub use args::{Cli, Commands, OutputFormat};
pub use commands::execute;
pub use error::{CliError, CliResult};
