//! CLI module - argument parsing and subcommands

mod args;
pub mod stats;

pub use args::{Cli, Commands, LogFormatArg};
