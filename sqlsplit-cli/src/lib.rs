//! sqlsplit CLI library
//!
//! This library provides the command-line interface for splitting SQL
//! dumps into per-object files.

pub mod commands;
pub mod config;
pub mod error;
pub mod progress;
pub mod report;

pub use error::{CliError, CliResult};
