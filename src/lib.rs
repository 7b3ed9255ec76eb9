//! Core library entry for the `fmtsync` CLI.
//!
//! `fmtsync` discovers documentation files by glob, runs an external
//! formatter over each of them, and commits and pushes whatever changed as a
//! single commit.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod report;

pub use error::Error;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns [`Error::Cli`] when argument parsing fails (including `--help`
/// and `--version`, which callers should let clap print), or the command's
/// own error.
pub async fn run<I, T>(args: I) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    commands::dispatch(&cli.command).await
}
