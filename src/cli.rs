//! CLI argument definitions.
//!
//! Every `run` option can also come from the matching GitHub Actions input,
//! which the runner exports as `INPUT_<NAME>`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `fmtsync`.
#[derive(Debug, Parser)]
#[command(name = "fmtsync", version, about = "Format documentation files and commit the result")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Format matching files, then commit and push whatever changed.
    Run(RunArgs),
    /// Install the formatter with pip.
    Install {
        /// Package specifier passed to `pip3 install`.
        #[arg(long, env = "INPUT_FORMATTER-PACKAGE", default_value = "rstfmt==0.0.13")]
        package: String,
    },
}

/// Options for `fmtsync run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Glob pattern selecting files to format. Repeat the flag or separate
    /// patterns with newlines. Defaults to `**/*.rst`.
    #[arg(long = "files", short = 'f', value_name = "GLOB", env = "INPUT_FILES")]
    pub files: Vec<String>,

    /// Commit and push formatted files (`true` or `false`).
    #[arg(long, value_name = "BOOL", env = "INPUT_COMMIT")]
    pub commit: Option<String>,

    /// Author name for the formatting commit.
    #[arg(long, env = "INPUT_GITHUB-USERNAME")]
    pub author_name: Option<String>,

    /// Author email for the formatting commit.
    #[arg(long, env = "INPUT_AUTHOR-EMAIL")]
    pub author_email: Option<String>,

    /// Message for the formatting commit.
    #[arg(long, short = 'm', env = "INPUT_COMMIT-MESSAGE")]
    pub commit_message: Option<String>,

    /// Formatter command; the file path is appended as its last argument.
    #[arg(long, env = "INPUT_FORMATTER")]
    pub formatter: Option<String>,

    /// The formatter rewrites files itself instead of printing to stdout.
    #[arg(long)]
    pub in_place: bool,

    /// Number of files formatted concurrently.
    #[arg(long, short = 'j', env = "INPUT_JOBS")]
    pub jobs: Option<usize>,

    /// YAML config file (defaults to `.fmtsync.yaml` when present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
