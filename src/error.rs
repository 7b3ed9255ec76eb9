//! Error types for `fmtsync`.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The command line could not be parsed, or help/version was requested.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// A file pattern could not be expanded. Fatal before any formatting.
    #[error("invalid glob pattern {pattern:?}: {message}")]
    Discovery {
        /// The offending pattern.
        pattern: String,
        /// Why it was rejected.
        message: String,
    },

    /// A configuration value was invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The configuration file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`crate::config::FileConfig`].
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A cassette could not be loaded or written.
    #[error("{0}")]
    Cassette(String),

    /// One or more files failed to format. Every failing file is named.
    #[error("formatting failed for {}", files.join(", "))]
    FormatFailures {
        /// Paths of the files that failed.
        files: Vec<String>,
    },

    /// Staging, committing, or pushing failed.
    #[error("commit failed: {0}")]
    Commit(String),

    /// The formatter package could not be installed.
    #[error("install failed: {0}")]
    Install(String),
}
