//! Run configuration: CLI flags, action inputs, config file, defaults.
//!
//! Precedence, highest first: command-line flag, `INPUT_*` environment
//! variable (both handled by clap), YAML config file, built-in default.
//! Empty strings count as unset, since the Actions runner exports every
//! declared input even when the workflow leaves it blank.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::RunArgs;
use crate::error::Error;
use crate::pipeline::apply::{FormatMode, Formatter};
use crate::ports::{Identity, Invocation};

/// Default glob pattern when none is configured.
pub const DEFAULT_FILES: &str = "**/*.rst";
/// Default author name for the formatting commit.
pub const DEFAULT_AUTHOR_NAME: &str = "github-actions";
/// Default author email for the formatting commit.
pub const DEFAULT_AUTHOR_EMAIL: &str = "github-actions@users.noreply.github.com";
/// Default commit message.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Apply formatting";
/// Default formatter command.
pub const DEFAULT_FORMATTER: &str = "rstfmt";
/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".fmtsync.yaml";

/// Everything a run needs, fixed at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfiguration {
    /// Glob patterns handed to discovery, in order.
    pub file_patterns: Vec<String>,
    /// Whether changed files are committed and pushed.
    pub commit_enabled: bool,
    /// Identity the commit is authored under.
    pub identity: Identity,
    /// Message for the formatting commit.
    pub commit_message: String,
    /// The formatter to run over each file.
    pub formatter: Formatter,
    /// Maximum number of files formatted concurrently.
    pub jobs: usize,
}

/// Optional settings read from a YAML config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    /// Glob patterns.
    pub files: Option<Vec<String>>,
    /// Commit and push changes.
    pub commit: Option<bool>,
    /// Commit author name.
    pub author_name: Option<String>,
    /// Commit author email.
    pub author_email: Option<String>,
    /// Commit message.
    pub commit_message: Option<String>,
    /// Formatter command line.
    pub formatter: Option<String>,
    /// Let the formatter rewrite files itself.
    pub in_place: Option<bool>,
    /// Worker pool size.
    pub jobs: Option<usize>,
}

impl FileConfig {
    /// Loads the config file.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used if present and an empty config otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Error> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = std::fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
            path: path.clone(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| Error::ConfigParse { path, source })
    }
}

/// Merges CLI arguments over a file config over defaults.
///
/// # Errors
///
/// Returns [`Error::Config`] for an unparseable `commit` flag, an empty
/// formatter command, or a zero job count.
pub fn resolve(args: &RunArgs, file: FileConfig) -> Result<RunConfiguration, Error> {
    let mut file_patterns = split_patterns(&args.files);
    if file_patterns.is_empty() {
        file_patterns = split_patterns(&file.files.unwrap_or_default());
    }
    if file_patterns.is_empty() {
        file_patterns.push(DEFAULT_FILES.to_string());
    }

    let commit_enabled = match non_empty(args.commit.as_deref()) {
        Some(raw) => parse_flag(raw)?,
        None => file.commit.unwrap_or(true),
    };

    let identity = Identity {
        name: pick(args.author_name.as_deref(), file.author_name, DEFAULT_AUTHOR_NAME),
        email: pick(args.author_email.as_deref(), file.author_email, DEFAULT_AUTHOR_EMAIL),
    };
    let commit_message =
        pick(args.commit_message.as_deref(), file.commit_message, DEFAULT_COMMIT_MESSAGE);

    let formatter = pick(args.formatter.as_deref(), file.formatter, DEFAULT_FORMATTER);
    let command = parse_command(&formatter)?;
    let mode = if args.in_place || file.in_place.unwrap_or(false) {
        FormatMode::InPlace
    } else {
        FormatMode::Stdout
    };

    let jobs = match args.jobs.or(file.jobs) {
        Some(0) => return Err(Error::Config("jobs must be at least 1".into())),
        Some(n) => n,
        None => std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
    };

    Ok(RunConfiguration {
        file_patterns,
        commit_enabled,
        identity,
        commit_message,
        formatter: Formatter { command, mode },
        jobs,
    })
}

/// Parses a boolean action input.
///
/// # Errors
///
/// Returns [`Error::Config`] for anything other than the usual spellings.
pub fn parse_flag(raw: &str) -> Result<bool, Error> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(Error::Config(format!("expected true or false for commit, got {other:?}"))),
    }
}

/// Splits multiline values into one pattern per non-blank line.
fn split_patterns(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.lines())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

fn parse_command(raw: &str) -> Result<Invocation, Error> {
    let mut words = raw.split_whitespace();
    let program = words.next().ok_or_else(|| Error::Config("formatter command is empty".into()))?;
    Ok(Invocation::new(program, words))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn pick(arg: Option<&str>, file: Option<String>, default: &str) -> String {
    non_empty(arg)
        .map(String::from)
        .or_else(|| file.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| default.to_string())
}
