//! `fmtsync run` command.

use std::sync::Arc;

use crate::cli::RunArgs;
use crate::config::{self, FileConfig};
use crate::context::ServiceContext;
use crate::error::Error;
use crate::{pipeline, report};

/// Execute the `run` command.
///
/// # Errors
///
/// Returns an error for invalid configuration, a malformed file pattern,
/// any file that failed to format, or a failed commit.
pub async fn run(ctx: Arc<ServiceContext>, args: &RunArgs) -> Result<(), Error> {
    let file = FileConfig::load(args.config.as_deref())?;
    let config = config::resolve(args, file)?;
    tracing::debug!(?config, "resolved configuration");

    let outcome = pipeline::run(ctx, &config).await?;
    report::summarize(&outcome);
    report::emit_annotations(&outcome);
    report::verdict(&outcome)
}
