//! Command dispatch and handlers.

pub mod install;
pub mod run;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::Command;
use crate::context::ServiceContext;
use crate::error::Error;

/// Dispatch a parsed command to its handler.
///
/// When `FMTSYNC_REPLAY` is set to a cassette file, every port call is
/// answered from it. Otherwise, when `FMTSYNC_RECORD` is set, every port
/// call goes to the live system and is recorded into that file.
///
/// # Errors
///
/// Returns an error if the cassette cannot be loaded or the command fails.
pub async fn dispatch(command: &Command) -> Result<(), Error> {
    let ctx = Arc::new(context_from_env()?);
    let result = dispatch_with_context(command, Arc::clone(&ctx)).await;
    // The last reference writes any recording.
    drop(ctx);
    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error if the command fails.
pub async fn dispatch_with_context(
    command: &Command,
    ctx: Arc<ServiceContext>,
) -> Result<(), Error> {
    match command {
        Command::Run(args) => run::run(ctx, args).await,
        Command::Install { package } => install::run(&ctx, package),
    }
}

fn context_from_env() -> Result<ServiceContext, Error> {
    if let Some(path) = env_path("FMTSYNC_REPLAY") {
        tracing::info!(path = %path.display(), "replaying cassette");
        return ServiceContext::replaying(&path);
    }
    if let Some(path) = env_path("FMTSYNC_RECORD") {
        tracing::info!(path = %path.display(), "recording cassette");
        return Ok(ServiceContext::recording(&path));
    }
    Ok(ServiceContext::live())
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}
