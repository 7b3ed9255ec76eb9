//! `fmtsync install` command.

use crate::context::ServiceContext;
use crate::error::Error;
use crate::ports::Invocation;

/// Installs the formatter package with `pip3 install <package>`.
///
/// # Errors
///
/// Returns [`Error::Install`] if pip cannot be started or exits non-zero.
pub fn run(ctx: &ServiceContext, package: &str) -> Result<(), Error> {
    let invocation = Invocation::new("pip3", ["install", package]);
    tracing::info!(command = %invocation, "installing formatter");

    let result = ctx.runner.run(&invocation);
    if result.failed {
        return Err(Error::Install(result.failure_message()));
    }
    tracing::info!(package, "formatter installed");
    Ok(())
}
