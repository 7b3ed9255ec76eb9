//! Binary entrypoint for the `fmtsync` CLI.

use std::io::IsTerminal;
use std::process::ExitCode;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(
            EnvFilter::try_from_env("FMTSYNC_LOG")
                .unwrap_or_else(|_| EnvFilter::new("fmtsync=info")),
        )
        .init();

    // Recording and replay are handled in commands::dispatch via
    // FMTSYNC_RECORD=<file> and FMTSYNC_REPLAY=<file>.
    match fmtsync::run(std::env::args_os()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(fmtsync::Error::Cli(err)) => err.exit(),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
