//! Binary entrypoint for the `runcheck` CLI.

use std::process::ExitCode;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Variable holding the log filter, e.g. `RUNCHECK_LOG=runcheck=debug`.
const LOG_ENV: &str = "RUNCHECK_LOG";

fn main() -> ExitCode {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();

    match runcheck::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
