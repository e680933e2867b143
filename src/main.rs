//! Binary entrypoint for the `asana-task` CLI.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

/// Tracing filter variable; defaults to `warn`.
const ENV_LOG: &str = "ASANA_TASK_LOG";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    // Recording and replay are handled in commands::dispatch via
    // ASANA_TASK_RECORD=<dir> and ASANA_TASK_REPLAY=<path>.
    match asana_task::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
