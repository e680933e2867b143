//! Command dispatch and handlers.

pub mod create;
pub mod list;

use std::env;
use std::path::{Path, PathBuf};

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Config;
use crate::context::ServiceContext;

/// Directory to record per-port cassettes into.
const ENV_RECORD: &str = "ASANA_TASK_RECORD";
/// Cassette file or session directory to replay instead of calling Asana.
const ENV_REPLAY: &str = "ASANA_TASK_REPLAY";

/// Dispatch a parsed command to its handler.
///
/// When `ASANA_TASK_REPLAY` is set, ports are served from the given cassette.
/// When `ASANA_TASK_RECORD` is set to a directory path, all port interactions
/// are recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub async fn dispatch(command: &Command) -> Result<(), String> {
    let config = Config::from_env().map_err(|e| e.to_string())?;

    if let Ok(path) = env::var(ENV_REPLAY) {
        let ctx = ServiceContext::replaying(Path::new(&path))?;
        return dispatch_with_context(command, &ctx, &config).await;
    }

    if let Ok(path) = env::var(ENV_RECORD) {
        let (ctx, session) = ServiceContext::recording_at(PathBuf::from(path), &config)?;
        let result = dispatch_with_context(command, &ctx, &config).await;

        // Finish recording after command completes (even on error).
        // Drop context first to release Arc references.
        drop(ctx);
        finish_recording(session)?;
        return result;
    }

    let ctx = ServiceContext::live(&config)?;
    dispatch_with_context(command, &ctx, &config).await
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &Config,
) -> Result<(), String> {
    match command {
        Command::Create(args) => create::run(ctx, config, args).await,
        Command::Workspaces => list::workspaces(ctx).await,
        Command::Projects { workspace } => {
            list::projects(ctx, &require_workspace(workspace.as_deref(), config)?).await
        }
        Command::Users { workspace } => {
            list::users(ctx, &require_workspace(workspace.as_deref(), config)?).await
        }
        Command::Me => list::me(ctx).await,
        Command::Fields { project } => list::fields(ctx, project).await,
    }
}

fn require_workspace(flag: Option<&str>, config: &Config) -> Result<String, String> {
    flag.map(str::to_string)
        .or_else(|| config.default_workspace.clone())
        .ok_or_else(|| "A workspace is required (use --workspace or ASANA_WORKSPACE)".to_string())
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
