//! `asana-task create` command.

use tracing::debug;

use crate::cli::CreateArgs;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::task::{DraftTask, SubmitOptions, TaskSubmissionService};

/// Assignee shorthand for the token owner.
const ASSIGNEE_ME: &str = "me";

/// Execute the `create` command.
///
/// Prints the new task's gid and permalink on success.
///
/// # Errors
///
/// Returns an error string if the draft is incomplete or the task cannot
/// be created.
pub async fn run(ctx: &ServiceContext, config: &Config, args: &CreateArgs) -> Result<(), String> {
    let draft = build_draft(ctx, config, args).await?;
    let options = SubmitOptions { append_signature: args.append_signature(config.append_signature) };

    let task = TaskSubmissionService::new(ctx.asana.as_ref())
        .submit(&draft, options)
        .await
        .map_err(|e| format!("Failed to create task: {e}"))?;

    println!("Created task {}", task.gid);
    println!("{}", task.permalink_url);
    Ok(())
}

/// Builds and validates the draft described by the command-line arguments.
///
/// Required fields are checked before anything touches the network.
///
/// # Errors
///
/// Returns an error string if a required field is missing, the due date
/// is out of range, or `--assignee me` cannot be resolved.
pub async fn build_draft(
    ctx: &ServiceContext,
    config: &Config,
    args: &CreateArgs,
) -> Result<DraftTask, String> {
    let workspace = args
        .workspace
        .as_deref()
        .or(config.default_workspace.as_deref())
        .map(str::trim)
        .unwrap_or_default();

    let mut draft = DraftTask::new(workspace, args.name.trim());
    draft.validate()?;

    for project in args.projects.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        if !draft.project_ids.iter().any(|known| known == project) {
            draft.project_ids.push(project.to_string());
        }
    }
    draft.description = args.description.clone();
    draft.due_date = args.due.map(|due| due.resolve(ctx.clock.as_ref())).transpose()?;
    draft.custom_field_values = args
        .fields
        .iter()
        .map(|field| (field.field_id.clone(), field.value.clone()))
        .collect();

    draft.assignee_id = match args.assignee.as_deref() {
        Some(ASSIGNEE_ME) => {
            let me = ctx
                .asana
                .current_user()
                .await
                .map_err(|e| format!("Failed to look up the current user: {e}"))?;
            debug!(gid = %me.gid, "assigning to current user");
            Some(me.gid)
        }
        Some(gid) if !gid.trim().is_empty() => Some(gid.trim().to_string()),
        _ => None,
    };

    Ok(draft)
}
