//! Reference-data listing commands: `workspaces`, `projects`, `users`, `me`, `fields`.

use crate::context::ServiceContext;
use crate::ports::{CustomFieldSetting, User};

/// Execute the `workspaces` command.
///
/// # Errors
///
/// Returns an error string if the listing cannot be fetched.
pub async fn workspaces(ctx: &ServiceContext) -> Result<(), String> {
    let workspaces =
        ctx.asana.list_workspaces().await.map_err(|e| format!("Failed to list workspaces: {e}"))?;
    print_rows(workspaces.iter().map(|w| (w.gid.as_str(), w.name.clone())), "No workspaces found.");
    Ok(())
}

/// Execute the `projects` command.
///
/// # Errors
///
/// Returns an error string if the listing cannot be fetched.
pub async fn projects(ctx: &ServiceContext, workspace: &str) -> Result<(), String> {
    let projects = ctx
        .asana
        .list_projects(workspace)
        .await
        .map_err(|e| format!("Failed to list projects: {e}"))?;
    print_rows(projects.iter().map(|p| (p.gid.as_str(), p.name.clone())), "No projects found.");
    Ok(())
}

/// Execute the `users` command.
///
/// # Errors
///
/// Returns an error string if the listing cannot be fetched.
pub async fn users(ctx: &ServiceContext, workspace: &str) -> Result<(), String> {
    let users =
        ctx.asana.list_users(workspace).await.map_err(|e| format!("Failed to list users: {e}"))?;
    print_rows(users.iter().map(|u| (u.gid.as_str(), describe_user(u))), "No users found.");
    Ok(())
}

/// Execute the `me` command.
///
/// # Errors
///
/// Returns an error string if the user cannot be fetched.
pub async fn me(ctx: &ServiceContext) -> Result<(), String> {
    let user = ctx
        .asana
        .current_user()
        .await
        .map_err(|e| format!("Failed to look up the current user: {e}"))?;
    println!("{}\t{}", user.gid, describe_user(&user));
    Ok(())
}

/// Execute the `fields` command.
///
/// # Errors
///
/// Returns an error string if the listing cannot be fetched.
pub async fn fields(ctx: &ServiceContext, project: &str) -> Result<(), String> {
    let fields = ctx
        .asana
        .list_custom_field_settings(project)
        .await
        .map_err(|e| format!("Failed to list custom fields: {e}"))?;
    if fields.is_empty() {
        println!("No custom fields on this project.");
        return Ok(());
    }
    for field in &fields {
        println!("{}", describe_field(field));
    }
    Ok(())
}

fn print_rows<'a>(rows: impl Iterator<Item = (&'a str, String)>, empty: &str) {
    let mut any = false;
    for (gid, label) in rows {
        any = true;
        println!("{gid}\t{label}");
    }
    if !any {
        println!("{empty}");
    }
}

fn describe_user(user: &User) -> String {
    match &user.email {
        Some(email) => format!("{} <{email}>", user.name),
        None => user.name.clone(),
    }
}

/// One line per field, followed by its enabled enum options, formatted so
/// the gids can be pasted into `--field`.
fn describe_field(field: &CustomFieldSetting) -> String {
    let kind = match field.resource_subtype.as_str() {
        "number" => "number",
        "enum" => "enum",
        _ => "text",
    };
    let mut out = format!("{}:{kind}\t{} ({})", field.gid, field.name, field.resource_subtype);
    for option in field.enum_options.iter().filter(|o| o.enabled) {
        out.push_str(&format!("\n  {}\t{}", option.gid, option.name));
    }
    out
}
