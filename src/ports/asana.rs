//! Asana API port: task creation plus the reference data a draft is built from.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::task::TaskCreationRequest;

/// Boxed future type alias used by [`AsanaApi`] to keep the trait dyn-compatible.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// A task as returned by Asana after creation.
///
/// Only `gid` and `permalink_url` are interpreted; everything else the
/// service sends is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedTask {
    /// Global identifier of the new task.
    pub gid: String,
    /// Stable URL for viewing the task.
    pub permalink_url: String,
    /// Remaining fields, passed through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Top-level organizational container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Workspace gid.
    pub gid: String,
    /// Display name.
    pub name: String,
}

/// A project inside a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project gid.
    pub gid: String,
    /// Display name.
    pub name: String,
}

/// A workspace member who can be assigned tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User gid.
    pub gid: String,
    /// Display name.
    pub name: String,
    /// Email, when the token is allowed to see it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// One selectable option of an enum custom field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    /// Option gid, the value sent when the option is chosen.
    pub gid: String,
    /// Display name.
    pub name: String,
    /// Disabled options cannot be chosen.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

/// A custom field attached to a project, flattened from Asana's
/// `custom_field_settings` records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldSetting {
    /// Custom field gid; the key used in `custom_fields`.
    pub gid: String,
    /// Display name.
    pub name: String,
    /// `text`, `number`, `enum`, ...
    pub resource_subtype: String,
    /// Options for enum fields, empty otherwise.
    #[serde(default)]
    pub enum_options: Vec<EnumOption>,
}

/// Talks to the Asana REST API.
///
/// Abstracting the API allows deterministic replay and testing without a
/// network connection or access token.
pub trait AsanaApi: Send + Sync {
    /// Creates a task. Called at most once per submission and never retried.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, an error response, or an
    /// unreadable success body.
    fn create_task<'a>(&'a self, request: &'a TaskCreationRequest) -> ApiFuture<'a, CreatedTask>;

    /// Lists the workspaces visible to the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched.
    fn list_workspaces(&self) -> ApiFuture<'_, Vec<Workspace>>;

    /// Lists unarchived projects in a workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched.
    fn list_projects<'a>(&'a self, workspace: &'a str) -> ApiFuture<'a, Vec<Project>>;

    /// Lists users in a workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched.
    fn list_users<'a>(&'a self, workspace: &'a str) -> ApiFuture<'a, Vec<User>>;

    /// Returns the user that owns the access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be fetched.
    fn current_user(&self) -> ApiFuture<'_, User>;

    /// Lists the custom fields configured on a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched.
    fn list_custom_field_settings<'a>(
        &'a self,
        project: &'a str,
    ) -> ApiFuture<'a, Vec<CustomFieldSetting>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn created_task_keeps_unknown_fields() {
        let task: CreatedTask = serde_json::from_value(json!({
            "gid": "1209",
            "permalink_url": "https://app.asana.com/0/0/1209",
            "name": "Ship report",
            "resource_type": "task"
        }))
        .unwrap();

        assert_eq!(task.gid, "1209");
        assert_eq!(task.extra.get("name"), Some(&json!("Ship report")));
        assert_eq!(serde_json::to_value(&task).unwrap()["resource_type"], "task");
    }

    #[test]
    fn created_task_requires_permalink() {
        let result = serde_json::from_value::<CreatedTask>(json!({"gid": "1"}));
        assert!(result.is_err());
    }

    #[test]
    fn enum_option_defaults_to_enabled() {
        let option: EnumOption = serde_json::from_value(json!({"gid": "7", "name": "High"})).unwrap();
        assert!(option.enabled);
    }
}
