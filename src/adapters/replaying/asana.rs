//! Replaying adapter for the `AsanaApi` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::asana::{
    ApiFuture, AsanaApi, CreatedTask, CustomFieldSetting, Project, User, Workspace,
};
use crate::task::TaskCreationRequest;

/// Serves recorded Asana responses from a cassette.
pub struct ReplayingAsanaApi {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingAsanaApi {
    /// Creates a replaying Asana client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl AsanaApi for ReplayingAsanaApi {
    fn create_task<'a>(&'a self, _request: &'a TaskCreationRequest) -> ApiFuture<'a, CreatedTask> {
        let output = next_output(&self.replayer, "asana", "create_task");
        Box::pin(async move { replay_result(output) })
    }

    fn list_workspaces(&self) -> ApiFuture<'_, Vec<Workspace>> {
        let output = next_output(&self.replayer, "asana", "list_workspaces");
        Box::pin(async move { replay_result(output) })
    }

    fn list_projects<'a>(&'a self, _workspace: &'a str) -> ApiFuture<'a, Vec<Project>> {
        let output = next_output(&self.replayer, "asana", "list_projects");
        Box::pin(async move { replay_result(output) })
    }

    fn list_users<'a>(&'a self, _workspace: &'a str) -> ApiFuture<'a, Vec<User>> {
        let output = next_output(&self.replayer, "asana", "list_users");
        Box::pin(async move { replay_result(output) })
    }

    fn current_user(&self) -> ApiFuture<'_, User> {
        let output = next_output(&self.replayer, "asana", "current_user");
        Box::pin(async move { replay_result(output) })
    }

    fn list_custom_field_settings<'a>(
        &'a self,
        _project: &'a str,
    ) -> ApiFuture<'a, Vec<CustomFieldSetting>> {
        let output = next_output(&self.replayer, "asana", "list_custom_field_settings");
        Box::pin(async move { replay_result(output) })
    }
}
