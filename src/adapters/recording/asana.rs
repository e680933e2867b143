//! Recording adapter for the `AsanaApi` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::asana::{
    ApiFuture, AsanaApi, CreatedTask, CustomFieldSetting, Project, User, Workspace,
};
use crate::task::TaskCreationRequest;

/// Records Asana interactions while delegating to an inner implementation.
pub struct RecordingAsanaApi {
    inner: Box<dyn AsanaApi>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingAsanaApi {
    /// Creates a new recording client wrapping the given implementation.
    pub fn new(inner: Box<dyn AsanaApi>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct WorkspaceInput<'a> {
    workspace: &'a str,
}

#[derive(Serialize)]
struct ProjectInput<'a> {
    project: &'a str,
}

impl AsanaApi for RecordingAsanaApi {
    fn create_task<'a>(&'a self, request: &'a TaskCreationRequest) -> ApiFuture<'a, CreatedTask> {
        Box::pin(async move {
            let result = self.inner.create_task(request).await;
            record_result(&self.recorder, "asana", "create_task", request, &result);
            result
        })
    }

    fn list_workspaces(&self) -> ApiFuture<'_, Vec<Workspace>> {
        Box::pin(async move {
            let result = self.inner.list_workspaces().await;
            record_result(&self.recorder, "asana", "list_workspaces", &(), &result);
            result
        })
    }

    fn list_projects<'a>(&'a self, workspace: &'a str) -> ApiFuture<'a, Vec<Project>> {
        Box::pin(async move {
            let result = self.inner.list_projects(workspace).await;
            let input = WorkspaceInput { workspace };
            record_result(&self.recorder, "asana", "list_projects", &input, &result);
            result
        })
    }

    fn list_users<'a>(&'a self, workspace: &'a str) -> ApiFuture<'a, Vec<User>> {
        Box::pin(async move {
            let result = self.inner.list_users(workspace).await;
            let input = WorkspaceInput { workspace };
            record_result(&self.recorder, "asana", "list_users", &input, &result);
            result
        })
    }

    fn current_user(&self) -> ApiFuture<'_, User> {
        Box::pin(async move {
            let result = self.inner.current_user().await;
            record_result(&self.recorder, "asana", "current_user", &(), &result);
            result
        })
    }

    fn list_custom_field_settings<'a>(
        &'a self,
        project: &'a str,
    ) -> ApiFuture<'a, Vec<CustomFieldSetting>> {
        Box::pin(async move {
            let result = self.inner.list_custom_field_settings(project).await;
            let input = ProjectInput { project };
            record_result(&self.recorder, "asana", "list_custom_field_settings", &input, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::ReplayingAsanaApi;
    use crate::cassette::config::CassetteConfig;
    use crate::error::ApiError;
    use crate::task::DraftTask;

    /// Inner client whose create call always fails.
    struct Unreachable;

    impl AsanaApi for Unreachable {
        fn create_task<'a>(
            &'a self,
            _request: &'a TaskCreationRequest,
        ) -> ApiFuture<'a, CreatedTask> {
            Box::pin(async { Err(ApiError::Network("connection refused".into())) })
        }

        fn list_workspaces(&self) -> ApiFuture<'_, Vec<Workspace>> {
            Box::pin(async {
                Ok(vec![Workspace { gid: "W1".into(), name: "Acme".into() }])
            })
        }

        fn list_projects<'a>(&'a self, _workspace: &'a str) -> ApiFuture<'a, Vec<Project>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn list_users<'a>(&'a self, _workspace: &'a str) -> ApiFuture<'a, Vec<User>> {
            Box::pin(async { Ok(Vec::new()) })
        }

        fn current_user(&self) -> ApiFuture<'_, User> {
            Box::pin(async { Err(ApiError::Network("connection refused".into())) })
        }

        fn list_custom_field_settings<'a>(
            &'a self,
            _project: &'a str,
        ) -> ApiFuture<'a, Vec<CustomFieldSetting>> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    #[tokio::test]
    async fn recorded_session_replays_identically() {
        let dir = std::env::temp_dir().join("asana_task_rec_asana_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("asana.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test", "abc")));
        let request = TaskCreationRequest::from_draft(&DraftTask::new("W1", "Ship report"), false);

        let (recorded_workspaces, recorded_create) = {
            let api = RecordingAsanaApi::new(Box::new(Unreachable), Arc::clone(&recorder));
            (api.list_workspaces().await, api.create_task(&request).await)
        };

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("create_task"));
        assert!(content.contains("Ship report"));

        let replay = ReplayingAsanaApi::new(CassetteConfig::load_port_cassette(&path).unwrap());
        assert_eq!(replay.list_workspaces().await, recorded_workspaces);
        assert_eq!(replay.create_task(&request).await, recorded_create);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
