//! Turns a draft into exactly one create-task call.

use tracing::{debug, info, warn};

use super::draft::DraftTask;
use super::request::TaskCreationRequest;
use crate::error::SubmissionError;
use crate::ports::{AsanaApi, CreatedTask};

/// Per-call submission options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Append the signature line to the task notes.
    pub append_signature: bool,
}

/// Submits drafts through an [`AsanaApi`].
///
/// Holds no state between calls. Required fields are the caller's
/// responsibility (see [`DraftTask::validate`]); they are not rechecked here.
pub struct TaskSubmissionService<'a> {
    api: &'a dyn AsanaApi,
}

impl<'a> TaskSubmissionService<'a> {
    /// Creates a service backed by `api`.
    #[must_use]
    pub fn new(api: &'a dyn AsanaApi) -> Self {
        Self { api }
    }

    /// Builds the request for `draft` and sends it once.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::Network`] on transport failure,
    /// [`SubmissionError::Rejected`] when Asana refuses the task, and
    /// [`SubmissionError::Malformed`] when the response cannot be read.
    pub async fn submit(
        &self,
        draft: &DraftTask,
        options: SubmitOptions,
    ) -> Result<CreatedTask, SubmissionError> {
        let request = TaskCreationRequest::from_draft(draft, options.append_signature);
        debug!(
            workspace = %request.workspace,
            projects = request.projects.as_ref().map_or(0, Vec::len),
            custom_fields = request.custom_fields.len(),
            has_notes = request.html_notes.is_some(),
            "creating task"
        );

        match self.api.create_task(&request).await {
            Ok(task) => {
                info!(gid = %task.gid, url = %task.permalink_url, "task created");
                Ok(task)
            }
            Err(err) => {
                warn!(error = %err, "task creation failed");
                Err(err.into())
            }
        }
    }
}
