//! Wire-shape projection of a [`DraftTask`].

use std::collections::BTreeMap;

use serde::Serialize;

use super::draft::{CustomFieldValue, DraftTask};

/// Promotional line appended to the notes when the user opts in.
pub const SIGNATURE: &str =
    "Created with <a href=\"https://crates.io/crates/asana-task\">asana-task</a>";

/// Separator placed between the description and the signature.
const SIGNATURE_SEPARATOR: &str = "\n--\n";

/// Body of a `POST /tasks` call.
///
/// Optional fields are omitted from the JSON entirely when absent; they are
/// never sent as `null` or empty values. `custom_fields` is always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCreationRequest {
    /// Workspace gid.
    pub workspace: String,
    /// Task name.
    pub name: String,
    /// Non-empty custom field values keyed by custom field gid.
    pub custom_fields: BTreeMap<String, CustomFieldValue>,
    /// Project gids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<String>>,
    /// Rich-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_notes: Option<String>,
    /// Assignee gid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Due date as `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<String>,
}

impl TaskCreationRequest {
    /// Builds the request for `draft`.
    ///
    /// `html_notes` is only set when the draft has a description, even if
    /// the signature is requested.
    #[must_use]
    pub fn from_draft(draft: &DraftTask, append_signature: bool) -> Self {
        let description = draft.description.as_deref().unwrap_or_default();

        let custom_fields = draft
            .custom_field_values
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect();

        Self {
            workspace: draft.workspace_id.clone(),
            name: draft.name.clone(),
            custom_fields,
            projects: (!draft.project_ids.is_empty()).then(|| draft.project_ids.clone()),
            html_notes: (!description.is_empty())
                .then(|| compose_html_notes(description, append_signature)),
            assignee: draft.assignee_id.clone(),
            due_on: draft.due_date.map(|date| date.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Wraps the description, and optionally the signature, in a `<body>` envelope.
///
/// The description is escaped; Asana parses `html_notes` as XML and rejects
/// stray `<` or `&`.
#[must_use]
pub fn compose_html_notes(description: &str, append_signature: bool) -> String {
    let mut notes = escape_xml(description);
    if append_signature {
        if !description.is_empty() {
            notes.push_str(SIGNATURE_SEPARATOR);
        }
        notes.push_str(SIGNATURE);
    }
    format!("<body>{notes}</body>")
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
