//! User-entered task data prior to submission.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

/// A scalar custom-field value.
///
/// Serialized untagged: text and enum option gids go out as JSON strings,
/// numbers as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CustomFieldValue {
    /// Free text.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Gid of the chosen enum option.
    EnumOption(String),
}

impl CustomFieldValue {
    /// True for empty text or an empty enum selection. Numbers are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) | Self::EnumOption(s) => s.is_empty(),
            Self::Number(_) => false,
        }
    }
}

/// Task data as entered by the user, not yet sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftTask {
    /// Target workspace gid. Required.
    pub workspace_id: String,
    /// Projects to add the task to.
    pub project_ids: Vec<String>,
    /// Task name. Required.
    pub name: String,
    /// Plain-text description.
    pub description: Option<String>,
    /// Assignee gid.
    pub assignee_id: Option<String>,
    /// Due date in the user's calendar.
    pub due_date: Option<NaiveDate>,
    /// Custom field values keyed by bare custom field gid.
    pub custom_field_values: BTreeMap<String, CustomFieldValue>,
}

impl DraftTask {
    /// Creates a draft with only the required fields set.
    pub fn new(workspace_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { workspace_id: workspace_id.into(), name: name.into(), ..Self::default() }
    }

    /// Checks the fields that must be present before submission.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first missing field.
    pub fn validate(&self) -> Result<(), String> {
        if self.workspace_id.trim().is_empty() {
            return Err("A workspace is required (use --workspace or ASANA_WORKSPACE)".into());
        }
        if self.name.trim().is_empty() {
            return Err("The task name should not be empty".into());
        }
        Ok(())
    }
}

/// Kind suffix accepted in a `--field` assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Number,
    Enum,
}

/// One `GID[:kind]=VALUE` custom field assignment from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAssignment {
    /// Custom field gid.
    pub field_id: String,
    /// Typed value.
    pub value: CustomFieldValue,
}

impl FromStr for FieldAssignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, raw) = s
            .split_once('=')
            .ok_or_else(|| format!("expected GID[:text|number|enum]=VALUE, got {s:?}"))?;

        let (field_id, kind) = match key.split_once(':') {
            None => (key, FieldKind::Text),
            Some((id, "text")) => (id, FieldKind::Text),
            Some((id, "number")) => (id, FieldKind::Number),
            Some((id, "enum")) => (id, FieldKind::Enum),
            Some((_, other)) => {
                return Err(format!("unknown field kind {other:?} (expected text, number or enum)"))
            }
        };

        let field_id = field_id.trim();
        if field_id.is_empty() {
            return Err(format!("missing custom field gid in {s:?}"));
        }

        let value = match kind {
            FieldKind::Text => CustomFieldValue::Text(raw.to_string()),
            FieldKind::Enum => CustomFieldValue::EnumOption(raw.trim().to_string()),
            FieldKind::Number => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(CustomFieldValue::Number)
                .ok_or_else(|| format!("custom field {field_id} expects a number, got {raw:?}"))?,
        };

        Ok(Self { field_id: field_id.to_string(), value })
    }
}
