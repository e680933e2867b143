//! Task drafts and their submission to Asana.

pub mod draft;
pub mod request;
pub mod submit;

pub use draft::{CustomFieldValue, DraftTask, FieldAssignment};
pub use request::{compose_html_notes, TaskCreationRequest, SIGNATURE};
pub use submit::{SubmitOptions, TaskSubmissionService};
