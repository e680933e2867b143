//! Clock port for obtaining the current calendar date.

use chrono::NaiveDate;

/// Provides today's date in the user's local calendar.
///
/// Relative due dates (`today`, `tomorrow`, `+3d`) resolve against this,
/// so tests and cassette playback can pin the date.
pub trait Clock: Send + Sync {
    /// Returns the current local calendar date.
    fn today(&self) -> NaiveDate;
}
