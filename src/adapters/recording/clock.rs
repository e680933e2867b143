//! Recording adapter for the `Clock` port.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::Clock;

/// Records clock interactions while delegating to an inner implementation.
pub struct RecordingClock {
    inner: Box<dyn Clock>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingClock {
    /// Creates a new recording clock wrapping the given implementation.
    pub fn new(inner: Box<dyn Clock>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl Clock for RecordingClock {
    fn today(&self) -> NaiveDate {
        let result = self.inner.today();
        record_interaction(&self.recorder, "clock", "today", &(), &result);
        result
    }
}
