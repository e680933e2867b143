//! Replaying adapter for the Clock port.

use std::sync::Mutex;

use chrono::NaiveDate;

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded dates from a cassette.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    fn today(&self) -> NaiveDate {
        let output = next_output(&self.replayer, "clock", "today");
        serde_json::from_value(output).expect("clock::today: failed to deserialize NaiveDate")
    }
}
