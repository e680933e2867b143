//! Accumulates port calls and writes them out as a cassette.

use std::path::PathBuf;

use chrono::Utc;

use super::format::Cassette;

/// A cassette being filled in, bound to the file it will be written to.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Starts an empty recording destined for `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self { path: path.into(), cassette: Cassette::new(name, version) }
    }

    /// Records one port call.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        self.cassette.push(port, method, input, output);
    }

    /// Stamps the recording time and writes the cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(mut self) -> Result<PathBuf, std::io::Error> {
        self.cassette.recorded_at = Utc::now();
        self.cassette.save(&self.path)?;
        Ok(self.path)
    }
}
