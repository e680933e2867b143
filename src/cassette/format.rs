//! On-disk cassette layout.
//!
//! A cassette is a YAML document holding every port call made during one
//! recording, in call order. Outputs follow the `{"Ok": ..}` / `{"Err": ..}`
//! convention used by the recording adapters.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded port call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the cassette, starting at zero.
    pub seq: u64,
    /// Port that was called: `asana` or `clock`.
    pub port: String,
    /// Port method, e.g. `create_task`.
    pub method: String,
    /// Arguments, as JSON.
    pub input: serde_json::Value,
    /// Result, as JSON.
    pub output: serde_json::Value,
}

/// A named, versioned list of interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Session name, usually `<timestamp>-<port>`.
    pub name: String,
    /// Time the recording was written.
    pub recorded_at: DateTime<Utc>,
    /// Version of `asana-task` that recorded the cassette.
    pub version: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Starts an empty cassette stamped with the current time.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            recorded_at: Utc::now(),
            version: version.into(),
            interactions: Vec::new(),
        }
    }

    /// Appends a call, numbering it after the ones already present.
    pub fn push(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Reads a cassette from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a message naming the file if it cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }

    /// Writes the cassette as YAML, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let yaml = serde_yaml::to_string(self).map_err(std::io::Error::other)?;
        std::fs::write(path, yaml)
    }
}
