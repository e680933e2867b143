//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};

use crate::adapters::live::asana::LiveAsanaApi;
use crate::adapters::live::clock::LiveClock;
use crate::adapters::recording::{RecordingAsanaApi, RecordingClock};
use crate::adapters::replaying::{ReplayingAsanaApi, ReplayingClock};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::config::Config;
use crate::ports::asana::AsanaApi;
use crate::ports::clock::Clock;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Asana REST API.
    pub asana: Box<dyn AsanaApi>,
    /// Calendar for resolving relative due dates.
    pub clock: Box<dyn Clock>,
}

impl ServiceContext {
    /// Creates a live context talking to Asana with the configured token.
    ///
    /// # Errors
    ///
    /// Returns an error if no access token is configured.
    pub fn live(config: &Config) -> Result<Self, String> {
        Ok(Self { asana: Box::new(LiveAsanaApi::from_config(config)?), clock: Box::new(LiveClock) })
    }

    /// Creates a live context whose interactions are captured into
    /// per-port cassettes under `dir`.
    ///
    /// The returned session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the live client cannot be built or the
    /// cassette directory cannot be prepared.
    pub fn recording_at(
        dir: impl Into<PathBuf>,
        config: &Config,
    ) -> Result<(Self, RecordingSession), String> {
        let live = LiveAsanaApi::from_config(config)?;
        let session = RecordingSession::new(dir)?;

        let ctx = Self {
            asana: Box::new(RecordingAsanaApi::new(Box::new(live), session.asana.clone())),
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), session.clock.clone())),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a cassette file or a recording
    /// session directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette cannot be read or parsed, or no Asana
    /// cassette is found.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let config = if path.is_dir() {
            CassetteConfig::from_dir(path)
        } else {
            CassetteConfig::monolithic(path)
        };
        Self::replaying_from(&config)
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// The clock falls back to the live clock when it has no cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette cannot be read or parsed,
    /// or the Asana port has no cassette.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        let asana = replayers
            .asana
            .ok_or_else(|| "No Asana cassette configured for replay".to_string())?;

        Ok(Self {
            asana: Box::new(ReplayingAsanaApi::new(asana)),
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(LiveClock),
            },
        })
    }
}
