//! Replaying adapters that replay recorded interactions.

pub mod asana;
pub mod clock;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::ApiError;

pub use asana::ReplayingAsanaApi;
pub use clock::ReplayingClock;

/// Pull the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics if the cassette has no matching interaction left.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output.clone()
}

/// Decode a recorded `Result` using the Ok/Err JSON convention.
///
/// Mirror of `recording::record_result`: `{"Ok": v}` yields `Ok(v)`,
/// `{"Err": e}` yields the recorded [`ApiError`].
///
/// # Panics
///
/// Panics if the output matches neither shape.
pub(crate) fn replay_result<T: DeserializeOwned>(output: serde_json::Value) -> Result<T, ApiError> {
    if let Some(ok) = output.get("Ok") {
        return Ok(serde_json::from_value(ok.clone())
            .unwrap_or_else(|e| panic!("cassette Ok value has the wrong shape: {e}")));
    }
    if let Some(err) = output.get("Err") {
        return Err(serde_json::from_value(err.clone())
            .unwrap_or_else(|e| panic!("cassette Err value is not an ApiError: {e}")));
    }
    panic!("cassette output is neither {{\"Ok\": ..}} nor {{\"Err\": ..}}: {output}");
}

#[cfg(test)]
pub(crate) fn make_replayer(
    interactions: Vec<crate::cassette::format::Interaction>,
) -> CassetteReplayer {
    let mut cassette = crate::cassette::format::Cassette::new("test", "0.1.0");
    cassette.interactions = interactions;
    CassetteReplayer::new(&cassette)
}
