//! Input acquisition module
//!
//! Responsible for:
//! - Detecting whether goss results are piped on stdin
//! - Reading piped results to end-of-stream
//! - Fetching results over HTTP from a running `goss serve` endpoint

use std::io::{self, IsTerminal, Read};
use std::time::Duration;

use crate::constants::HTTP_TIMEOUT_SECS;
use crate::models::PromifyError;

/// Whether goss results are being piped on stdin (as opposed to an
/// interactive terminal, in which case results are fetched remotely)
pub fn is_piped() -> bool {
    !io::stdin().is_terminal()
}

/// Read piped goss results from stdin to end-of-stream
pub fn read_piped() -> Result<Vec<u8>, PromifyError> {
    let mut raw = Vec::new();
    io::stdin().lock().read_to_end(&mut raw)?;
    Ok(raw)
}

/// Fetch goss results from a remote endpoint.
///
/// Issues a GET with JSON content negotiation headers and a bounded
/// timeout so an unresponsive endpoint cannot hang the run. Transport
/// errors and non-2xx statuses both surface as [`PromifyError::Fetch`].
pub fn fetch_remote(uri: &str) -> Result<Vec<u8>, PromifyError> {
    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build();

    let response = agent
        .get(uri)
        .set("Content-Type", "application/json")
        .set("Accept", "application/json")
        .call()
        .map_err(|err| PromifyError::Fetch {
            uri: uri.to_string(),
            source: Box::new(err),
        })?;

    let mut raw = Vec::new();
    response.into_reader().read_to_end(&mut raw)?;
    Ok(raw)
}
