//! Data models module
//!
//! Defines core data structures:
//! - TestOutcome: One evaluated goss assertion against a system resource
//! - Summary: Aggregated counts for an entire test run
//! - ResultSet: Complete decoded goss results payload
//! - PromifyError: Typed failure taxonomy for the pipeline

use serde::Deserialize;

/// Represents a single evaluated assertion from a goss test run.
///
/// The wire format uses kebab-case keys and omits zero-valued fields, so
/// every field defaults. `resource_type` and `resource_id` are always
/// present in practice for emitted outcomes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TestOutcome {
    /// Time taken to evaluate the assertion, in nanoseconds
    pub duration: i64,
    /// Values the assertion expected
    pub expected: Vec<String>,
    /// Values the assertion found
    pub found: Vec<String>,
    /// Property that was checked (e.g. "exists", "listening")
    pub property: String,
    /// Raw resource identifier; format depends on `resource_type`
    pub resource_id: String,
    /// Resource type tag ("Addr", "Command", "Process", "HTTP", "Port", ...)
    pub resource_type: String,
    /// Result code, 0 for success
    pub result: i64,
    /// Whether the assertion was skipped
    pub skipped: bool,
    /// Whether the assertion passed (informational, not emitted)
    pub successful: bool,
    /// goss-internal test type discriminant
    pub test_type: i64,
}

/// Aggregate statistics for the whole test run
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Summary {
    /// Number of failed assertions
    pub failed_count: i64,
    /// Total number of assertions evaluated
    pub test_count: i64,
    /// Total run duration in nanoseconds
    pub total_duration: i64,
}

/// Top-level decoded goss results payload.
///
/// Constructed once per invocation and read-only thereafter. Output order
/// follows `results` order exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResultSet {
    /// Per-resource test outcomes, in run order
    pub results: Vec<TestOutcome>,
    /// Aggregate summary; goss omits it in some failure modes
    pub summary: Option<Summary>,
}

/// Custom error types for the conversion pipeline
#[derive(Debug, thiserror::Error)]
pub enum PromifyError {
    #[error("failed to decode goss results JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to fetch goss results from {uri}: {source}")]
    Fetch {
        uri: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("failed to read or write goss results: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode raw JSON bytes into a [`ResultSet`].
///
/// Unknown fields are ignored and missing optional fields default; anything
/// that is not valid JSON of the expected shape is a [`PromifyError::Decode`],
/// never a partial ResultSet.
pub fn decode(raw: &[u8]) -> Result<ResultSet, PromifyError> {
    Ok(serde_json::from_slice(raw)?)
}
