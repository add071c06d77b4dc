//! Global constants for promify-goss
//!
//! Centralized location for application-wide constants

/// Default node_exporter textfile collector directory for the .prom output
pub const DEFAULT_TEXTFILE_DIR: &str = "/var/lib/node_exporter/textfile_collector";

/// Timeout for fetching results from a goss endpoint, in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 30;
