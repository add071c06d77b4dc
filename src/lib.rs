//! promify-goss - goss results to Prometheus textfile metrics
//!
//! This library exposes the core data models and the result-to-metric
//! transformation for consumption outside the binary.

pub mod format;
pub mod models;
