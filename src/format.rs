//! Metric formatting module
//!
//! Transforms a decoded goss ResultSet into Prometheus text-exposition
//! lines for the node_exporter textfile collector:
//! - Per-resource-type normalization of free-text resource identifiers
//! - Label value escaping per the exposition format
//! - Per-outcome result and duration metrics, in input order
//! - Trailing summary block (tested/failed/duration)

use std::fmt::Write;

use log::warn;

use crate::models::{ResultSet, Summary};

/// Label set derived from one resource identifier.
///
/// Most resource types map to a single `resource` label; `Port` identifiers
/// of the form `"<name>: <port>"` additionally carry a `port` label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLabels {
    pub resource: String,
    pub port: Option<String>,
}

impl ResourceLabels {
    fn plain(resource: impl Into<String>) -> Self {
        ResourceLabels {
            resource: resource.into(),
            port: None,
        }
    }
}

/// Normalize a raw resource identifier according to its resource type.
///
/// Identifiers are free-text strings with type-specific embedded structure
/// (paths, command lines, URL-prefixed labels), so each type gets its own
/// lightweight string surgery rather than a dedicated structured parse.
/// Unrecognized types pass the identifier through verbatim.
pub fn normalize_resource(resource_type: &str, resource_id: &str) -> ResourceLabels {
    match resource_type {
        // "nginx -t | grep ok" -> "nginx": first pipe segment, first token,
        // leading dash stripped
        "Command" => {
            let segment = resource_id.split('|').next().unwrap_or_default();
            let token = segment.split_whitespace().next().unwrap_or_default();
            let token = token.strip_prefix('-').unwrap_or(token);
            ResourceLabels::plain(token.trim())
        }
        // "/usr/bin/sshd" -> "_usr_bin_sshd"
        "Process" => ResourceLabels::plain(resource_id.replace('/', "_")),
        // "backend: http://localhost:80" -> "backend"
        "HTTP" => match resource_id.split_once(": ") {
            Some((name, rest)) if rest.contains("://") => ResourceLabels::plain(name),
            _ => ResourceLabels::plain(resource_id),
        },
        // "sshd: 22" -> resource="sshd" plus a separate port="22" label
        "Port" => match resource_id.split_once(": ") {
            Some((name, rest)) => ResourceLabels {
                resource: name.to_string(),
                port: Some(rest.to_string()),
            },
            None => ResourceLabels::plain(resource_id),
        },
        // "Addr" and any other type: identifier verbatim
        _ => ResourceLabels::plain(resource_id),
    }
}

/// Escape a label value per the Prometheus text exposition format.
///
/// Backslash, double quote and newline must be escaped inside quoted label
/// values; raw identifiers (paths, command lines) may contain any of them.
fn escape_label_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a complete ResultSet as Prometheus exposition text.
///
/// Emits, for each outcome in input order:
///
/// ```text
/// goss_result_<type>{property="..",resource="..",skipped=".."} <result>
/// goss_result_<type>_duration{property="..",resource="..",skipped=".."} <duration>
/// ```
///
/// followed by the three `goss_results_summary` lines. `textfile_name` is
/// the caller-supplied run identifier used as the `textfile` label value.
/// An absent summary block is zero-filled so an empty run still produces
/// valid summary metrics. Performs no I/O.
pub fn format_prom(result_set: &ResultSet, textfile_name: &str) -> String {
    let mut out = String::new();

    for outcome in &result_set.results {
        let metric = outcome.resource_type.to_lowercase();
        let labels = normalize_resource(&outcome.resource_type, &outcome.resource_id);

        let mut label_pairs = format!(
            "property=\"{}\",resource=\"{}\"",
            escape_label_value(&outcome.property),
            escape_label_value(&labels.resource),
        );
        if let Some(port) = &labels.port {
            let _ = write!(label_pairs, ",port=\"{}\"", escape_label_value(port));
        }
        let _ = write!(label_pairs, ",skipped=\"{}\"", outcome.skipped);

        let _ = writeln!(out, "goss_result_{metric}{{{label_pairs}}} {}", outcome.result);
        let _ = writeln!(
            out,
            "goss_result_{metric}_duration{{{label_pairs}}} {}",
            outcome.duration
        );
    }

    let summary = match result_set.summary {
        Some(summary) => summary,
        None => {
            warn!("goss results carry no summary block, emitting zero counts");
            Summary::default()
        }
    };

    let textfile = escape_label_value(textfile_name);
    let _ = writeln!(
        out,
        "goss_results_summary{{textfile=\"{textfile}\",name=\"tested\"}} {}",
        summary.test_count
    );
    let _ = writeln!(
        out,
        "goss_results_summary{{textfile=\"{textfile}\",name=\"failed\"}} {}",
        summary.failed_count
    );
    let _ = writeln!(
        out,
        "goss_results_summary{{textfile=\"{textfile}\",name=\"duration\"}} {}",
        summary.total_duration
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResultSet, Summary, TestOutcome};

    fn sample_result_set() -> ResultSet {
        ResultSet {
            results: vec![TestOutcome {
                duration: 123,
                expected: vec!["true".to_string()],
                found: vec!["true".to_string()],
                property: "exists".to_string(),
                resource_id: "/test".to_string(),
                resource_type: "File".to_string(),
                result: 0,
                skipped: false,
                successful: true,
                test_type: 0,
            }],
            summary: Some(Summary {
                failed_count: 0,
                test_count: 1,
                total_duration: 123,
            }),
        }
    }

    #[test]
    fn addr_identifier_passes_through_verbatim() {
        let labels = normalize_resource("Addr", "tcp://localhost:22");
        assert_eq!(labels, ResourceLabels::plain("tcp://localhost:22"));
    }

    #[test]
    fn command_identifier_reduces_to_bare_command_name() {
        let labels = normalize_resource("Command", "nginx -t | grep ok");
        assert_eq!(labels, ResourceLabels::plain("nginx"));
    }

    #[test]
    fn command_identifier_without_pipe_or_flags() {
        let labels = normalize_resource("Command", "uptime");
        assert_eq!(labels, ResourceLabels::plain("uptime"));
    }

    #[test]
    fn command_leading_dash_is_stripped() {
        let labels = normalize_resource("Command", "-sh | head");
        assert_eq!(labels, ResourceLabels::plain("sh"));
    }

    #[test]
    fn process_path_is_flattened() {
        let labels = normalize_resource("Process", "/usr/bin/sshd");
        assert_eq!(labels, ResourceLabels::plain("_usr_bin_sshd"));
    }

    #[test]
    fn http_labelled_url_keeps_only_the_label() {
        let labels = normalize_resource("HTTP", "backend: http://localhost:80");
        assert_eq!(labels, ResourceLabels::plain("backend"));
    }

    #[test]
    fn http_bare_url_passes_through_verbatim() {
        let labels = normalize_resource("HTTP", "https://example.com/health");
        assert_eq!(labels, ResourceLabels::plain("https://example.com/health"));
    }

    #[test]
    fn port_identifier_splits_into_resource_and_port_labels() {
        let labels = normalize_resource("Port", "sshd: 22");
        assert_eq!(
            labels,
            ResourceLabels {
                resource: "sshd".to_string(),
                port: Some("22".to_string()),
            }
        );
    }

    #[test]
    fn port_identifier_without_separator_passes_through() {
        let labels = normalize_resource("Port", "tcp:22");
        assert_eq!(labels, ResourceLabels::plain("tcp:22"));
    }

    #[test]
    fn unknown_type_passes_through_verbatim() {
        let labels = normalize_resource("KernelParam", "net.ipv4.ip_forward");
        assert_eq!(labels, ResourceLabels::plain("net.ipv4.ip_forward"));
    }

    #[test]
    fn sample_result_set_renders_exact_lines() {
        let output = format_prom(&sample_result_set(), "test_output");
        assert_eq!(
            output,
            "goss_result_file{property=\"exists\",resource=\"/test\",skipped=\"false\"} 0\n\
             goss_result_file_duration{property=\"exists\",resource=\"/test\",skipped=\"false\"} 123\n\
             goss_results_summary{textfile=\"test_output\",name=\"tested\"} 1\n\
             goss_results_summary{textfile=\"test_output\",name=\"failed\"} 0\n\
             goss_results_summary{textfile=\"test_output\",name=\"duration\"} 123\n"
        );
    }

    #[test]
    fn port_outcome_emits_structured_port_label() {
        let result_set = ResultSet {
            results: vec![TestOutcome {
                duration: 55,
                property: "listening".to_string(),
                resource_id: "sshd: 22".to_string(),
                resource_type: "Port".to_string(),
                result: 0,
                ..Default::default()
            }],
            summary: Some(Summary {
                failed_count: 0,
                test_count: 1,
                total_duration: 55,
            }),
        };

        let output = format_prom(&result_set, "port_run");
        assert!(output.contains(
            "goss_result_port{property=\"listening\",resource=\"sshd\",port=\"22\",skipped=\"false\"} 0\n"
        ));
        assert!(output.contains(
            "goss_result_port_duration{property=\"listening\",resource=\"sshd\",port=\"22\",skipped=\"false\"} 55\n"
        ));
    }

    #[test]
    fn label_values_are_escaped() {
        let result_set = ResultSet {
            results: vec![TestOutcome {
                property: "matches \"ok\"".to_string(),
                resource_id: "C:\\Program Files\\app".to_string(),
                resource_type: "File".to_string(),
                ..Default::default()
            }],
            summary: Some(Summary::default()),
        };

        let output = format_prom(&result_set, "escaped");
        assert!(output.contains("property=\"matches \\\"ok\\\"\""));
        assert!(output.contains("resource=\"C:\\\\Program Files\\\\app\""));
    }

    #[test]
    fn missing_summary_is_zero_filled() {
        let result_set = ResultSet {
            results: Vec::new(),
            summary: None,
        };

        let output = format_prom(&result_set, "empty_run");
        assert_eq!(
            output,
            "goss_results_summary{textfile=\"empty_run\",name=\"tested\"} 0\n\
             goss_results_summary{textfile=\"empty_run\",name=\"failed\"} 0\n\
             goss_results_summary{textfile=\"empty_run\",name=\"duration\"} 0\n"
        );
    }

    #[test]
    fn empty_results_still_emit_summary_lines() {
        let result_set = ResultSet {
            results: Vec::new(),
            summary: Some(Summary {
                failed_count: 2,
                test_count: 10,
                total_duration: 4096,
            }),
        };

        let output = format_prom(&result_set, "run");
        assert_eq!(output.lines().count(), 3);
        assert!(output.contains("name=\"tested\"} 10"));
        assert!(output.contains("name=\"failed\"} 2"));
        assert!(output.contains("name=\"duration\"} 4096"));
    }

    #[test]
    fn skipped_outcome_renders_true_flag_and_preserves_order() {
        let result_set = ResultSet {
            results: vec![
                TestOutcome {
                    property: "exists".to_string(),
                    resource_id: "/second".to_string(),
                    resource_type: "File".to_string(),
                    skipped: true,
                    ..Default::default()
                },
                TestOutcome {
                    property: "exists".to_string(),
                    resource_id: "/first".to_string(),
                    resource_type: "File".to_string(),
                    ..Default::default()
                },
            ],
            summary: Some(Summary::default()),
        };

        let output = format_prom(&result_set, "order");
        let second = output.find("/second").unwrap();
        let first = output.find("/first").unwrap();
        // Input order wins, not lexical order
        assert!(second < first);
        assert!(output.contains("resource=\"/second\",skipped=\"true\"} 0"));
    }

    #[test]
    fn formatting_is_idempotent() {
        let result_set = sample_result_set();
        assert_eq!(
            format_prom(&result_set, "twice"),
            format_prom(&result_set, "twice")
        );
    }
}
