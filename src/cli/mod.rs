//! CLI argument parsing and validation module
//!
//! Handles command-line interface using clap, including:
//! - Output directory and .prom file name options
//! - Remote goss endpoint option for non-piped invocations
//! - Required-argument validation with usage-shaped errors

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Arg, Command};

use crate::constants::DEFAULT_TEXTFILE_DIR;

/// Configuration for one conversion run, built once at startup and passed
/// through the pipeline (no global mutable state)
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the .prom file is written into
    pub textfile_dir: PathBuf,
    /// File name of the .prom output, also the `textfile` label value
    pub prom_name: String,
    /// goss endpoint to fetch results from when nothing is piped
    pub uri: Option<String>,
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<Config> {
    let matches = build_command().get_matches();
    config_from_matches(&matches)
}

fn build_command() -> Command {
    Command::new("promify-goss")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert goss test results into Prometheus textfile metrics")
        .long_about(
            "Converts goss server-validation results (piped as JSON on stdin, or \
             fetched from a goss endpoint) into a .prom file for the node_exporter \
             textfile collector.",
        )
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .value_name("DIR")
                .help("Directory to store the .prom file in")
                .default_value(DEFAULT_TEXTFILE_DIR),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("FILE")
                .help("Name of the .prom file, also used as the textfile label"),
        )
        .arg(
            Arg::new("uri")
                .short('u')
                .long("uri")
                .value_name("URL")
                .help("goss endpoint to fetch results from when stdin is not piped"),
        )
}

fn config_from_matches(matches: &clap::ArgMatches) -> Result<Config> {
    let prom_name = matches
        .get_one::<String>("name")
        .cloned()
        .unwrap_or_default();
    if prom_name.is_empty() {
        return Err(anyhow!(
            "expected a file name to write the .prom file as (use --name <FILE>)"
        ));
    }
    if prom_name.contains(['/', '\\']) {
        return Err(anyhow!(
            "--name must be a bare file name, not a path: {prom_name}"
        ));
    }

    // default_value guarantees presence
    let textfile_dir = matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEXTFILE_DIR));

    Ok(Config {
        textfile_dir,
        prom_name,
        uri: matches.get_one::<String>("uri").cloned(),
    })
}
