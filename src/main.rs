#![forbid(unsafe_code)]

mod cli;
mod constants;
mod format;
mod input;
mod models;
mod output;

use anyhow::{bail, Result};
use log::{debug, info};

fn main() -> Result<()> {
    env_logger::init();

    let config = cli::parse_args()?;

    let raw = if input::is_piped() {
        debug!("reading goss results from stdin");
        input::read_piped()?
    } else {
        let uri = match &config.uri {
            Some(uri) => uri,
            None => bail!(
                "expected goss results on stdin or an endpoint to fetch them from \
                 (use --uri <URL>)"
            ),
        };
        debug!("fetching goss results from {uri}");
        input::fetch_remote(uri)?
    };
    debug!("read {} bytes of goss results", raw.len());

    let result_set = models::decode(&raw)?;
    let rendered = format::format_prom(&result_set, &config.prom_name);

    let path = config.textfile_dir.join(&config.prom_name);
    output::write_prom_file(&path, &rendered)?;
    info!(
        "wrote {} metric lines to {}",
        rendered.lines().count(),
        path.display()
    );

    Ok(())
}
