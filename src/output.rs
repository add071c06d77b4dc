//! Output writing module
//!
//! Responsible for:
//! - Writing the rendered exposition text as a .prom file
//! - Atomic replacement so a concurrent scrape never sees a truncated file

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::models::PromifyError;

/// Write `content` to `path` atomically.
///
/// The content is staged in a temporary file inside the destination
/// directory and renamed over the final path only once fully written, so
/// the textfile collector either sees the previous file or the complete
/// new one. Fails if the directory does not exist or is not writable.
pub fn write_prom_file(path: &Path, content: &str) -> Result<(), PromifyError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(content.as_bytes())?;
    staged.flush()?;
    staged.persist(path).map_err(|err| err.error)?;

    Ok(())
}
