// HighlightWizard - platform/fs.rs
//
// Filesystem access for event logs. Keeps std::fs out of the core layer.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// Open an event log for buffered line reading.
pub fn open_event_log(path: &Path) -> io::Result<BufReader<File>> {
    let file = File::open(path)?;
    tracing::debug!(path = %path.display(), "Opened event log");
    Ok(BufReader::new(file))
}

/// Create (or truncate) an output file for rendered listings.
pub fn create_output(path: &Path) -> io::Result<io::BufWriter<File>> {
    let file = File::create(path)?;
    Ok(io::BufWriter::new(file))
}
