// HighlightWizard - core/export.rs
//
// Text listings plus CSV and JSON export of event records.
// Core layer: writes to any Write trait object.

use crate::core::model::EventRecord;
use crate::util::constants;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Output format for rendered records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Csv,
    Json,
}

/// Which listing a text render is for; picks the header and empty message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    AllEvents,
    Highlights,
}

impl Listing {
    fn header(self) -> &'static str {
        match self {
            Listing::AllEvents => constants::ALL_EVENTS_HEADER,
            Listing::Highlights => constants::HIGHLIGHTS_HEADER,
        }
    }

    fn empty_message(self) -> &'static str {
        match self {
            Listing::AllEvents => constants::NO_EVENTS_MESSAGE,
            Listing::Highlights => constants::NO_HIGHLIGHTS_MESSAGE,
        }
    }
}

/// Write a human-readable listing, one `[<minute>'] <CATEGORY>: <text>` per line.
///
/// An empty listing prints a single explanatory line instead of the frame.
pub fn write_text<W: Write>(
    records: &[EventRecord],
    listing: Listing,
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let io_err = |e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    };

    if records.is_empty() {
        writeln!(writer, "{}", listing.empty_message()).map_err(io_err)?;
        return Ok(0);
    }

    writeln!(writer, "{}", listing.header()).map_err(io_err)?;
    for record in records {
        writeln!(writer, "{record}").map_err(io_err)?;
    }
    writeln!(writer, "{}", constants::LISTING_FOOTER).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(records.len())
}

/// Export records to CSV format.
///
/// Writes: timestamp_minutes, category, description, line
pub fn export_csv<W: Write>(
    records: &[EventRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["timestamp_minutes", "category", "description", "line"])
        .map_err(csv_err)?;

    for record in records {
        csv_writer
            .write_record([
                record.timestamp_minutes.to_string().as_str(),
                record.category.label(),
                record.description.as_str(),
                record.line_number.to_string().as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(records.len())
}

/// Export records to JSON format (array of objects).
pub fn export_json<W: Write>(
    records: &[EventRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

/// Render `records` in `format`.
pub fn export<W: Write>(
    records: &[EventRecord],
    format: ExportFormat,
    listing: Listing,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::Text => write_text(records, listing, writer, export_path),
        ExportFormat::Csv => export_csv(records, writer, export_path),
        ExportFormat::Json => export_json(records, writer, export_path),
    }
}
