//! CSV report generation
//!
//! Reports carry a fixed six-column schema with every field quoted, one
//! file per run, named after the run mode and the local time of writing.

use crate::output::record::ImageRecord;
use crate::output::OutputResult;
use chrono::{DateTime, Local};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Report header, in column order
pub const REPORT_HEADERS: [&str; 6] = [
    "Article ID",
    "Title",
    "Page URL",
    "Broken Image URL",
    "HTTP Status Code",
    "Storage Location",
];

/// Builds `<prefix>_<YYYYMMDD_HHMMSS>.csv`
pub fn report_file_name(prefix: &str, timestamp: &DateTime<Local>) -> String {
    format!("{}_{}.csv", prefix, timestamp.format("%Y%m%d_%H%M%S"))
}

/// Writes the header and one row per record to any writer
pub fn write_records<W: Write>(writer: W, records: &[ImageRecord]) -> OutputResult<()> {
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(REPORT_HEADERS)?;
    for record in records {
        csv_writer.write_record(record.to_row())?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Writes a timestamped report into `output_dir`
///
/// The directory is created (recursively) if missing. The header row is
/// written even when there are no records.
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the report file
/// * `Err(OutputError)` - The directory or file could not be written
pub fn write_report(records: &[ImageRecord], output_dir: &Path, prefix: &str) -> OutputResult<PathBuf> {
    let output_path = output_dir.join(report_file_name(prefix, &Local::now()));
    std::fs::create_dir_all(output_dir)?;

    let file = std::fs::File::create(&output_path)?;
    write_records(file, records)?;

    Ok(output_path)
}

/// Writes a report, logging instead of failing
///
/// A failed write never aborts the run; the caller only learns there is no
/// file.
pub fn save_report(records: &[ImageRecord], output_dir: &Path, prefix: &str) -> Option<PathBuf> {
    match write_report(records, output_dir, prefix) {
        Ok(path) => {
            tracing::info!("Data saved to {}.", path.display());
            Some(path)
        }
        Err(e) => {
            tracing::error!("Failed to save CSV file. Error: {}", e);
            None
        }
    }
}
