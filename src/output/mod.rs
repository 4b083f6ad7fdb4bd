//! Output module for broken image reports
//!
//! This module handles:
//! - The broken image record produced for every failed check
//! - Writing records to timestamped CSV reports
//! - Summarizing a run's findings

mod csv_report;
mod record;
pub mod stats;

pub use csv_report::{report_file_name, save_report, write_records, write_report, REPORT_HEADERS};
pub use record::{FailureReason, ImageRecord};
pub use stats::{print_statistics, ReportStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
