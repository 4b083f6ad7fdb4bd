//! Run statistics
//!
//! Summarizes the records of a run for the console once the report is
//! written.

use crate::output::record::ImageRecord;
use std::collections::HashMap;

/// Run statistics summary
#[derive(Debug, Clone, Default)]
pub struct ReportStatistics {
    /// Number of pages whose images were checked
    pub pages_checked: usize,

    /// Number of pages with at least one broken image
    pub pages_with_broken_images: usize,

    /// Total number of broken images
    pub total_broken: usize,

    /// Broken images by failure category
    pub by_reason: HashMap<String, usize>,

    /// Broken images by storage label
    pub by_storage: HashMap<String, usize>,
}

impl ReportStatistics {
    /// Computes statistics from the records of a run
    pub fn from_records(records: &[ImageRecord], pages_checked: usize) -> Self {
        let mut by_reason = HashMap::new();
        let mut by_storage = HashMap::new();
        let mut pages = std::collections::HashSet::new();

        for record in records {
            *by_reason.entry(record.failure_reason.category()).or_insert(0) += 1;
            *by_storage
                .entry(record.storage_location.clone())
                .or_insert(0) += 1;
            pages.insert(record.page_url.as_str());
        }

        Self {
            pages_checked,
            pages_with_broken_images: pages.len(),
            total_broken: records.len(),
            by_reason,
            by_storage,
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ReportStatistics) {
    println!("=== Broken Image Statistics ===\n");

    println!("Overview:");
    println!("  Pages checked: {}", stats.pages_checked);
    println!(
        "  Pages with broken images: {}",
        stats.pages_with_broken_images
    );
    println!("  Broken images: {}", stats.total_broken);
    println!();

    if !stats.by_reason.is_empty() {
        println!("By Failure Reason:");
        for (reason, count) in sorted_counts(&stats.by_reason) {
            println!("  {}: {}", reason, count);
        }
        println!();
    }

    if !stats.by_storage.is_empty() {
        println!("By Storage Location:");
        for (label, count) in sorted_counts(&stats.by_storage) {
            let percentage = (*count as f64 / stats.total_broken as f64) * 100.0;
            println!("  {}: {} ({:.1}%)", label, count, percentage);
        }
        println!();
    }
}

/// Sorts by count descending, then name
fn sorted_counts(counts: &HashMap<String, usize>) -> Vec<(&String, &usize)> {
    let mut sorted: Vec<_> = counts.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    sorted
}
