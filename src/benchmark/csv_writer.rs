//! CSV summary of a benchmark run: one row per image.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::BenchmarkReport;
use crate::report::GateLineResult;

/// Accuracy columns are empty for images without an annotation.
const CSV_HEADER: &str = "image,design_matched,design_total,personality_matched,personality_total,matched,total,accuracy,unresolved";

fn format_row(result: &GateLineResult) -> String {
    let unresolved = result.unresolved().len();
    match result.accuracy() {
        Some(a) => format!(
            "{},{},{},{},{},{},{},{:.2},{}",
            result.image(),
            a.design.matched,
            a.design.total,
            a.personality.matched,
            a.personality.total,
            a.combined.matched,
            a.combined.total,
            a.combined.percent(),
            unresolved,
        ),
        None => format!("{},,,,,,,,{}", result.image(), unresolved),
    }
}

/// Writes the header and one row per processed image, replacing any
/// existing file.
pub fn write_csv(path: &Path, report: &BenchmarkReport) -> Result<()> {
    let mut file = File::create(path)
        .context(format!("Failed to create CSV file: {}", path.display()))?;

    writeln!(file, "{}", CSV_HEADER).context("Failed to write CSV header")?;
    for result in &report.results {
        writeln!(file, "{}", format_row(result)).context("Failed to write CSV row")?;
    }

    Ok(())
}
