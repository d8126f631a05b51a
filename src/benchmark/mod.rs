//! Batch self-test over a directory of annotated chart images.
//!
//! This module:
//! - Finds every `*.png` / `*.PNG` in a directory, with its `.txt` annotation
//! - Runs the extraction pipeline on each image
//! - Aggregates per-column and combined accuracy across annotated images
//! - Writes `benchmark.json`, `benchmark.csv` and `benchmark.png`

pub mod annotation;
pub mod csv_writer;
pub mod plot;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::ChartImage;
use crate::ocr::{Pipeline, Recognizer};
use crate::report::{GateLineResult, ImageAccuracy};

pub const JSON_FILE: &str = "benchmark.json";
pub const CSV_FILE: &str = "benchmark.csv";
pub const CHART_FILE: &str = "benchmark.png";

/// An image that could not be processed at all.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FailedImage {
    pub image: String,
    pub error: String,
}

/// Outcome of a benchmark run.
#[derive(Clone, Debug, Serialize)]
pub struct BenchmarkReport {
    /// Local time the report was built, `%Y-%m-%dT%H:%M:%S`.
    pub generated_at: String,
    pub images: usize,
    pub annotated: usize,
    /// Annotated images reproduced exactly.
    pub perfect: usize,
    /// Sum over annotated images; `None` when no image had an annotation.
    pub total: Option<ImageAccuracy>,
    pub results: Vec<GateLineResult>,
    pub failed: Vec<FailedImage>,
}

impl BenchmarkReport {
    pub fn from_results(results: Vec<GateLineResult>, failed: Vec<FailedImage>) -> Self {
        let scored: Vec<ImageAccuracy> =
            results.iter().filter_map(|r| r.accuracy().copied()).collect();
        let perfect = scored.iter().filter(|a| a.combined.is_perfect()).count();
        let total = scored.iter().copied().reduce(|a, b| a + b);

        Self {
            generated_at: Local::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            images: results.len() + failed.len(),
            annotated: scored.len(),
            perfect,
            total,
            results,
            failed,
        }
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// PNG files directly inside `dir`, sorted by file name.
pub fn find_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images: Vec<PathBuf> = fs::read_dir(dir)
        .context(format!("Failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_png(p))
        .collect();
    images.sort();
    Ok(images)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Processes one image, scoring it when an annotation file sits next to it.
pub fn process_image<R: Recognizer + ?Sized>(
    pipeline: &Pipeline<'_, R>,
    image_path: &Path,
) -> Result<GateLineResult> {
    let image_id = file_name(image_path);
    let image = ChartImage::load(image_path, pipeline.layout())?;

    let annotation_path = annotation::annotation_path(image_path);
    let truth = if annotation_path.exists() {
        Some(annotation::load_annotation(&annotation_path)?)
    } else {
        tracing::info!("{}: no annotation, skipping accuracy", image_id);
        None
    };
    let truth = truth.filter(|t| !t.is_empty());

    Ok(pipeline.extract(&image, &image_id, truth.as_ref()))
}

/// Runs the pipeline over every image in `dir`. A failing image is recorded
/// and the run continues.
pub fn run_benchmark<R: Recognizer + ?Sized>(
    pipeline: &Pipeline<'_, R>,
    dir: &Path,
) -> Result<BenchmarkReport> {
    let images = find_images(dir)?;
    tracing::info!("Found {} images in {}", images.len(), dir.display());

    let mut results = Vec::with_capacity(images.len());
    let mut failed = Vec::new();

    for path in &images {
        match process_image(pipeline, path) {
            Ok(result) => {
                if let Some(a) = result.accuracy() {
                    tracing::info!(
                        "{}: design {:.1}% ({}/{}), personality {:.1}% ({}/{}), total {:.1}% ({}/{})",
                        result.image(),
                        a.design.percent(),
                        a.design.matched,
                        a.design.total,
                        a.personality.percent(),
                        a.personality.matched,
                        a.personality.total,
                        a.combined.percent(),
                        a.combined.matched,
                        a.combined.total
                    );
                }
                results.push(result);
            }
            Err(e) => {
                tracing::warn!("{}: {:#}", path.display(), e);
                failed.push(FailedImage {
                    image: file_name(path),
                    error: format!("{:#}", e),
                });
            }
        }
    }

    Ok(BenchmarkReport::from_results(results, failed))
}

/// Writes the JSON, CSV and (optionally) chart outputs into `output_dir`.
pub fn write_outputs(report: &BenchmarkReport, output_dir: &Path, chart: bool) -> Result<()> {
    fs::create_dir_all(output_dir)
        .context(format!("Failed to create output directory: {}", output_dir.display()))?;

    let json =
        serde_json::to_string_pretty(report).context("Failed to serialize benchmark to JSON")?;
    let json_path = output_dir.join(JSON_FILE);
    fs::write(&json_path, json)
        .context(format!("Failed to write JSON file: {}", json_path.display()))?;

    csv_writer::write_csv(&output_dir.join(CSV_FILE), report)?;

    if chart {
        let chart_path = output_dir.join(CHART_FILE);
        if plot::generate_accuracy_chart(report, &chart_path)? {
            tracing::info!("Chart saved to {}", chart_path.display());
        }
    }

    tracing::info!("Benchmark results saved to {}", output_dir.display());
    Ok(())
}
