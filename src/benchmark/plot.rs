//! Bar chart of per-image accuracy using plotters.

use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;

use super::BenchmarkReport;

const CHART_WIDTH: u32 = 900;
const CHART_HEIGHT: u32 = 500;
const BAR_COLOR: RGBColor = RGBColor(243, 156, 18);
const BAR_OUTLINE: RGBColor = RGBColor(230, 126, 34);
const PERFECT_COLOR: RGBColor = RGBColor(39, 174, 96);
const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);

/// `(image, combined accuracy %, perfect)` for every annotated image, in report order.
fn bars(report: &BenchmarkReport) -> Vec<(String, f64, bool)> {
    report
        .results
        .iter()
        .filter_map(|r| {
            let accuracy = r.accuracy()?;
            Some((
                r.image().to_string(),
                accuracy.combined.percent(),
                accuracy.combined.is_perfect(),
            ))
        })
        .collect()
}

/// Draws combined accuracy per annotated image. Images without an
/// annotation are left out; with none at all no file is written.
pub fn generate_accuracy_chart(report: &BenchmarkReport, output_path: &Path) -> Result<bool> {
    let bars = bars(report);
    if bars.is_empty() {
        return Ok(false);
    }

    let root = BitMapBackend::new(output_path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .context("Failed to fill chart background")?;

    let title = match report.total.as_ref() {
        Some(total) => format!(
            "Extraction accuracy ({}/{} = {:.1}%)",
            total.combined.matched,
            total.combined.total,
            total.combined.percent()
        ),
        None => "Extraction accuracy".to_string(),
    };

    let count = bars.len();
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(0usize..count, 0.0f64..105.0f64)
        .context("Failed to build accuracy chart")?;

    let labels: Vec<String> = bars.iter().map(|(name, _, _)| name.clone()).collect();
    chart
        .configure_mesh()
        .x_labels(count)
        .x_label_formatter(&|i| labels.get(*i).cloned().unwrap_or_default())
        .x_desc("Image")
        .y_desc("Accuracy (%)")
        .light_line_style(GRID_COLOR)
        .bold_line_style(GRID_COLOR.mix(0.8))
        .draw()
        .context("Failed to draw mesh")?;

    for (i, (_, percent, perfect)) in bars.iter().enumerate() {
        let fill = if *perfect { PERFECT_COLOR } else { BAR_COLOR };
        chart.draw_series(std::iter::once(Rectangle::new(
            [(i, 0.0), (i + 1, *percent)],
            fill.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(i, 0.0), (i + 1, *percent)],
            BAR_OUTLINE.stroke_width(1),
        )))?;
    }

    root.present().context("Failed to save chart")?;
    Ok(true)
}
