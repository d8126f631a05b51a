//! Text rendering and JSON export of an extraction result.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::GateLineResult;
use super::gates::gate_info;
use crate::chart::{Column, PLANET_ORDER};

const PLANET_WIDTH: usize = 12;
const VALUE_WIDTH: usize = 13;

/// Renders the planet table: one row per planet, Design then Personality.
///
/// ```text
/// Planet       Design (red)  Personality (black)
/// Sun          42.5          62.3
/// ```
pub fn render_table(result: &GateLineResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<pw$} {:<vw$} {}",
        "Planet",
        format!("{} ({})", Column::Design, Column::Design.color()),
        format!("{} ({})", Column::Personality, Column::Personality.color()),
        pw = PLANET_WIDTH,
        vw = VALUE_WIDTH,
    );

    for planet in PLANET_ORDER {
        let _ = writeln!(
            out,
            "{:<pw$} {:<vw$} {}",
            planet.name(),
            result.value(Column::Design, planet).to_string(),
            result.value(Column::Personality, planet),
            pw = PLANET_WIDTH,
            vw = VALUE_WIDTH,
        );
    }

    out
}

fn join_gates(gates: &[u8]) -> String {
    if gates.is_empty() {
        return "-".to_string();
    }
    gates
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders gate activations, gate names, defined channels and centers,
/// followed by accuracy when the result was scored.
pub fn render_summary(result: &GateLineResult) -> String {
    let mut out = String::new();
    let summary = result.gate_summary();

    let _ = writeln!(out, "Conscious only:   {}", join_gates(&summary.conscious_only));
    let _ = writeln!(out, "Unconscious only: {}", join_gates(&summary.unconscious_only));
    let _ = writeln!(out, "Both:             {}", join_gates(&summary.both));

    let activations = result.activations();
    if !activations.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Gates:");
        for (gate, activation) in &activations {
            if let Some(info) = gate_info(*gate) {
                let _ = writeln!(
                    out,
                    "  {:>2} {:<28} {:<13} {}",
                    info.number,
                    info.name,
                    info.center.name(),
                    activation.label()
                );
            }
        }
    }

    let channels = result.defined_channels();
    let _ = writeln!(out);
    if channels.is_empty() {
        let _ = writeln!(out, "Defined channels: none");
    } else {
        let _ = writeln!(out, "Defined channels:");
        for channel in &channels {
            let _ = writeln!(out, "  {:<6} {}", channel.label(), channel.name);
        }
    }

    let centers = result.defined_centers();
    let names: Vec<&str> = centers.iter().map(|c| c.name()).collect();
    let _ = writeln!(
        out,
        "Defined centers: {}",
        if names.is_empty() { "none".to_string() } else { names.join(", ") }
    );

    let unresolved = result.unresolved();
    if !unresolved.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Unresolved ({}):", unresolved.len());
        for (column, planet) in unresolved {
            let _ = writeln!(out, "  {} {}", column, planet);
        }
    }

    if let Some(accuracy) = result.accuracy() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Accuracy: design {}/{} ({:.1}%), personality {}/{} ({:.1}%), total {}/{} ({:.1}%)",
            accuracy.design.matched,
            accuracy.design.total,
            accuracy.design.percent(),
            accuracy.personality.matched,
            accuracy.personality.total,
            accuracy.personality.percent(),
            accuracy.combined.matched,
            accuracy.combined.total,
            accuracy.combined.percent(),
        );
    }

    out
}

/// Writes the result as pretty-printed JSON.
pub fn export_json(result: &GateLineResult, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("Failed to serialize result to JSON")?;

    let mut file = File::create(output_path)
        .context(format!("Failed to create JSON file: {}", output_path.display()))?;

    file.write_all(json.as_bytes())
        .context("Failed to write JSON data")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{GateLine, Planet, ResolvedValue};
    use crate::report::assemble;
    use tempfile::tempdir;

    fn sample() -> GateLineResult {
        let r = |g, l| ResolvedValue::Resolved(GateLine::new(g, l).unwrap());
        assemble(
            "IMG_0001.PNG",
            &[
                (Column::Design, Planet::Sun, r(42, 5)),
                (Column::Design, Planet::Earth, r(32, 3)),
                (Column::Personality, Planet::Sun, r(62, 3)),
                (Column::Personality, Planet::Earth, r(54, 1)),
            ],
            None,
        )
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&sample());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 14);
        assert!(lines[0].starts_with("Planet"));
        assert!(lines[0].contains("Design (red)"));
        assert!(lines[0].contains("Personality (black)"));
        assert!(lines[1].starts_with("Sun"));
        assert!(lines[1].contains("42.5"));
        assert!(lines[1].ends_with("62.3"));
        assert!(lines[4].starts_with("North Node"));
        assert!(lines[4].contains("unresolved"));
        assert!(lines[13].starts_with("Pluto"));
    }

    #[test]
    fn test_render_summary() {
        let summary = render_summary(&sample());
        assert!(summary.contains("Conscious only:   54, 62"));
        assert!(summary.contains("Unconscious only: 32, 42"));
        assert!(summary.contains("32-54"));
        assert!(summary.contains("Transformation"));
        assert!(summary.contains("Defined centers: Spleen, Root"));
        assert!(summary.contains("Unresolved (22):"));
        assert!(!summary.contains("Accuracy"));
    }

    #[test]
    fn test_export_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result.json");

        export_json(&sample(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"image\": \"IMG_0001.PNG\""));
        assert!(content.contains("\"Sun\": \"42.5\""));
        assert!(content.contains("\"North Node\": \"unresolved\""));
        assert!(!content.contains("accuracy"));
    }
}
