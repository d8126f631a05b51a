//! Ground-truth annotation files.
//!
//! One line per planet, for example:
//!
//! ```text
//! Sun - 42.5 (red) | 62.3 (black)
//! North Node - 10.4 (red) | 14.5 (black)
//! ```

use anyhow::{Context, Result, anyhow};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::{GateLine, Planet};
use crate::report::GroundTruth;

/// A `gate.line` value somewhere in a fragment.
const VALUE_PATTERN: &str = r"(\d+\.\d+)";

/// The annotation file for an image: same stem, `.txt` extension.
pub fn annotation_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("txt")
}

/// Loads an annotation file.
pub fn load_annotation(path: &Path) -> Result<GroundTruth> {
    let content = fs::read_to_string(path)
        .context(format!("Failed to read annotation file: {}", path.display()))?;
    parse_annotation(&content)
}

/// Parses annotation text. Malformed lines are skipped with a warning.
pub fn parse_annotation(content: &str) -> Result<GroundTruth> {
    let value_regex = Regex::new(VALUE_PATTERN)?;
    let mut truth = GroundTruth::default();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(&value_regex, line) {
            Ok((planet, design, personality)) => {
                truth.design.insert(planet, design);
                truth.personality.insert(planet, personality);
            }
            Err(e) => {
                tracing::warn!("Skipping annotation line {}: {}", line_num + 1, e);
            }
        }
    }

    Ok(truth)
}

fn parse_line(value_regex: &Regex, line: &str) -> Result<(Planet, GateLine, GateLine)> {
    let (name, values) = line
        .split_once(" - ")
        .ok_or_else(|| anyhow!("Expected '<Planet> - <red> | <black>', got {:?}", line))?;

    let planet =
        Planet::from_name(name.trim()).ok_or_else(|| anyhow!("Unknown planet {:?}", name.trim()))?;

    let (red, black) = values
        .split_once('|')
        .ok_or_else(|| anyhow!("Missing '|' separator in {:?}", line))?;

    let value = |part: &str, color: &str| -> Result<GateLine> {
        let text = value_regex
            .captures(part)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| anyhow!("No {} value in {:?}", color, part.trim()))?;
        GateLine::parse(text).ok_or_else(|| anyhow!("Invalid {} value {}", color, text))
    };

    Ok((planet, value(red, "red")?, value(black, "black")?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_annotation(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn gl(gate: u8, line: u8) -> GateLine {
        GateLine::new(gate, line).unwrap()
    }

    #[test]
    fn test_parse_valid_annotation() {
        let file = create_test_annotation(
            "Sun - 42.5 (red) | 62.3 (black)\n\
             Earth - 32.5 (red) | 61.3 (black)\n\
             North Node - 10.4 (red) | 14.5 (black)\n",
        );

        let truth = load_annotation(file.path()).unwrap();

        assert_eq!(truth.design.len(), 3);
        assert_eq!(truth.personality.len(), 3);
        assert_eq!(truth.design[&Planet::Sun], gl(42, 5));
        assert_eq!(truth.personality[&Planet::Earth], gl(61, 3));
        assert_eq!(truth.personality[&Planet::NorthNode], gl(14, 5));
    }

    #[test]
    fn test_skip_malformed_lines() {
        let truth = parse_annotation(
            "Sun - 42.5 (red) | 62.3 (black)\n\
             Moon - 50.4 (red)\n\
             Comet - 1.1 (red) | 2.2 (black)\n\
             Mars - 65.1 (red) | 2.2 (black)\n\
             just some notes\n\
             \n\
             Pluto - 44.5 (red) | 58.2 (black)\n",
        )
        .unwrap();

        let planets: Vec<Planet> = truth.design.keys().copied().collect();
        assert_eq!(planets, vec![Planet::Sun, Planet::Pluto]);
    }

    #[test]
    fn test_tolerates_spacing() {
        let truth = parse_annotation("  South Node -  8.5(red)|7.1 (black)  ").unwrap();
        assert_eq!(truth.design[&Planet::SouthNode], gl(8, 5));
        assert_eq!(truth.personality[&Planet::SouthNode], gl(7, 1));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_annotation(Path::new("/nonexistent/IMG_0000.txt")).is_err());
    }

    #[test]
    fn test_annotation_path() {
        assert_eq!(
            annotation_path(Path::new("charts/IMG_1989.PNG")),
            PathBuf::from("charts/IMG_1989.txt")
        );
    }
}
