//! Extractor configuration loaded from `bodygraph-ocr.json`.
//!
//! Every field has a default, so a partial file only overrides what it names.
//! A missing or unreadable file falls back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::calibration::ChartLayout;

/// Recognition engine settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tesseract executable. Searched for when unset.
    pub executable: Option<PathBuf>,
    /// Directory holding `<language>.traineddata`. Searched for when unset.
    pub tessdata: Option<PathBuf>,
    pub language: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            executable: None,
            tessdata: None,
            language: "eng".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Calibrated column geometry.
    pub layout: ChartLayout,
    pub engine: EngineConfig,
    /// Resolve the 26 segments of an image on the rayon thread pool.
    pub parallel: bool,
}

impl ExtractorConfig {
    /// Load config from file, or return defaults if it can't be used.
    pub fn load(config_path: &Path) -> Self {
        tracing::debug!("Looking for config at: {}", config_path.display());

        if !config_path.exists() {
            tracing::info!(
                "{} not found. Using default config.",
                config_path.display()
            );
            return Self::default();
        }

        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Config loaded from {}", config_path.display());
                    return config;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse {}: {}. Using defaults.",
                        config_path.display(),
                        e
                    );
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read {}: {}. Using defaults.",
                    config_path.display(),
                    e
                );
            }
        }

        Self::default()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{Rect, Size};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = ExtractorConfig::load(&dir.path().join("nope.json"));
        assert_eq!(config, ExtractorConfig::default());
        assert_eq!(config.engine.language, "eng");
        assert_eq!(config.layout.design, Rect::new(1156, 76, 107, 870));
        assert!(!config.parallel);
    }

    #[test]
    fn test_partial_file_overrides_named_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bodygraph-ocr.json");
        std::fs::write(
            &path,
            r#"{"parallel": true, "layout": {"canvas": {"width": 1500, "height": 1000}}}"#,
        )
        .unwrap();

        let config = ExtractorConfig::load(&path);
        assert!(config.parallel);
        assert_eq!(config.layout.canvas, Some(Size { width: 1500, height: 1000 }));
        assert_eq!(config.layout.personality, Rect::new(1311, 76, 107, 870));
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bodygraph-ocr.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert_eq!(ExtractorConfig::load(&path), ExtractorConfig::default());
    }

    #[test]
    fn test_shown_config_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bodygraph-ocr.json");
        let mut config = ExtractorConfig::default();
        config.engine.tessdata = Some(PathBuf::from("/opt/tessdata"));
        std::fs::write(&path, config.to_json().unwrap()).unwrap();

        assert_eq!(ExtractorConfig::load(&path), config);
    }
}
