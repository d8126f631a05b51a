use anyhow::{Result, anyhow};
use image::DynamicImage;
use std::path::PathBuf;
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::{find_tessdata_dir, find_tesseract_executable};
use crate::config::EngineConfig;

/// Characters a `gate.line` reading can contain.
pub const DIGIT_WHITELIST: &str = "0123456789.";

/// Recognition configuration: page-segmentation assumption plus optional
/// character whitelist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Profile {
    SingleLineDigits,
    SingleLine,
    SingleWordDigits,
    SingleWord,
}

impl Profile {
    /// Every profile, in the order they are run for each variant.
    pub const ALL: [Profile; 4] = [
        Profile::SingleLineDigits,
        Profile::SingleLine,
        Profile::SingleWordDigits,
        Profile::SingleWord,
    ];

    /// Wins ties in the resolver's vote. Unconstrained single-line reads
    /// match the chart font best.
    pub const PREFERRED: Profile = Profile::SingleLine;

    /// Tesseract page segmentation mode.
    pub fn psm(self) -> u8 {
        match self {
            Profile::SingleLineDigits | Profile::SingleLine => 7,
            Profile::SingleWordDigits | Profile::SingleWord => 8,
        }
    }

    pub fn whitelist(self) -> Option<&'static str> {
        match self {
            Profile::SingleLineDigits | Profile::SingleWordDigits => Some(DIGIT_WHITELIST),
            Profile::SingleLine | Profile::SingleWord => None,
        }
    }
}

/// Turns one preprocessed region into raw text.
///
/// Implementations must be deterministic for identical input and safe to call
/// from several threads at once.
pub trait Recognizer: Sync {
    fn recognize(&self, region: &DynamicImage, profile: Profile) -> Result<String>;
}

/// Runs the external `tesseract` executable, one process per call.
#[derive(Clone, Debug)]
pub struct TesseractRecognizer {
    executable: PathBuf,
    tessdata: PathBuf,
    language: String,
}

impl TesseractRecognizer {
    /// Locates the executable and language data. Fails if either is missing,
    /// so a broken installation is reported before any image is read.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let executable = find_tesseract_executable(config.executable.as_deref())?;
        let tessdata = find_tessdata_dir(config.tessdata.as_deref(), &config.language)?;

        tracing::debug!(
            "Using tesseract {} with tessdata {}",
            executable.display(),
            tessdata.display()
        );

        Ok(Self {
            executable,
            tessdata,
            language: config.language.clone(),
        })
    }
}

impl Recognizer for TesseractRecognizer {
    fn recognize(&self, region: &DynamicImage, profile: Profile) -> Result<String> {
        // Save image to temporary file
        let temp_input = NamedTempFile::with_suffix(".png")?;
        region.save(temp_input.path())?;

        let mut command = Command::new(&self.executable);
        command
            .arg(temp_input.path())
            .arg("stdout")
            .arg("--tessdata-dir")
            .arg(&self.tessdata)
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(profile.psm().to_string());

        if let Some(whitelist) = profile.whitelist() {
            command
                .arg("-c")
                .arg(format!("tessedit_char_whitelist={}", whitelist));
        }

        let output = command.output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("Tesseract failed ({:?}): {}", profile, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
