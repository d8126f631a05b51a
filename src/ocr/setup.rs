use anyhow::{Context, Result, anyhow};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use crate::config::EngineConfig;
use crate::paths;

const TESSDATA_REPO: &str = "https://github.com/tesseract-ocr/tessdata/raw/main";

#[cfg(windows)]
const EXECUTABLE_NAME: &str = "tesseract.exe";
#[cfg(not(windows))]
const EXECUTABLE_NAME: &str = "tesseract";

#[cfg(windows)]
const COMMON_INSTALL_DIRS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR",
    r"C:\Program Files (x86)\Tesseract-OCR",
];
#[cfg(not(windows))]
const COMMON_INSTALL_DIRS: &[&str] = &["/usr/local/bin", "/usr/bin", "/opt/homebrew/bin"];

#[cfg(windows)]
const COMMON_TESSDATA_DIRS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tessdata",
    r"C:\Program Files (x86)\Tesseract-OCR\tessdata",
];
#[cfg(not(windows))]
const COMMON_TESSDATA_DIRS: &[&str] = &[
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
];

/// Resolved engine locations.
pub struct TesseractPaths {
    pub executable: PathBuf,
    pub tessdata: PathBuf,
}

fn traineddata_file(language: &str) -> String {
    format!("{}.traineddata", language)
}

fn has_language(dir: &Path, language: &str) -> bool {
    dir.join(traineddata_file(language)).exists()
}

fn runs_version(executable: &Path) -> bool {
    Command::new(executable)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Finds the Tesseract executable: configured path, local data dir, `PATH`,
/// then common install locations.
pub fn find_tesseract_executable(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(anyhow!(
            "Configured tesseract executable not found: {}",
            path.display()
        ));
    }

    let local_exe = paths::get_tesseract_dir().join(EXECUTABLE_NAME);
    if local_exe.exists() {
        return Ok(local_exe);
    }

    let on_path = PathBuf::from(EXECUTABLE_NAME);
    if runs_version(&on_path) {
        return Ok(on_path);
    }

    for dir in COMMON_INSTALL_DIRS {
        let p = Path::new(dir).join(EXECUTABLE_NAME);
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "Tesseract not found. Install tesseract-ocr or set engine.executable in the config."
    ))
}

/// Finds a tessdata directory containing `<language>.traineddata`.
pub fn find_tessdata_dir(configured: Option<&Path>, language: &str) -> Result<PathBuf> {
    if let Some(dir) = configured {
        if has_language(dir, language) {
            return Ok(dir.to_path_buf());
        }
        return Err(anyhow!(
            "Configured tessdata directory {} has no {}",
            dir.display(),
            traineddata_file(language)
        ));
    }

    let local_tessdata = paths::get_tesseract_dir().join("tessdata");
    if has_language(&local_tessdata, language) {
        return Ok(local_tessdata);
    }

    // Check TESSDATA_PREFIX environment variable
    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let p = PathBuf::from(&prefix);
        if has_language(&p, language) {
            return Ok(p);
        }
        let p = p.join("tessdata");
        if has_language(&p, language) {
            return Ok(p);
        }
    }

    for dir in COMMON_TESSDATA_DIRS {
        let p = PathBuf::from(dir);
        if has_language(&p, language) {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "No tessdata directory with {} found. Run `bodygraph-ocr setup` to download it.",
        traineddata_file(language)
    ))
}

/// Ensures the engine is usable, downloading language data into the local
/// data dir when none is installed.
pub fn ensure_tesseract(config: &EngineConfig) -> Result<TesseractPaths> {
    let executable = find_tesseract_executable(config.executable.as_deref())?;
    tracing::info!("Tesseract found at: {}", executable.display());

    let tessdata = match find_tessdata_dir(config.tessdata.as_deref(), &config.language) {
        Ok(dir) => dir,
        Err(e) if config.tessdata.is_none() => {
            tracing::info!("{}", e);
            let dir = paths::get_tesseract_dir().join("tessdata");
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            download_tessdata(&dir, &config.language)?;
            dir
        }
        Err(e) => return Err(e),
    };

    tracing::info!("Tesseract ready with tessdata: {}", tessdata.display());
    Ok(TesseractPaths {
        executable,
        tessdata,
    })
}

/// Downloads `<language>.traineddata` from the upstream tessdata repository.
fn download_tessdata(tessdata_dir: &Path, language: &str) -> Result<()> {
    let file_name = traineddata_file(language);
    let url = format!("{}/{}", TESSDATA_REPO, file_name);
    let target = tessdata_dir.join(&file_name);

    tracing::info!("Downloading {}...", url);

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(300))
        .build()?;

    let response = client
        .get(&url)
        .header("User-Agent", "bodygraph-ocr")
        .send()?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to download {}: HTTP {}",
            file_name,
            response.status()
        ));
    }

    let bytes = response.bytes()?;
    let mut file = fs::File::create(&target)
        .with_context(|| format!("Failed to create {}", target.display()))?;
    file.write_all(&bytes)?;

    tracing::info!("Downloaded {} ({} bytes)", file_name, bytes.len());
    Ok(())
}
