use std::path::PathBuf;
use std::sync::OnceLock;

static EXE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the directory containing the executable.
pub fn get_exe_dir() -> &'static PathBuf {
    EXE_DIR.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Returns the per-user data directory: `<local data>/bodygraph-ocr/`.
/// Falls back to the executable directory when the platform has none.
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("bodygraph-ocr"))
        .unwrap_or_else(|| get_exe_dir().clone())
}

/// Returns the logs directory: `<data_dir>/logs/`
pub fn get_logs_dir() -> PathBuf {
    get_data_dir().join("logs")
}

/// Returns the local tesseract directory: `<data_dir>/tesseract/`
pub fn get_tesseract_dir() -> PathBuf {
    get_data_dir().join("tesseract")
}

/// Returns the default config file: `<exe_dir>/bodygraph-ocr.json`
pub fn default_config_path() -> PathBuf {
    get_exe_dir().join("bodygraph-ocr.json")
}

/// Ensures all output directories exist. Call at startup.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(get_logs_dir())?;
    std::fs::create_dir_all(get_tesseract_dir())?;
    Ok(())
}
