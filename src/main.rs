//! Bodygraph OCR
//!
//! Reads the 13 planetary `gate.line` values of both columns (Design/red and
//! Personality/black) from a rendered Human Design chart image.

mod benchmark;
mod calibration;
mod chart;
mod config;
mod error;
mod logging;
mod ocr;
mod paths;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use chart::ChartImage;
use config::ExtractorConfig;
use ocr::{Pipeline, TesseractRecognizer};
use report::render;

#[derive(Parser)]
#[command(name = "bodygraph-ocr")]
#[command(about = "Extract planetary gate.line values from a bodygraph chart image")]
#[command(version)]
struct Cli {
    /// Config file (default: bodygraph-ocr.json next to the executable)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract gate.line values from one chart image
    Extract {
        image: PathBuf,
        /// Ground-truth annotation to score against
        #[arg(long)]
        annotation: Option<PathBuf>,
        /// Write the result as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Identifier keying the correction table (default: the file name)
        #[arg(long)]
        image_id: Option<String>,
    },
    /// Run every annotated image in a directory and report accuracy
    Benchmark {
        dir: PathBuf,
        /// Output directory (default: <DIR>/results)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip the accuracy chart
        #[arg(long)]
        no_chart: bool,
    },
    /// Locate Tesseract and download language data if missing
    Setup,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as JSON
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&cli.log_level);

    // Route panics through the log file as well as stderr
    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!("[PANIC] {}", panic_info);
    }));

    if let Err(e) = paths::ensure_directories() {
        tracing::warn!("Failed to create data directories: {}", e);
    }

    let config_path = cli.config.unwrap_or_else(paths::default_config_path);
    let config = ExtractorConfig::load(&config_path);

    match cli.command {
        Commands::Extract {
            image,
            annotation,
            json,
            image_id,
        } => run_extract(&config, &image, annotation.as_deref(), json.as_deref(), image_id),
        Commands::Benchmark {
            dir,
            output,
            no_chart,
        } => run_benchmark(&config, &dir, output, !no_chart),
        Commands::Setup => {
            let found = ocr::ensure_tesseract(&config.engine)?;
            println!("tesseract: {}", found.executable.display());
            println!("tessdata:  {}", found.tessdata.display());
            Ok(())
        }
        Commands::Config {
            action: ConfigAction::Show,
        } => {
            println!("{}", config.to_json()?);
            Ok(())
        }
    }
}

fn run_extract(
    config: &ExtractorConfig,
    image_path: &Path,
    annotation: Option<&Path>,
    json: Option<&Path>,
    image_id: Option<String>,
) -> Result<()> {
    let recognizer = TesseractRecognizer::new(&config.engine)?;

    let image = ChartImage::load(image_path, &config.layout)?;
    let image_id = image_id.unwrap_or_else(|| {
        image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    let truth = annotation
        .map(benchmark::annotation::load_annotation)
        .transpose()?;

    tracing::info!("Extracting {} ({})", image_path.display(), image.size());

    let result = Pipeline::new(&config.layout, &recognizer)
        .parallel(config.parallel)
        .extract(&image, &image_id, truth.as_ref());

    print!("{}", render::render_table(&result));
    println!();
    print!("{}", render::render_summary(&result));

    if let Some(path) = json {
        render::export_json(&result, path)?;
        tracing::info!("Result saved to {}", path.display());
    }

    Ok(())
}

fn run_benchmark(
    config: &ExtractorConfig,
    dir: &Path,
    output: Option<PathBuf>,
    chart: bool,
) -> Result<()> {
    let recognizer = TesseractRecognizer::new(&config.engine)?;
    let pipeline = Pipeline::new(&config.layout, &recognizer).parallel(config.parallel);

    let report = benchmark::run_benchmark(&pipeline, dir)
        .context(format!("Benchmark over {} failed", dir.display()))?;

    let output = output.unwrap_or_else(|| dir.join("results"));
    benchmark::write_outputs(&report, &output, chart)?;

    println!("Images processed: {}", report.images);
    println!("Annotated:        {}", report.annotated);
    println!("Perfect:          {}", report.perfect);
    if !report.failed.is_empty() {
        println!("Failed:           {}", report.failed.len());
    }
    if let Some(total) = report.total {
        println!(
            "Design:      {:.1}% ({}/{})",
            total.design.percent(),
            total.design.matched,
            total.design.total
        );
        println!(
            "Personality: {:.1}% ({}/{})",
            total.personality.percent(),
            total.personality.matched,
            total.personality.total
        );
        println!(
            "Total:       {:.1}% ({}/{})",
            total.combined.percent(),
            total.combined.matched,
            total.combined.total
        );
    }

    Ok(())
}
