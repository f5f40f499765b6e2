use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use env_logger::Builder;
use indicatif::MultiProgress;
use log::{error, info, LevelFilter};
use parking_lot::Mutex;
use rayon::prelude::*;

use tartil::{Logger, ReconstructionPipeline, Result, RunSummary, TartilConfig};

/// Configuration for a reconstruction job
struct JobConfig {
    /// Override for the source path from the config file
    source: Option<PathBuf>,
    /// Force parallel processing of a source directory
    parallel: bool,
    /// Skip sources whose verse index already exists
    skip_existing: bool,
    /// Path to configuration file
    config_file: Option<String>,
}

impl JobConfig {
    /// Parse command line arguments into configuration
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();

        let mut config = JobConfig {
            source: None,
            parallel: false,
            skip_existing: false,
            config_file: None,
        };

        let mut i = 1; // Skip program name
        while i < args.len() {
            match args[i].as_str() {
                "--source" => {
                    if i + 1 < args.len() {
                        config.source = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                },
                "--parallel" => {
                    config.parallel = true;
                },
                "--skip-existing" => {
                    config.skip_existing = true;
                },
                arg if arg.ends_with(".ini") => {
                    config.config_file = Some(arg.to_string());
                },
                _ => {
                    // Unrecognized argument, just ignore
                }
            }
            i += 1;
        }

        config
    }

    /// Print help information about command line options
    fn print_help() {
        println!("Tartil Verse Reconstruction - Command Line Options:");
        println!("  <path>.ini               Load configuration from this file");
        println!("  --source <path>          Source text file, or directory of files");
        println!("  --parallel               Process a source directory in parallel");
        println!("  --skip-existing          Skip sources with an existing verse index");
        println!();
        println!("Reads the configured page window from each source, strips print");
        println!("artifacts, and writes the cleaned text, the surah:verse index and");
        println!("a JSON run report to the configured output directories.");
    }
}

fn collect_sources(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        Ok(files)
    } else {
        Ok(vec![path.to_path_buf()])
    }
}

fn index_path_for(config: &TartilConfig, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "source".to_string());
    config.files.index_dir.join(format!("{}_verses.txt", stem))
}

fn report_summary(
    config: &TartilConfig,
    summary: &RunSummary,
    gap_log: &Arc<Mutex<Logger>>,
) -> Result<()> {
    // Human-readable gap report next to the outputs
    {
        let mut log = gap_log.lock();
        for key in &summary.missing {
            log.log(&format!("{}: missing verse {}", summary.source.display(), key))?;
        }
        log.flush()?;
    }

    // Machine-readable run report
    let stem = summary
        .source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "source".to_string());
    let report_path = config.files.report_dir.join(format!("{}_report.json", stem));
    let mut file = File::create(&report_path)?;
    file.write_all(serde_json::to_string_pretty(summary)?.as_bytes())?;

    println!(
        "{}: {} records, {} surah(s), {} missing, {} in-text numerals -> {}",
        summary.source.display(),
        summary.records,
        summary.surahs,
        summary.missing.len(),
        summary.intext_folds,
        summary.index_path.display()
    );
    Ok(())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments into config
    let job_config = JobConfig::from_args();

    // Print help if --help was specified
    if std::env::args().any(|arg| arg == "--help" || arg == "-h") {
        JobConfig::print_help();
        return Ok(());
    }

    // Load configuration using found path or default
    let mut config = if let Some(config_path) = &job_config.config_file {
        TartilConfig::from_ini(config_path)?
    } else if Path::new("default.ini").exists() {
        TartilConfig::from_ini("default.ini")?
    } else {
        let config = TartilConfig::default();
        config.validate()?;
        config
    };

    if let Some(source) = &job_config.source {
        config.files.source_path = source.clone();
    }

    // Set up logging with a timestamped file under logs/
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    fs::create_dir_all("logs")?;
    let log_file = File::create(format!("logs/reconstruct_{}.log", timestamp))?;

    let log_level = config.processor.get_log_level();
    Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, log_level)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    if log_level != LevelFilter::Off {
        info!("Starting verse reconstruction with log level: {:?}", log_level);
    }

    let sources = collect_sources(&config.files.source_path)?;
    if sources.is_empty() {
        println!("No source files found at {:?}", config.files.source_path);
        return Ok(());
    }
    info!("Found {} source file(s)", sources.len());

    // Shared gap report across all runs
    let gap_log = Arc::new(Mutex::new(Logger::with_file(
        config.files.report_dir.join(format!("gaps_{}.log", timestamp)),
    )?));

    let multi = MultiProgress::new();
    let pipeline = ReconstructionPipeline::new(config.clone());
    let start = Instant::now();

    let run_one = |source: &PathBuf| -> Option<()> {
        if job_config.skip_existing && index_path_for(&config, source).exists() {
            info!("Skipping {:?}: verse index already exists", source);
            return Some(());
        }
        match pipeline.run_file(source, Some(&multi)) {
            Ok(summary) => {
                if let Err(e) = report_summary(&config, &summary, &gap_log) {
                    error!("Failed to write report for {:?}: {}", source, e);
                }
                Some(())
            }
            Err(e) => {
                // A bad source aborts its own run only; the batch carries on
                error!("Failed to process {:?}: {}", source, e);
                eprintln!("Failed to process {}: {}", source.display(), e);
                None
            }
        }
    };

    let parallel = job_config.parallel || config.processor.is_parallel();
    let completed: usize = if parallel && sources.len() > 1 {
        info!("Processing {} files in parallel", sources.len());
        sources.par_iter().filter_map(run_one).count()
    } else {
        sources.iter().filter_map(run_one).count()
    };

    gap_log.lock().flush()?;
    info!(
        "Completed {}/{} run(s) in {:.1?}",
        completed,
        sources.len(),
        start.elapsed()
    );
    println!(
        "Done: {}/{} source(s) processed in {:.1?}",
        completed,
        sources.len(),
        start.elapsed()
    );

    Ok(())
}
