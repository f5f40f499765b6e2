use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use env_logger::Builder;
use log::{info, warn, LevelFilter};

use tartil::index::VerseIndex;

/// Configuration for a vocabulary linking job
struct JobConfig {
    /// Verse index produced by reconstruct_verses
    index: Option<PathBuf>,
    /// Vocabulary table to fill (CSV)
    vocab: Option<PathBuf>,
    /// Column holding the surah:verse reference
    ref_column: String,
    /// Column to fill with the verse text
    target_column: String,
    /// Where to write the filled table; defaults to the input path
    output: Option<PathBuf>,
}

impl JobConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();

        let mut config = JobConfig {
            index: None,
            vocab: None,
            ref_column: "Ayahref".to_string(),
            target_column: "Meaning & Translation in Italian".to_string(),
            output: None,
        };

        let mut i = 1; // Skip program name
        while i < args.len() {
            match args[i].as_str() {
                "--index" => {
                    if i + 1 < args.len() {
                        config.index = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                },
                "--vocab" => {
                    if i + 1 < args.len() {
                        config.vocab = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                },
                "--ref-column" => {
                    if i + 1 < args.len() {
                        config.ref_column = args[i + 1].clone();
                        i += 1;
                    }
                },
                "--target-column" => {
                    if i + 1 < args.len() {
                        config.target_column = args[i + 1].clone();
                        i += 1;
                    }
                },
                "--output" => {
                    if i + 1 < args.len() {
                        config.output = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                },
                _ => {
                    // Unrecognized argument, just ignore
                }
            }
            i += 1;
        }

        config
    }

    fn print_help() {
        println!("Tartil Vocabulary Linker - Command Line Options:");
        println!("  --index <path>           Verse index file (surah:verse records)");
        println!("  --vocab <path>           Vocabulary CSV to fill");
        println!("  --ref-column <name>      Reference column header (default: Ayahref)");
        println!("  --target-column <name>   Column to fill (default: Meaning & Translation in Italian)");
        println!("  --output <path>          Output CSV (default: overwrite input)");
        println!();
        println!("Fills the target column of each row whose reference resolves in the");
        println!("verse index. References are normalized, so \" 2 : 102 \" matches 2:102.");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let job = JobConfig::from_args();

    if std::env::args().any(|arg| arg == "--help" || arg == "-h") {
        JobConfig::print_help();
        return Ok(());
    }

    let (index_path, vocab_path) = match (&job.index, &job.vocab) {
        (Some(index), Some(vocab)) => (index.clone(), vocab.clone()),
        _ => {
            eprintln!("Both --index and --vocab are required.");
            JobConfig::print_help();
            return Err("missing required arguments".into());
        }
    };

    // Set up logging with a timestamped file under logs/
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    fs::create_dir_all("logs")?;
    let log_file = File::create(format!("logs/link_vocab_{}.log", timestamp))?;
    Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    // 1. Build the lookup map from the verse index
    let index = VerseIndex::load(&index_path)?;
    println!("Loaded {} verses from {}", index.len(), index_path.display());

    // 2. Read the vocabulary table
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(&vocab_path)?;
    let headers = reader.headers()?.clone();

    let ref_idx = headers
        .iter()
        .position(|h| h.trim() == job.ref_column)
        .ok_or_else(|| format!("Column '{}' not found in {}", job.ref_column, vocab_path.display()))?;

    let mut out_headers: Vec<String> = headers.iter().map(str::to_string).collect();
    let target_idx = match headers.iter().position(|h| h.trim() == job.target_column) {
        Some(idx) => idx,
        None => {
            info!("Column '{}' not found, creating it", job.target_column);
            out_headers.push(job.target_column.clone());
            out_headers.len() - 1
        }
    };

    // 3. Fill rows whose reference resolves
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut updates = 0usize;
    let mut unresolved = 0usize;

    for record in reader.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.len() < out_headers.len() {
            row.resize(out_headers.len(), String::new());
        }

        let raw_ref = row.get(ref_idx).cloned().unwrap_or_default();
        if raw_ref.trim().is_empty() {
            rows.push(row);
            continue;
        }

        match index.lookup(&raw_ref) {
            Some(text) => {
                row[target_idx] = text.to_string();
                updates += 1;
            }
            None => {
                // Leave the row untouched; a stray reference is not an error
                warn!("Reference '{}' not found in verse index", raw_ref.trim());
                unresolved += 1;
            }
        }
        rows.push(row);
    }

    // 4. Write the table back
    let output_path = job.output.clone().unwrap_or_else(|| vocab_path.clone());
    let mut writer = csv::Writer::from_path(&output_path)?;
    writer.write_record(&out_headers)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    info!("Filled {} rows ({} unresolved) into {:?}", updates, unresolved, output_path);
    println!(
        "Done: filled {} row(s), {} unresolved, saved to {}",
        updates,
        unresolved,
        output_path.display()
    );

    Ok(())
}
