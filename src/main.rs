use clap::Parser;
use log::debug;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use weather_knn::{ClassifierConfig, KnnError, SimpleLogger, default_data_dir, run};

static LOGGER: SimpleLogger = SimpleLogger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding ThoiTiet_dulieu.csv; output CSVs are written here too.
    /// Defaults to the directory containing this executable
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Seed for the train/test shuffle (random if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of records in the training set (optional)
    #[arg(long)]
    train_size: Option<usize>,

    /// Also write a JSON summary of the run to this path
    #[arg(long)]
    json_report: Option<PathBuf>,

    /// Log level for output
    #[arg(long, default_value = "false")]
    debug: bool,
}

fn main() -> Result<(), KnnError> {
    // Initialize timer and logger
    let total_start = Instant::now();
    log::set_logger(&LOGGER)?;

    // Acquire CLI args
    let args = Args::parse();
    if args.debug {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Info);
    }

    let defaults = ClassifierConfig::default();
    let config = ClassifierConfig {
        train_size: args.train_size.unwrap_or(defaults.train_size),
        seed: args.seed,
        ..defaults
    };
    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    // UI
    println!("Phân loại thời tiết bằng k-NN (k = {})", config.k);

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    run(
        &config,
        &data_dir,
        args.json_report.as_deref(),
        &mut input,
        &mut out,
    )?;

    debug!("Total runtime: {:.2?}", total_start.elapsed());
    Ok(())
}
