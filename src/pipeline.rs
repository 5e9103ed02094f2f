use crate::clean::{clean_input, prompt_raw_input};
use crate::error::{KnnError, Result};
use crate::knn::{classify, evaluate};
use crate::load::{
    read_input_csv, write_input_csv, write_json, write_predictions_csv, write_test_input_csv,
};
use crate::structs::{
    ClassifierConfig, DATASET_FILE, Feature, INPUT_FILE, PREDICTIONS_FILE, RunSummary,
    TEST_INPUT_FILE, translate_label,
};
use crate::transform::{read_dataset, split_dataset};
use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Directory containing the running executable, where the dataset is looked
/// up when no data directory is given.
///
/// # Errors
///
/// Returns `KnnError` if the executable path cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| KnnError::Data(format!("No parent directory for {}", exe.display())))
}

/// Runs the full classification session.
///
/// Reads `ThoiTiet_dulieu.csv` from `data_dir`, splits and evaluates it,
/// asks the user for one observation through `input`/`out`, and writes
/// `ThoiTiet_daxuly.csv`, `ThoiTiet_input.csv` and `ThoiTiet_testInput.csv`
/// into `data_dir`. The user's observation is classified from the values as
/// re-read from `ThoiTiet_input.csv`.
///
/// # Arguments
///
/// * `config` - k, training set size and optional shuffle seed
/// * `data_dir` - Directory holding the dataset; outputs are written here
/// * `json_report` - Optional path for a JSON run summary
/// * `input` - Source of the user's answers
/// * `out` - Destination for prompts and progress messages
///
/// # Returns
///
/// Returns the `RunSummary` of the session.
///
/// # Errors
///
/// Returns `KnnError` if the dataset is missing or malformed, the input ends
/// early, or an output file cannot be written.
pub fn run<R: BufRead, W: Write>(
    config: &ClassifierConfig,
    data_dir: &Path,
    json_report: Option<&Path>,
    input: &mut R,
    out: &mut W,
) -> Result<RunSummary> {
    debug!(
        "Classifier configuration | k={}, TrainSize={}, Seed={:?}",
        config.k, config.train_size, config.seed
    );
    debug!("Data directory: {}", data_dir.display());

    // Load and split the dataset
    let load_start = Instant::now();
    let dataset_path = data_dir.join(DATASET_FILE);
    let records = read_dataset(&dataset_path)?;
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let (train, test) = split_dataset(records, config.train_size, &mut rng);
    writeln!(
        out,
        "Đã tải {} | {} bản ghi huấn luyện, {} bản ghi kiểm tra ({:.2?})",
        dataset_path.display(),
        train.len(),
        test.len(),
        load_start.elapsed()
    )?;

    // Predict the test set and record accuracy
    let eval_start = Instant::now();
    let evaluation = evaluate(&train, &test, config.k)?;
    let predictions_path = data_dir.join(PREDICTIONS_FILE);
    write_predictions_csv(&evaluation.predictions, &predictions_path)?;
    debug!("  - {}", predictions_path.display());
    writeln!(out, "Đánh giá mất {:.2?}", eval_start.elapsed())?;

    let accuracy = evaluation.accuracy();
    let accuracy_display = accuracy.map_or_else(|| "n/a".to_string(), |a| format!("{:?}", a));
    writeln!(out, "\n\nAccuracy (Test Set) = {}", accuracy_display)?;

    // Collect and clean the user's observation
    let raw = prompt_raw_input(input, out)?;
    let cleaned = clean_input(&raw, input, out)?;

    writeln!(out, "\nDữ liệu sau khi làm sạch hoàn chỉnh:")?;
    writeln!(out, "\n\nAccuracy (Test Set) = {}", accuracy_display)?;
    for (feature, value) in Feature::ALL.iter().zip(cleaned.features()) {
        writeln!(out, "{}: {:?}", feature.name(), value)?;
    }

    // Persist the cleaned input, then predict from what was written
    let input_path = data_dir.join(INPUT_FILE);
    write_input_csv(&cleaned, &input_path)?;
    let (stored, input_label) = read_input_csv(&input_path)?;
    let prediction = classify(&train, &stored.features(), config.k)?;
    let translated_prediction = translate_label(prediction);

    let test_input_path = data_dir.join(TEST_INPUT_FILE);
    write_test_input_csv(&input_label, prediction, &test_input_path)?;
    debug!("  - {}", input_path.display());
    debug!("  - {}", test_input_path.display());

    let summary = RunSummary {
        train_size: train.len(),
        test_size: test.len(),
        k: config.k,
        correct: evaluation.correct,
        accuracy,
        input: stored,
        prediction: prediction.to_string(),
        translated_prediction: translated_prediction.to_string(),
    };
    if let Some(report_path) = json_report {
        write_json(&summary, report_path)?;
        writeln!(out, "Đã ghi báo cáo JSON vào {}", report_path.display())?;
    }

    writeln!(out, "Predicted (Dự đoán): {}", translated_prediction)?;
    Ok(summary)
}
