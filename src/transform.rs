use crate::error::{KnnError, Result};
use crate::structs::{N_FEATURES, Record};
use csv::{ReaderBuilder, StringRecord};
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::Path;

/// Reads the labelled weather dataset from a CSV file.
///
/// The header row is skipped. The first five columns of every row are parsed as
/// numeric features (max temperature, min temperature, wind speed, cloud cover,
/// relative humidity) and the last column is taken as the weather condition label.
///
/// # Arguments
///
/// * `file_path` - Path to the dataset CSV file
///
/// # Returns
///
/// Returns a `Result<Vec<Record>>` with one record per data row, in file order.
///
/// # Errors
///
/// Returns `KnnError` if:
/// - File cannot be opened or read
/// - A row has fewer than six columns
/// - One of the five feature columns is not a number
pub fn read_dataset(file_path: &Path) -> Result<Vec<Record>> {
    debug!("Reading dataset: {}", file_path.display());
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(file_path)?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let raw = result?;
        // Row numbers are 1-based and count the header
        records.push(parse_record(&raw, row + 2)?);
    }

    debug!("Read {} records", records.len());
    Ok(records)
}

/// Parses one dataset row into a `Record`.
///
/// # Errors
///
/// Returns `KnnError::Data` if the row is too short or a feature is not numeric.
fn parse_record(raw: &StringRecord, row: usize) -> Result<Record> {
    if raw.len() < N_FEATURES + 1 {
        return Err(KnnError::Data(format!(
            "Row {} has {} columns, expected at least {}",
            row,
            raw.len(),
            N_FEATURES + 1
        )));
    }

    let mut features = [0.0; N_FEATURES];
    for (i, feature) in features.iter_mut().enumerate() {
        *feature = raw[i].trim().parse::<f64>().map_err(|_| {
            KnnError::Data(format!(
                "Row {} column {}: '{}' is not a number",
                row,
                i + 1,
                &raw[i]
            ))
        })?;
    }

    let label = raw[raw.len() - 1].to_string();
    Ok(Record { features, label })
}

/// Shuffles the dataset and splits it into training and test sets.
///
/// # Arguments
///
/// * `records` - Full dataset, consumed by the split
/// * `train_size` - Number of records that go into the training set
/// * `rng` - Random source used for the shuffle
///
/// # Returns
///
/// Returns `(train, test)`. The test set holds whatever remains after the first
/// `train_size` shuffled records; it is empty when the dataset is not larger
/// than `train_size`.
pub fn split_dataset<R: Rng + ?Sized>(
    mut records: Vec<Record>,
    train_size: usize,
    rng: &mut R,
) -> (Vec<Record>, Vec<Record>) {
    records.shuffle(rng);
    let test = records.split_off(train_size.min(records.len()));
    debug!(
        "Split dataset into {} training and {} test records",
        records.len(),
        test.len()
    );
    (records, test)
}
