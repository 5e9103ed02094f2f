use crate::error::{KnnError, Result};
use crate::structs::{Evaluation, N_FEATURES, Prediction, Record};
use log::debug;

/// Euclidean distance between two feature vectors.
pub fn distance(a: &[f64; N_FEATURES], b: &[f64; N_FEATURES]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Finds the labels of the `k` training records closest to `point`.
///
/// Every training record is compared against the query (brute force). Labels are
/// returned in ascending order of distance; records at equal distance keep their
/// training set order. If the training set holds fewer than `k` records, all of
/// their labels are returned.
///
/// # Arguments
///
/// * `train` - Labelled training records
/// * `point` - Feature vector to classify
/// * `k` - Number of neighbors to return
pub fn k_nearest_neighbors<'a>(
    train: &'a [Record],
    point: &[f64; N_FEATURES],
    k: usize,
) -> Vec<&'a str> {
    let mut distances: Vec<(f64, &str)> = train
        .iter()
        .map(|record| (distance(&record.features, point), record.label.as_str()))
        .collect();

    // sort_by is stable, so ties stay in training order
    distances.sort_by(|a, b| a.0.total_cmp(&b.0));
    distances.truncate(k);

    distances.into_iter().map(|(_, label)| label).collect()
}

/// Returns the label that occurs most often.
///
/// Among equally frequent labels the one seen first wins. Returns `None` for an
/// empty slice.
pub fn most_common_label<'a>(labels: &[&'a str]) -> Option<&'a str> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for &label in labels {
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }

    let mut best: Option<(&'a str, usize)> = None;
    for (label, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

/// Predicts the weather condition for `point` by majority vote over its `k`
/// nearest training records.
///
/// # Errors
///
/// Returns `KnnError::Data` if the training set is empty or `k` is zero.
pub fn classify<'a>(train: &'a [Record], point: &[f64; N_FEATURES], k: usize) -> Result<&'a str> {
    let neighbors = k_nearest_neighbors(train, point, k);
    most_common_label(&neighbors)
        .ok_or_else(|| KnnError::Data("No neighbors available to classify with".to_string()))
}

/// Classifies every test record against the training set.
///
/// # Arguments
///
/// * `train` - Labelled training records
/// * `test` - Labelled records to predict, in output order
/// * `k` - Number of neighbors used per prediction
///
/// # Returns
///
/// Returns an `Evaluation` with one `Prediction` per test record and the number
/// of predictions that matched the record's own label.
///
/// # Errors
///
/// Returns `KnnError::Data` if a prediction cannot be made (empty training set
/// with a non-empty test set).
pub fn evaluate(train: &[Record], test: &[Record], k: usize) -> Result<Evaluation> {
    let mut evaluation = Evaluation::default();
    for record in test {
        let predicted = classify(train, &record.features, k)?;
        if predicted == record.label {
            evaluation.correct += 1;
        }
        evaluation.predictions.push(Prediction {
            actual: record.label.clone(),
            predicted: predicted.to_string(),
        });
    }

    debug!(
        "Evaluated {} test records, {} correct",
        evaluation.predictions.len(),
        evaluation.correct
    );
    Ok(evaluation)
}
