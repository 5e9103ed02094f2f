use crate::error::{KnnError, Result};
use crate::structs::{CleanedInput, N_FEATURES, Prediction, RunSummary, translate_label};
use csv::{Reader, Writer};
use std::{fs::File, path::Path};

/// Writes test set predictions to a CSV file with translated labels.
///
/// # Arguments
/// * `predictions` - Actual and predicted label per test record
/// * `output_path` - Path where the CSV file will be created
///
/// # Errors
/// Returns error if file cannot be created or written to.
pub fn write_predictions_csv(predictions: &[Prediction], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(["Label", "Predicted"])?;
    for prediction in predictions {
        writer.write_record([
            translate_label(&prediction.actual),
            translate_label(&prediction.predicted),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the cleaned user input as a single-row CSV file.
///
/// The header uses the feature names, e.g. `Max Temperature`.
///
/// # Errors
/// Returns error if file cannot be created or serialization fails.
pub fn write_input_csv(input: &CleanedInput, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);
    writer.serialize(input)?;
    writer.flush()?;
    Ok(())
}

/// Reads back the first data row of a file written by [`write_input_csv`].
///
/// # Returns
/// Returns the five feature values together with the raw text of the row's
/// last column.
///
/// # Errors
/// Returns error if the file cannot be read, has no data row, or a value is
/// not numeric.
pub fn read_input_csv(input_path: &Path) -> Result<(CleanedInput, String)> {
    let mut reader = Reader::from_path(input_path)?;
    let headers = reader.headers()?.clone();
    let raw = reader
        .records()
        .next()
        .ok_or_else(|| {
            KnnError::Data(format!("No input row in {}", input_path.display()))
        })??;

    if raw.len() < N_FEATURES {
        return Err(KnnError::Data(format!(
            "Input row has {} columns, expected {}",
            raw.len(),
            N_FEATURES
        )));
    }

    let input: CleanedInput = raw.deserialize(Some(&headers))?;
    let last = raw[raw.len() - 1].to_string();
    Ok((input, last))
}

/// Writes the prediction for the user's input.
///
/// # Arguments
/// * `input_label` - Label column of the re-read input row, translated if known
/// * `prediction` - Predicted condition, translated if known
/// * `output_path` - Path where the CSV file will be created
///
/// # Errors
/// Returns error if file cannot be created or written to.
pub fn write_test_input_csv(input_label: &str, prediction: &str, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(["Input Label", "Predicted"])?;
    writer.write_record([translate_label(input_label), translate_label(prediction)])?;

    writer.flush()?;
    Ok(())
}

/// Writes the run summary to a pretty-formatted JSON file.
///
/// # Errors
/// Returns error if file cannot be created or serialization fails.
pub fn write_json(summary: &RunSummary, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn cleaned_input_survives_a_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        let input = CleanedInput::from_features([35.5, -2.25, 12.0, 100.0, 0.0]);

        write_input_csv(&input, &path).unwrap();
        let (read_back, last) = read_input_csv(&path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        assert_eq!(read_back, input);
        assert_eq!(last, "0.0");
        assert!(contents.starts_with(
            "Max Temperature,Min Temperature,Wind Speed,Cloud Cover,Relative Humidity\n"
        ));
    }

    #[test]
    fn predictions_are_written_translated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.csv");
        let predictions = vec![
            Prediction {
                actual: "Clear".into(),
                predicted: "Rain, Overcast".into(),
            },
            Prediction {
                actual: "Snow".into(),
                predicted: "Overcast".into(),
            },
        ];

        write_predictions_csv(&predictions, &path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        assert_eq!(
            contents,
            "Label,Predicted\nTrời quang,\"Mưa, U ám\"\nSnow,U ám\n"
        );
    }

    #[test]
    fn test_input_prediction_has_header_and_one_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_input.csv");

        write_test_input_csv("70.0", "Partially cloudy", &path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();

        assert_eq!(contents, "Input Label,Predicted\n70.0,Có mây một phần\n");
    }

    #[test]
    fn reading_input_without_rows_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty_input.csv");
        fs::write(&path, "Max Temperature,Min Temperature,Wind Speed,Cloud Cover,Relative Humidity\n")
            .unwrap();
        let result = read_input_csv(&path);

        assert!(matches!(result, Err(KnnError::Data(_))));
    }

    #[test]
    fn summary_is_written_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let summary = RunSummary {
            train_size: 362,
            test_size: 2,
            k: 5,
            correct: 1,
            accuracy: Some(0.5),
            input: CleanedInput::from_features([30.0, 20.0, 5.0, 50.0, 70.0]),
            prediction: "Clear".into(),
            translated_prediction: "Trời quang".into(),
        };

        write_json(&summary, &path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(value["accuracy"], 0.5);
        assert_eq!(value["input"]["Wind Speed"], 5.0);
        assert_eq!(value["translated_prediction"], "Trời quang");
    }
}
