use log::{Log, Metadata, Record as LogRecord};
use serde::{Deserialize, Serialize};

/// Number of numeric weather features per record.
pub const N_FEATURES: usize = 5;

pub const DATASET_FILE: &str = "ThoiTiet_dulieu.csv";
pub const PREDICTIONS_FILE: &str = "ThoiTiet_daxuly.csv";
pub const INPUT_FILE: &str = "ThoiTiet_input.csv";
pub const TEST_INPUT_FILE: &str = "ThoiTiet_testInput.csv";

/// English condition labels and their Vietnamese display form.
const LABEL_TRANSLATIONS: [(&str, &str); 5] = [
    ("Partially cloudy", "Có mây một phần"),
    ("Rain, Partially cloudy", "Mưa, Có mây một phần"),
    ("Clear", "Trời quang"),
    ("Rain, Overcast", "Mưa, U ám"),
    ("Overcast", "U ám"),
];

/// Simple logger implementation
pub struct SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &LogRecord) {
        println!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Translates a weather condition label, falling back to the label itself
/// when no translation is known.
pub fn translate_label(label: &str) -> &str {
    LABEL_TRANSLATIONS
        .iter()
        .find(|(english, _)| *english == label)
        .map_or(label, |&(_, vietnamese)| vietnamese)
}

/// One of the five numeric weather measurements, in dataset column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    MaxTemperature,
    MinTemperature,
    WindSpeed,
    CloudCover,
    RelativeHumidity,
}

impl Feature {
    pub const ALL: [Feature; N_FEATURES] = [
        Feature::MaxTemperature,
        Feature::MinTemperature,
        Feature::WindSpeed,
        Feature::CloudCover,
        Feature::RelativeHumidity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::MaxTemperature => "Max Temperature",
            Feature::MinTemperature => "Min Temperature",
            Feature::WindSpeed => "Wind Speed",
            Feature::CloudCover => "Cloud Cover",
            Feature::RelativeHumidity => "Relative Humidity",
        }
    }

    /// Inclusive range of accepted values.
    pub fn range(self) -> (f64, f64) {
        match self {
            Feature::MaxTemperature | Feature::MinTemperature => (-10.0, 42.0),
            Feature::WindSpeed => (0.0, 60.0),
            Feature::CloudCover | Feature::RelativeHumidity => (0.0, 100.0),
        }
    }

    /// Value substituted when the user's entry is not a number.
    pub fn default_value(self) -> f64 {
        match self {
            Feature::MaxTemperature => 30.0,
            Feature::MinTemperature => 20.0,
            Feature::WindSpeed => 5.0,
            Feature::CloudCover => 50.0,
            Feature::RelativeHumidity => 70.0,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Feature::MaxTemperature => "Nhập nhiệt độ cao nhất: ",
            Feature::MinTemperature => "Nhập vào nhiệt độ thấp nhất: ",
            Feature::WindSpeed => "Nhập vào tốc độ gió: ",
            Feature::CloudCover => "Nhập vào lượng mây: ",
            Feature::RelativeHumidity => "Nhập vào độ ẩm: ",
        }
    }

    pub fn contains(self, value: f64) -> bool {
        let (min, max) = self.range();
        (min..=max).contains(&value)
    }
}

/// Labelled weather observation from the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub features: [f64; N_FEATURES],
    pub label: String,
}

/// Feature values accepted from the user, serialized with the dataset's
/// human-readable column names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CleanedInput {
    #[serde(rename = "Max Temperature")]
    pub max_temp: f64,
    #[serde(rename = "Min Temperature")]
    pub min_temp: f64,
    #[serde(rename = "Wind Speed")]
    pub wind_speed: f64,
    #[serde(rename = "Cloud Cover")]
    pub cloud_cover: f64,
    #[serde(rename = "Relative Humidity")]
    pub relative_humidity: f64,
}

impl CleanedInput {
    pub fn from_features(features: [f64; N_FEATURES]) -> Self {
        let [max_temp, min_temp, wind_speed, cloud_cover, relative_humidity] = features;
        Self {
            max_temp,
            min_temp,
            wind_speed,
            cloud_cover,
            relative_humidity,
        }
    }

    pub fn features(&self) -> [f64; N_FEATURES] {
        [
            self.max_temp,
            self.min_temp,
            self.wind_speed,
            self.cloud_cover,
            self.relative_humidity,
        ]
    }
}

/// Actual and predicted label for one test record
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub actual: String,
    pub predicted: String,
}

/// Outcome of classifying the whole test set
#[derive(Debug, Clone, Default)]
pub struct Evaluation {
    pub predictions: Vec<Prediction>,
    pub correct: usize,
}

impl Evaluation {
    /// Fraction of correct predictions, `None` for an empty test set.
    pub fn accuracy(&self) -> Option<f64> {
        if self.predictions.is_empty() {
            None
        } else {
            Some(self.correct as f64 / self.predictions.len() as f64)
        }
    }
}

/// Configuration for the classifier run
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub k: usize,
    pub train_size: usize,
    pub seed: Option<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            k: 5,
            train_size: 362,
            seed: None,
        }
    }
}

/// Run summary written by `--json-report`
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub train_size: usize,
    pub test_size: usize,
    pub k: usize,
    pub correct: usize,
    pub accuracy: Option<f64>,
    pub input: CleanedInput,
    pub prediction: String,
    pub translated_prediction: String,
}
