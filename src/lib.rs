pub mod clean;
pub mod error;
pub mod knn;
pub mod load;
pub mod pipeline;
pub mod structs;
pub mod transform;

// Re-export public API
pub use clean::{clean_input, prompt_in_range, prompt_raw_input};
pub use error::{KnnError, Result};
pub use knn::{classify, distance, evaluate, k_nearest_neighbors, most_common_label};
pub use load::{
    read_input_csv, write_input_csv, write_json, write_predictions_csv, write_test_input_csv,
};
pub use pipeline::{default_data_dir, run};
pub use structs::{
    CleanedInput, ClassifierConfig, Evaluation, Feature, Prediction, Record, RunSummary,
    SimpleLogger, translate_label,
};
pub use transform::{read_dataset, split_dataset};
