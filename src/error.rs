#[derive(Debug, thiserror::Error)]
pub enum KnnError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Data Error: {0}")]
    Data(String),
    #[error("Input Error: {0}")]
    Input(String),
    #[error("Logger Error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, KnnError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::SimpleLogger;

    static LOGGER: SimpleLogger = SimpleLogger;

    #[test]
    fn second_logger_install_converts_into_logger_error() {
        // Only the first install can succeed; the second must surface as an error
        let _ = log::set_logger(&LOGGER);
        let err: KnnError = log::set_logger(&LOGGER).unwrap_err().into();

        assert!(matches!(err, KnnError::Logger(_)));
        assert!(err.to_string().starts_with("Logger Error: "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
