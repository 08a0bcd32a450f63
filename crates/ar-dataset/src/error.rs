use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("malformed period {text:?}: {reason}")]
    MalformedPeriod { text: String, reason: String },

    #[error("atlas JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("time table CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatasetError {
    pub(crate) fn malformed(text: &str, reason: impl Into<String>) -> Self {
        DatasetError::MalformedPeriod {
            text:   text.to_owned(),
            reason: reason.into(),
        }
    }
}

pub type DatasetResult<T> = Result<T, DatasetError>;
