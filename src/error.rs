use thiserror::Error;

#[derive(Error, Debug)]
pub enum KhataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("Unknown transaction: {0}")]
    UnknownTransaction(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unsupported statement format: {0}")]
    UnsupportedFormat(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KhataError>;
