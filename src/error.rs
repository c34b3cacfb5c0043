use thiserror::Error;

pub type FluxoResult<T> = Result<T, FluxoError>;

#[derive(Error, Debug)]
pub enum FluxoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Invalid file: {0}")]
    InvalidFile(String),

    #[error("Structure error: {0}")]
    Structure(String),

    #[error("No data: {0}")]
    NoData(String),

    #[error("Insight error: {0}")]
    Insight(String),
}
