use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid percentage: {0:?}")]
    InvalidPercentage(String),

    #[error("invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
