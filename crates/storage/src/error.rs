use thiserror::Error;

use crate::traits::FieldErrors;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("rejected by backend: {0}")]
    Rejected(FieldErrors),

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("core error: {0}")]
    Core(#[from] llwc_core::CoreError),
}
