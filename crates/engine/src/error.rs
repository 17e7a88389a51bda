use llwc_core::CoreError;
use llwc_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("wine dialog is not open")]
    DialogClosed,

    /// The wine was saved and the dialog closed, but reloading failed.
    #[error("wine saved but reload failed: {0}")]
    RefreshAfterSave(#[source] StorageError),

    #[error("no wine selected")]
    NoSelection,

    #[error("wine not found in current list: {0}")]
    WineNotFound(String),

    #[error("only available while creating a wine")]
    NotInCreateMode,
}
