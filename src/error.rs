use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// User-correctable input problem; nothing was mutated.
    #[error("{field} must not be empty")]
    Validation { field: &'static str },

    #[error("index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("persisted entries are corrupt: {0}")]
    Corrupt(String),

    #[error("storage write failed: {0}")]
    Storage(#[source] Box<StoreError>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
