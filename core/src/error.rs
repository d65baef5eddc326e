use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid state file: {reason}")]
    InvalidState { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;
