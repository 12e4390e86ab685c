use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid range: {0}")]
    InvalidRangeError(String),

    #[error("unsupported cadence: {0}")]
    UnsupportedCadenceError(String),

    #[error("unknown audit action: {0}")]
    UnknownActionError(String),

    #[error("invalid input: {0}")]
    InvalidInputError(String),

    #[error("determinism violation: {0}")]
    DeterminismError(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
