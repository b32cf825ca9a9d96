use thiserror::Error;

/// Errors surfaced by layer construction and forward evaluation.
#[derive(Error, Debug)]
pub enum Error {
    /// `expected` lists the trailing dimensions the layer requires.
    #[error("shape mismatch: expected trailing dimensions {expected:?}, got shape {actual:?}")]
    ShapeMismatch { expected: Vec<usize>, actual: Vec<usize> },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Candle(#[from] candle_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
