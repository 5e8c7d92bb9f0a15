use thiserror::Error;

#[derive(Debug, Error)]
pub enum CasfError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Plot error: {0}")]
    Plot(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CasfError {
    /// Shorthand for building an `InvalidInput` error from anything printable.
    pub fn invalid(msg: impl Into<String>) -> Self {
        CasfError::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CasfError>;
