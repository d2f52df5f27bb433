use thiserror::Error;

use crate::types::Dimension;

pub type MatrixOutcome<T> = Result<T, MatrixError>;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("at least one selection required per dimension: {0}")]
    EmptyDimension(Dimension),

    #[error("Unknown line of business: {0}")]
    UnknownLineOfBusiness(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Unknown matrix type: {0}")]
    UnknownMatrixType(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MatrixError {
    /// True for the blocking "empty dimension" validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, MatrixError::EmptyDimension(_))
    }
}
