use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Cannot draw from an empty shoe")]
    EmptyShoe,
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}
