use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Invalid payment signature")]
    SignatureMismatch,
    #[error("Payment gateway error: {0}")]
    Gateway(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
