//! Error types shared by collaborator traits

use thiserror::Error;

/// Result alias used by collaborator traits
pub type Result<T> = std::result::Result<T, Error>;

/// Core errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("User history error: {0}")]
    UserHistory(String),

    #[error("Responder error: {0}")]
    Responder(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
