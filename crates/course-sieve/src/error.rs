//! Error types for course-sieve operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SieveError {
    #[error("Invalid slot key: {0}")]
    InvalidSlotKey(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No courses selected for export")]
    EmptySelection,

    #[error("A search request is already pending")]
    SearchPending,

    #[error("An export request is already pending")]
    ExportPending,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SieveError>;
