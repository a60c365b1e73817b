//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Store error: {0}")]
    Store(String),
}

/// How a caller should surface a [`SlotError`] to the end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Vendor or schedule record is missing.
    NotFound,
    /// The request itself is malformed (4xx-style validation failure).
    InvalidArgument,
    /// Anything else: stored data is broken or the store failed.
    Internal,
}

impl SlotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SlotError::NotFound(_) => ErrorKind::NotFound,
            SlotError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SlotError::InvalidSchedule(_) | SlotError::Store(_) => ErrorKind::Internal,
        }
    }

    /// User-visible message. Internal failures never leak their details.
    pub fn public_message(&self) -> String {
        match self {
            SlotError::NotFound(_) => "vendor not found".to_string(),
            SlotError::InvalidArgument(msg) => msg.clone(),
            SlotError::InvalidSchedule(_) | SlotError::Store(_) => "internal error".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
