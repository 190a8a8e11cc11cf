//! Error types for the gstbill-core library.

use thiserror::Error;

/// Main error type for the gstbill library.
#[derive(Error, Debug)]
pub enum BillingError {
    /// Bill failed submission checks.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Record store could not be read.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Bill record could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised when a bill is not ready to be submitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Line item has a blank HSN/SAC code. `line` is 1-based.
    #[error("HSN code is required for all items (line {line} is blank)")]
    MissingHsn { line: usize },

    /// Bill has no line items.
    #[error("at least one item is required")]
    NoItems,

    /// Required field is missing.
    #[error("missing required field: {0}")]
    MissingField(String),
}

/// Errors from bill record stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing storage could not be read.
    #[error("failed to read store at {path}: {reason}")]
    Read { path: String, reason: String },
}

/// Result type for the gstbill library.
pub type Result<T> = std::result::Result<T, BillingError>;
