//! Core error type.
//!
//! Downstream crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The error type for `ar-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("time index {index} is outside the time-index table (len {len})")]
    IndexOutOfRange { index: u32, len: usize },
}

/// Shorthand result type for `ar-core`.
pub type CoreResult<T> = Result<T, CoreError>;
