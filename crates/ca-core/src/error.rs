//! Shared error type.
//!
//! Sub-crates define their own error enums; `ca-sim` wraps `CoreError` as one
//! variant of `SimError` so configuration checks done here surface unchanged.

use thiserror::Error;

/// Errors raised while validating core configuration records.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ca-core`.
pub type CoreResult<T> = Result<T, CoreError>;
