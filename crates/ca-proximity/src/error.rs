//! Proximity error type.

use thiserror::Error;

/// Errors produced by `ca-proximity`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProximityError {
    #[error("obstacle radius must be non-negative or NaN, got {radius}")]
    InvalidObstacle { radius: f64 },

    #[error("agent radius must be finite and non-negative, got {radius}")]
    InvalidAgentRadius { radius: f64 },
}

pub type ProximityResult<T> = Result<T, ProximityError>;
