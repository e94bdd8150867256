use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DynamicsError {
    #[error("{what} length {got} does not match declared dimension {expected}")]
    DimensionMismatch {
        what:     &'static str,
        expected: usize,
        got:      usize,
    },
}

pub type DynamicsResult<T> = Result<T, DynamicsError>;
