use ca_dynamics::DynamicsError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("driver configuration error: {0}")]
    Config(String),

    #[error("step failed: {0}")]
    Dynamics(#[from] DynamicsError),
}

pub type SimResult<T> = Result<T, SimError>;
