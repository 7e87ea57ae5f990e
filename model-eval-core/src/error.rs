use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Invalid probability: {0} (must lie strictly between 0 and 1)")]
    InvalidProbability(f64),

    #[error("Empty sample: at least one observation is required")]
    EmptySample,

    #[error("Paired sample size mismatch: {left} vs {right} observations")]
    PairedSampleSizeMismatch { left: usize, right: usize },

    #[error("Invalid confidence level: {0} (must lie strictly between 0 and 1)")]
    InvalidConfidenceLevel(f64),

    #[error("Invalid significance level: {0} (must lie strictly between 0 and 1)")]
    InvalidSignificanceLevel(f64),

    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;

impl From<serde_json::Error> for EvalError {
    fn from(err: serde_json::Error) -> Self {
        EvalError::Serialization(err.to_string())
    }
}

impl From<validator::ValidationErrors> for EvalError {
    fn from(err: validator::ValidationErrors) -> Self {
        EvalError::Validation(err.to_string())
    }
}
