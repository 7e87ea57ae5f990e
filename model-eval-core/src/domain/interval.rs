use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IntervalMethod {
    /// z (n > 30) or approximate t critical value times the standard error
    #[default]
    Normal,
    /// Percentiles of resampled means
    Bootstrap,
}

impl fmt::Display for IntervalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Bootstrap => write!(f, "bootstrap"),
        }
    }
}

/// Confidence interval around a sample mean.
///
/// `lower <= mean <= upper` and `margin == (upper - lower) / 2`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub std: f64,
    pub n: usize,
    pub lower: f64,
    pub upper: f64,
    pub margin: f64,
    pub method: IntervalMethod,
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}
