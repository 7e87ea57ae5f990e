use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    /// Matched observations of the same unit under both models
    Paired,
    /// Two independent samples with equal variances assumed
    #[default]
    Unpaired,
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paired => write!(f, "paired"),
            Self::Unpaired => write!(f, "unpaired"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tail {
    #[default]
    Both,
    Left,
    Right,
}

impl fmt::Display for Tail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Both => write!(f, "both"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Outcome of a two-sample t-test.
///
/// `significant` is always `p_value < alpha`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TestResult {
    pub statistic: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
    pub significant: bool,
    pub effect_size: f64,
    pub mean_difference: f64,
    pub test_type: TestType,
    pub tail: Tail,
    pub alpha: f64,
}
