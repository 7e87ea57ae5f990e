use serde::{Deserialize, Serialize};
use validator::Validate;

use super::hypothesis::{Tail, TestType};
use super::interval::IntervalMethod;
use crate::error::Result;

pub const DEFAULT_ALPHA: f64 = 0.05;
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;
pub const DEFAULT_BOOTSTRAP_ITERATIONS: usize = 1000;

/// Engine configuration, fixed at construction time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct EngineConfig {
    #[validate(range(exclusive_min = 0.0, exclusive_max = 1.0))]
    pub alpha: f64,
    #[validate(range(exclusive_min = 0.0, exclusive_max = 1.0))]
    pub confidence_level: f64,
    pub interval_method: IntervalMethod,
    #[validate(range(min = 1, max = 1000000))]
    pub bootstrap_iterations: usize,
    pub test_type: TestType,
    pub tail: Tail,
    /// Seed for bootstrap resampling; `None` draws from OS entropy
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            interval_method: IntervalMethod::Normal,
            bootstrap_iterations: DEFAULT_BOOTSTRAP_ITERATIONS,
            test_type: TestType::Unpaired,
            tail: Tail::Both,
            seed: None,
            verbose: false,
        }
    }
}

impl EngineConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    pub fn with_interval_method(mut self, method: IntervalMethod) -> Self {
        self.interval_method = method;
        self
    }

    pub fn with_bootstrap_iterations(mut self, iterations: usize) -> Self {
        self.bootstrap_iterations = iterations;
        self
    }

    pub fn with_test_type(mut self, test_type: TestType) -> Self {
        self.test_type = test_type;
        self
    }

    pub fn with_tail(mut self, tail: Tail) -> Self {
        self.tail = tail;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the derived range checks and map failures into [`crate::EvalError::Validation`]
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}
