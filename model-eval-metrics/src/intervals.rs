use std::collections::BTreeMap;

use model_eval_core::{
    ConfidenceInterval, EngineConfig, EvalError, IntervalMethod, MetricSamples, Result,
    DEFAULT_BOOTSTRAP_ITERATIONS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::descriptive::{mean, std_dev};
use crate::distributions::{inverse_normal_cdf, t_critical_value};

/// Sample size above which the z critical value is used
pub const LARGE_SAMPLE_N: usize = 30;

fn validate_level(confidence_level: f64) -> Result<()> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(EvalError::InvalidConfidenceLevel(confidence_level));
    }
    Ok(())
}

fn validate_sample(sample: &[f64]) -> Result<()> {
    if sample.is_empty() {
        return Err(EvalError::EmptySample);
    }
    if sample.len() < 2 {
        return Err(EvalError::InsufficientData {
            required: 2,
            actual: sample.len(),
        });
    }
    Ok(())
}

/// Parametric interval: z critical value for n > 30, approximate t otherwise.
pub fn normal_interval(sample: &[f64], confidence_level: f64) -> Result<ConfidenceInterval> {
    validate_level(confidence_level)?;
    validate_sample(sample)?;

    let n = sample.len();
    let mean = mean(sample)?;
    let std = std_dev(sample)?;
    let alpha = 1.0 - confidence_level;

    let critical = if n > LARGE_SAMPLE_N {
        inverse_normal_cdf(1.0 - alpha / 2.0)?
    } else {
        t_critical_value((n - 1) as f64, alpha / 2.0)?
    };
    let margin = critical * std / (n as f64).sqrt();

    Ok(ConfidenceInterval {
        mean,
        std,
        n,
        lower: mean - margin,
        upper: mean + margin,
        margin,
        method: IntervalMethod::Normal,
        confidence_level,
    })
}

/// Percentile bootstrap of the mean driven by the caller's random source.
///
/// Bounds are widened to include the observed mean when a skewed resampling
/// distribution would otherwise exclude it.
pub fn bootstrap_interval_with_rng<R: Rng>(
    sample: &[f64],
    confidence_level: f64,
    iterations: usize,
    rng: &mut R,
) -> Result<ConfidenceInterval> {
    validate_level(confidence_level)?;
    validate_sample(sample)?;
    if iterations == 0 {
        return Err(EvalError::Validation(
            "bootstrap requires at least one iteration".to_string(),
        ));
    }

    let n = sample.len();
    let mean = mean(sample)?;
    let std = std_dev(sample)?;
    let alpha = 1.0 - confidence_level;

    let mut means: Vec<f64> = (0..iterations)
        .map(|_| (0..n).map(|_| sample[rng.gen_range(0..n)]).sum::<f64>() / n as f64)
        .collect();
    means.sort_by(f64::total_cmp);

    let lower = percentile(&means, alpha / 2.0).min(mean);
    let upper = percentile(&means, 1.0 - alpha / 2.0).max(mean);

    Ok(ConfidenceInterval {
        mean,
        std,
        n,
        lower,
        upper,
        margin: (upper - lower) / 2.0,
        method: IntervalMethod::Bootstrap,
        confidence_level,
    })
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn percentile(sorted: &[f64], quantile: f64) -> f64 {
    let position = quantile * (sorted.len() - 1) as f64;
    let lo = position.floor() as usize;
    let hi = position.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (position - lo as f64)
}

/// Builds intervals with a fixed method; holds no sample data between calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalEstimator {
    pub method: IntervalMethod,
    pub bootstrap_iterations: usize,
    pub seed: Option<u64>,
}

impl IntervalEstimator {
    pub fn new(method: IntervalMethod) -> Self {
        Self {
            method,
            bootstrap_iterations: DEFAULT_BOOTSTRAP_ITERATIONS,
            seed: None,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            method: config.interval_method,
            bootstrap_iterations: config.bootstrap_iterations,
            seed: config.seed,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.bootstrap_iterations = iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seeded generator when a seed is configured, entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn estimate(&self, sample: &[f64], confidence_level: f64) -> Result<ConfidenceInterval> {
        self.estimate_with_rng(sample, confidence_level, &mut self.rng())
    }

    /// Same as [`estimate`](Self::estimate) but draws from the caller's stream,
    /// so consecutive bootstrap intervals use different resamples.
    pub fn estimate_with_rng<R: Rng>(
        &self,
        sample: &[f64],
        confidence_level: f64,
        rng: &mut R,
    ) -> Result<ConfidenceInterval> {
        match self.method {
            IntervalMethod::Normal => normal_interval(sample, confidence_level),
            IntervalMethod::Bootstrap => bootstrap_interval_with_rng(
                sample,
                confidence_level,
                self.bootstrap_iterations,
                rng,
            ),
        }
    }

    /// One interval per metric with more than one observation.
    ///
    /// Single-observation metrics are skipped; an empty metric is an error.
    pub fn estimate_all(
        &self,
        metrics: &MetricSamples,
        confidence_level: f64,
    ) -> Result<BTreeMap<String, ConfidenceInterval>> {
        validate_level(confidence_level)?;

        let mut rng = self.rng();
        let mut intervals = BTreeMap::new();
        for (name, sample) in metrics.iter() {
            if sample.is_empty() {
                return Err(EvalError::EmptySample);
            }
            if sample.len() < 2 {
                continue;
            }

            let interval = self.estimate_with_rng(sample, confidence_level, &mut rng)?;
            intervals.insert(name.to_string(), interval);
        }

        Ok(intervals)
    }
}

impl Default for IntervalEstimator {
    fn default() -> Self {
        Self::new(IntervalMethod::Normal)
    }
}
