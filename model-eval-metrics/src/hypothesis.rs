use model_eval_core::{EvalError, Result, Tail, TestResult, TestType};

use crate::descriptive::{mean, std_dev, variance};
use crate::distributions::t_p_value;

/// p-value reported when the statistic is not a finite number
pub const DEGENERATE_P_VALUE: f64 = 1.0;

struct TStatistic {
    value: f64,
    df: f64,
    mean_difference: f64,
}

pub(crate) fn validate_alpha(alpha: f64) -> Result<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(EvalError::InvalidSignificanceLevel(alpha));
    }
    Ok(())
}

fn validate_samples(sample1: &[f64], sample2: &[f64], test_type: TestType) -> Result<()> {
    if sample1.is_empty() || sample2.is_empty() {
        return Err(EvalError::EmptySample);
    }
    if test_type == TestType::Paired && sample1.len() != sample2.len() {
        return Err(EvalError::PairedSampleSizeMismatch {
            left: sample1.len(),
            right: sample2.len(),
        });
    }
    Ok(())
}

fn differences(sample1: &[f64], sample2: &[f64]) -> Vec<f64> {
    sample1.iter().zip(sample2).map(|(a, b)| a - b).collect()
}

fn paired_statistic(sample1: &[f64], sample2: &[f64]) -> Result<TStatistic> {
    let diffs = differences(sample1, sample2);
    let n = diffs.len() as f64;
    let mean_difference = mean(&diffs)?;
    let std_difference = std_dev(&diffs)?;

    Ok(TStatistic {
        value: mean_difference / (std_difference / n.sqrt()),
        df: n - 1.0,
        mean_difference,
    })
}

fn unpaired_statistic(sample1: &[f64], sample2: &[f64]) -> Result<TStatistic> {
    let n1 = sample1.len() as f64;
    let n2 = sample2.len() as f64;
    let mean_difference = mean(sample1)? - mean(sample2)?;

    let pooled_var =
        ((n1 - 1.0) * variance(sample1)? + (n2 - 1.0) * variance(sample2)?) / (n1 + n2 - 2.0);
    let pooled_std = pooled_var.sqrt();

    Ok(TStatistic {
        value: mean_difference / (pooled_std * (1.0 / n1 + 1.0 / n2).sqrt()),
        df: n1 + n2 - 2.0,
        mean_difference,
    })
}

/// Two-sample t-test.
///
/// A statistic that is NaN or infinite (e.g. both samples without spread) is
/// reported as 0 with a p-value of 1.0, meaning no detectable difference.
pub fn perform_t_test(
    sample1: &[f64],
    sample2: &[f64],
    test_type: TestType,
    tail: Tail,
    alpha: f64,
) -> Result<TestResult> {
    validate_alpha(alpha)?;
    validate_samples(sample1, sample2, test_type)?;

    let stat = match test_type {
        TestType::Paired => paired_statistic(sample1, sample2)?,
        TestType::Unpaired => unpaired_statistic(sample1, sample2)?,
    };

    let (statistic, p_value) = if stat.value.is_finite() {
        (stat.value, t_p_value(stat.value, stat.df, tail))
    } else {
        (0.0, DEGENERATE_P_VALUE)
    };

    Ok(TestResult {
        statistic,
        degrees_of_freedom: stat.df,
        p_value,
        significant: p_value < alpha,
        effect_size: calculate_effect_size(sample1, sample2, test_type)?,
        mean_difference: stat.mean_difference,
        test_type,
        tail,
        alpha,
    })
}

/// Cohen's-d style standardized difference. Never negative; non-finite
/// ratios resolve to 0.
pub fn calculate_effect_size(sample1: &[f64], sample2: &[f64], test_type: TestType) -> Result<f64> {
    validate_samples(sample1, sample2, test_type)?;

    let d = match test_type {
        TestType::Paired => {
            let diffs = differences(sample1, sample2);
            mean(&diffs)? / std_dev(&diffs)?
        }
        TestType::Unpaired => {
            let mean_difference = mean(sample1)? - mean(sample2)?;
            let spread = ((variance(sample1)? + variance(sample2)?) / 2.0).sqrt();
            mean_difference / spread
        }
    };

    Ok(if d.is_finite() { d.abs() } else { 0.0 })
}
