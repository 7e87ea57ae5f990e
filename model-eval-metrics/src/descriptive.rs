use model_eval_core::{EvalError, Result, SampleSummary};

fn ensure_non_empty(values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(EvalError::EmptySample);
    }
    Ok(())
}

pub fn mean(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (n - 1 denominator). A single observation has zero spread.
pub fn variance(values: &[f64]) -> Result<f64> {
    let mean = mean(values)?;
    if values.len() < 2 {
        return Ok(0.0);
    }

    let sum_sq: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    Ok(sum_sq / (values.len() - 1) as f64)
}

pub fn std_dev(values: &[f64]) -> Result<f64> {
    variance(values).map(f64::sqrt)
}

pub fn median(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values)?;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

pub fn min(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values)?;
    Ok(values.iter().copied().fold(f64::INFINITY, f64::min))
}

pub fn max(values: &[f64]) -> Result<f64> {
    ensure_non_empty(values)?;
    Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

pub fn summarize(values: &[f64]) -> Result<SampleSummary> {
    Ok(SampleSummary {
        count: values.len(),
        mean: mean(values)?,
        std: std_dev(values)?,
        median: median(values)?,
        min: min(values)?,
        max: max(values)?,
    })
}
