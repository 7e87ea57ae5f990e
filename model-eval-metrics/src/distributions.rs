//! Closed-form approximations of the standard normal distribution and the
//! small-sample t corrections built on top of it.
//!
//! The t routines are intentionally crude: above 30 degrees of freedom they
//! are the normal distribution, below that a single multiplicative correction
//! is applied. Downstream significance decisions depend on these exact values.

use model_eval_core::{EvalError, Result, Tail};

/// Degrees of freedom above which the t distribution is treated as normal
pub const LARGE_SAMPLE_DF: f64 = 30.0;

// Abramowitz & Stegun 26.2.17
const AS_P: f64 = 0.231_641_9;
const AS_B1: f64 = 0.319_381_530;
const AS_B2: f64 = -0.356_563_782;
const AS_B3: f64 = 1.781_477_937;
const AS_B4: f64 = -1.821_255_978;
const AS_B5: f64 = 1.330_274_429;

// Beasley-Springer-Moro
const BSM_A: [f64; 4] = [
    2.506_628_238_84,
    -18.615_000_625_29,
    41.391_197_735_34,
    -25.441_060_496_37,
];
const BSM_B: [f64; 4] = [
    -8.473_510_930_90,
    23.083_367_437_43,
    -21.062_241_018_26,
    3.130_829_098_33,
];
const BSM_C: [f64; 9] = [
    0.337_475_482_272_614_7,
    0.976_169_019_091_718_6,
    0.160_797_971_491_820_9,
    0.027_643_881_033_386_3,
    0.003_840_572_937_360_9,
    0.000_395_189_651_191_9,
    0.000_032_176_788_176_8,
    0.000_000_288_816_736_4,
    0.000_000_396_031_518_7,
];
const BSM_CENTRAL: f64 = 0.42;

/// Standard normal density
pub fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

/// Standard normal CDF, absolute error below 7.5e-8.
pub fn normal_cdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 1.0 - normal_cdf(-x);
    }

    let t = 1.0 / (1.0 + AS_P * x);
    let poly = t * (AS_B1 + t * (AS_B2 + t * (AS_B3 + t * (AS_B4 + t * AS_B5))));

    1.0 - normal_pdf(x) * poly
}

/// Inverse of the standard normal CDF.
///
/// # Errors
///
/// [`EvalError::InvalidProbability`] unless `0 < p < 1`.
pub fn inverse_normal_cdf(p: f64) -> Result<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(EvalError::InvalidProbability(p));
    }

    let y = p - 0.5;
    if y.abs() < BSM_CENTRAL {
        let r = y * y;
        let num = ((BSM_A[3] * r + BSM_A[2]) * r + BSM_A[1]) * r + BSM_A[0];
        let den = (((BSM_B[3] * r + BSM_B[2]) * r + BSM_B[1]) * r + BSM_B[0]) * r + 1.0;
        return Ok(y * num / den);
    }

    let tail = if y > 0.0 { 1.0 - p } else { p };
    let r = (-tail.ln()).ln();
    let x = BSM_C
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * r + c);

    Ok(if y < 0.0 { -x } else { x })
}

/// Approximate p-value of a t statistic.
///
/// Non-positive degrees of freedom carry no information and yield 1.0.
pub fn t_p_value(t_stat: f64, df: f64, tail: Tail) -> f64 {
    if !(df > 0.0) {
        return 1.0;
    }

    let z = if df > LARGE_SAMPLE_DF {
        t_stat
    } else {
        t_stat / (1.0 + 1.0 / (4.0 * df))
    };

    let p = match tail {
        Tail::Both => 2.0 * (1.0 - normal_cdf(z.abs())),
        Tail::Left => normal_cdf(z),
        Tail::Right => 1.0 - normal_cdf(z),
    };

    p.clamp(0.0, 1.0)
}

/// Approximate upper critical value leaving `alpha` in one tail.
///
/// # Errors
///
/// [`EvalError::InvalidProbability`] unless `0 < alpha < 1`.
pub fn t_critical_value(df: f64, alpha: f64) -> Result<f64> {
    let z = inverse_normal_cdf(1.0 - alpha)?;

    if df > 0.0 && df <= LARGE_SAMPLE_DF {
        Ok(z * (1.0 + (z * z + 1.0) / (4.0 * df)))
    } else {
        Ok(z)
    }
}
