use model_eval_core::{ConfidenceCategory, EffectMagnitude, Tail, TestResult};

/// Cohen's conventions, shifted one bucket up: below 0.2 is already "small".
pub fn effect_magnitude(effect_size: f64) -> EffectMagnitude {
    let d = effect_size.abs();
    if d < 0.2 {
        EffectMagnitude::Small
    } else if d < 0.5 {
        EffectMagnitude::Medium
    } else if d < 0.8 {
        EffectMagnitude::Large
    } else {
        EffectMagnitude::VeryLarge
    }
}

pub fn confidence_from_p_value(p_value: f64) -> ConfidenceCategory {
    if p_value < 0.001 {
        ConfidenceCategory::VeryHigh
    } else if p_value < 0.01 {
        ConfidenceCategory::High
    } else if p_value < 0.05 {
        ConfidenceCategory::Medium
    } else if p_value < 0.10 {
        ConfidenceCategory::Low
    } else {
        ConfidenceCategory::VeryLow
    }
}

/// Maps an averaged comparison score in `[0, 1]` onto the same categories.
pub fn confidence_from_score(score: f64) -> ConfidenceCategory {
    if score >= 0.8 {
        ConfidenceCategory::VeryHigh
    } else if score >= 0.7 {
        ConfidenceCategory::High
    } else if score >= 0.5 {
        ConfidenceCategory::Medium
    } else if score >= 0.3 {
        ConfidenceCategory::Low
    } else {
        ConfidenceCategory::VeryLow
    }
}

fn format_p_value(p_value: f64) -> String {
    if p_value < 0.0001 {
        "p < 0.0001".to_string()
    } else {
        format!("p = {:.4}", p_value)
    }
}

fn tail_phrase(tail: Tail) -> &'static str {
    match tail {
        Tail::Both => "two-tailed",
        Tail::Left => "left-tailed",
        Tail::Right => "right-tailed",
    }
}

/// Render a single deterministic sentence block describing a t-test.
pub fn interpret_t_test_results(result: &TestResult) -> String {
    let p = format_p_value(result.p_value);
    let verdict = if result.significant {
        format!(
            "Statistically significant difference detected ({} < \u{3b1} = {}).",
            p, result.alpha
        )
    } else {
        format!(
            "No statistically significant difference detected ({} \u{2265} \u{3b1} = {}).",
            p, result.alpha
        )
    };

    let direction = if result.mean_difference > 0.0 {
        format!("The first sample's mean is higher by {:.4}", result.mean_difference)
    } else if result.mean_difference < 0.0 {
        format!("The first sample's mean is lower by {:.4}", -result.mean_difference)
    } else {
        "The sample means are equal".to_string()
    };

    format!(
        "{} {} ({} t-test, {}, t = {:.3}, df = {}). Effect size is {} (d = {:.2}); confidence is {}.",
        verdict,
        direction,
        result.test_type,
        tail_phrase(result.tail),
        result.statistic,
        result.degrees_of_freedom,
        effect_magnitude(result.effect_size),
        result.effect_size,
        confidence_from_p_value(result.p_value),
    )
}
