use model_eval_core::{ComparisonResult, MetricOutcome, Reporter, Result};
use tracing::{debug, info, warn};

/// Emits a comparison as structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter {
    /// Also emit the full result as a JSON payload at debug level
    pub include_payload: bool,
}

impl TracingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(mut self) -> Self {
        self.include_payload = true;
        self
    }
}

impl Reporter for TracingReporter {
    fn report(&self, result: &ComparisonResult) -> Result<()> {
        info!(
            model_a = %result.model_names[0],
            model_b = %result.model_names[1],
            winner = %result.winner,
            confidence = %result.confidence,
            significant = result.significant_count,
            total = result.total_count,
            "{}",
            result.summary
        );

        for (metric, outcome) in &result.metrics {
            match outcome {
                MetricOutcome::Compared(c) => info!(
                    metric = %metric,
                    p_value = c.test.p_value,
                    effect_size = c.test.effect_size,
                    winner = c.winner.label(&result.model_names),
                    "{}",
                    c.interpretation
                ),
                MetricOutcome::Failed { error } => {
                    warn!(metric = %metric, error = %error, "metric not compared")
                }
            }
        }

        if !result.skipped_metrics.is_empty() {
            warn!(metrics = ?result.skipped_metrics, "metrics reported for only one model");
        }

        if self.include_payload {
            debug!(payload = %serde_json::to_string(result)?, "comparison result");
        }

        Ok(())
    }
}
