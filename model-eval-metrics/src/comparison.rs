use std::collections::BTreeMap;

use model_eval_core::{
    ComparisonResult, ConfidenceCategory, ConfidenceInterval, EngineConfig, MetricComparison,
    MetricOutcome, MetricSamples, Result, TestResult, Winner,
};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::descriptive::summarize;
use crate::hypothesis::perform_t_test;
use crate::intervals::IntervalEstimator;
use crate::interpretation::{confidence_from_score, interpret_t_test_results};

// Absorbs representation error at bucket boundaries (0.85 - 0.75 < 0.10 in f64)
const THRESHOLD_EPSILON: f64 = 1e-9;

/// Statistical comparison of two models across named metrics.
///
/// Holds only its configuration; every call builds fresh results, so one
/// engine can be shared between threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonEngine {
    config: EngineConfig,
}

impl ComparisonEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn interval_estimator(&self) -> IntervalEstimator {
        IntervalEstimator::from_config(&self.config)
    }

    /// t-test using the configured test type, tail and significance level
    pub fn perform_t_test(&self, sample1: &[f64], sample2: &[f64]) -> Result<TestResult> {
        perform_t_test(
            sample1,
            sample2,
            self.config.test_type,
            self.config.tail,
            self.config.alpha,
        )
    }

    pub fn confidence_interval(&self, sample: &[f64]) -> Result<ConfidenceInterval> {
        self.interval_estimator()
            .estimate(sample, self.config.confidence_level)
    }

    pub fn calculate_confidence_intervals(
        &self,
        metrics: &MetricSamples,
    ) -> Result<BTreeMap<String, ConfidenceInterval>> {
        self.interval_estimator()
            .estimate_all(metrics, self.config.confidence_level)
    }

    fn compare_metric<R: Rng>(
        &self,
        metric: &str,
        sample_a: &[f64],
        sample_b: &[f64],
        estimator: &IntervalEstimator,
        rng: &mut R,
    ) -> Result<MetricComparison> {
        let level = self.config.confidence_level;
        let test = self.perform_t_test(sample_a, sample_b)?;
        let interval_a = estimator.estimate_with_rng(sample_a, level, rng)?;
        let interval_b = estimator.estimate_with_rng(sample_b, level, rng)?;
        let summary_a = summarize(sample_a)?;
        let summary_b = summarize(sample_b)?;

        let winner = if !test.significant {
            Winner::Tie
        } else if summary_a.mean > summary_b.mean {
            Winner::ModelA
        } else if summary_b.mean > summary_a.mean {
            Winner::ModelB
        } else {
            Winner::Tie
        };

        debug!(
            metric,
            t = test.statistic,
            p_value = test.p_value,
            effect_size = test.effect_size,
            ?winner,
            "metric compared"
        );

        Ok(MetricComparison {
            metric: metric.to_string(),
            interpretation: interpret_t_test_results(&test),
            test,
            interval_a,
            interval_b,
            summary_a,
            summary_b,
            winner,
        })
    }

    /// Compare two models over every metric both of them report.
    ///
    /// Failures are recorded per metric and never abort the comparison.
    /// Bootstrap intervals for all metrics draw from one random stream.
    #[instrument(skip_all, fields(model_a = model_names[0], model_b = model_names[1]))]
    pub fn compare_models(
        &self,
        metrics_a: &MetricSamples,
        metrics_b: &MetricSamples,
        model_names: [&str; 2],
    ) -> ComparisonResult {
        let model_names = [model_names[0].to_string(), model_names[1].to_string()];

        let estimator = self.interval_estimator();
        let mut rng = estimator.rng();
        let mut metrics = BTreeMap::new();
        for (name, sample_a) in metrics_a.iter() {
            let Some(sample_b) = metrics_b.get(name) else {
                continue;
            };

            let outcome = match self.compare_metric(name, sample_a, sample_b, &estimator, &mut rng) {
                Ok(comparison) => MetricOutcome::Compared(comparison),
                Err(err) => {
                    warn!(metric = name, error = %err, "metric comparison failed");
                    MetricOutcome::Failed {
                        error: err.to_string(),
                    }
                }
            };
            metrics.insert(name.to_string(), outcome);
        }

        let mut skipped_metrics: Vec<String> = metrics_a
            .names()
            .filter(|name| !metrics_b.contains(name))
            .chain(metrics_b.names().filter(|name| !metrics_a.contains(name)))
            .map(str::to_string)
            .collect();
        skipped_metrics.sort();

        let verdict = Verdict::from_outcomes(&metrics);
        let summary = verdict.summary(&model_names, metrics.len());

        if self.config.verbose {
            info!(
                winner = verdict.winner.label(&model_names),
                confidence = %verdict.confidence(),
                score = verdict.score,
                "{}",
                summary
            );
        } else {
            debug!(score = verdict.score, "{}", summary);
        }

        ComparisonResult {
            winner: verdict.winner.label(&model_names).to_string(),
            overall_winner: verdict.winner,
            confidence_score: verdict.score,
            confidence: verdict.confidence(),
            significant_count: verdict.significant,
            total_count: metrics.len(),
            model_names,
            metrics,
            skipped_metrics,
            summary,
        }
    }
}

/// Cross-metric synthesis of the per-metric outcomes
#[derive(Debug, Clone, Copy, PartialEq)]
struct Verdict {
    winner: Winner,
    score: f64,
    significant: usize,
    compared: usize,
    failed: usize,
}

impl Verdict {
    fn from_outcomes(metrics: &BTreeMap<String, MetricOutcome>) -> Self {
        let compared: Vec<&MetricComparison> =
            metrics.values().filter_map(MetricOutcome::comparison).collect();
        let failed = metrics.len() - compared.len();

        if compared.is_empty() {
            return Self {
                winner: Winner::Tie,
                score: 0.0,
                significant: 0,
                compared: 0,
                failed,
            };
        }

        let n = compared.len();
        let significant = compared.iter().filter(|c| c.test.significant).count();
        let wins_a = compared.iter().filter(|c| c.winner == Winner::ModelA).count();
        let wins_b = compared.iter().filter(|c| c.winner == Winner::ModelB).count();
        let ties = n - wins_a - wins_b;

        let winner = match wins_a.cmp(&wins_b) {
            std::cmp::Ordering::Greater => Winner::ModelA,
            std::cmp::Ordering::Less => Winner::ModelB,
            std::cmp::Ordering::Equal => Winner::Tie,
        };

        let significance_factor = if 3 * significant >= 2 * n {
            0.9
        } else if 3 * significant >= n {
            0.6
        } else {
            0.3
        };

        let mean_a = compared.iter().map(|c| c.summary_a.mean).sum::<f64>() / n as f64;
        let mean_b = compared.iter().map(|c| c.summary_b.mean).sum::<f64>() / n as f64;
        let gap = (mean_a - mean_b).abs();
        let magnitude_factor = if gap >= 0.10 - THRESHOLD_EPSILON {
            0.9
        } else if gap >= 0.05 - THRESHOLD_EPSILON {
            0.7
        } else {
            0.4
        };

        // Share of metrics agreeing with the most common per-metric winner, ties included
        let modal = wins_a.max(wins_b).max(ties);
        let consistency_factor = modal as f64 / n as f64;

        Self {
            winner,
            score: (significance_factor + magnitude_factor + consistency_factor) / 3.0,
            significant,
            compared: n,
            failed,
        }
    }

    fn confidence(&self) -> ConfidenceCategory {
        confidence_from_score(self.score)
    }

    fn summary(&self, model_names: &[String; 2], total: usize) -> String {
        let mut summary = format!(
            "{} of {} metrics show significant differences.",
            self.significant, total
        );

        if self.compared == 0 {
            summary.push_str(" No metric could be compared.");
            return summary;
        }

        match self.winner {
            Winner::Tie => summary.push_str(&format!(
                " No clear winner between {} and {}",
                model_names[0], model_names[1]
            )),
            Winner::ModelA => summary.push_str(&format!(
                " {} outperforms {}",
                model_names[0], model_names[1]
            )),
            Winner::ModelB => summary.push_str(&format!(
                " {} outperforms {}",
                model_names[1], model_names[0]
            )),
        }
        summary.push_str(&format!(
            " (confidence: {}, score {:.2}).",
            self.confidence(),
            self.score
        ));

        if self.failed > 0 {
            summary.push_str(&format!(" {} metric(s) could not be compared.", self.failed));
        }

        summary
    }
}
