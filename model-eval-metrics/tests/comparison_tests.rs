use approx::assert_abs_diff_eq;
use model_eval_core::*;
use model_eval_metrics::{ComparisonEngine, TracingReporter};
use pretty_assertions::assert_eq;
use test_case::test_case;

fn model_a() -> MetricSamples {
    MetricSamples::new().with_metric("iou", vec![0.70, 0.72, 0.75, 0.78, 0.80])
}

fn model_b() -> MetricSamples {
    MetricSamples::new().with_metric("iou", vec![0.80, 0.82, 0.85, 0.88, 0.90])
}

fn engine() -> ComparisonEngine {
    ComparisonEngine::default()
}

// ===== End-to-end =====

#[test]
fn test_compare_models_end_to_end() {
    let result = engine().compare_models(&model_a(), &model_b(), ["Model A", "Model B"]);

    assert_eq!(result.model_names, ["Model A".to_string(), "Model B".to_string()]);
    assert_eq!(result.winner, "Model B");
    assert_eq!(result.overall_winner, Winner::ModelB);
    assert_eq!(result.significant_count, 1);
    assert_eq!(result.total_count, 1);
    assert!(result.skipped_metrics.is_empty());

    let iou = result.metrics["iou"].comparison().unwrap();
    assert!(iou.test.significant);
    assert_abs_diff_eq!(iou.test.mean_difference, -0.10, epsilon = 1e-9);
    assert!(iou.test.effect_size > 0.8);
    assert_eq!(iou.winner, Winner::ModelB);
    assert!(iou.interval_a.upper > iou.interval_a.lower);
    assert_abs_diff_eq!(iou.summary_b.mean, 0.85, epsilon = 1e-12);
    assert_eq!(iou.summary_b.median, 0.85);
    assert!(iou.interpretation.starts_with("Statistically significant"));

    // significance 0.9, magnitude 0.9, consistency 1.0
    assert_abs_diff_eq!(result.confidence_score, 2.8 / 3.0, epsilon = 1e-12);
    assert_eq!(result.confidence, ConfidenceCategory::VeryHigh);
    assert!(result
        .summary
        .starts_with("1 of 1 metrics show significant differences. Model B outperforms Model A"));
}

#[test]
fn test_compare_models_swapped_order() {
    let result = engine().compare_models(&model_b(), &model_a(), ["Model B", "Model A"]);

    assert_eq!(result.overall_winner, Winner::ModelA);
    assert_eq!(result.winner, "Model B");
}

// ===== Ties and aggregation =====

#[test]
fn test_no_significant_metrics() {
    let a = MetricSamples::new()
        .with_metric("iou", vec![0.70, 0.75, 0.80, 0.72])
        .with_metric("dice", vec![0.81, 0.86, 0.83, 0.84]);
    let b = MetricSamples::new()
        .with_metric("iou", vec![0.71, 0.74, 0.79, 0.73])
        .with_metric("dice", vec![0.82, 0.85, 0.84, 0.83]);

    let result = engine().compare_models(&a, &b, ["A", "B"]);

    assert_eq!(result.significant_count, 0);
    assert_eq!(result.total_count, 2);
    assert_eq!(result.overall_winner, Winner::Tie);
    assert_eq!(result.winner, "tie");
    assert!(result.summary.starts_with("0 of 2 metrics show significant differences."));
    assert!(result.summary.contains("No clear winner between A and B"));
    // significance 0.3, magnitude 0.4, consistency 1.0 (every metric tied)
    assert_abs_diff_eq!(result.confidence_score, 1.7 / 3.0, epsilon = 1e-12);
    assert_eq!(result.confidence, ConfidenceCategory::Medium);
}

#[test]
fn test_mixed_metrics_consistency() {
    let a = MetricSamples::new()
        .with_metric("accuracy", vec![0.90, 0.91, 0.92, 0.93, 0.94])
        .with_metric("dice", vec![0.60, 0.61, 0.62, 0.63, 0.64])
        .with_metric("iou", vec![0.50, 0.52, 0.49, 0.51, 0.53]);
    let b = MetricSamples::new()
        .with_metric("accuracy", vec![0.80, 0.81, 0.82, 0.83, 0.84])
        .with_metric("dice", vec![0.70, 0.71, 0.72, 0.73, 0.74])
        .with_metric("iou", vec![0.51, 0.50, 0.52, 0.49, 0.53]);

    let result = engine().compare_models(&a, &b, ["A", "B"]);

    let winner = |name: &str| result.metrics[name].comparison().unwrap().winner;
    assert_eq!(winner("accuracy"), Winner::ModelA);
    assert_eq!(winner("dice"), Winner::ModelB);
    assert_eq!(winner("iou"), Winner::Tie);

    assert_eq!(result.significant_count, 2);
    assert_eq!(result.overall_winner, Winner::Tie);
    // significance 0.9 (2 of 3), magnitude 0.4 (means equal), consistency 1/3
    assert_abs_diff_eq!(
        result.confidence_score,
        (0.9 + 0.4 + 1.0 / 3.0) / 3.0,
        epsilon = 1e-9
    );
    assert_eq!(result.confidence, ConfidenceCategory::Medium);
}

#[test]
fn test_consistency_counts_majority_of_ties() {
    let a = MetricSamples::new()
        .with_metric("accuracy", vec![0.90, 0.91, 0.92, 0.93, 0.94])
        .with_metric("dice", vec![0.60, 0.61, 0.62, 0.63, 0.64])
        .with_metric("iou", vec![0.50, 0.52, 0.49, 0.51, 0.53]);
    let b = MetricSamples::new()
        .with_metric("accuracy", vec![0.80, 0.81, 0.82, 0.83, 0.84])
        .with_metric("dice", vec![0.62, 0.60, 0.64, 0.61, 0.63])
        .with_metric("iou", vec![0.51, 0.50, 0.52, 0.49, 0.53]);

    let result = engine().compare_models(&a, &b, ["A", "B"]);

    let winner = |name: &str| result.metrics[name].comparison().unwrap().winner;
    assert_eq!(winner("accuracy"), Winner::ModelA);
    assert_eq!(winner("dice"), Winner::Tie);
    assert_eq!(winner("iou"), Winner::Tie);

    assert_eq!(result.significant_count, 1);
    assert_eq!(result.overall_winner, Winner::ModelA);
    // significance 0.6 (1 of 3), magnitude 0.4 (gap 0.1 / 3), consistency 2/3 (two ties)
    assert_abs_diff_eq!(
        result.confidence_score,
        (0.6 + 0.4 + 2.0 / 3.0) / 3.0,
        epsilon = 1e-9
    );
    assert_eq!(result.confidence, ConfidenceCategory::Medium);
}

// ===== Partial failure =====

#[test]
fn test_failed_metric_does_not_abort() {
    let a = model_a().with_metric("dice", vec![]);
    let b = model_b().with_metric("dice", vec![0.9, 0.91]);

    let result = engine().compare_models(&a, &b, ["Model A", "Model B"]);

    assert_eq!(result.total_count, 2);
    assert!(result.metrics["dice"].is_failed());
    assert!(result.metrics["iou"].comparison().is_some());
    assert_eq!(result.significant_count, 1);
    assert_eq!(result.winner, "Model B");
    assert_eq!(
        result.failed().collect::<Vec<_>>(),
        vec![("dice", "Empty sample: at least one observation is required")]
    );
    assert!(result.summary.ends_with("1 metric(s) could not be compared."));
}

#[test]
fn test_paired_mismatch_recorded_per_metric() {
    let engine =
        ComparisonEngine::new(EngineConfig::default().with_test_type(TestType::Paired)).unwrap();
    let a = MetricSamples::new().with_metric("iou", vec![0.7, 0.8, 0.9]);
    let b = MetricSamples::new().with_metric("iou", vec![0.7, 0.8, 0.9, 0.95]);

    let result = engine.compare_models(&a, &b, ["A", "B"]);

    match &result.metrics["iou"] {
        MetricOutcome::Failed { error } => assert!(error.contains("3 vs 4")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(result.overall_winner, Winner::Tie);
    assert_eq!(result.confidence_score, 0.0);
    assert_eq!(result.confidence, ConfidenceCategory::VeryLow);
    assert_eq!(
        result.summary,
        "0 of 1 metrics show significant differences. No metric could be compared."
    );
}

#[test]
fn test_metrics_missing_from_one_model_are_skipped() {
    let a = model_a().with_metric("accuracy", vec![0.9, 0.91]);
    let b = model_b().with_metric("runtime", vec![12.0, 13.0]);

    let result = engine().compare_models(&a, &b, ["A", "B"]);

    assert_eq!(result.total_count, 1);
    assert_eq!(result.skipped_metrics, vec!["accuracy".to_string(), "runtime".to_string()]);
}

#[test]
fn test_empty_inputs() {
    let result = engine().compare_models(&MetricSamples::new(), &MetricSamples::new(), ["A", "B"]);

    assert_eq!(result.total_count, 0);
    assert_eq!(result.significant_count, 0);
    assert_eq!(result.overall_winner, Winner::Tie);
}

#[test]
fn test_significant_count_never_exceeds_total() {
    let a = MetricSamples::new()
        .with_metric("m1", vec![1.0, 2.0, 3.0])
        .with_metric("m2", vec![1.0])
        .with_metric("m3", vec![5.0, 6.0, 7.0]);
    let b = MetricSamples::new()
        .with_metric("m1", vec![4.0, 5.0, 6.0])
        .with_metric("m2", vec![2.0])
        .with_metric("m3", vec![5.5, 6.5, 7.5]);

    let result = engine().compare_models(&a, &b, ["A", "B"]);

    assert!(result.significant_count <= result.total_count);
    assert_eq!(result.total_count, 3);
}

// ===== Engine configuration =====

#[test_case(IntervalMethod::Normal ; "normal intervals")]
#[test_case(IntervalMethod::Bootstrap ; "bootstrap intervals")]
fn test_interval_method_propagates(method: IntervalMethod) {
    let config = EngineConfig::default()
        .with_interval_method(method)
        .with_seed(5);
    let engine = ComparisonEngine::new(config).unwrap();

    let result = engine.compare_models(&model_a(), &model_b(), ["A", "B"]);
    let iou = result.metrics["iou"].comparison().unwrap();

    assert_eq!(iou.interval_a.method, method);
    assert_eq!(iou.interval_b.method, method);
}

#[test]
fn test_seeded_bootstrap_comparison_is_reproducible() {
    let config = EngineConfig::default()
        .with_interval_method(IntervalMethod::Bootstrap)
        .with_seed(99);
    let engine = ComparisonEngine::new(config).unwrap();

    let first = engine.compare_models(&model_a(), &model_b(), ["A", "B"]);
    let second = engine.compare_models(&model_a(), &model_b(), ["A", "B"]);

    assert_eq!(first, second);
}

#[test]
fn test_seeded_bootstrap_resamples_each_interval_independently() {
    let scores = vec![
        0.61, 0.74, 0.58, 0.83, 0.69, 0.77, 0.65, 0.71, 0.88, 0.63, 0.79, 0.72,
    ];
    let shifted: Vec<f64> = scores.iter().map(|x| x + 0.05).collect();
    let a = MetricSamples::new()
        .with_metric("dice", scores.clone())
        .with_metric("iou", scores);
    let b = MetricSamples::new()
        .with_metric("dice", shifted.clone())
        .with_metric("iou", shifted);
    let config = EngineConfig::default()
        .with_interval_method(IntervalMethod::Bootstrap)
        .with_seed(7);
    let engine = ComparisonEngine::new(config).unwrap();

    let result = engine.compare_models(&a, &b, ["A", "B"]);
    let dice = result.metrics["dice"].comparison().unwrap();
    let iou = result.metrics["iou"].comparison().unwrap();

    // Shifted samples resampled with the same indices would share a margin
    assert!((dice.interval_a.margin - dice.interval_b.margin).abs() > 1e-9);
    assert!((iou.interval_a.margin - iou.interval_b.margin).abs() > 1e-9);
    assert_ne!(dice.interval_a, iou.interval_a);
    assert_eq!(result, engine.compare_models(&a, &b, ["A", "B"]));
}

#[test]
fn test_invalid_config_rejected() {
    let result = ComparisonEngine::new(EngineConfig::default().with_alpha(1.5));
    assert!(matches!(result, Err(EvalError::Validation(_))));
}

#[test]
fn test_engine_intervals_for_mapping() {
    let intervals = engine()
        .calculate_confidence_intervals(&model_a().with_metric("single", vec![1.0]))
        .unwrap();

    assert_eq!(intervals.keys().collect::<Vec<_>>(), vec!["iou"]);
    assert_eq!(intervals["iou"].confidence_level, 0.95);
}

#[test]
fn test_engine_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ComparisonEngine>();
}

// ===== Reporting =====

#[test]
fn test_tracing_reporter_without_subscriber() {
    let result = engine().compare_models(&model_a(), &model_b(), ["Model A", "Model B"]);
    assert!(TracingReporter::new().with_payload().report(&result).is_ok());
}
