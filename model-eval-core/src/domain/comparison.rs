use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::hypothesis::TestResult;
use super::interval::ConfidenceInterval;
use super::samples::SampleSummary;

/// Cohen's-d magnitude bucket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EffectMagnitude {
    Small,
    Medium,
    Large,
    VeryLarge,
}

impl fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Small => write!(f, "small"),
            Self::Medium => write!(f, "medium"),
            Self::Large => write!(f, "large"),
            Self::VeryLarge => write!(f, "very large"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceCategory {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl fmt::Display for ConfidenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VeryLow => write!(f, "very low"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::VeryHigh => write!(f, "very high"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    ModelA,
    ModelB,
    Tie,
}

impl Winner {
    /// Resolve to the model's label, or `"tie"`
    pub fn label<'a>(&self, model_names: &'a [String; 2]) -> &'a str {
        match self {
            Self::ModelA => &model_names[0],
            Self::ModelB => &model_names[1],
            Self::Tie => "tie",
        }
    }
}

/// Everything computed for one metric shared by both models
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricComparison {
    pub metric: String,
    pub test: TestResult,
    pub interval_a: ConfidenceInterval,
    pub interval_b: ConfidenceInterval,
    pub summary_a: SampleSummary,
    pub summary_b: SampleSummary,
    pub winner: Winner,
    pub interpretation: String,
}

/// Per-metric result; a failure on one metric never aborts the others.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricOutcome {
    Compared(MetricComparison),
    Failed { error: String },
}

impl MetricOutcome {
    pub fn comparison(&self) -> Option<&MetricComparison> {
        match self {
            Self::Compared(c) => Some(c),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonResult {
    pub model_names: [String; 2],
    pub metrics: BTreeMap<String, MetricOutcome>,
    /// Metrics supplied for only one of the two models
    pub skipped_metrics: Vec<String>,
    pub overall_winner: Winner,
    pub winner: String,
    pub confidence_score: f64,
    pub confidence: ConfidenceCategory,
    pub significant_count: usize,
    pub total_count: usize,
    pub summary: String,
}

impl ComparisonResult {
    pub fn compared(&self) -> impl Iterator<Item = &MetricComparison> {
        self.metrics.values().filter_map(MetricOutcome::comparison)
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metrics.iter().filter_map(|(name, outcome)| match outcome {
            MetricOutcome::Failed { error } => Some((name.as_str(), error.as_str())),
            MetricOutcome::Compared(_) => None,
        })
    }
}
