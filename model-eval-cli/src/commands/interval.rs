//! Confidence intervals for a single model

use anyhow::{Context as _, Result};
use clap::Args;
use comfy_table::Cell;
use model_eval_core::{ConfidenceInterval, IntervalMethod};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::context::Context;
use crate::input::ModelInput;
use crate::output::{format_interval, new_table, print_field, print_section, TableDisplay};

#[derive(Debug, Args)]
pub struct IntervalArgs {
    /// Results file (JSON or YAML)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Restrict to one metric
    #[arg(short, long)]
    pub metric: Option<String>,
}

/// Displayable interval set
#[derive(Debug, Serialize)]
struct IntervalReport {
    model: String,
    method: IntervalMethod,
    confidence_level: f64,
    intervals: BTreeMap<String, ConfidenceInterval>,
}

/// Execute the interval command
pub fn execute(ctx: &Context, args: IntervalArgs) -> Result<()> {
    let input = ModelInput::load(&args.input)?;

    let intervals = match &args.metric {
        Some(metric) => {
            let interval = ctx
                .engine
                .confidence_interval(input.metric(metric)?)
                .with_context(|| format!("Cannot estimate interval for metric '{}'", metric))?;
            BTreeMap::from([(metric.clone(), interval)])
        }
        None => {
            let intervals = ctx
                .engine
                .calculate_confidence_intervals(&input.metrics)
                .context("Cannot estimate intervals")?;
            let omitted: Vec<&str> = input
                .metrics
                .names()
                .filter(|name| !intervals.contains_key(*name))
                .collect();
            if !omitted.is_empty() {
                ctx.output.warning(&format!(
                    "Omitted metrics with a single observation: {}",
                    omitted.join(", ")
                ));
            }
            intervals
        }
    };

    let engine = &ctx.settings.engine;
    ctx.output.write(&IntervalReport {
        model: input.model,
        method: engine.interval_method,
        confidence_level: engine.confidence_level,
        intervals,
    })
}

impl TableDisplay for IntervalReport {
    fn display_single(&self) {
        print_section(&format!("Confidence intervals: {}", self.model));
        print_field(
            "Level",
            &format!("{}% ({})", self.confidence_level * 100.0, self.method),
        );

        let mut table = new_table(&["Metric", "n", "Mean", "Std", "Interval", "Margin"]);
        for (metric, ci) in &self.intervals {
            table.add_row(vec![
                Cell::new(metric),
                Cell::new(ci.n),
                Cell::new(format!("{:.4}", ci.mean)),
                Cell::new(format!("{:.4}", ci.std)),
                Cell::new(format_interval(ci)),
                Cell::new(format!("{:.4}", ci.margin)),
            ]);
        }
        println!("{table}");
    }
}
