//! Full two-model comparison

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use comfy_table::Cell;
use model_eval_core::{ComparisonResult, MetricOutcome, Reporter, Winner};
use model_eval_metrics::TracingReporter;
use std::path::PathBuf;

use crate::context::Context;
use crate::input::ModelInput;
use crate::output::{
    confidence_badge, format_interval, format_p_value, new_table, print_field, print_list_field,
    print_section, significance_badge, TableDisplay,
};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Results file for the first model (JSON or YAML)
    #[arg(long)]
    pub model_a: PathBuf,

    /// Results file for the second model (JSON or YAML)
    #[arg(long)]
    pub model_b: PathBuf,
}

/// Execute the compare command
pub fn execute(ctx: &Context, args: CompareArgs) -> Result<()> {
    let model_a = ModelInput::load(&args.model_a)?;
    let model_b = ModelInput::load(&args.model_b)?;

    let result = ctx.engine.compare_models(
        &model_a.metrics,
        &model_b.metrics,
        [model_a.model.as_str(), model_b.model.as_str()],
    );

    if ctx.settings.engine.verbose {
        TracingReporter::new().with_payload().report(&result)?;
    }
    ctx.output.report(&result)?;

    if !result.skipped_metrics.is_empty() {
        ctx.output.warning(&format!(
            "Skipped metrics present for only one model: {}",
            result.skipped_metrics.join(", ")
        ));
    }

    Ok(())
}

impl TableDisplay for ComparisonResult {
    fn display_single(&self) {
        print_section("Comparison");
        print_field("Model A", &self.model_names[0]);
        print_field("Model B", &self.model_names[1]);
        print_field("Winner", &self.winner.bold().to_string());
        print_field(
            "Confidence",
            &format!(
                "{} (score {:.2})",
                confidence_badge(self.confidence),
                self.confidence_score
            ),
        );
        print_field(
            "Significant",
            &format!("{} of {}", self.significant_count, self.total_count),
        );

        if !self.metrics.is_empty() {
            print_section("Metrics");
            let mean_a = format!("Mean ({})", self.model_names[0]);
            let mean_b = format!("Mean ({})", self.model_names[1]);
            let mut table = new_table(&[
                "Metric",
                mean_a.as_str(),
                mean_b.as_str(),
                "Interval A",
                "Interval B",
                "t",
                "p-value",
                "d",
                "Significant",
                "Winner",
            ]);

            for (metric, outcome) in &self.metrics {
                let row = match outcome {
                    MetricOutcome::Compared(c) => vec![
                        Cell::new(metric),
                        Cell::new(format!("{:.4}", c.summary_a.mean)),
                        Cell::new(format!("{:.4}", c.summary_b.mean)),
                        Cell::new(format_interval(&c.interval_a)),
                        Cell::new(format_interval(&c.interval_b)),
                        Cell::new(format!("{:.3}", c.test.statistic)),
                        Cell::new(format_p_value(c.test.p_value)),
                        Cell::new(format!("{:.2}", c.test.effect_size)),
                        Cell::new(significance_badge(c.test.significant)),
                        Cell::new(match c.winner {
                            Winner::Tie => "-",
                            winner => winner.label(&self.model_names),
                        }),
                    ],
                    MetricOutcome::Failed { error } => vec![
                        Cell::new(metric),
                        Cell::new(format!("failed: {}", error).red().to_string()),
                    ],
                };
                table.add_row(row);
            }
            println!("{table}");
        }

        if self.compared().next().is_some() {
            print_section("Interpretation");
            for comparison in self.compared() {
                println!("  {}: {}", comparison.metric.cyan(), comparison.interpretation);
            }
        }

        if !self.skipped_metrics.is_empty() {
            print_list_field("Skipped", &self.skipped_metrics);
        }

        println!("\n{}", self.summary);
    }
}
