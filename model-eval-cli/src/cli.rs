//! Command-line arguments

use clap::{Parser, Subcommand, ValueEnum};
use model_eval_core::{IntervalMethod, Tail};
use std::path::PathBuf;

use crate::commands::{CompareArgs, IntervalArgs, TestArgs};
use crate::output::OutputFormat;

/// Statistical comparison of model evaluation metrics
#[derive(Debug, Parser)]
#[command(name = "model-eval", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Significance level for hypothesis tests
    #[arg(long, global = true)]
    pub alpha: Option<f64>,

    /// Confidence level for intervals
    #[arg(long, global = true)]
    pub confidence: Option<f64>,

    /// Confidence interval method
    #[arg(long, global = true, value_enum)]
    pub method: Option<MethodArg>,

    /// Bootstrap resampling iterations
    #[arg(long, global = true)]
    pub iterations: Option<usize>,

    /// Treat observations as matched pairs
    #[arg(long, global = true)]
    pub paired: bool,

    /// Alternative hypothesis direction
    #[arg(long, global = true, value_enum)]
    pub tail: Option<TailArg>,

    /// Seed for bootstrap resampling
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Enable debug logging and the engine summary event
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Additional configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare two models across every metric they share
    Compare(CompareArgs),

    /// Run a t-test on a single metric
    Test(TestArgs),

    /// Confidence intervals for one model's metrics
    Interval(IntervalArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Normal,
    Bootstrap,
}

impl From<MethodArg> for IntervalMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Normal => IntervalMethod::Normal,
            MethodArg::Bootstrap => IntervalMethod::Bootstrap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TailArg {
    Both,
    Left,
    Right,
}

impl From<TailArg> for Tail {
    fn from(tail: TailArg) -> Self {
        match tail {
            TailArg::Both => Tail::Both,
            TailArg::Left => Tail::Left,
            TailArg::Right => Tail::Right,
        }
    }
}
