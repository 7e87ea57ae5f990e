//! CLI execution context

use anyhow::{Context as _, Result};
use model_eval_metrics::ComparisonEngine;

use crate::cli::Cli;
use crate::config::Settings;
use crate::output::OutputWriter;

/// Execution context for CLI commands
pub struct Context {
    /// Resolved settings after every layer and flag
    pub settings: Settings,

    /// Engine built from the validated settings
    pub engine: ComparisonEngine,

    /// Output writer
    pub output: OutputWriter,
}

impl Context {
    /// Create a new context from CLI arguments
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut settings = Settings::load(cli.config.as_deref())?;
        settings.apply_overrides(cli);

        let engine = ComparisonEngine::new(settings.engine.clone())
            .context("Invalid engine configuration")?;
        let output = OutputWriter::new(settings.output, settings.color);

        tracing::debug!(config = ?engine.config(), "engine configured");

        Ok(Self {
            settings,
            engine,
            output,
        })
    }
}
