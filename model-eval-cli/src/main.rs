use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod context;
mod input;
mod output;

use cli::Cli;
use context::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON and YAML output stay parseable
    let default_filter = if cli.verbose {
        "model_eval=debug"
    } else {
        "model_eval=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = Context::new(&cli)?;
    commands::execute(&ctx, cli.command)
}
