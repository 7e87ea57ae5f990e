//! Subcommand implementations

pub mod compare;
pub mod interval;

pub use compare::CompareArgs;
pub use interval::IntervalArgs;
pub use test::TestArgs;

use anyhow::Result;

use crate::cli::Commands;
use crate::context::Context;

/// Dispatch a parsed subcommand
pub fn execute(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Compare(args) => compare::execute(ctx, args),
        Commands::Test(args) => test::execute(ctx, args),
        Commands::Interval(args) => interval::execute(ctx, args),
    }
}
