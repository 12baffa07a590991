mod analyze;
mod planner;

use clap::{Parser, Subcommand};

use crate::cli::analyze::AnalyzeArgs;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: analyse the price quotes and print the charge and discharge signals.
    #[clap(name = "analyze")]
    Analyze(Box<AnalyzeArgs>),
}
