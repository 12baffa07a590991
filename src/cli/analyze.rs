use std::{fs, io, path::PathBuf};

use chrono::{DateTime, FixedOffset, Local};
use clap::Parser;

use crate::{
    cli::planner::PlannerArgs,
    core::analysis::Analyzer,
    feed,
    prelude::*,
    report::Report,
    tables::{build_current_table, build_slots_table, build_statistics_table},
};

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Tibber price info JSON document, `-` for the standard input.
    #[clap(long, env = "PRICE_INFO_PATH", default_value = "-")]
    input: PathBuf,

    #[clap(flatten)]
    planner: PlannerArgs,

    /// Reference time of the future period in RFC 3339, defaults to now.
    #[clap(long, env = "NOW")]
    now: Option<DateTime<FixedOffset>>,

    #[clap(long, env = "OUTPUT", default_value = "table")]
    output: Output,
}

#[derive(Copy, Clone, clap::ValueEnum)]
enum Output {
    /// Human-readable tables.
    Table,

    /// JSON report for a host.
    Json,
}

impl AnalyzeArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let json = self.read_input()?;
        let quotes = feed::parse(&json)?;
        let now = self.now.unwrap_or_else(|| Local::now().fixed_offset());
        let analysis = Analyzer::builder()
            .planner(self.planner.planner())
            .now(now)
            .build()
            .analyze(quotes)?;

        match self.output {
            Output::Table => {
                if let Some(current) = &analysis.current {
                    println!("{}", build_current_table(current));
                }
                let mut periods = vec![("Today", &analysis.today)];
                periods.extend(analysis.tomorrow.as_ref().map(|period| ("Tomorrow", period)));
                periods.extend(analysis.future.as_ref().map(|period| ("Future", period)));
                println!("{}", build_statistics_table(&periods));
                for (name, period) in periods {
                    println!("{name}:");
                    println!("{}", build_slots_table(period));
                }
            }
            Output::Json => {
                println!("{}", serde_json::to_string_pretty(&Report::from(&analysis))?);
            }
        }
        Ok(())
    }

    fn read_input(&self) -> Result<String> {
        if self.input.as_os_str() == "-" {
            io::read_to_string(io::stdin().lock()).context("failed to read the standard input")
        } else {
            fs::read_to_string(&self.input)
                .with_context(|| format!("failed to read `{}`", self.input.display()))
        }
    }
}
