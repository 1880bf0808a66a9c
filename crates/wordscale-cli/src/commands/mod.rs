use wordscale::Metric;

use crate::commands::{
    batch::BatchArgs,
    estimate::EstimateArgs,
    learn::LearnArgs,
    measure::MeasureArgs,
    ratios::RatiosArgs,
};

pub mod batch;
pub mod estimate;
pub mod learn;
pub mod measure;
pub mod ratios;

/// Subcommands for wscale
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Estimate a translated word or character count.
    Estimate(EstimateArgs),

    /// Measure words and characters in a text.
    Measure(MeasureArgs),

    /// Append estimates to every row of a CSV file.
    Batch(BatchArgs),

    /// Learn ratios from a bilingual CSV corpus.
    Learn(LearnArgs),

    /// Inspect and edit the ratio tables.
    Ratios(RatiosArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Estimate(cmd) => cmd.run(),
            Commands::Measure(cmd) => cmd.run(),
            Commands::Batch(cmd) => cmd.run(),
            Commands::Learn(cmd) => cmd.run(),
            Commands::Ratios(cmd) => cmd.run(),
        }
    }
}

/// Metric selection arg group.
#[derive(clap::Args, Debug)]
pub struct MetricArgs {
    /// Use character ratios instead of word ratios.
    #[arg(long)]
    chars: bool,
}

impl MetricArgs {
    /// The selected metric.
    pub fn metric(&self) -> Metric {
        if self.chars { Metric::Char } else { Metric::Word }
    }
}
