mod commands;
mod csv_rows;
mod data_dir;
mod input_output;
mod logging;
mod progress;

use clap::Parser;
use commands::Commands;
use logging::LogArgs;

/// wscale: estimate translated word and character counts.
#[derive(clap::Parser, Debug)]
#[command(name = "wscale", version)]
pub struct Args {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.logging.setup_logging(2)?;

    args.command.run()
}
