use std::{fs::File, io::Write};

use wordscale::io::{read_ratio_file, write_ratio_file};
use wordscale::ratios::{RatioEntry, RatioStore, language_name};
use wordscale::{Metric, RatioSource};

use crate::{commands::MetricArgs, data_dir::DataDirArgs, input_output::OutputArgs};

/// Args for the ratios command.
#[derive(clap::Args, Debug)]
pub struct RatiosArgs {
    #[command(flatten)]
    data_dir: DataDirArgs,

    /// Ratios subcommand.
    #[clap(subcommand)]
    command: RatiosCommand,
}

/// Subcommands for the ratios command.
#[derive(clap::Subcommand, Debug)]
pub enum RatiosCommand {
    /// Show the effective ratios.
    #[clap(visible_alias = "ls")]
    Show {
        #[command(flatten)]
        metric: MetricArgs,

        /// Only show these languages.
        languages: Vec<String>,
    },

    /// Override one language's ratio.
    Set {
        /// The language code.
        language: String,

        /// The ratio; must be positive.
        value: f64,

        #[command(flatten)]
        metric: MetricArgs,
    },

    /// Remove an override, restoring the built-in ratio.
    Reset {
        /// The language code.
        language: String,

        #[command(flatten)]
        metric: MetricArgs,
    },

    /// Import a ratio file; the metric is read from its header.
    Import {
        /// A CSV file with `language_code` and `ratio` (or `char_ratio`) columns.
        file: String,
    },

    /// Export one metric's overrides as a ratio file.
    Export {
        #[command(flatten)]
        metric: MetricArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the known languages.
    Languages,
}

impl RatiosArgs {
    /// Run the ratios command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let store = self.data_dir.open_store()?;
        self.command.run(&store)
    }
}

impl RatiosCommand {
    /// Run against a store.
    pub fn run(
        &self,
        store: &RatioStore,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = std::io::stdout().lock();
        match self {
            RatiosCommand::Show { metric, languages } => {
                let entries: Vec<RatioEntry> = if languages.is_empty() {
                    store.snapshot(metric.metric())
                } else {
                    languages
                        .iter()
                        .map(|code| store.get(code, metric.metric()))
                        .collect()
                };
                write_entries(&mut stdout, metric.metric(), &entries)?;
            }
            RatiosCommand::Set {
                language,
                value,
                metric,
            } => {
                let changed = store.set(
                    language,
                    metric.metric(),
                    *value,
                    0,
                    RatioSource::UserSupplied,
                )?;
                if !changed {
                    log::info!("{} ratio for {language:?} unchanged", metric.metric());
                }
                write_entries(
                    &mut stdout,
                    metric.metric(),
                    &[store.get(language, metric.metric())],
                )?;
            }
            RatiosCommand::Reset { language, metric } => {
                if !store.reset(language, metric.metric())? {
                    log::warn!("no {} override for {language:?}", metric.metric());
                }
                write_entries(
                    &mut stdout,
                    metric.metric(),
                    &[store.get(language, metric.metric())],
                )?;
            }
            RatiosCommand::Import { file } => {
                let parsed = read_ratio_file(File::open(file)?)?;
                let report = store.bulk_set(parsed.entries)?;
                writeln!(
                    stdout,
                    "imported {} ratios from {file}: {} changed, {} rejected",
                    parsed.metric,
                    report.changed,
                    parsed.rejected.len() + report.rejected.len()
                )?;
            }
            RatiosCommand::Export { metric, output } => {
                let overrides = store.overrides();
                write_ratio_file(
                    output.open_writer()?,
                    metric.metric(),
                    overrides.table(metric.metric()),
                )?;
            }
            RatiosCommand::Languages => {
                for code in store.languages() {
                    writeln!(stdout, "{code:<10} {}", language_name(&code).unwrap_or("-"))?;
                }
            }
        }
        stdout.flush()?;
        Ok(())
    }
}

/// Write entries as an aligned table.
fn write_entries(
    writer: &mut dyn Write,
    metric: Metric,
    entries: &[RatioEntry],
) -> std::io::Result<()> {
    writeln!(
        writer,
        "{:<10} {:<24} {:>10} {:>8}  source",
        "language", "name", "ratio", "samples"
    )?;
    for entry in entries {
        writeln!(
            writer,
            "{:<10} {:<24} {:>10.4} {:>8}  {}",
            entry.language_code,
            language_name(&entry.language_code).unwrap_or("-"),
            entry.ratio(metric),
            entry.sample_size,
            entry.source,
        )?;
    }
    Ok(())
}
