use std::io::Write;

use wordscale::batch::ProgressCounter;
use wordscale::learning::{
    DEFAULT_LOG_EVERY,
    DEFAULT_MIN_SAMPLE_SIZE,
    LearningReport,
    RatioLearner,
    RatioLearnerOptions,
};
use wordscale::measure::TextMeasurer;
use wordscale::ratios::{RatioEntry, language_name};

use crate::{
    csv_rows::{Columns, CsvRow, find_column},
    data_dir::DataDirArgs,
    input_output::{InputArgs, OutputArgs},
    progress::SpinnerProgress,
};

/// Args for the learn command.
#[derive(clap::Args, Debug)]
pub struct LearnArgs {
    /// Minimum samples for a language's ratios to be accepted.
    #[arg(long, default_value_t = DEFAULT_MIN_SAMPLE_SIZE)]
    min_samples: u64,

    /// Store the accepted ratios as learned overrides.
    #[arg(long)]
    apply: bool,

    /// With `--apply`, also store ratios below `--min-samples`.
    #[arg(long, requires = "apply")]
    accept_low_confidence: bool,

    /// The English source text column.
    #[arg(long, default_value = "source")]
    source_column: String,

    /// The translation column; defaults to "reference", then "translation".
    #[arg(long, default_value = None)]
    target_column: Option<String>,

    /// The target language column.
    #[arg(long, default_value = "target_lang")]
    language_column: String,

    /// Hide the progress spinner.
    #[arg(long)]
    no_progress: bool,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    data_dir: DataDirArgs,
}

impl LearnArgs {
    /// Run the learn command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(self.input.open_reader()?);
        let headers = rdr.headers()?.clone();
        let columns = self.columns(&headers)?;

        let options = RatioLearnerOptions::default()
            .with_min_sample_size(self.min_samples)
            .with_log_every(0);
        let mut learner = RatioLearner::new(TextMeasurer::new(), options);
        let mut counter = ProgressCounter::new(
            SpinnerProgress::new("learn", self.no_progress),
            DEFAULT_LOG_EVERY,
        );

        let mut unreadable = 0;
        for record in rdr.into_records() {
            match record {
                Ok(record) => {
                    learner.update(CsvRow::new(record, columns));
                    counter.tick();
                }
                Err(err) => {
                    log::warn!("skipping unreadable row: {err}");
                    unreadable += 1;
                }
            }
        }
        counter.finish();

        let report = learner.finish();
        log::info!(
            "learned {} languages from {} rows; {} skipped, {} with empty source, {} unreadable",
            report.accepted.len() + report.insufficient.len() + report.unusable.len(),
            report.rows_seen,
            report.skipped_rows,
            report.zero_source_rows,
            unreadable,
        );
        for rejection in report.rejections() {
            log::warn!("{rejection}");
        }

        let mut writer = self.output.open_writer()?;
        write_report(&mut writer, &report)?;
        writer.flush()?;

        if self.apply {
            let store = self.data_dir.open_store()?;
            let applied = store.bulk_set(report.to_updates(self.accept_low_confidence))?;
            for rejection in &applied.rejected {
                log::warn!("not applied: {rejection}");
            }
            log::info!("applied learned ratios: {} changed", applied.changed);
        }
        Ok(())
    }

    fn columns(
        &self,
        headers: &csv::StringRecord,
    ) -> Result<Columns, Box<dyn std::error::Error>> {
        let target_names = match &self.target_column {
            Some(name) => vec![name.as_str()],
            None => vec!["reference", "translation"],
        };

        let missing = |what: &str| format!("input has no {what} column; headers: {headers:?}");
        Ok(Columns {
            source: Some(
                find_column(headers, &[self.source_column.as_str()])
                    .ok_or_else(|| missing(&self.source_column))?,
            ),
            target: Some(
                find_column(headers, &target_names)
                    .ok_or_else(|| missing(&target_names.join(" or ")))?,
            ),
            language: Some(
                find_column(headers, &[self.language_column.as_str()])
                    .ok_or_else(|| missing(&self.language_column))?,
            ),
        })
    }
}

/// Write the report as an aligned table.
fn write_report(
    writer: &mut dyn Write,
    report: &LearningReport,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "{:<10} {:<24} {:>8} {:>10} {:>10}  status",
        "language", "name", "samples", "word_ratio", "char_ratio"
    )?;
    let rows = report
        .accepted
        .iter()
        .map(|e| (e, "accepted"))
        .chain(report.insufficient.iter().map(|e| (e, "insufficient")))
        .chain(report.unusable.iter().map(|e| (e, "unusable")));
    for (entry, status) in rows {
        write_entry(writer, entry, status)?;
    }
    Ok(())
}

fn write_entry(
    writer: &mut dyn Write,
    entry: &RatioEntry,
    status: &str,
) -> std::io::Result<()> {
    writeln!(
        writer,
        "{:<10} {:<24} {:>8} {:>10.4} {:>10.4}  {status}",
        entry.language_code,
        language_name(&entry.language_code).unwrap_or("-"),
        entry.sample_size,
        entry.word_ratio,
        entry.char_ratio,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordscale::learning::{LearningSample, learn};

    #[test]
    fn test_write_report() {
        let mut corpus: Vec<LearningSample> = (0..10)
            .map(|_| LearningSample::new("Hello world", "Bonjour le monde", "fr"))
            .collect();
        corpus.push(LearningSample::new("Hello world", "Hallo Welt", "de"));
        corpus.push(LearningSample::new("Thumbs up", "\u{1f44d}", "em"));

        let report = learn(&corpus, 10);
        let mut out = Vec::new();
        write_report(&mut out, &report).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("fr         French"));
        assert!(lines[1].ends_with("accepted"));
        assert!(lines[2].starts_with("de         German"));
        assert!(lines[2].ends_with("insufficient"));
        assert!(lines[3].starts_with("em         -"));
        assert!(lines[3].ends_with("unusable"));
    }
}
