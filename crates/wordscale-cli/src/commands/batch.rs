use std::io::Write;

use wordscale::batch::{
    AUGMENTED_COLUMNS,
    AugmentedRow,
    BatchOptions,
    BatchPipeline,
    DEFAULT_PROGRESS_EVERY,
    MeasureEstimateAugmenter,
    RowAugmenter,
};
use wordscale::estimate::Estimator;
use wordscale::measure::TextMeasurer;
use wordscale::rayon::{DEFAULT_CHUNK_SIZE, ParallelBatchPipeline};

use crate::{
    csv_rows::{Columns, CsvRow, find_column},
    data_dir::DataDirArgs,
    input_output::{InputArgs, OutputArgs},
    progress::SpinnerProgress,
};

/// Args for the batch command.
#[derive(clap::Args, Debug)]
pub struct BatchArgs {
    /// The English source text column.
    #[arg(long, default_value = "source")]
    source_column: String,

    /// The target language column.
    #[arg(long, default_value = "target_lang")]
    language_column: String,

    /// Use this target language for every row, ignoring the language column.
    #[arg(long, default_value = None)]
    language: Option<String>,

    /// Report progress every this many rows.
    #[arg(long, default_value_t = DEFAULT_PROGRESS_EVERY)]
    progress_every: usize,

    /// Augment rows in parallel chunks of this size; 0 runs sequentially.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

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

/// Row counts from a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct BatchStats {
    written: usize,
    unreadable: usize,
}

impl BatchArgs {
    /// Run the batch command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let store = self.data_dir.open_store()?;
        let augmenter = MeasureEstimateAugmenter::new(TextMeasurer::new(), Estimator::new(&store));

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(self.input.open_reader()?);
        let headers = rdr.headers()?.clone();
        let columns = self.columns(&headers)?;

        let mut wtr = csv::Writer::from_writer(self.output.open_writer()?);
        let mut out_headers = headers.clone();
        out_headers.extend(AUGMENTED_COLUMNS);
        wtr.write_record(&out_headers)?;

        let rows = rdr
            .into_records()
            .map(move |record| record.map(|record| CsvRow::new(record, columns)));

        let stats = match &self.language {
            Some(language) => {
                let augmenter = |source: Option<&str>, _: Option<&str>| {
                    augmenter.augment(source, Some(language.as_str()))
                };
                self.drive(rows, augmenter, headers.len(), &mut wtr)?
            }
            None => self.drive(rows, augmenter, headers.len(), &mut wtr)?,
        };
        wtr.flush()?;

        if stats.unreadable > 0 {
            log::warn!("skipped {} unreadable rows", stats.unreadable);
        }
        log::info!("wrote {} rows from {}", stats.written, self.input.name());
        Ok(())
    }

    fn columns(
        &self,
        headers: &csv::StringRecord,
    ) -> Result<Columns, Box<dyn std::error::Error>> {
        let source = find_column(headers, &[self.source_column.as_str()]).ok_or_else(|| {
            format!(
                "input has no {:?} column; headers: {headers:?}",
                self.source_column
            )
        })?;
        let language = find_column(headers, &[self.language_column.as_str()]);
        if language.is_none() && self.language.is_none() {
            log::warn!(
                "input has no {:?} column; using the default ratios",
                self.language_column
            );
        }
        Ok(Columns {
            source: Some(source),
            target: None,
            language,
        })
    }

    fn drive<I, A, W>(
        &self,
        rows: I,
        augmenter: A,
        width: usize,
        wtr: &mut csv::Writer<W>,
    ) -> Result<BatchStats, Box<dyn std::error::Error>>
    where
        I: Iterator<Item = Result<CsvRow, csv::Error>>,
        A: RowAugmenter + Sync,
        W: Write,
    {
        let options = BatchOptions::default().with_progress_every(self.progress_every);
        let progress = SpinnerProgress::new("batch", self.no_progress);

        if self.chunk_size == 0 {
            let rows = BatchPipeline::new(options)
                .with_progress(progress)
                .process(rows, augmenter);
            write_rows(rows, width, wtr)
        } else {
            let rows = ParallelBatchPipeline::new(options, self.chunk_size)
                .with_progress(progress)
                .process(rows, augmenter);
            write_rows(rows, width, wtr)
        }
    }
}

/// Pad or truncate a record to the header width.
fn fit_record(
    record: &csv::StringRecord,
    width: usize,
) -> csv::StringRecord {
    let mut fitted: csv::StringRecord = record.iter().take(width).collect();
    while fitted.len() < width {
        fitted.push_field("");
    }
    fitted
}

fn write_rows<I, W>(
    rows: I,
    width: usize,
    wtr: &mut csv::Writer<W>,
) -> Result<BatchStats, Box<dyn std::error::Error>>
where
    I: Iterator<Item = Result<AugmentedRow<CsvRow>, csv::Error>>,
    W: Write,
{
    let mut stats = BatchStats::default();
    for row in rows {
        match row {
            Ok(AugmentedRow { row, augmentation }) => {
                if row.record.len() != width {
                    log::warn!(
                        "row {} has {} fields, expected {width}",
                        stats.written + stats.unreadable + 1,
                        row.record.len()
                    );
                }
                let mut record = fit_record(&row.record, width);
                record.extend(augmentation.to_fields());
                wtr.write_record(&record)?;
                stats.written += 1;
            }
            Err(err) => {
                log::warn!("skipping unreadable row: {err}");
                stats.unreadable += 1;
            }
        }
    }
    Ok(stats)
}
