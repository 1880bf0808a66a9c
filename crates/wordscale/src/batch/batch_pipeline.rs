//! # Batch Pipeline

use core::convert::Infallible;

use crate::batch::augment::{AugmentedRow, BatchRecord, RowAugmenter};
use crate::batch::progress::{DEFAULT_PROGRESS_EVERY, NoProgress, ProgressCounter, ProgressSink};

/// Options for batch processing.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Signal progress every this many rows; 0 disables periodic signals.
    pub progress_every: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

impl BatchOptions {
    /// Set the progress cadence.
    pub fn with_progress_every(
        self,
        progress_every: usize,
    ) -> Self {
        Self { progress_every }
    }
}

/// Streams rows through a [`RowAugmenter`].
///
/// Rows are pulled one at a time; nothing is buffered.
#[derive(Debug, Clone, Default)]
pub struct BatchPipeline<P = NoProgress> {
    options: BatchOptions,
    progress: P,
}

impl BatchPipeline<NoProgress> {
    /// A pipeline with no progress sink.
    pub fn new(options: BatchOptions) -> Self {
        Self {
            options,
            progress: NoProgress,
        }
    }
}

impl<P: ProgressSink> BatchPipeline<P> {
    /// Replace the progress sink.
    pub fn with_progress<Q: ProgressSink>(
        self,
        progress: Q,
    ) -> BatchPipeline<Q> {
        BatchPipeline {
            options: self.options,
            progress,
        }
    }

    /// The options.
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Augment a stream of rows.
    ///
    /// Upstream errors are passed through in place, and do not stop the
    /// stream; the caller decides whether to continue.
    pub fn process<I, R, E, A>(
        self,
        rows: I,
        augmenter: A,
    ) -> BatchIter<I::IntoIter, A, P>
    where
        I: IntoIterator<Item = Result<R, E>>,
        R: BatchRecord,
        A: RowAugmenter,
    {
        BatchIter {
            rows: rows.into_iter(),
            augmenter,
            counter: ProgressCounter::new(self.progress, self.options.progress_every),
        }
    }

    /// Augment a stream of infallible rows.
    pub fn process_rows<I, R, A>(
        self,
        rows: I,
        augmenter: A,
    ) -> impl Iterator<Item = AugmentedRow<R>>
    where
        I: IntoIterator<Item = R>,
        R: BatchRecord,
        A: RowAugmenter,
    {
        self.process(rows.into_iter().map(Ok::<R, Infallible>), augmenter)
            .map(|row| match row {
                Ok(row) => row,
                Err(never) => match never {},
            })
    }
}

/// The iterator returned by [`BatchPipeline::process`].
#[derive(Debug)]
pub struct BatchIter<I, A, P> {
    rows: I,
    augmenter: A,
    counter: ProgressCounter<P>,
}

impl<I, A, P> BatchIter<I, A, P> {
    /// Rows augmented so far.
    pub fn rows_processed(&self) -> usize {
        self.counter.rows()
    }
}

impl<I, R, E, A, P> Iterator for BatchIter<I, A, P>
where
    I: Iterator<Item = Result<R, E>>,
    R: BatchRecord,
    A: RowAugmenter,
    P: ProgressSink,
{
    type Item = Result<AugmentedRow<R>, E>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.rows.next() {
            Some(Ok(row)) => {
                let row = self.augmenter.augment_row(row);
                self.counter.tick();
                Some(Ok(row))
            }
            Some(Err(err)) => Some(Err(err)),
            None => {
                self.counter.finish();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::augment::{Augmentation, MeasureEstimateAugmenter};
    use crate::estimate::Estimator;
    use crate::measure::TextMeasurer;
    use crate::ratios::RatioStore;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        source: Option<String>,
        lang: Option<String>,
    }

    impl BatchRecord for Row {
        fn source_text(&self) -> Option<&str> {
            self.source.as_deref()
        }

        fn target_language(&self) -> Option<&str> {
            self.lang.as_deref()
        }
    }

    fn row(
        id: u32,
        source: &str,
        lang: &str,
    ) -> Row {
        Row {
            id,
            source: Some(source.to_string()),
            lang: Some(lang.to_string()),
        }
    }

    #[derive(Debug, Default)]
    struct Recorder(Vec<usize>, Vec<usize>);

    impl ProgressSink for Recorder {
        fn on_progress(
            &mut self,
            rows: usize,
        ) {
            self.0.push(rows);
        }

        fn on_finish(
            &mut self,
            rows: usize,
        ) {
            self.1.push(rows);
        }
    }

    #[test]
    fn test_process_rows() {
        let store = RatioStore::in_memory();
        let augmenter = MeasureEstimateAugmenter::new(TextMeasurer::new(), Estimator::new(&store));

        let rows = vec![row(1, "Hello world", "de"), row(2, "", "de"), row(3, "Hi", "zz")];
        let out: Vec<_> = BatchPipeline::new(BatchOptions::default())
            .process_rows(rows.clone(), augmenter)
            .collect();

        assert_eq!(out.len(), 3);
        for (input, output) in rows.iter().zip(&out) {
            assert_eq!(&output.row, input);
        }
        assert_eq!(out[0].augmentation.source_word_count, 2);
        assert_eq!(out[1].augmentation.source_word_count, 0);
        assert_eq!(out[1].augmentation.estimation_ratio, 1.15);
        assert_eq!(out[2].augmentation.estimation_ratio, 1.15);
    }

    #[test]
    fn test_errors_pass_through() {
        let rows: Vec<Result<Row, String>> = vec![
            Ok(row(1, "a", "fr")),
            Err("bad row".to_string()),
            Ok(row(3, "b", "fr")),
        ];
        let augmenter = |_: Option<&str>, _: Option<&str>| Augmentation::default();

        let mut recorder = Recorder::default();
        let out: Vec<_> = BatchPipeline::new(BatchOptions::default().with_progress_every(1))
            .with_progress(&mut recorder)
            .process(rows, augmenter)
            .collect();

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].as_ref().unwrap().row.id, 1);
        assert_eq!(out[1].as_ref().unwrap_err(), "bad row");
        assert_eq!(out[2].as_ref().unwrap().row.id, 3);
        assert_eq!(recorder.0, vec![1, 2]);
        assert_eq!(recorder.1, vec![2]);
    }

    #[test]
    fn test_lazy() {
        let augmenter = |_: Option<&str>, _: Option<&str>| Augmentation::default();
        let endless = (0..).map(|id| Ok::<_, Infallible>(row(id, "x", "fr")));
        let mut iter = BatchPipeline::new(BatchOptions::default()).process(endless, augmenter);
        assert_eq!(iter.nth(9).unwrap().unwrap().row.id, 9);
        assert_eq!(iter.rows_processed(), 10);
    }
}
