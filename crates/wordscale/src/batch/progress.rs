//! # Batch Progress

/// The default progress cadence, in rows.
pub const DEFAULT_PROGRESS_EVERY: usize = 50_000;

/// Receives batch progress signals.
pub trait ProgressSink {
    /// Called every `progress_every` rows, with the rows processed so far.
    fn on_progress(
        &mut self,
        rows: usize,
    );

    /// Called once, when the input is exhausted.
    fn on_finish(
        &mut self,
        rows: usize,
    ) {
        let _ = rows;
    }
}

/// Ignores progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(
        &mut self,
        _rows: usize,
    ) {
    }
}

/// Logs progress with [`log::info!`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_progress(
        &mut self,
        rows: usize,
    ) {
        log::info!("processed {rows} rows");
    }

    fn on_finish(
        &mut self,
        rows: usize,
    ) {
        log::info!("finished: {rows} rows");
    }
}

impl<P: ProgressSink + ?Sized> ProgressSink for &mut P {
    fn on_progress(
        &mut self,
        rows: usize,
    ) {
        (**self).on_progress(rows)
    }

    fn on_finish(
        &mut self,
        rows: usize,
    ) {
        (**self).on_finish(rows)
    }
}

/// Counts rows, and signals a [`ProgressSink`] at a fixed cadence.
#[derive(Debug)]
pub struct ProgressCounter<P> {
    sink: P,
    every: usize,
    rows: usize,
    finished: bool,
}

impl<P> ProgressCounter<P> {
    /// Rows counted so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Release the sink.
    pub fn into_sink(self) -> P {
        self.sink
    }
}

impl<P: ProgressSink> ProgressCounter<P> {
    /// A counter; an `every` of 0 disables periodic signals.
    pub fn new(
        sink: P,
        every: usize,
    ) -> Self {
        Self {
            sink,
            every,
            rows: 0,
            finished: false,
        }
    }

    /// Count one row.
    pub fn tick(&mut self) {
        self.rows += 1;
        if self.every > 0 && self.rows % self.every == 0 {
            self.sink.on_progress(self.rows);
        }
    }

    /// Signal the end of input; only the first call signals.
    pub fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            self.sink.on_finish(self.rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        progress: Vec<usize>,
        finished: Vec<usize>,
    }

    impl ProgressSink for Recorder {
        fn on_progress(
            &mut self,
            rows: usize,
        ) {
            self.progress.push(rows);
        }

        fn on_finish(
            &mut self,
            rows: usize,
        ) {
            self.finished.push(rows);
        }
    }

    #[test]
    fn test_cadence() {
        let mut counter = ProgressCounter::new(Recorder::default(), 3);
        for _ in 0..7 {
            counter.tick();
        }
        counter.finish();
        counter.finish();
        assert_eq!(counter.rows(), 7);

        let recorder = counter.into_sink();
        assert_eq!(recorder.progress, vec![3, 6]);
        assert_eq!(recorder.finished, vec![7]);
    }

    #[test]
    fn test_disabled() {
        let mut recorder = Recorder::default();
        let mut counter = ProgressCounter::new(&mut recorder, 0);
        counter.tick();
        counter.finish();
        assert!(recorder.progress.is_empty());
        assert_eq!(recorder.finished, vec![1]);
    }
}
