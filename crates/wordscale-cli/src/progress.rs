use indicatif::ProgressBar;
use wordscale::batch::ProgressSink;

/// Shows row progress on a terminal spinner.
#[derive(Debug)]
pub struct SpinnerProgress {
    bar: ProgressBar,
    label: &'static str,
}

impl SpinnerProgress {
    /// A spinner; `hidden` suppresses all drawing.
    pub fn new(
        label: &'static str,
        hidden: bool,
    ) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        bar.set_message(format!("{label}: starting"));
        bar.tick();
        Self { bar, label }
    }
}

impl ProgressSink for SpinnerProgress {
    fn on_progress(
        &mut self,
        rows: usize,
    ) {
        self.bar.set_message(format!("{}: {rows} rows", self.label));
        self.bar.tick();
    }

    fn on_finish(
        &mut self,
        rows: usize,
    ) {
        self.bar
            .finish_with_message(format!("{}: {rows} rows, done", self.label));
    }
}
