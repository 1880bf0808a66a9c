//! # Batch Augmentation
//!
//! Streams tabular rows through a measure-and-estimate step, appending
//! the six [`AUGMENTED_COLUMNS`] to each row.
//!
//! * [`BatchPipeline`] - the sequential, streaming pipeline.
//! * [`RowAugmenter`] - computes the appended fields.
//!   * [`MeasureEstimateAugmenter`] - [`crate::measure::TextMeasurer`] + [`crate::estimate::Estimator`].
//! * [`ProgressSink`] - receives progress signals.
//!
//! See `wordscale::rayon` for the chunked parallel pipeline.

pub mod augment;
pub mod batch_pipeline;
pub mod progress;

#[doc(inline)]
pub use augment::{
    AUGMENTED_COLUMNS,
    Augmentation,
    AugmentedRow,
    BatchRecord,
    MeasureEstimateAugmenter,
    RowAugmenter,
};
#[doc(inline)]
pub use batch_pipeline::{BatchIter, BatchOptions, BatchPipeline};
#[doc(inline)]
pub use progress::{DEFAULT_PROGRESS_EVERY, LogProgress, NoProgress, ProgressCounter, ProgressSink};
