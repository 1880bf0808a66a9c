//! # Ratio Learning
//!
//! Derives per-language ratios from bilingual data.
//!
//! * [`RatioLearner`] - incremental learner over [`CorpusRow`]s.
//! * [`LearningReport`] - accepted and low-confidence ratios.
//! * [`learn`] - the one-shot form.
//!
//! ## Example
//!
//! ```rust
//! use wordscale::learning::{LearningSample, learn};
//!
//! let corpus: Vec<LearningSample> = (0..10)
//!     .map(|_| LearningSample::new("Hello world", "Bonjour le monde", "fr"))
//!     .collect();
//!
//! let report = learn(&corpus, 10);
//! assert_eq!(report.accepted[0].word_ratio, 1.5);
//! ```

pub mod learning_report;
pub mod ratio_learner;

#[doc(inline)]
pub use learning_report::LearningReport;
#[doc(inline)]
pub use ratio_learner::{
    CorpusRow,
    DEFAULT_LOG_EVERY,
    DEFAULT_MIN_SAMPLE_SIZE,
    LanguageTotals,
    LearningSample,
    RatioLearner,
    RatioLearnerOptions,
    learn,
};
