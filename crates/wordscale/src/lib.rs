//! # `wordscale` Translation Length Estimator
//!
//! Estimates how long a translation will be, from the English source.
//!
//! Word and character counts are measured deterministically across
//! scripts, and scaled by per-language expansion ratios; ratios are
//! built-in, user-supplied, or learned from bilingual data.
//!
//! See:
//! * [`measure`] to count words and characters.
//! * [`ratios`] to manage per-language ratios.
//! * [`estimate`] to estimate target counts.
//! * [`learning`] to learn ratios from a bilingual corpus.
//! * [`batch`] to augment tabular data with estimates.
//! * [`io`] to read and write ratio files.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``rayon``
//!
//! #### feature: ``rayon``
//!
//! This enables a chunked parallel batch pipeline using the ``rayon`` crate.
//!
//! ## Estimating
//!
//! ```rust
//! use wordscale::estimate::Estimator;
//! use wordscale::measure::TextMeasurer;
//! use wordscale::ratios::RatioStore;
//!
//! let store = RatioStore::in_memory();
//! let estimator = Estimator::new(&store);
//!
//! let estimate = estimator.estimate_text(
//!     &TextMeasurer::new(),
//!     "The quick brown fox jumps over the lazy dog.",
//!     "fr",
//! );
//! assert_eq!(estimate.measured.word_count, 9);
//! assert_eq!(estimate.words.estimated_count, 15);
//! ```
#![warn(missing_docs, unused)]

#[cfg(feature = "rayon")]
pub mod rayon;

pub mod batch;
pub mod errors;
pub mod estimate;
pub mod io;
pub mod learning;
pub mod measure;
pub mod ratios;
pub mod regex;
pub mod types;

#[doc(inline)]
pub use errors::{Rejection, WSResult, WordscaleError};
#[doc(inline)]
pub use types::{Metric, RatioSource, normalize_language_code};
