//! # Estimation
//!
//! Applies a [`crate::ratios::RatioStore`] ratio to an English count, and
//! records which ratio was used.
//!
//! ## Example
//!
//! ```rust
//! use wordscale::{Metric, estimate::Estimator, ratios::RatioStore};
//!
//! let store = RatioStore::in_memory();
//! let estimator = Estimator::new(&store);
//!
//! let result = estimator.estimate(1000, "fr", Metric::Word);
//! assert_eq!(result.estimated_count, 1659);
//! assert!(!result.used_fallback());
//!
//! assert!(estimator.estimate(1000, "tlh", Metric::Word).used_fallback());
//! ```

pub mod estimator;

#[doc(inline)]
pub use estimator::{EstimationResult, Estimator, TextEstimate, scale_count};
