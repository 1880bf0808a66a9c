//! # Ratio Entries

use crate::errors::Rejection;
use crate::types::{Metric, RatioSource};

/// A resolved view of one language's ratios.
///
/// Both ratios are always resolved; `sample_size` and `source` describe
/// the metric the entry was requested for.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioEntry {
    /// The normalized language code.
    pub language_code: String,

    /// Target words per source word.
    pub word_ratio: f64,

    /// Target characters per source character.
    pub char_ratio: f64,

    /// Number of samples behind the requested ratio; 0 for built-in values.
    pub sample_size: u64,

    /// Where the requested ratio came from.
    pub source: RatioSource,
}

impl RatioEntry {
    /// The ratio for a metric.
    pub fn ratio(
        &self,
        metric: Metric,
    ) -> f64 {
        match metric {
            Metric::Word => self.word_ratio,
            Metric::Char => self.char_ratio,
        }
    }
}

/// A ratio override for a single language and metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioOverride {
    /// The ratio value.
    pub value: f64,

    /// Number of samples behind the value.
    pub sample_size: u64,

    /// Where the value came from; never [`RatioSource::BuiltIn`].
    pub source: RatioSource,
}

/// One per-metric mutation; the unit of [`crate::ratios::RatioStore::bulk_set`].
#[derive(Debug, Clone, PartialEq)]
pub struct RatioUpdate {
    /// The language code; normalized on application.
    pub language_code: String,

    /// The metric to update.
    pub metric: Metric,

    /// The new ratio.
    pub value: f64,

    /// Number of samples behind the value.
    pub sample_size: u64,

    /// Where the value came from.
    pub source: RatioSource,
}

impl RatioUpdate {
    /// A user-supplied update, with no sample count.
    pub fn user(
        language_code: &str,
        metric: Metric,
        value: f64,
    ) -> Self {
        Self {
            language_code: language_code.to_string(),
            metric,
            value,
            sample_size: 0,
            source: RatioSource::UserSupplied,
        }
    }
}

/// The outcome of a bulk update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkUpdateReport {
    /// Entries whose value differs from before.
    pub changed: usize,

    /// Updates that were not applied.
    pub rejected: Vec<Rejection>,
}

impl BulkUpdateReport {
    /// Were all updates applied?
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}
