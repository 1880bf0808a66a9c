//! # Learning Report

use crate::errors::Rejection;
use crate::ratios::{RatioEntry, RatioUpdate};
use crate::types::{Metric, RatioSource};

/// The outcome of a learning pass.
///
/// Entries are ordered by descending sample size, then language code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LearningReport {
    /// The minimum sample size the pass was run with.
    pub min_sample_size: u64,

    /// Languages with at least `min_sample_size` samples.
    pub accepted: Vec<RatioEntry>,

    /// Languages below the threshold; never applied unless asked for.
    pub insufficient: Vec<RatioEntry>,

    /// Corpus rows seen.
    pub rows_seen: usize,

    /// Languages with a zero target total for a metric; never applied.
    pub unusable: Vec<RatioEntry>,

    /// Rows lacking source text, target text or language.
    pub skipped_rows: usize,

    /// Well-formed rows whose source measured zero words or characters.
    pub zero_source_rows: usize,
}

impl LearningReport {
    /// Find the learned entry for a (normalized) language code.
    pub fn get(
        &self,
        language_code: &str,
    ) -> Option<&RatioEntry> {
        self.accepted
            .iter()
            .chain(self.insufficient.iter())
            .chain(self.unusable.iter())
            .find(|e| e.language_code == language_code)
    }

    /// Total samples across all languages.
    pub fn total_samples(&self) -> u64 {
        self.accepted
            .iter()
            .chain(self.insufficient.iter())
            .chain(self.unusable.iter())
            .map(|e| e.sample_size)
            .sum()
    }

    /// The insufficient languages, as rejections.
    pub fn rejections(&self) -> Vec<Rejection> {
        self.insufficient
            .iter()
            .map(|e| Rejection::InsufficientSample {
                language: e.language_code.clone(),
                samples: e.sample_size,
                required: self.min_sample_size,
            })
            .collect()
    }

    /// Convert to store updates, one per language and metric.
    ///
    /// ## Arguments
    /// * `include_low_confidence` - also include languages below the threshold.
    pub fn to_updates(
        &self,
        include_low_confidence: bool,
    ) -> Vec<RatioUpdate> {
        let entries = self.accepted.iter().chain(
            self.insufficient
                .iter()
                .filter(move |_| include_low_confidence),
        );
        entries
            .flat_map(|e| {
                [Metric::Word, Metric::Char].map(|metric| RatioUpdate {
                    language_code: e.language_code.clone(),
                    metric,
                    value: e.ratio(metric),
                    sample_size: e.sample_size,
                    source: RatioSource::Learned,
                })
            })
            .collect()
    }
}
