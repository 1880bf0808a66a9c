//! # Estimator

use crate::measure::{MeasuredText, TextMeasurer};
use crate::ratios::RatioStore;
use crate::types::{Metric, RatioSource, normalize_language_code};

/// An estimate, and the ratio it was made with.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    /// The English count.
    pub source_count: u64,

    /// The normalized target language code, as requested.
    pub target_language: String,

    /// The metric estimated.
    pub metric: Metric,

    /// The ratio applied.
    pub ratio_used: f64,

    /// Where the ratio came from.
    pub ratio_provenance: RatioSource,

    /// Samples behind the ratio; 0 for built-in ratios.
    pub sample_size: u64,

    /// The estimated target count.
    pub estimated_count: u64,

    /// Was the default ratio used, for lack of a language-specific one?
    pub fallback: bool,
}

impl EstimationResult {
    /// Was the default ratio used?
    pub fn used_fallback(&self) -> bool {
        self.fallback
    }
}

/// Word and character estimates for one text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEstimate {
    /// The source measurement.
    pub measured: MeasuredText,

    /// The word estimate.
    pub words: EstimationResult,

    /// The character estimate.
    pub chars: EstimationResult,
}

/// Apply a ratio to a count, rounding half-up.
pub fn scale_count(
    count: u64,
    ratio: f64,
) -> u64 {
    (count as f64 * ratio).round() as u64
}

/// Estimates target-language counts from English counts.
///
/// Ratios are read from the store at call time.
#[derive(Debug, Clone, Copy)]
pub struct Estimator<'a> {
    store: &'a RatioStore,
}

impl<'a> Estimator<'a> {
    /// An estimator over a store.
    pub fn new(store: &'a RatioStore) -> Self {
        Self { store }
    }

    /// The store.
    pub fn store(&self) -> &'a RatioStore {
        self.store
    }

    /// Estimate a target count.
    ///
    /// Unknown languages use the default ratio; see
    /// [`EstimationResult::used_fallback`].
    pub fn estimate(
        &self,
        count: u64,
        language_code: &str,
        metric: Metric,
    ) -> EstimationResult {
        let target_language = normalize_language_code(language_code);
        let entry = self.store.get(&target_language, metric);
        let ratio_used = entry.ratio(metric);
        EstimationResult {
            source_count: count,
            fallback: !self.store.has_ratio(&target_language, metric),
            target_language,
            metric,
            ratio_used,
            ratio_provenance: entry.source,
            sample_size: entry.sample_size,
            estimated_count: scale_count(count, ratio_used),
        }
    }

    /// Measure a text, and estimate both metrics.
    pub fn estimate_text(
        &self,
        measurer: &TextMeasurer,
        text: &str,
        language_code: &str,
    ) -> TextEstimate {
        let measured = measurer.measure(text);
        TextEstimate {
            measured,
            words: self.estimate(measured.word_count, language_code, Metric::Word),
            chars: self.estimate(measured.char_count, language_code, Metric::Char),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::DEFAULT_WORD_RATIO;

    #[test]
    fn test_estimate_learned() {
        let store = RatioStore::in_memory();
        store
            .set("fr", Metric::Word, 1.4429, 19000, RatioSource::Learned)
            .unwrap();
        let estimator = Estimator::new(&store);

        let result = estimator.estimate(1000, "FR", Metric::Word);
        assert_eq!(result.estimated_count, 1443);
        assert_eq!(result.ratio_used, 1.4429);
        assert_eq!(result.ratio_provenance, RatioSource::Learned);
        assert_eq!(result.sample_size, 19000);
        assert_eq!(result.target_language, "fr");
        assert!(!result.used_fallback());
    }

    #[test]
    fn test_estimate_fallback() {
        let store = RatioStore::in_memory();
        let result = Estimator::new(&store).estimate(100, "zz", Metric::Word);
        assert_eq!(result.ratio_used, DEFAULT_WORD_RATIO);
        assert_eq!(result.estimated_count, 115);
        assert_eq!(result.ratio_provenance, RatioSource::BuiltIn);
        assert_eq!(result.target_language, "zz");
        assert!(result.used_fallback());
    }

    #[test]
    fn test_fallback_is_per_language_and_metric() {
        let store = RatioStore::in_memory();
        let estimator = Estimator::new(&store);

        // A language literally coded "default" is an ordinary language.
        assert!(estimator.estimate(10, "default", Metric::Word).used_fallback());
        store
            .set("default", Metric::Word, 2.0, 0, RatioSource::UserSupplied)
            .unwrap();
        let result = estimator.estimate(10, "default", Metric::Word);
        assert_eq!(result.estimated_count, 20);
        assert_eq!(result.ratio_provenance, RatioSource::UserSupplied);
        assert!(!result.used_fallback());
        assert!(estimator.estimate(10, "default", Metric::Char).used_fallback());

        store
            .set("eo", Metric::Char, 1.05, 0, RatioSource::UserSupplied)
            .unwrap();
        assert!(!estimator.estimate(100, "eo", Metric::Char).used_fallback());
        let words = estimator.estimate(100, "eo", Metric::Word);
        assert!(words.used_fallback());
        assert_eq!(words.ratio_used, DEFAULT_WORD_RATIO);
    }

    #[test]
    fn test_zero_and_rounding() {
        let store = RatioStore::in_memory();
        let estimator = Estimator::new(&store);
        assert_eq!(estimator.estimate(0, "ja", Metric::Char).estimated_count, 0);

        assert_eq!(scale_count(1, 0.5), 1);
        assert_eq!(scale_count(3, 0.5), 2);
        assert_eq!(scale_count(1, 0.49), 0);
        assert_eq!(scale_count(0, 1e9), 0);
    }

    #[test]
    fn test_estimate_text() {
        let store = RatioStore::in_memory();
        let estimate = Estimator::new(&store).estimate_text(
            &TextMeasurer::new(),
            "Hello, world!",
            "de",
        );
        assert_eq!(estimate.measured.word_count, 2);
        assert_eq!(estimate.measured.char_count, 13);
        assert_eq!(estimate.words.estimated_count, 2);
        assert_eq!(estimate.chars.estimated_count, 16);
        assert_eq!(estimate.chars.ratio_used, 1.2525);
    }
}
