//! # Row Augmentation

use crate::estimate::Estimator;
use crate::measure::TextMeasurer;
use crate::types::Metric;

/// The appended column names, in order.
pub const AUGMENTED_COLUMNS: [&str; 6] = [
    "source_word_count",
    "estimated_target_words",
    "estimation_ratio",
    "source_char_count",
    "estimated_target_chars",
    "char_estimation_ratio",
];

/// A row of a batch.
pub trait BatchRecord {
    /// The English source text, if present.
    fn source_text(&self) -> Option<&str>;

    /// The target language code, if present.
    fn target_language(&self) -> Option<&str>;
}

impl<T: BatchRecord> BatchRecord for &T {
    fn source_text(&self) -> Option<&str> {
        (**self).source_text()
    }

    fn target_language(&self) -> Option<&str> {
        (**self).target_language()
    }
}

/// The six fields appended to each row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Augmentation {
    /// Words in the source text.
    pub source_word_count: u64,

    /// Estimated words in the translation.
    pub estimated_target_words: u64,

    /// The word ratio used.
    pub estimation_ratio: f64,

    /// Characters in the source text.
    pub source_char_count: u64,

    /// Estimated characters in the translation.
    pub estimated_target_chars: u64,

    /// The character ratio used.
    pub char_estimation_ratio: f64,
}

impl Augmentation {
    /// The fields as text, in [`AUGMENTED_COLUMNS`] order.
    ///
    /// Ratios are rendered with four decimals.
    pub fn to_fields(&self) -> [String; 6] {
        [
            self.source_word_count.to_string(),
            self.estimated_target_words.to_string(),
            format!("{:.4}", self.estimation_ratio),
            self.source_char_count.to_string(),
            self.estimated_target_chars.to_string(),
            format!("{:.4}", self.char_estimation_ratio),
        ]
    }
}

/// An input row, and its appended fields.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedRow<R> {
    /// The input row, unchanged.
    pub row: R,

    /// The appended fields.
    pub augmentation: Augmentation,
}

/// Computes the appended fields for a row.
///
/// Implementations must not fail; bad input maps to zero counts.
pub trait RowAugmenter {
    /// Compute the appended fields.
    fn augment(
        &self,
        source_text: Option<&str>,
        target_language: Option<&str>,
    ) -> Augmentation;

    /// Augment a row.
    fn augment_row<R: BatchRecord>(
        &self,
        row: R,
    ) -> AugmentedRow<R> {
        let augmentation = self.augment(row.source_text(), row.target_language());
        AugmentedRow { row, augmentation }
    }
}

impl<F> RowAugmenter for F
where
    F: Fn(Option<&str>, Option<&str>) -> Augmentation,
{
    fn augment(
        &self,
        source_text: Option<&str>,
        target_language: Option<&str>,
    ) -> Augmentation {
        self(source_text, target_language)
    }
}

/// Measures the source text, and estimates both metrics.
#[derive(Debug, Clone)]
pub struct MeasureEstimateAugmenter<'a> {
    measurer: TextMeasurer,
    estimator: Estimator<'a>,
}

impl<'a> MeasureEstimateAugmenter<'a> {
    /// Build an augmenter.
    pub fn new(
        measurer: TextMeasurer,
        estimator: Estimator<'a>,
    ) -> Self {
        Self {
            measurer,
            estimator,
        }
    }
}

impl RowAugmenter for MeasureEstimateAugmenter<'_> {
    fn augment(
        &self,
        source_text: Option<&str>,
        target_language: Option<&str>,
    ) -> Augmentation {
        let measured = match source_text {
            Some(text) if !text.trim().is_empty() => self.measurer.measure(text),
            _ => {
                let default = self.estimator.store().default_entry();
                return Augmentation {
                    estimation_ratio: default.word_ratio,
                    char_estimation_ratio: default.char_ratio,
                    ..Default::default()
                };
            }
        };

        let language = target_language.unwrap_or_default();
        let words = self
            .estimator
            .estimate(measured.word_count, language, Metric::Word);
        let chars = self
            .estimator
            .estimate(measured.char_count, language, Metric::Char);
        Augmentation {
            source_word_count: measured.word_count,
            estimated_target_words: words.estimated_count,
            estimation_ratio: words.ratio_used,
            source_char_count: measured.char_count,
            estimated_target_chars: chars.estimated_count,
            char_estimation_ratio: chars.ratio_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::{DEFAULT_CHAR_RATIO, DEFAULT_WORD_RATIO, RatioStore};

    #[test]
    fn test_augment() {
        let store = RatioStore::in_memory();
        let augmenter = MeasureEstimateAugmenter::new(TextMeasurer::new(), Estimator::new(&store));

        let aug = augmenter.augment(Some("Hello big world"), Some("fr"));
        assert_eq!(aug, Augmentation {
            source_word_count: 3,
            estimated_target_words: 5,
            estimation_ratio: 1.6593,
            source_char_count: 15,
            estimated_target_chars: 23,
            char_estimation_ratio: 1.5039,
        });
        assert_eq!(aug.to_fields(), [
            "3", "5", "1.6593", "15", "23", "1.5039"
        ]);
    }

    #[test]
    fn test_augment_fallbacks() {
        let store = RatioStore::in_memory();
        let augmenter = MeasureEstimateAugmenter::new(TextMeasurer::new(), Estimator::new(&store));

        let empty = Augmentation {
            estimation_ratio: DEFAULT_WORD_RATIO,
            char_estimation_ratio: DEFAULT_CHAR_RATIO,
            ..Default::default()
        };
        assert_eq!(augmenter.augment(None, Some("fr")), empty);
        assert_eq!(augmenter.augment(Some("  "), Some("fr")), empty);
        assert_eq!(empty.to_fields()[2], "1.1500");

        let unknown = augmenter.augment(Some("one two"), None);
        assert_eq!(unknown.source_word_count, 2);
        assert_eq!(unknown.estimation_ratio, DEFAULT_WORD_RATIO);
        assert_eq!(unknown.char_estimation_ratio, DEFAULT_CHAR_RATIO);
    }

    #[test]
    fn test_closure_augmenter() {
        let augmenter = |source: Option<&str>, _: Option<&str>| Augmentation {
            source_word_count: source.map_or(0, |s| s.len() as u64),
            ..Default::default()
        };
        assert_eq!(augmenter.augment(Some("abc"), None).source_word_count, 3);
    }
}
