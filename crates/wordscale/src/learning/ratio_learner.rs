//! # Ratio Learner

use std::collections::BTreeMap;

use crate::errors::Rejection;
use crate::learning::learning_report::LearningReport;
use crate::measure::{MeasuredText, TextMeasurer};
use crate::ratios::{RatioEntry, is_valid_ratio};
use crate::types::{RatioSource, normalize_language_code};

/// The default minimum number of samples before a learned ratio is trusted.
pub const DEFAULT_MIN_SAMPLE_SIZE: u64 = 10;

/// The default progress logging cadence, in rows.
pub const DEFAULT_LOG_EVERY: usize = 10_000;

/// A row of a bilingual corpus.
///
/// Any field may be absent; rows with an absent or blank field are skipped.
pub trait CorpusRow {
    /// The English source text.
    fn source_text(&self) -> Option<&str>;

    /// The translated text.
    fn target_text(&self) -> Option<&str>;

    /// The target language code.
    fn target_language(&self) -> Option<&str>;
}

/// An owned corpus row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearningSample {
    /// The English source text.
    pub source_text: String,

    /// The translated text.
    pub target_text: String,

    /// The target language code.
    pub target_language: String,
}

impl LearningSample {
    /// Build a sample.
    pub fn new(
        source_text: impl Into<String>,
        target_text: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            target_text: target_text.into(),
            target_language: target_language.into(),
        }
    }
}

impl CorpusRow for LearningSample {
    fn source_text(&self) -> Option<&str> {
        Some(&self.source_text)
    }

    fn target_text(&self) -> Option<&str> {
        Some(&self.target_text)
    }

    fn target_language(&self) -> Option<&str> {
        Some(&self.target_language)
    }
}

impl<T: CorpusRow> CorpusRow for &T {
    fn source_text(&self) -> Option<&str> {
        (**self).source_text()
    }

    fn target_text(&self) -> Option<&str> {
        (**self).target_text()
    }

    fn target_language(&self) -> Option<&str> {
        (**self).target_language()
    }
}

/// Options for [`RatioLearner`].
#[derive(Debug, Clone)]
pub struct RatioLearnerOptions {
    /// Languages with fewer samples are reported as insufficient.
    pub min_sample_size: u64,

    /// Log progress every this many rows; 0 disables progress logging.
    pub log_every: usize,
}

impl Default for RatioLearnerOptions {
    fn default() -> Self {
        Self {
            min_sample_size: DEFAULT_MIN_SAMPLE_SIZE,
            log_every: DEFAULT_LOG_EVERY,
        }
    }
}

impl RatioLearnerOptions {
    /// Set the minimum sample size.
    pub fn with_min_sample_size(
        self,
        min_sample_size: u64,
    ) -> Self {
        Self {
            min_sample_size,
            ..self
        }
    }

    /// Set the progress logging cadence.
    pub fn with_log_every(
        self,
        log_every: usize,
    ) -> Self {
        Self { log_every, ..self }
    }
}

/// Running sums for one language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LanguageTotals {
    /// Contributing rows.
    pub samples: u64,

    /// Summed source measurements.
    pub source: MeasuredText,

    /// Summed target measurements.
    pub target: MeasuredText,
}

impl LanguageTotals {
    fn add(
        &mut self,
        source: MeasuredText,
        target: MeasuredText,
    ) {
        self.samples += 1;
        self.source.word_count += source.word_count;
        self.source.char_count += source.char_count;
        self.target.word_count += target.word_count;
        self.target.char_count += target.char_count;
    }

    /// The ratio of sums, `Σ target / Σ source`, for words.
    pub fn word_ratio(&self) -> f64 {
        self.target.word_count as f64 / self.source.word_count as f64
    }

    /// The ratio of sums, `Σ target / Σ source`, for characters.
    pub fn char_ratio(&self) -> f64 {
        self.target.char_count as f64 / self.source.char_count as f64
    }
}

/// Learns per-language ratios from a bilingual corpus.
///
/// Ratios are the ratio of sums, `Σ target / Σ source`, applied to both
/// metrics; rows whose source measures zero words or zero characters do
/// not contribute to either metric.
#[derive(Debug, Clone)]
pub struct RatioLearner {
    options: RatioLearnerOptions,
    measurer: TextMeasurer,
    totals: BTreeMap<String, LanguageTotals>,
    rows_seen: usize,
    skipped_rows: usize,
    zero_source_rows: usize,
}

impl Default for RatioLearner {
    fn default() -> Self {
        Self::new(TextMeasurer::new(), RatioLearnerOptions::default())
    }
}

impl RatioLearner {
    /// Create a new learner.
    pub fn new(
        measurer: TextMeasurer,
        options: RatioLearnerOptions,
    ) -> Self {
        Self {
            options,
            measurer,
            totals: BTreeMap::new(),
            rows_seen: 0,
            skipped_rows: 0,
            zero_source_rows: 0,
        }
    }

    /// The options.
    pub fn options(&self) -> &RatioLearnerOptions {
        &self.options
    }

    /// The running totals, by language.
    pub fn totals(&self) -> &BTreeMap<String, LanguageTotals> {
        &self.totals
    }

    /// Add one corpus row.
    ///
    /// ## Returns
    /// The rejection, if the row lacks a required field.
    pub fn update<R: CorpusRow>(
        &mut self,
        row: R,
    ) -> Option<Rejection> {
        let index = self.rows_seen;
        self.rows_seen += 1;
        if self.options.log_every > 0 && self.rows_seen % self.options.log_every == 0 {
            log::info!(
                "learning: {} rows, {} languages",
                self.rows_seen,
                self.totals.len()
            );
        }

        let (source, target, language) = match (
            non_blank(row.source_text()),
            non_blank(row.target_text()),
            non_blank(row.target_language()),
        ) {
            (Some(s), Some(t), Some(l)) => (s, t, l),
            (s, t, _) => {
                let missing = if s.is_none() {
                    "source_text"
                } else if t.is_none() {
                    "target_text"
                } else {
                    "target_language"
                };
                self.skipped_rows += 1;
                log::debug!("skipping corpus row {index}: missing {missing}");
                return Some(Rejection::MalformedCorpusRow {
                    row: index,
                    missing,
                });
            }
        };

        let source = self.measurer.measure(source);
        if source.has_zero() {
            self.zero_source_rows += 1;
            return None;
        }
        let target = self.measurer.measure(target);

        self.totals
            .entry(normalize_language_code(language))
            .or_default()
            .add(source, target);
        None
    }

    /// Add many corpus rows.
    ///
    /// ## Returns
    /// The number of rows skipped as malformed.
    pub fn update_from_rows<I>(
        &mut self,
        rows: I,
    ) -> usize
    where
        I: IntoIterator,
        I::Item: CorpusRow,
    {
        rows.into_iter()
            .filter_map(|row| self.update(row))
            .count()
    }

    /// Finish learning, and report the learned ratios.
    pub fn finish(self) -> LearningReport {
        let min = self.options.min_sample_size;
        let mut entries: Vec<RatioEntry> = self
            .totals
            .into_iter()
            .map(|(language_code, totals)| RatioEntry {
                word_ratio: totals.word_ratio(),
                char_ratio: totals.char_ratio(),
                sample_size: totals.samples,
                source: RatioSource::Learned,
                language_code,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.sample_size
                .cmp(&a.sample_size)
                .then_with(|| a.language_code.cmp(&b.language_code))
        });
        let (usable, unusable): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|e| is_valid_ratio(e.word_ratio) && is_valid_ratio(e.char_ratio));
        for e in &unusable {
            log::warn!(
                "{:?}: translations measured zero target words or characters; not learnable",
                e.language_code
            );
        }
        let (accepted, insufficient): (Vec<_>, Vec<_>) =
            usable.into_iter().partition(|e| e.sample_size >= min);

        log::info!(
            "learned {} languages ({} below {min} samples) from {} rows; {} skipped, {} empty",
            accepted.len(),
            insufficient.len(),
            self.rows_seen,
            self.skipped_rows,
            self.zero_source_rows
        );

        LearningReport {
            min_sample_size: min,
            accepted,
            insufficient,
            unusable,
            rows_seen: self.rows_seen,
            skipped_rows: self.skipped_rows,
            zero_source_rows: self.zero_source_rows,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Learn ratios from a corpus in one pass.
pub fn learn<I>(
    corpus: I,
    min_sample_size: u64,
) -> LearningReport
where
    I: IntoIterator,
    I::Item: CorpusRow,
{
    let mut learner = RatioLearner::new(
        TextMeasurer::new(),
        RatioLearnerOptions::default().with_min_sample_size(min_sample_size),
    );
    learner.update_from_rows(corpus);
    learner.finish()
}
