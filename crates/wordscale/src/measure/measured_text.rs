//! # Measured Text

use crate::types::Metric;

/// The deterministic `{word_count, char_count}` pair for a piece of text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeasuredText {
    /// Number of countable words.
    pub word_count: u64,

    /// Number of characters, after normalization and edge trimming.
    pub char_count: u64,
}

impl MeasuredText {
    /// The measurement of empty text.
    pub const ZERO: Self = Self {
        word_count: 0,
        char_count: 0,
    };

    /// The count for one metric.
    pub fn get(
        &self,
        metric: Metric,
    ) -> u64 {
        match metric {
            Metric::Word => self.word_count,
            Metric::Char => self.char_count,
        }
    }

    /// Is either count zero?
    pub fn has_zero(&self) -> bool {
        self.word_count == 0 || self.char_count == 0
    }
}
