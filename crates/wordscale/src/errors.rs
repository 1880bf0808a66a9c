//! # Error Types

use crate::types::Metric;

/// Errors from wordscale operations.
#[derive(Debug, thiserror::Error)]
pub enum WordscaleError {
    /// A ratio value was non-positive or non-numeric.
    #[error("invalid {metric} ratio for {language:?}: {value}")]
    InvalidRatio {
        /// The (normalized) language code.
        language: String,

        /// The metric the ratio was meant for.
        metric: Metric,

        /// The rejected value, as supplied.
        value: String,
    },

    /// The ratio backing store failed; in-memory state was left unchanged.
    #[error("ratio persistence failed: {0}")]
    Persistence(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Parse error (headers, numbers, etc.)
    #[error("parse error: {0}")]
    Parse(String),

    /// A word pattern failed to compile.
    #[error("invalid word pattern: {0}")]
    Pattern(String),
}

/// Result type for wordscale operations.
pub type WSResult<T> = core::result::Result<T, WordscaleError>;

/// A non-fatal rejection of a single entry or row.
///
/// Rejections are reported alongside the results of bulk operations;
/// the remainder of the bulk operation still proceeds.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// A ratio update with a non-positive or non-numeric value.
    InvalidRatio {
        /// The (normalized) language code.
        language: String,

        /// The metric of the update.
        metric: Metric,

        /// The rejected value, as supplied.
        value: String,
    },

    /// A corpus row lacking one of its required fields.
    MalformedCorpusRow {
        /// Zero-based index of the row in the corpus.
        row: usize,

        /// The name of the missing field.
        missing: &'static str,
    },

    /// A language whose sample count is below the learning threshold.
    InsufficientSample {
        /// The (normalized) language code.
        language: String,

        /// Samples seen for the language.
        samples: u64,

        /// The configured minimum.
        required: u64,
    },
}

impl core::fmt::Display for Rejection {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::InvalidRatio {
                language,
                metric,
                value,
            } => write!(f, "invalid {metric} ratio for {language:?}: {value}"),
            Self::MalformedCorpusRow { row, missing } => {
                write!(f, "corpus row {row} is missing {missing}")
            }
            Self::InsufficientSample {
                language,
                samples,
                required,
            } => write!(
                f,
                "{language:?} has {samples} samples (need >= {required})"
            ),
        }
    }
}

impl From<Rejection> for WordscaleError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::InvalidRatio {
                language,
                metric,
                value,
            } => WordscaleError::InvalidRatio {
                language,
                metric,
                value,
            },
            other => WordscaleError::Parse(other.to_string()),
        }
    }
}
