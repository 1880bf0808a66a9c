//! # Built-in Ratios
//!
//! Validated expansion ratios for the supported target languages, measured
//! against English source text.

use std::collections::BTreeMap;

use crate::errors::{WSResult, WordscaleError};
use crate::types::{Metric, normalize_language_code};

/// The display code of the fallback entry.
pub const DEFAULT_LANGUAGE_CODE: &str = "default";

/// Fallback word ratio for languages without a known ratio.
pub const DEFAULT_WORD_RATIO: f64 = 1.15;

/// Fallback character ratio for languages without a known ratio.
pub const DEFAULT_CHAR_RATIO: f64 = 1.12;

/// `(code, name, word_ratio, char_ratio)` for each built-in language.
pub const BUILTIN_LANGUAGES: &[(&str, &str, f64, f64)] = &[
    ("cs", "Czech", 1.4141, 1.1935),
    ("da", "Danish", 1.0209, 1.1247),
    ("de", "German", 1.0975, 1.2525),
    ("es", "Spanish", 1.3455, 1.2569),
    ("fi", "Finnish", 0.9730, 1.1368),
    ("fr", "French", 1.6593, 1.5039),
    ("fr-ca", "French (Canadian)", 1.4816, 1.3389),
    ("hu", "Hungarian", 1.6277, 1.3087),
    ("it", "Italian", 1.1542, 1.2487),
    ("ja", "Japanese", 0.7614, 0.7078),
    ("ko", "Korean", 0.8529, 1.0508),
    ("mx", "Spanish (Mexico)", 1.2738, 1.2024),
    ("nb", "Norwegian", 1.0046, 1.0802),
    ("nl", "Dutch", 1.0434, 1.1721),
    ("pl", "Polish", 1.1897, 1.2262),
    ("pt", "Portuguese", 1.3889, 1.2213),
    ("pt-pt", "Portuguese (Portugal)", 1.4149, 1.2225),
    ("ro", "Romanian", 1.3297, 1.2127),
    ("ru", "Russian", 0.9718, 1.1875),
    ("sv", "Swedish", 1.2061, 1.1321),
    ("tr", "Turkish", 1.3223, 1.1669),
    ("zh-hans", "Chinese (Simplified)", 0.5264, 0.5102),
    ("zh-hant", "Chinese (Traditional)", 0.5163, 0.4856),
];

/// The display name of a built-in language.
///
/// ## Returns
/// `None` for codes outside the built-in table.
pub fn language_name(code: &str) -> Option<&'static str> {
    let code = normalize_language_code(code);
    BUILTIN_LANGUAGES
        .iter()
        .find(|(c, ..)| *c == code)
        .map(|(_, name, ..)| *name)
}

/// Is this a usable ratio value?
pub fn is_valid_ratio(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Per-metric built-in ratios, and the per-metric fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultRatios {
    word: BTreeMap<String, f64>,
    char: BTreeMap<String, f64>,
    default_word: f64,
    default_char: f64,
}

impl Default for DefaultRatios {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DefaultRatios {
    /// The built-in table.
    pub fn builtin() -> Self {
        let mut word = BTreeMap::new();
        let mut char = BTreeMap::new();
        for (code, _, w, c) in BUILTIN_LANGUAGES {
            word.insert(code.to_string(), *w);
            char.insert(code.to_string(), *c);
        }
        Self {
            word,
            char,
            default_word: DEFAULT_WORD_RATIO,
            default_char: DEFAULT_CHAR_RATIO,
        }
    }

    /// An empty table with only fallback ratios.
    ///
    /// ## Errors
    /// [`WordscaleError::InvalidRatio`] if a fallback is not a positive finite number.
    pub fn with_fallbacks(
        default_word: f64,
        default_char: f64,
    ) -> WSResult<Self> {
        for (metric, value) in [(Metric::Word, default_word), (Metric::Char, default_char)] {
            if !is_valid_ratio(value) {
                return Err(WordscaleError::InvalidRatio {
                    language: DEFAULT_LANGUAGE_CODE.to_string(),
                    metric,
                    value: value.to_string(),
                });
            }
        }
        Ok(Self {
            word: BTreeMap::new(),
            char: BTreeMap::new(),
            default_word,
            default_char,
        })
    }

    /// Add (or replace) a built-in ratio.
    ///
    /// ## Errors
    /// [`WordscaleError::InvalidRatio`] if the value is not a positive finite number.
    pub fn with_ratio(
        mut self,
        code: &str,
        metric: Metric,
        value: f64,
    ) -> WSResult<Self> {
        let code = normalize_language_code(code);
        if !is_valid_ratio(value) {
            return Err(WordscaleError::InvalidRatio {
                language: code,
                metric,
                value: value.to_string(),
            });
        }
        self.table_mut(metric).insert(code, value);
        Ok(self)
    }

    /// The fallback ratio for a metric.
    pub fn fallback(
        &self,
        metric: Metric,
    ) -> f64 {
        match metric {
            Metric::Word => self.default_word,
            Metric::Char => self.default_char,
        }
    }

    /// The built-in ratio for a (normalized) code, if any.
    pub fn get(
        &self,
        code: &str,
        metric: Metric,
    ) -> Option<f64> {
        self.table(metric).get(code).copied()
    }

    /// The codes with a built-in ratio for either metric.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        let mut codes: Vec<&str> = self
            .word
            .keys()
            .chain(self.char.keys())
            .map(String::as_str)
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes.into_iter()
    }

    fn table(
        &self,
        metric: Metric,
    ) -> &BTreeMap<String, f64> {
        match metric {
            Metric::Word => &self.word,
            Metric::Char => &self.char,
        }
    }

    fn table_mut(
        &mut self,
        metric: Metric,
    ) -> &mut BTreeMap<String, f64> {
        match metric {
            Metric::Word => &mut self.word,
            Metric::Char => &mut self.char,
        }
    }
}
