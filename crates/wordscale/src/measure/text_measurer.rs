//! # Text Measurer

use std::borrow::Cow;

use crate::errors::WSResult;
use crate::measure::measured_text::MeasuredText;
use crate::measure::normalize::normalize;
use crate::measure::patterns::{HYPHEN_BREAK_PATTERN, WORD_PATTERN};
use crate::regex::{ErrorWrapper, RegexPattern, RegexWrapper};

/// Options for [`TextMeasurer`].
#[derive(Debug, Clone)]
pub struct MeasurerOptions {
    /// The word pattern; each match is one word.
    pub word_pattern: RegexPattern,

    /// Rejoin words hyphenated across a line break before counting words.
    pub rejoin_hyphenated_breaks: bool,
}

impl Default for MeasurerOptions {
    fn default() -> Self {
        Self {
            word_pattern: WORD_PATTERN.to_pattern(),
            rejoin_hyphenated_breaks: true,
        }
    }
}

impl MeasurerOptions {
    /// Sets the word pattern.
    ///
    /// Patterns are compiled with `regex` when possible, and `fancy_regex`
    /// otherwise; see [`RegexPattern::Adaptive`].
    pub fn with_word_pattern<P: Into<RegexPattern>>(
        self,
        word_pattern: P,
    ) -> Self {
        Self {
            word_pattern: word_pattern.into(),
            ..self
        }
    }

    /// Sets whether hyphenated line breaks are rejoined.
    pub fn with_rejoin_hyphenated_breaks(
        self,
        rejoin_hyphenated_breaks: bool,
    ) -> Self {
        Self {
            rejoin_hyphenated_breaks,
            ..self
        }
    }

    /// Build a [`TextMeasurer`] from these options.
    pub fn build(self) -> WSResult<TextMeasurer> {
        TextMeasurer::from_options(self)
    }
}

/// Counts words and characters, consistently across scripts.
///
/// Measurement is pure and deterministic; a `TextMeasurer` is cheap to
/// clone and safe to share between threads.
#[derive(Debug, Clone)]
pub struct TextMeasurer {
    options: MeasurerOptions,
    word_re: RegexWrapper,
    hyphen_break_re: regex::Regex,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer {
    /// Build a measurer with the built-in word pattern.
    pub fn new() -> Self {
        Self::from_options(MeasurerOptions::default())
            .expect("built-in word patterns compile")
    }

    /// Build a measurer from options.
    ///
    /// ## Errors
    /// [`crate::WordscaleError::Pattern`] if the word pattern fails to compile.
    pub fn from_options(options: MeasurerOptions) -> WSResult<Self> {
        let word_re = options.word_pattern.compile()?;
        if word_re.is_fancy() {
            log::debug!("word pattern needs fancy_regex: {:?}", options.word_pattern);
        }
        let hyphen_break_re =
            regex::Regex::new(HYPHEN_BREAK_PATTERN).map_err(ErrorWrapper::from)?;
        Ok(Self {
            options,
            word_re,
            hyphen_break_re,
        })
    }

    /// The options this measurer was built with.
    pub fn options(&self) -> &MeasurerOptions {
        &self.options
    }

    /// Measure words and characters.
    ///
    /// Empty and whitespace-only text measures `{0, 0}`.
    pub fn measure(
        &self,
        text: &str,
    ) -> MeasuredText {
        let normalized = normalize(text);
        MeasuredText {
            word_count: self.count_normalized_words(&normalized),
            char_count: count_trimmed_chars(&normalized),
        }
    }

    /// Measure a batch of texts.
    pub fn measure_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
    ) -> Vec<MeasuredText> {
        texts.iter().map(|t| self.measure(t.as_ref())).collect()
    }

    /// Count words.
    pub fn count_words(
        &self,
        text: &str,
    ) -> u64 {
        self.count_normalized_words(&normalize(text))
    }

    /// Count characters.
    ///
    /// Leading and trailing whitespace is trimmed; interior whitespace,
    /// including tabs and non-breaking spaces, is counted.
    /// Every line ending counts as one character.
    pub fn count_chars(
        &self,
        text: &str,
    ) -> u64 {
        count_trimmed_chars(&normalize(text))
    }

    /// Count non-whitespace characters.
    pub fn count_chars_no_spaces(
        &self,
        text: &str,
    ) -> u64 {
        normalize(text).chars().filter(|c| !c.is_whitespace()).count() as u64
    }

    /// The words of the text, as counted by [`Self::measure`].
    ///
    /// Words are returned in their normalized form; a word rejoined across
    /// a hyphenated line break is returned without the hyphen.
    pub fn words(
        &self,
        text: &str,
    ) -> Vec<String> {
        let normalized = normalize(text);
        let joined = self.rejoin(&normalized);
        self.word_re
            .find_iter(&joined)
            .map(|r| joined[r].to_string())
            .collect()
    }

    fn rejoin<'a>(
        &self,
        normalized: &'a str,
    ) -> Cow<'a, str> {
        if self.options.rejoin_hyphenated_breaks {
            self.hyphen_break_re.replace_all(normalized, "")
        } else {
            Cow::Borrowed(normalized)
        }
    }

    fn count_normalized_words(
        &self,
        normalized: &str,
    ) -> u64 {
        let joined = self.rejoin(normalized);
        self.word_re.find_iter(&joined).count() as u64
    }
}

fn count_trimmed_chars(normalized: &str) -> u64 {
    normalized.trim().chars().count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurer() -> TextMeasurer {
        TextMeasurer::new()
    }

    fn word_count(text: &str) -> u64 {
        measurer().measure(text).word_count
    }

    #[test]
    fn test_empty_input() {
        let m = measurer();
        assert_eq!(m.measure(""), MeasuredText::ZERO);
        assert_eq!(m.measure("   \t\r\n  "), MeasuredText::ZERO);
    }

    #[test]
    fn test_contractions() {
        assert_eq!(word_count("don't can't we'll"), 3);
        assert_eq!(word_count("Don't, can't, won't, we'll, I'm"), 5);
    }

    #[test]
    fn test_hyphen_compounds() {
        assert_eq!(word_count("state-of-the-art design"), 2);
        assert_eq!(word_count("twenty-one years old"), 3);
    }

    #[test]
    fn test_line_break_rejoin() {
        let m = measurer();
        assert_eq!(m.measure("hyphen-\nated").word_count, 1);
        assert_eq!(m.measure("hyphen-\r\nated").word_count, 1);
        assert_eq!(m.measure("hyphen- \n  ated").word_count, 1);
        assert_eq!(m.words("This is a hyphen-\nated word"), vec![
            "This",
            "is",
            "a",
            "hyphenated",
            "word"
        ]);

        // Without a hyphen, a line break separates words.
        assert_eq!(m.measure("line\nbreak").word_count, 2);
    }

    #[test]
    fn test_rejoin_disabled() {
        let m = MeasurerOptions::default()
            .with_rejoin_hyphenated_breaks(false)
            .build()
            .unwrap();
        assert_eq!(m.measure("hyphen-\nated").word_count, 2);
    }

    #[test]
    fn test_currency_numbers_fixture() {
        let m = measurer();
        let text = "$5.99 and 1,000 units and 95.5%";
        assert_eq!(m.words(text), vec![
            "$5.99", "and", "1,000", "units", "and", "95.5%"
        ]);
        assert_eq!(m.measure(text).word_count, 6);
    }

    #[test]
    fn test_abbreviations_fixture() {
        let m = measurer();
        let text = "U.S.A. has a Ph.D. program, etc.";
        assert_eq!(m.words(text), vec![
            "U.S.A.", "has", "a", "Ph.D.", "program", "etc"
        ]);
        assert_eq!(m.measure(text).word_count, 6);
    }

    #[test]
    fn test_mixed_alphanumeric() {
        assert_eq!(word_count("COVID-19 and HTML5 changed everything in 2020s"), 7);
        assert_eq!(
            word_count("IPv4 addresses like 192.168.1.1 and HTML5 with CSS3"),
            8
        );
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(word_count("Café, naïve, résumé, piñata, Москва"), 5);
        // Decomposed input counts the same as composed input.
        assert_eq!(
            measurer().measure("cafe\u{0301} na\u{0131}ve"),
            measurer().measure("caf\u{00e9} na\u{0131}ve")
        );
    }

    #[test]
    fn test_unspaced_scripts() {
        let m = measurer();
        // Without spaces, a CJK run is one word under the uniform rule.
        let measured = m.measure("你好世界");
        assert_eq!(measured.word_count, 1);
        assert_eq!(measured.char_count, 4);

        let measured = m.measure("Mixed: ASCII + 中文");
        assert_eq!(measured.word_count, 3);
        assert_eq!(measured.char_count, 17);

        // Punctuation separates CJK runs.
        assert_eq!(m.measure("你好，世界。").word_count, 2);
    }

    #[test]
    fn test_whitespace_and_symbols() {
        assert_eq!(word_count("Word1    \t  word2\n\nword3"), 3);
        assert_eq!(word_count("$$$!!!...---"), 0);
        assert_eq!(word_count("emoji: \u{1f600}\u{1f680}\u{1f4a1}"), 1);
    }

    #[test]
    fn test_char_counting() {
        let m = measurer();
        assert_eq!(m.count_chars("Hello\nWorld"), 11);
        assert_eq!(m.count_chars("Hello\r\nWorld"), 11);
        assert_eq!(m.count_chars("Hello\rWorld"), 11);
        assert_eq!(m.count_chars("Text\twith\ttabs"), 14);
        assert_eq!(m.count_chars("  Spaces  around  "), 14);
        assert_eq!(m.count_chars("a\u{00a0}b"), 3);
        assert_eq!(m.count_chars("🌍🚀💡"), 3);
        assert_eq!(m.count_chars("cafe\u{0301}"), 4);
        assert_eq!(m.count_chars("caf\u{00e9}"), 4);
    }

    #[test]
    fn test_chars_no_spaces() {
        let m = measurer();
        assert_eq!(m.count_chars_no_spaces(" a b\tc\r\nd "), 4);
        assert_eq!(m.count_chars_no_spaces(""), 0);
    }

    #[test]
    fn test_measure_batch() {
        let m = measurer();
        let measured = m.measure_batch(&["one two", "", "three"]);
        assert_eq!(measured, vec![
            MeasuredText {
                word_count: 2,
                char_count: 7
            },
            MeasuredText::ZERO,
            MeasuredText {
                word_count: 1,
                char_count: 5
            },
        ]);
    }

    #[test]
    fn test_custom_fancy_pattern() {
        // Words only when followed by a comma.
        let m = MeasurerOptions::default()
            .with_word_pattern(r"\w+(?=,)")
            .build()
            .unwrap();
        assert_eq!(m.measure("a, b, c").word_count, 2);
    }

    #[test]
    fn test_invalid_pattern() {
        let result = MeasurerOptions::default().with_word_pattern(r"(").build();
        assert!(matches!(result, Err(crate::WordscaleError::Pattern(_))));
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(500))]

        /// Measurement never panics, and re-normalizing is a no-op.
        #[test]
        fn measure_is_idempotent_over_normalization(text in "\\PC*") {
            let m = TextMeasurer::new();
            let normalized = normalize(&text).into_owned();
            proptest::prop_assert_eq!(m.measure(&normalized), m.measure(&text));
        }

        /// Characters are never dropped beyond the trimmed edges.
        #[test]
        fn char_count_bounded_by_input(text in "[a-z \\n\\r\\t\u{4e00}-\u{4e10}]{0,40}") {
            let m = TextMeasurer::new();
            let measured = m.measure(&text);
            proptest::prop_assert!(measured.char_count <= text.chars().count() as u64);
            proptest::prop_assert!(measured.word_count <= measured.char_count);
        }
    }
}
