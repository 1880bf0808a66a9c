//! # Regex Wrapper
//! This modules provides mechanisms to mix `regex` and `fancy_regex` types.

use core::fmt::Debug;
use core::ops::Range;

/// Error wrapper for regex patterns.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub enum ErrorWrapper {
    /// Error from `regex`.
    Basic(regex::Error),

    /// Error from `fancy_regex`.
    Fancy(fancy_regex::Error),
}

impl From<regex::Error> for ErrorWrapper {
    fn from(err: regex::Error) -> Self {
        Self::Basic(err)
    }
}

impl From<fancy_regex::Error> for ErrorWrapper {
    fn from(err: fancy_regex::Error) -> Self {
        Self::Fancy(err)
    }
}

impl core::fmt::Display for ErrorWrapper {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::Basic(err) => core::fmt::Display::fmt(err, f),
            Self::Fancy(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for ErrorWrapper {}

impl From<ErrorWrapper> for crate::errors::WordscaleError {
    fn from(err: ErrorWrapper) -> Self {
        Self::Pattern(err.to_string())
    }
}

/// A built-in pattern, written for the `regex` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstRegexPattern(pub &'static str);

impl ConstRegexPattern {
    /// Convert to [`RegexPattern::Basic`].
    pub fn to_pattern(self) -> RegexPattern {
        RegexPattern::Basic(self.0.to_string())
    }

    /// Compile the pattern into a [`RegexWrapper`].
    pub fn compile(&self) -> Result<RegexWrapper, ErrorWrapper> {
        self.to_pattern().compile()
    }
}

/// Labeled wrapper for regex patterns.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RegexPattern {
    /// This is a pattern for the `regex` crate.
    Basic(String),

    /// This is a pattern for the `fancy_regex` crate.
    Fancy(String),

    /// This pattern will try the `regex` crate first,
    /// and fallback to `fancy_regex` if it fails.
    Adaptive(String),
}

impl<S: AsRef<str>> From<S> for RegexPattern {
    fn from(pattern: S) -> Self {
        Self::Adaptive(pattern.as_ref().to_string())
    }
}

impl RegexPattern {
    /// Compile the regex pattern into a [`RegexWrapper`].
    ///
    /// ## Returns
    /// A `Result` containing the compiled `RegexWrapper` or an `ErrorWrapper`.
    pub fn compile(&self) -> Result<RegexWrapper, ErrorWrapper> {
        match self {
            Self::Basic(pattern) => regex::Regex::new(pattern)
                .map(RegexWrapper::from)
                .map_err(ErrorWrapper::from),
            Self::Fancy(pattern) => fancy_regex::Regex::new(pattern)
                .map(RegexWrapper::from)
                .map_err(ErrorWrapper::from),
            Self::Adaptive(pattern) => {
                regex::Regex::new(pattern)
                    .map(RegexWrapper::from)
                    .or_else(|_| {
                        fancy_regex::Regex::new(pattern)
                            .map(RegexWrapper::from)
                            .map_err(ErrorWrapper::from)
                    })
            }
        }
    }
}

/// Wrapper for compiled regex.
#[derive(Debug, Clone)]
pub enum RegexWrapper {
    /// Wrapper for `regex::Regex`.
    Basic(regex::Regex),

    /// Wrapper for `fancy_regex::Regex`.
    Fancy(fancy_regex::Regex),
}

impl From<regex::Regex> for RegexWrapper {
    fn from(regex: regex::Regex) -> Self {
        Self::Basic(regex)
    }
}

impl From<fancy_regex::Regex> for RegexWrapper {
    fn from(regex: fancy_regex::Regex) -> Self {
        Self::Fancy(regex)
    }
}

impl RegexWrapper {
    /// Is this `Fancy`?
    pub fn is_fancy(&self) -> bool {
        matches!(self, Self::Fancy(_))
    }

    /// Iterate the byte ranges of successive non-overlapping matches.
    ///
    /// A `fancy_regex` runtime error (such as an exceeded backtrack limit)
    /// ends the iteration.
    pub fn find_iter<'r, 'h>(
        &'r self,
        haystack: &'h str,
    ) -> MatchesWrapper<'r, 'h> {
        match self {
            Self::Basic(regex) => MatchesWrapper::Regex(regex.find_iter(haystack)),
            Self::Fancy(regex) => MatchesWrapper::FancyRegex(regex.find_iter(haystack)),
        }
    }
}

/// Wrapper for regex match iterators.
pub enum MatchesWrapper<'r, 'h> {
    /// Wrapper for `regex::Matches`.
    Regex(regex::Matches<'r, 'h>),

    /// Wrapper for `fancy_regex::Matches`.
    FancyRegex(fancy_regex::Matches<'r, 'h>),
}

impl Iterator for MatchesWrapper<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Regex(matches) => matches.next().map(|m| m.range()),
            Self::FancyRegex(matches) => match matches.next()? {
                Ok(m) => Some(m.range()),
                Err(err) => {
                    log::debug!("fancy regex match aborted: {err}");
                    None
                }
            },
        }
    }
}
