//! # Word Patterns
//!
//! A word is one match of [`WORD_PATTERN`]; everything between matches
//! (whitespace, punctuation, symbols) is never counted.
//!
//! Alternatives, in priority order:
//! 1. Abbreviations: two or more letter segments, each followed by a period.
//!    A segment is one letter, optionally followed by one lowercase letter
//!    (`U.S.A.`, `Ph.D.`, `e.g.`).
//! 2. Currency amounts: a currency symbol, an optional space, and a number
//!    with optional `.`/`,` separators and a trailing `%` (`$5.99`, `€ 1,000`).
//! 3. General words: runs of letters, marks, digits and connector punctuation,
//!    where digit runs may hold internal `.`/`,` separators (`1,000`,
//!    `192.168.1.1`); runs may be joined by apostrophes or hyphens
//!    (`don't`, `state-of-the-art`, `COVID-19`); an optional trailing `%`.

use crate::regex::ConstRegexPattern;

/// The built-in word pattern.
pub const WORD_PATTERN: ConstRegexPattern = ConstRegexPattern(crate::join_patterns!(
    r"(?:\p{L}\p{Ll}?\.){2,}",
    r"\p{Sc} ?\p{N}+(?:[.,]\p{N}+)*[\p{L}\p{M}\p{N}\p{Pc}]*%?",
    r"(?:\p{N}+(?:[.,]\p{N}+)+|[\p{L}\p{M}\p{N}\p{Pc}])+(?:['’\-‐‑](?:\p{N}+(?:[.,]\p{N}+)+|[\p{L}\p{M}\p{N}\p{Pc}])+)*%?",
));

/// A hyphen at the end of a line, joining a word split across the break.
pub const HYPHEN_BREAK_PATTERN: &str = r"[\-‐][^\S\n]*\n\s*";
