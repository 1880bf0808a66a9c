//! # Common Types

/// The measurement a ratio applies to.
///
/// Word and character ratios are independent per language; a language can
/// compress one while expanding the other.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumString,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Metric {
    /// Word counts.
    Word,

    /// Character counts.
    Char,
}

/// Where a ratio came from.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum RatioSource {
    /// The built-in table, or the default fallback.
    #[default]
    BuiltIn,

    /// Derived by a learning pass over bilingual data.
    Learned,

    /// An explicit user override.
    UserSupplied,
}

/// Normalize a language code for use as a key.
///
/// Codes are trimmed and lowercased; `"  FR-CA "` becomes `"fr-ca"`.
pub fn normalize_language_code(code: &str) -> String {
    code.trim().to_lowercase()
}
