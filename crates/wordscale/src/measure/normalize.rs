//! # Text Normalization

use std::borrow::Cow;

use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfc_quick};

/// The single line-break marker all line endings normalize to.
pub const LINE_BREAK: char = '\n';

/// Normalize line endings: `\r\n`, `\r` and `\n` all become [`LINE_BREAK`].
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Apply Unicode canonical composition (NFC).
pub fn compose(text: &str) -> Cow<'_, str> {
    match is_nfc_quick(text.chars()) {
        IsNormalized::Yes => Cow::Borrowed(text),
        _ => Cow::Owned(text.nfc().collect()),
    }
}

/// Normalize text for measurement: line endings, then NFC.
///
/// Normalizing already-normalized text is a no-op.
pub fn normalize(text: &str) -> Cow<'_, str> {
    match normalize_line_endings(text) {
        Cow::Borrowed(text) => compose(text),
        Cow::Owned(text) => Cow::Owned(compose(&text).into_owned()),
    }
}
