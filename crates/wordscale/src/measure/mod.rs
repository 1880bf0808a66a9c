//! # Text Measurement
//!
//! Deterministic word and character counting, consistent across scripts.
//!
//! * [`TextMeasurer`] - counts words and characters.
//!   * [`MeasurerOptions`] - word pattern and line-break handling.
//! * [`MeasuredText`] - the `{word_count, char_count}` result.
//! * [`normalize`] - the line ending and NFC normalization applied first.
//!
//! ## Example
//!
//! ```rust
//! use wordscale::measure::TextMeasurer;
//!
//! let measurer = TextMeasurer::new();
//! let measured = measurer.measure("Don't panic: it's state-of-the-art.");
//! assert_eq!(measured.word_count, 4);
//! assert_eq!(measured.char_count, 35);
//! ```

pub mod measured_text;
pub mod normalize;
pub mod patterns;
pub mod text_measurer;

#[doc(inline)]
pub use measured_text::MeasuredText;
#[doc(inline)]
pub use normalize::normalize;
#[doc(inline)]
pub use text_measurer::{MeasurerOptions, TextMeasurer};
