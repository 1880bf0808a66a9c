//! # Regex Utilities
//!
//! The built-in word pattern only needs the standard [`regex`] crate, but
//! user-supplied word patterns may need lookaround, which is provided by
//! the [`fancy_regex`] crate at a performance cost.
//!
//! * Labeling Patterns - [`RegexPattern`]
//!   * [`RegexPattern::Basic`] - a pattern which was written for [`regex`].
//!   * [`RegexPattern::Fancy`] - a pattern which was written for [`fancy_regex`].
//!   * [`RegexPattern::Adaptive`] - unknown target, try basic; then fall-up to fancy.
//! * Wrapping Compiled Regex - [`RegexWrapper`]

pub mod pattern_tools;
pub mod regex_wrapper;

#[doc(inline)]
pub use regex_wrapper::{ConstRegexPattern, ErrorWrapper, RegexPattern, RegexWrapper};
