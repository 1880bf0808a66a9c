//! # Expansion Ratios
//!
//! * [`RatioStore`] - the authoritative language to ratio mapping.
//!   * [`DefaultRatios`] - the built-in layer, and per-metric fallbacks.
//!   * [`RatioBackend`] - persistence for the override layer.
//! * [`RatioEntry`] - a resolved view of one language.
//! * [`RatioUpdate`] - one per-metric mutation.
//!
//! ## Example
//!
//! ```rust
//! use wordscale::{Metric, RatioSource, ratios::RatioStore};
//!
//! let store = RatioStore::in_memory();
//! assert_eq!(store.ratio("fr", Metric::Word), 1.6593);
//!
//! store.set("fr", Metric::Word, 1.4429, 19000, RatioSource::Learned).unwrap();
//! let entry = store.get("fr", Metric::Word);
//! assert_eq!(entry.word_ratio, 1.4429);
//! assert_eq!(entry.source, RatioSource::Learned);
//! ```

pub mod backend;
pub mod defaults;
pub mod ratio_entry;
pub mod ratio_store;

#[doc(inline)]
pub use backend::{MemoryBackend, OverrideTable, RatioBackend, RatioOverrides};
#[doc(inline)]
pub use defaults::{
    BUILTIN_LANGUAGES,
    DEFAULT_CHAR_RATIO,
    DEFAULT_LANGUAGE_CODE,
    DEFAULT_WORD_RATIO,
    DefaultRatios,
    is_valid_ratio,
    language_name,
};
#[doc(inline)]
pub use ratio_entry::{BulkUpdateReport, RatioEntry, RatioOverride, RatioUpdate};
#[doc(inline)]
pub use ratio_store::RatioStore;
