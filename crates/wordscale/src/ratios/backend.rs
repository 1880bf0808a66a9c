//! # Ratio Backends
//!
//! A [`RatioBackend`] persists the override layer of a
//! [`crate::ratios::RatioStore`]; built-in ratios are never persisted.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::errors::WSResult;
use crate::ratios::ratio_entry::RatioOverride;
use crate::types::Metric;

/// Overrides for one metric, keyed by normalized language code.
pub type OverrideTable = BTreeMap<String, RatioOverride>;

/// The per-metric override layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatioOverrides {
    /// Word ratio overrides.
    pub word: OverrideTable,

    /// Character ratio overrides.
    pub char: OverrideTable,
}

impl RatioOverrides {
    /// The overrides for a metric.
    pub fn table(
        &self,
        metric: Metric,
    ) -> &OverrideTable {
        match metric {
            Metric::Word => &self.word,
            Metric::Char => &self.char,
        }
    }

    /// The mutable overrides for a metric.
    pub fn table_mut(
        &mut self,
        metric: Metric,
    ) -> &mut OverrideTable {
        match metric {
            Metric::Word => &mut self.word,
            Metric::Char => &mut self.char,
        }
    }

    /// Total number of overrides, across metrics.
    pub fn len(&self) -> usize {
        self.word.len() + self.char.len()
    }

    /// Are there no overrides?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Persistence for ratio overrides.
///
/// `store` is called before a change becomes visible; an error aborts the
/// change.
pub trait RatioBackend: Send + Sync + core::fmt::Debug {
    /// Load the persisted overrides.
    fn load(&self) -> WSResult<RatioOverrides>;

    /// Persist the overrides.
    ///
    /// ## Arguments
    /// * `overrides` - the complete override layer after the change.
    /// * `metrics` - the metrics whose overrides changed.
    fn store(
        &self,
        overrides: &RatioOverrides,
        metrics: &[Metric],
    ) -> WSResult<()>;
}

/// A backend which keeps overrides in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    overrides: Mutex<RatioOverrides>,
}

impl MemoryBackend {
    /// A backend pre-loaded with overrides.
    pub fn with_overrides(overrides: RatioOverrides) -> Self {
        Self {
            overrides: Mutex::new(overrides),
        }
    }
}

impl RatioBackend for MemoryBackend {
    fn load(&self) -> WSResult<RatioOverrides> {
        Ok(self.overrides.lock().clone())
    }

    fn store(
        &self,
        overrides: &RatioOverrides,
        metrics: &[Metric],
    ) -> WSResult<()> {
        let mut stored = self.overrides.lock();
        for &metric in metrics {
            *stored.table_mut(metric) = overrides.table(metric).clone();
        }
        Ok(())
    }
}
