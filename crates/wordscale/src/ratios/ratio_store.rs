//! # Ratio Store

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::errors::{Rejection, WSResult, WordscaleError};
use crate::ratios::backend::{MemoryBackend, RatioBackend, RatioOverrides};
use crate::ratios::defaults::{DEFAULT_LANGUAGE_CODE, DefaultRatios, is_valid_ratio};
use crate::ratios::ratio_entry::{BulkUpdateReport, RatioEntry, RatioOverride, RatioUpdate};
use crate::types::{Metric, RatioSource, normalize_language_code};

/// Per-language, per-metric expansion ratios.
///
/// Built-in ratios are layered under an override layer; overrides are
/// persisted through a [`RatioBackend`].
///
/// Readers see a consistent snapshot. Writers are serialized, persist the
/// new override layer, and only then publish it; a persistence failure
/// leaves the visible state unchanged.
#[derive(Debug)]
pub struct RatioStore {
    defaults: DefaultRatios,
    backend: Box<dyn RatioBackend>,
    write_lock: Mutex<()>,
    overrides: RwLock<Arc<RatioOverrides>>,
}

impl RatioStore {
    /// Build a store, loading persisted overrides from the backend.
    ///
    /// ## Errors
    /// Propagates backend load failures.
    pub fn new(
        defaults: DefaultRatios,
        backend: Box<dyn RatioBackend>,
    ) -> WSResult<Self> {
        let overrides = backend.load()?;
        log::debug!("loaded {} ratio overrides", overrides.len());
        Ok(Self {
            defaults,
            backend,
            write_lock: Mutex::new(()),
            overrides: RwLock::new(Arc::new(overrides)),
        })
    }

    /// A store over the built-in ratios, without persistence.
    pub fn in_memory() -> Self {
        Self {
            defaults: DefaultRatios::builtin(),
            backend: Box::new(MemoryBackend::default()),
            write_lock: Mutex::new(()),
            overrides: RwLock::new(Arc::new(RatioOverrides::default())),
        }
    }

    /// The built-in layer.
    pub fn defaults(&self) -> &DefaultRatios {
        &self.defaults
    }

    /// The current override layer.
    pub fn overrides(&self) -> Arc<RatioOverrides> {
        self.overrides.read().clone()
    }

    /// Look up a language's entry.
    ///
    /// Unknown languages resolve to the default entry, with the fallback
    /// ratio for each metric and `source == BuiltIn`.
    pub fn get(
        &self,
        language_code: &str,
        metric: Metric,
    ) -> RatioEntry {
        let code = normalize_language_code(language_code);
        self.resolve(&self.overrides(), &code, metric)
    }

    /// The ratio for a language and metric.
    pub fn ratio(
        &self,
        language_code: &str,
        metric: Metric,
    ) -> f64 {
        self.get(language_code, metric).ratio(metric)
    }

    /// The default entry, used for unknown languages.
    pub fn default_entry(&self) -> RatioEntry {
        RatioEntry {
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            word_ratio: self.defaults.fallback(Metric::Word),
            char_ratio: self.defaults.fallback(Metric::Char),
            sample_size: 0,
            source: RatioSource::BuiltIn,
        }
    }

    /// Is there a built-in or override ratio for this language?
    pub fn is_known(
        &self,
        language_code: &str,
    ) -> bool {
        let code = normalize_language_code(language_code);
        is_known(&self.defaults, &self.overrides(), &code)
    }

    /// Is there a built-in or override ratio for this language and metric?
    ///
    /// When false, [`RatioStore::get`] resolves the metric to the fallback.
    pub fn has_ratio(
        &self,
        language_code: &str,
        metric: Metric,
    ) -> bool {
        let code = normalize_language_code(language_code);
        self.overrides().table(metric).contains_key(&code)
            || self.defaults.get(&code, metric).is_some()
    }

    /// Set one ratio.
    ///
    /// ## Returns
    /// Whether the effective value changed.
    ///
    /// ## Errors
    /// * [`WordscaleError::InvalidRatio`] for non-positive or non-finite values.
    /// * Backend failures; the store is then unchanged.
    pub fn set(
        &self,
        language_code: &str,
        metric: Metric,
        value: f64,
        sample_size: u64,
        source: RatioSource,
    ) -> WSResult<bool> {
        let update = RatioUpdate {
            language_code: language_code.to_string(),
            metric,
            value,
            sample_size,
            source,
        };
        let report = self.bulk_set(vec![update])?;
        match report.rejected.into_iter().next() {
            Some(rejection) => Err(rejection.into()),
            None => Ok(report.changed > 0),
        }
    }

    /// Apply many updates; all valid updates become visible together.
    ///
    /// Invalid updates are rejected individually, and the rest still apply.
    ///
    /// ## Errors
    /// Backend failures; the store is then unchanged.
    pub fn bulk_set(
        &self,
        updates: Vec<RatioUpdate>,
    ) -> WSResult<BulkUpdateReport> {
        let _guard = self.write_lock.lock();
        let before = self.overrides();
        let mut after = (*before).clone();

        let mut report = BulkUpdateReport::default();
        let mut touched = BTreeSet::new();
        for update in updates {
            let code = normalize_language_code(&update.language_code);
            if code.is_empty() || !is_valid_ratio(update.value) {
                report.rejected.push(Rejection::InvalidRatio {
                    language: code,
                    metric: update.metric,
                    value: update.value.to_string(),
                });
                continue;
            }
            let source = match update.source {
                // Only non-built-in values live in the override layer.
                RatioSource::BuiltIn => RatioSource::UserSupplied,
                source => source,
            };
            after.table_mut(update.metric).insert(
                code.clone(),
                RatioOverride {
                    value: update.value,
                    sample_size: update.sample_size,
                    source,
                },
            );
            touched.insert((update.metric, code));
        }

        report.changed = touched
            .iter()
            .filter(|(metric, code)| {
                self.resolve_value(&before, code, *metric)
                    != self.resolve_value(&after, code, *metric)
            })
            .count();

        let metrics: BTreeSet<Metric> = touched.iter().map(|(m, _)| *m).collect();
        self.publish(before, after, &metrics.into_iter().collect::<Vec<_>>())?;

        log::info!(
            "applied {} ratio updates: {} changed, {} rejected",
            touched.len(),
            report.changed,
            report.rejected.len()
        );
        Ok(report)
    }

    /// Remove an override, restoring the built-in (or fallback) ratio.
    ///
    /// ## Returns
    /// Whether an override was removed.
    pub fn reset(
        &self,
        language_code: &str,
        metric: Metric,
    ) -> WSResult<bool> {
        let code = normalize_language_code(language_code);
        let _guard = self.write_lock.lock();
        let before = self.overrides();
        let mut after = (*before).clone();
        if after.table_mut(metric).remove(&code).is_none() {
            return Ok(false);
        }
        self.publish(before, after, &[metric])?;
        log::info!("reset {metric} ratio for {code:?}");
        Ok(true)
    }

    /// Entries for every known language, ordered by language code.
    pub fn snapshot(
        &self,
        metric: Metric,
    ) -> Vec<RatioEntry> {
        let overrides = self.overrides();
        self.languages_in(&overrides)
            .iter()
            .map(|code| self.resolve(&overrides, code, metric))
            .collect()
    }

    /// The known language codes, sorted.
    pub fn languages(&self) -> Vec<String> {
        self.languages_in(&self.overrides())
    }

    fn languages_in(
        &self,
        overrides: &RatioOverrides,
    ) -> Vec<String> {
        let codes: BTreeSet<&str> = self
            .defaults
            .codes()
            .chain(overrides.word.keys().map(String::as_str))
            .chain(overrides.char.keys().map(String::as_str))
            .collect();
        codes.into_iter().map(str::to_string).collect()
    }

    /// Persist, then swap in the new layer; the caller holds the write lock.
    fn publish(
        &self,
        before: Arc<RatioOverrides>,
        after: RatioOverrides,
        metrics: &[Metric],
    ) -> WSResult<()> {
        if *before == after {
            return Ok(());
        }
        let metrics: Vec<Metric> = metrics
            .iter()
            .copied()
            .filter(|&m| before.table(m) != after.table(m))
            .collect();
        self.backend.store(&after, &metrics).map_err(|err| {
            log::warn!("ratio persistence failed, keeping previous ratios: {err}");
            match err {
                err @ WordscaleError::Persistence(_) => err,
                err => WordscaleError::Persistence(err.to_string()),
            }
        })?;
        *self.overrides.write() = Arc::new(after);
        Ok(())
    }

    fn resolve_value(
        &self,
        overrides: &RatioOverrides,
        code: &str,
        metric: Metric,
    ) -> f64 {
        overrides
            .table(metric)
            .get(code)
            .map(|o| o.value)
            .or_else(|| self.defaults.get(code, metric))
            .unwrap_or_else(|| self.defaults.fallback(metric))
    }

    fn resolve(
        &self,
        overrides: &RatioOverrides,
        code: &str,
        metric: Metric,
    ) -> RatioEntry {
        if !is_known(&self.defaults, overrides, code) {
            return self.default_entry();
        }
        let (sample_size, source) = match overrides.table(metric).get(code) {
            Some(o) => (o.sample_size, o.source),
            None => (0, RatioSource::BuiltIn),
        };
        RatioEntry {
            language_code: code.to_string(),
            word_ratio: self.resolve_value(overrides, code, Metric::Word),
            char_ratio: self.resolve_value(overrides, code, Metric::Char),
            sample_size,
            source,
        }
    }
}

fn is_known(
    defaults: &DefaultRatios,
    overrides: &RatioOverrides,
    code: &str,
) -> bool {
    [Metric::Word, Metric::Char].into_iter().any(|metric| {
        overrides.table(metric).contains_key(code) || defaults.get(code, metric).is_some()
    })
}
