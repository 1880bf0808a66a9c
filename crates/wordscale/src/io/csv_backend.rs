//! # CSV Ratio Backend

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use strum::IntoEnumIterator;

use crate::errors::{WSResult, WordscaleError};
use crate::io::ratio_file::{ratio_file_name, read_ratio_file, write_ratio_file};
use crate::ratios::{RatioBackend, RatioOverride, RatioOverrides};
use crate::types::{Metric, RatioSource};

/// Persists overrides as ratio files in a directory.
///
/// Sample sizes and provenance are not persisted; reloaded overrides are
/// user-supplied, with a sample size of 0.
#[derive(Debug, Clone)]
pub struct CsvRatioBackend {
    dir: PathBuf,
}

impl CsvRatioBackend {
    /// A backend over a directory; the directory is created on first write.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file for a metric.
    pub fn path(
        &self,
        metric: Metric,
    ) -> PathBuf {
        self.dir.join(ratio_file_name(metric))
    }

    fn staging_path(
        &self,
        metric: Metric,
    ) -> PathBuf {
        self.path(metric).with_extension("csv.tmp")
    }

    /// Write a metric's overrides to its staging file.
    fn stage_metric(
        &self,
        metric: Metric,
        overrides: &RatioOverrides,
    ) -> WSResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let tmp = self.staging_path(metric);
        let mut writer = BufWriter::new(File::create(&tmp)?);
        let written = write_ratio_file(&mut writer, metric, overrides.table(metric))
            .and_then(|()| writer.flush().map_err(WordscaleError::from));
        if let Err(err) = written {
            drop(writer);
            discard_staged(&[(metric, tmp)]);
            return Err(err);
        }
        Ok(tmp)
    }

    fn persistence_error(
        &self,
        metric: Metric,
        err: WordscaleError,
    ) -> WordscaleError {
        WordscaleError::Persistence(format!("{}: {err}", self.path(metric).display()))
    }
}

fn discard_staged(staged: &[(Metric, PathBuf)]) {
    for (_, tmp) in staged {
        if let Err(err) = std::fs::remove_file(tmp) {
            log::debug!("failed to remove {}: {err}", tmp.display());
        }
    }
}

impl RatioBackend for CsvRatioBackend {
    fn load(&self) -> WSResult<RatioOverrides> {
        let mut overrides = RatioOverrides::default();
        for metric in Metric::iter() {
            let path = self.path(metric);
            if !path.exists() {
                continue;
            }
            let file = read_ratio_file(BufReader::new(File::open(&path)?))?;
            if file.metric != metric {
                return Err(WordscaleError::Parse(format!(
                    "{} holds {} ratios, expected {metric}",
                    path.display(),
                    file.metric
                )));
            }
            let table = overrides.table_mut(metric);
            for entry in file.entries {
                table.insert(entry.language_code, RatioOverride {
                    value: entry.value,
                    sample_size: 0,
                    source: RatioSource::UserSupplied,
                });
            }
            log::info!(
                "loaded {} {metric} ratio overrides from {}",
                table.len(),
                path.display()
            );
        }
        Ok(overrides)
    }

    /// Writes every metric's staging file, then renames them into place.
    ///
    /// A failed write leaves all ratio files untouched.
    fn store(
        &self,
        overrides: &RatioOverrides,
        metrics: &[Metric],
    ) -> WSResult<()> {
        let mut staged = Vec::with_capacity(metrics.len());
        for &metric in metrics {
            match self.stage_metric(metric, overrides) {
                Ok(tmp) => staged.push((metric, tmp)),
                Err(err) => {
                    discard_staged(&staged);
                    return Err(self.persistence_error(metric, err));
                }
            }
        }

        for (i, (metric, tmp)) in staged.iter().enumerate() {
            if let Err(err) = std::fs::rename(tmp, self.path(*metric)) {
                discard_staged(&staged[i..]);
                return Err(self.persistence_error(*metric, err.into()));
            }
            log::debug!(
                "wrote {} {metric} ratios to {}",
                overrides.table(*metric).len(),
                self.path(*metric).display()
            );
        }
        Ok(())
    }
}
