//! # wordscale-data-dir
//!
//! Resolves the directory which holds persisted ratio files.
#![warn(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::path_resolver::PathResolver;

pub mod path_resolver;

/// Environment variable key to override the default data directory.
pub const WORDSCALE_DATA_DIR: &str = "WORDSCALE_DATA_DIR";

/// Default [`PathResolver`] for wordscale.
pub const WORDSCALE_PATH_CONFIG: PathResolver = PathResolver {
    qualifier: "io.crates.wordscale",
    organization: "",
    application: "wordscale",
    data_env_vars: &[WORDSCALE_DATA_DIR],
};

/// A resolved wordscale data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordscaleDataDir {
    data_dir: PathBuf,
}

impl WordscaleDataDir {
    /// Resolve the data directory.
    ///
    /// See [`PathResolver::resolve_data_dir`] for the resolution order.
    pub fn new<P: AsRef<Path>>(data_dir: Option<P>) -> anyhow::Result<Self> {
        let data_dir = WORDSCALE_PATH_CONFIG
            .resolve_data_dir(data_dir)
            .context("failed to resolve data directory")?;
        log::debug!("wordscale data dir: {}", data_dir.display());
        Ok(Self { data_dir })
    }

    /// Get the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the path of a file in the data directory.
    ///
    /// * Does not check that the path exists.
    pub fn file_path<F: AsRef<Path>>(
        &self,
        filename: F,
    ) -> PathBuf {
        self.data_dir.join(filename)
    }

    /// Create the data directory, if missing.
    pub fn ensure(&self) -> anyhow::Result<&Path> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "failed to create data directory: {}",
                self.data_dir.display()
            )
        })?;
        Ok(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_env_override() {
        unsafe {
            std::env::set_var(WORDSCALE_DATA_DIR, "/tmp/wordscale_env");
        }
        let dir = WordscaleDataDir::new(None::<PathBuf>).unwrap();
        assert_eq!(dir.data_dir(), Path::new("/tmp/wordscale_env"));
        assert_eq!(
            dir.file_path("custom_ratios.csv"),
            PathBuf::from("/tmp/wordscale_env/custom_ratios.csv")
        );

        // An explicit path wins.
        let dir = WordscaleDataDir::new(Some("/tmp/explicit")).unwrap();
        assert_eq!(dir.data_dir(), Path::new("/tmp/explicit"));

        unsafe {
            std::env::remove_var(WORDSCALE_DATA_DIR);
        }
    }

    #[test]
    fn test_ensure() {
        tempdir::TempDir::new("wordscale_data_dir")
            .and_then(|tmp| {
                let target = tmp.path().join("a").join("b");
                let dir = WordscaleDataDir::new(Some(&target)).unwrap();
                assert_eq!(dir.ensure().unwrap(), target.as_path());
                assert!(target.is_dir());
                Ok(())
            })
            .unwrap();
    }
}
