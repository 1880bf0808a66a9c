use wordscale::io::{CHAR_RATIO_FILE, CsvRatioBackend, WORD_RATIO_FILE};
use wordscale::ratios::{DefaultRatios, RatioStore};
use wordscale_data_dir::WordscaleDataDir;

/// Data directory argument group.
#[derive(clap::Args, Debug)]
pub struct DataDirArgs {
    /// Directory holding custom ratio files.
    ///
    /// Defaults to `$WORDSCALE_DATA_DIR`, then the platform data directory.
    #[arg(long, global = true, default_value = None)]
    data_dir: Option<String>,
}

impl DataDirArgs {
    /// Resolve the data directory.
    pub fn resolve(&self) -> Result<WordscaleDataDir, Box<dyn std::error::Error>> {
        Ok(WordscaleDataDir::new(self.data_dir.as_ref())?)
    }

    /// Open the ratio store over the data directory.
    pub fn open_store(&self) -> Result<RatioStore, Box<dyn std::error::Error>> {
        let data_dir = self.resolve()?;
        for name in [WORD_RATIO_FILE, CHAR_RATIO_FILE] {
            log::debug!("ratio file: {}", data_dir.file_path(name).display());
        }
        let backend = CsvRatioBackend::new(data_dir.data_dir());
        Ok(RatioStore::new(DefaultRatios::builtin(), Box::new(backend))?)
    }
}
