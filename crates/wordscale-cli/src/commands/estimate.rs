use wordscale::estimate::{EstimationResult, Estimator};
use wordscale::ratios::language_name;

use crate::{commands::MetricArgs, data_dir::DataDirArgs};

/// Args for the estimate command.
#[derive(clap::Args, Debug)]
pub struct EstimateArgs {
    /// The English word (or character) count.
    count: u64,

    /// The target language code.
    language: String,

    #[command(flatten)]
    metric: MetricArgs,

    #[command(flatten)]
    data_dir: DataDirArgs,
}

impl EstimateArgs {
    /// Run the estimate command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let store = self.data_dir.open_store()?;
        let result = Estimator::new(&store).estimate(self.count, &self.language, self.metric.metric());

        if result.used_fallback() {
            log::warn!(
                "no ratio for {:?}; using the default ratio {}",
                result.target_language,
                result.ratio_used
            );
        }
        println!("{}", describe(&result));
        Ok(())
    }
}

/// One-line summary of an estimate.
pub fn describe(result: &EstimationResult) -> String {
    let name = language_name(&result.target_language).unwrap_or(result.target_language.as_str());
    format!(
        "{} {}s -> {} {}s in {} (ratio {:.4}, {}, {} samples)",
        result.source_count,
        result.metric,
        result.estimated_count,
        result.metric,
        name,
        result.ratio_used,
        result.ratio_provenance,
        result.sample_size,
    )
}
