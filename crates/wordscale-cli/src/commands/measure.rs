use std::io::Write;

use wordscale::estimate::Estimator;
use wordscale::measure::{MeasurerOptions, TextMeasurer};

use crate::{
    commands::estimate::describe,
    data_dir::DataDirArgs,
    input_output::{InputArgs, OutputArgs},
};

/// Args for the measure command.
#[derive(clap::Args, Debug)]
pub struct MeasureArgs {
    /// Also estimate both metrics for this target language.
    #[arg(long, default_value = None)]
    language: Option<String>,

    /// Count words split across a hyphenated line break separately.
    #[arg(long)]
    no_rejoin: bool,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    data_dir: DataDirArgs,
}

impl MeasureArgs {
    /// Run the measure command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let measurer = self.measurer()?;
        let text = self.input.read_to_string()?;
        let mut writer = self.output.open_writer()?;

        let measured = measurer.measure(&text);
        writeln!(writer, "words: {}", measured.word_count)?;
        writeln!(writer, "chars: {}", measured.char_count)?;
        writeln!(
            writer,
            "chars_no_spaces: {}",
            measurer.count_chars_no_spaces(&text)
        )?;

        if let Some(language) = &self.language {
            let store = self.data_dir.open_store()?;
            let estimate = Estimator::new(&store).estimate_text(&measurer, &text, language);
            if estimate.words.used_fallback() {
                log::warn!("no ratio for {language:?}; using the default ratios");
            }
            writeln!(writer, "{}", describe(&estimate.words))?;
            writeln!(writer, "{}", describe(&estimate.chars))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn measurer(&self) -> Result<TextMeasurer, Box<dyn std::error::Error>> {
        if !self.no_rejoin {
            return Ok(TextMeasurer::new());
        }
        Ok(MeasurerOptions::default()
            .with_rejoin_hyphenated_breaks(false)
            .build()?)
    }
}
