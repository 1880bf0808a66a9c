//! # Ratio Files
//!
//! Two-column CSV files, one per metric:
//!
//! ```text
//! language_code,ratio
//! fr,1.4429
//! ```
//!
//! Character ratio files use the column `char_ratio`. When reading, the
//! metric is detected from the header, and `language` is accepted for
//! `language_code`.

use std::io::{Read, Write};

use serde::Deserialize;

use crate::errors::{Rejection, WSResult, WordscaleError};
use crate::ratios::{OverrideTable, RatioUpdate, is_valid_ratio};
use crate::types::{Metric, normalize_language_code};

/// Default file name for word ratio overrides.
pub const WORD_RATIO_FILE: &str = "custom_ratios.csv";

/// Default file name for character ratio overrides.
pub const CHAR_RATIO_FILE: &str = "custom_char_ratios.csv";

/// The language column header.
pub const LANGUAGE_COLUMN: &str = "language_code";

/// The default file name for a metric.
pub fn ratio_file_name(metric: Metric) -> &'static str {
    match metric {
        Metric::Word => WORD_RATIO_FILE,
        Metric::Char => CHAR_RATIO_FILE,
    }
}

/// The ratio column header for a metric.
pub fn ratio_column(metric: Metric) -> &'static str {
    match metric {
        Metric::Word => "ratio",
        Metric::Char => "char_ratio",
    }
}

#[derive(Debug, Deserialize)]
struct RatioRow {
    #[serde(alias = "language")]
    language_code: String,

    #[serde(alias = "ratio", alias = "char_ratio")]
    value: String,
}

/// The parsed contents of a ratio file.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioFile {
    /// The metric named by the header.
    pub metric: Metric,

    /// The valid rows, as user-supplied updates.
    pub entries: Vec<RatioUpdate>,

    /// Rows which were skipped.
    pub rejected: Vec<Rejection>,
}

/// Detect the metric of a ratio file from its header.
///
/// ## Errors
/// [`WordscaleError::Parse`] unless the header has one language column and
/// exactly one of `ratio` or `char_ratio`.
pub fn detect_ratio_file(headers: &csv::StringRecord) -> WSResult<Metric> {
    let has = |name: &str| headers.iter().any(|h| h.trim().eq_ignore_ascii_case(name));

    if !has(LANGUAGE_COLUMN) && !has("language") {
        return Err(WordscaleError::Parse(format!(
            "ratio file header lacks a language column: {headers:?}"
        )));
    }
    match (has(ratio_column(Metric::Word)), has(ratio_column(Metric::Char))) {
        (true, false) => Ok(Metric::Word),
        (false, true) => Ok(Metric::Char),
        (true, true) => Err(WordscaleError::Parse(
            "ratio file header names both ratio and char_ratio".to_string(),
        )),
        (false, false) => Err(WordscaleError::Parse(format!(
            "ratio file header lacks a ratio column: {headers:?}"
        ))),
    }
}

/// Read a ratio file.
///
/// Rows with a blank code or a non-numeric, non-positive value are skipped,
/// logged, and reported in [`RatioFile::rejected`]. A header-only file has
/// no entries.
///
/// ## Errors
/// * [`WordscaleError::Parse`] for an unrecognized header.
/// * [`WordscaleError::Csv`] for unreadable input, such as invalid UTF-8.
///
/// Rows with a missing or extra field are rejected like invalid values.
pub fn read_ratio_file<R: Read>(reader: R) -> WSResult<RatioFile> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let metric = detect_ratio_file(&headers)?;
    // Header names are matched case-insensitively.
    let headers: csv::StringRecord = headers.iter().map(|h| h.to_lowercase()).collect();

    let mut file = RatioFile {
        metric,
        entries: Vec::new(),
        rejected: Vec::new(),
    };
    for record in rdr.records() {
        let record = record?;
        let row = match record.deserialize::<RatioRow>(Some(&headers)) {
            Ok(row) if record.len() == headers.len() => row,
            _ => {
                let fields: Vec<&str> = record.iter().collect();
                log::warn!("skipping malformed {metric} ratio row: {fields:?}");
                file.rejected.push(Rejection::InvalidRatio {
                    language: normalize_language_code(record.get(0).unwrap_or_default()),
                    metric,
                    value: fields.get(1..).map(|v| v.join(",")).unwrap_or_default(),
                });
                continue;
            }
        };
        let code = normalize_language_code(&row.language_code);
        match row.value.parse::<f64>() {
            Ok(value) if is_valid_ratio(value) && !code.is_empty() => {
                file.entries.push(RatioUpdate::user(&code, metric, value));
            }
            _ => {
                log::warn!(
                    "skipping {metric} ratio row {:?}: {:?}",
                    row.language_code,
                    row.value
                );
                file.rejected.push(Rejection::InvalidRatio {
                    language: code,
                    metric,
                    value: row.value,
                });
            }
        }
    }
    Ok(file)
}

/// Write one metric's overrides as a ratio file, sorted by language code.
pub fn write_ratio_file<W: Write>(
    writer: W,
    metric: Metric,
    overrides: &OverrideTable,
) -> WSResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([LANGUAGE_COLUMN, ratio_column(metric)])?;
    for (code, o) in overrides {
        wtr.write_record([code.as_str(), o.value.to_string().as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::RatioOverride;
    use crate::types::RatioSource;

    #[test]
    fn test_detect() {
        let word = csv::StringRecord::from(vec!["language_code", "ratio"]);
        assert_eq!(detect_ratio_file(&word).unwrap(), Metric::Word);

        let legacy = csv::StringRecord::from(vec!["language", "char_ratio"]);
        assert_eq!(detect_ratio_file(&legacy).unwrap(), Metric::Char);

        for bad in [
            vec!["language", "ratio", "char_ratio"],
            vec!["code", "ratio"],
            vec!["language_code", "value"],
        ] {
            let bad = csv::StringRecord::from(bad);
            assert!(matches!(
                detect_ratio_file(&bad),
                Err(WordscaleError::Parse(_))
            ));
        }
    }

    #[test]
    fn test_read() {
        let data = "language,char_ratio\nFR,1.5\nde, 1.25 \nxx,abc\nyy,-1\n,1.0\n";
        let file = read_ratio_file(data.as_bytes()).unwrap();
        assert_eq!(file.metric, Metric::Char);
        assert_eq!(file.entries, vec![
            RatioUpdate::user("fr", Metric::Char, 1.5),
            RatioUpdate::user("de", Metric::Char, 1.25),
        ]);
        assert_eq!(file.rejected.len(), 3);
    }

    #[test]
    fn test_read_ragged_rows() {
        let data = "language_code,ratio\nfr,1.5\nde\nit,1.2\nsv,1.1,extra\n";
        let file = read_ratio_file(data.as_bytes()).unwrap();
        assert_eq!(file.entries, vec![
            RatioUpdate::user("fr", Metric::Word, 1.5),
            RatioUpdate::user("it", Metric::Word, 1.2),
        ]);
        assert_eq!(file.rejected, vec![
            Rejection::InvalidRatio {
                language: "de".to_string(),
                metric: Metric::Word,
                value: String::new(),
            },
            Rejection::InvalidRatio {
                language: "sv".to_string(),
                metric: Metric::Word,
                value: "1.1,extra".to_string(),
            },
        ]);
    }

    #[test]
    fn test_read_header_only() {
        let file = read_ratio_file("Language_Code,Ratio\n".as_bytes()).unwrap();
        assert_eq!(file.metric, Metric::Word);
        assert!(file.entries.is_empty());
        assert!(file.rejected.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let mut table = OverrideTable::new();
        for (code, value) in [("sv", 1.2061), ("fr", 1.4429)] {
            table.insert(code.to_string(), RatioOverride {
                value,
                sample_size: 100,
                source: RatioSource::Learned,
            });
        }

        let mut buf = Vec::new();
        write_ratio_file(&mut buf, Metric::Word, &table).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "language_code,ratio\nfr,1.4429\nsv,1.2061\n");

        let file = read_ratio_file(text.as_bytes()).unwrap();
        assert_eq!(file.entries, vec![
            RatioUpdate::user("fr", Metric::Word, 1.4429),
            RatioUpdate::user("sv", Metric::Word, 1.2061),
        ]);
    }
}
