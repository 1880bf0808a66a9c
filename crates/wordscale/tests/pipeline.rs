#![allow(missing_docs)]

use tempdir::TempDir;
use wordscale::{
    Metric,
    RatioSource,
    batch::{AUGMENTED_COLUMNS, BatchOptions, BatchPipeline, BatchRecord, MeasureEstimateAugmenter},
    estimate::Estimator,
    io::{CsvRatioBackend, read_ratio_file},
    learning::{LearningSample, learn},
    measure::{TextMeasurer, normalize},
    ratios::{DEFAULT_CHAR_RATIO, DEFAULT_WORD_RATIO, DefaultRatios, RatioStore},
};

const FIXTURES: &[(&str, u64)] = &[
    ("", 0),
    ("   \n\t ", 0),
    ("don't can't we'll", 3),
    ("state-of-the-art design", 2),
    ("hyphen-\nated", 1),
    ("$5.99 and 1,000 units and 95.5%", 6),
    ("U.S.A. has a Ph.D. program, etc.", 6),
];

#[test]
fn test_word_fixtures() {
    let measurer = TextMeasurer::new();
    for (text, expected) in FIXTURES {
        assert_eq!(
            measurer.measure(text).word_count,
            *expected,
            "word count mismatch for {text:?}"
        );
    }
}

#[test]
fn test_normalized_idempotence() {
    let measurer = TextMeasurer::new();
    for text in [
        "line1\r\nline2\rline3",
        "caf\u{0065}\u{0301} na\u{00ef}ve",
        "  padded\u{00a0}text  ",
    ] {
        let normalized = normalize(text);
        assert_eq!(measurer.measure(&normalized), measurer.measure(text));
        assert_eq!(normalize(&normalized), normalized);
    }
}

#[test]
fn test_learned_ratio_estimate() {
    let store = RatioStore::in_memory();
    store
        .set("fr", Metric::Word, 1.4429, 19000, RatioSource::Learned)
        .unwrap();

    let entry = store.get("fr", Metric::Word);
    assert_eq!(entry.word_ratio, 1.4429);
    assert_eq!(entry.sample_size, 19000);
    assert_eq!(entry.source, RatioSource::Learned);

    let result = Estimator::new(&store).estimate(1000, "fr", Metric::Word);
    assert_eq!(result.estimated_count, 1443);
    assert_eq!(result.ratio_provenance, RatioSource::Learned);
    assert!(!result.used_fallback());

    assert_eq!(
        Estimator::new(&store)
            .estimate(0, "fr", Metric::Word)
            .estimated_count,
        0
    );
}

#[test]
fn test_unknown_language_fallback() {
    let store = RatioStore::in_memory();

    let entry = store.get("zz", Metric::Word);
    assert_eq!(entry.word_ratio, DEFAULT_WORD_RATIO);
    assert_eq!(entry.source, RatioSource::BuiltIn);

    let result = Estimator::new(&store).estimate(100, "zz", Metric::Char);
    assert!(result.used_fallback());
    assert_eq!(result.ratio_used, DEFAULT_CHAR_RATIO);
    assert_eq!(result.estimated_count, 112);
}

#[test]
fn test_learning_aggregation() {
    // 3 source words each; targets alternate between 4 and 5 words.
    let corpus: Vec<LearningSample> = (0..12)
        .map(|i| {
            let target = if i % 2 == 0 {
                "un deux trois quatre"
            } else {
                "un deux trois quatre cinq"
            };
            LearningSample::new("one two three", target, "xx")
        })
        .collect();

    let report = learn(&corpus, 10);
    let entry = report.get("xx").unwrap();
    assert_eq!(entry.sample_size, 12);
    assert!((entry.word_ratio - 54.0 / 36.0).abs() < 1e-12);

    let source_chars = 13.0 * 12.0;
    let target_chars = 20.0 * 6.0 + 25.0 * 6.0;
    assert!((entry.char_ratio - target_chars / source_chars).abs() < 1e-12);

    let report = learn(&corpus[..9], 10);
    assert!(report.accepted.is_empty());
    assert!(report.to_updates(false).is_empty());
    assert_eq!(report.insufficient.len(), 1);
}

#[derive(Debug, Clone, PartialEq)]
struct Row {
    source: String,
    lang: String,
}

impl BatchRecord for Row {
    fn source_text(&self) -> Option<&str> {
        Some(&self.source)
    }

    fn target_language(&self) -> Option<&str> {
        Some(&self.lang)
    }
}

#[test]
fn test_batch_with_empty_row() {
    let store = RatioStore::in_memory();
    let augmenter = MeasureEstimateAugmenter::new(TextMeasurer::new(), Estimator::new(&store));

    let rows = vec![
        Row {
            source: "Translate this sentence.".to_string(),
            lang: "de".to_string(),
        },
        Row {
            source: String::new(),
            lang: "de".to_string(),
        },
        Row {
            source: "Unknown target.".to_string(),
            lang: "zz".to_string(),
        },
    ];

    let out: Vec<_> = BatchPipeline::new(BatchOptions::default())
        .process_rows(rows.clone(), augmenter)
        .collect();
    assert_eq!(out.len(), 3);
    assert_eq!(out[1].row, rows[1]);

    let empty = out[1].augmentation.to_fields();
    assert_eq!(empty.len(), AUGMENTED_COLUMNS.len());
    assert_eq!(empty, ["0", "0", "1.1500", "0", "0", "1.1200"]);

    assert_eq!(out[0].augmentation.source_word_count, 3);
    assert_eq!(out[2].augmentation.estimation_ratio, DEFAULT_WORD_RATIO);
}

#[test]
fn test_persisted_overrides() {
    TempDir::new("wordscale_pipeline")
        .and_then(|dir| {
            let open = || {
                RatioStore::new(
                    DefaultRatios::builtin(),
                    Box::new(CsvRatioBackend::new(dir.path())),
                )
                .unwrap()
            };

            let store = open();
            store
                .set("FR", Metric::Char, 1.3, 0, RatioSource::UserSupplied)
                .unwrap();
            drop(store);

            let file = std::fs::File::open(dir.path().join("custom_char_ratios.csv"))?;
            let parsed = read_ratio_file(file).unwrap();
            assert_eq!(parsed.metric, Metric::Char);
            assert_eq!(parsed.entries.len(), 1);

            let store = open();
            assert_eq!(store.ratio("fr", Metric::Char), 1.3);
            assert_eq!(store.ratio("fr", Metric::Word), 1.6593);
            Ok(())
        })
        .unwrap();
}
