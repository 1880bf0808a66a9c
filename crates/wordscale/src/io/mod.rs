//! # Ratio I/O
//!
//! * [`ratio_file`] - the two-column ratio file format.
//! * [`CsvRatioBackend`] - a [`crate::ratios::RatioBackend`] over ratio files.

pub mod csv_backend;
pub mod ratio_file;

#[doc(inline)]
pub use csv_backend::CsvRatioBackend;
#[doc(inline)]
pub use ratio_file::{
    CHAR_RATIO_FILE,
    RatioFile,
    WORD_RATIO_FILE,
    detect_ratio_file,
    read_ratio_file,
    write_ratio_file,
};
