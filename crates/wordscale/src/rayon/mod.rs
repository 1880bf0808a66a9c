//! # Rayon Utilities
//!
//! [`rayon`] powered wrappers for parallel batch augmentation.

mod parallel_batch;

pub use parallel_batch::{DEFAULT_CHUNK_SIZE, ParallelBatchIter, ParallelBatchPipeline};
