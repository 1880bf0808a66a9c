//! # Parallel Batch Pipeline

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::batch::{
    AugmentedRow,
    BatchOptions,
    BatchRecord,
    NoProgress,
    ProgressCounter,
    ProgressSink,
    RowAugmenter,
};

/// The default number of rows per parallel chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Chunk-Level Parallel Batch Pipeline.
///
/// Pulls up to `chunk_size` rows at a time, augments the chunk with
/// ``rayon``, and yields rows in input order. Memory is bounded by the
/// chunk size.
#[derive(Debug, Clone)]
pub struct ParallelBatchPipeline<P = NoProgress> {
    options: BatchOptions,
    chunk_size: usize,
    progress: P,
}

impl ParallelBatchPipeline<NoProgress> {
    /// Create a new parallel pipeline.
    ///
    /// ## Arguments
    /// * `options` - The batch options.
    /// * `chunk_size` - Rows per parallel chunk; at least 1.
    pub fn new(
        options: BatchOptions,
        chunk_size: usize,
    ) -> Self {
        Self {
            options,
            chunk_size: chunk_size.max(1),
            progress: NoProgress,
        }
    }
}

impl<P: ProgressSink> ParallelBatchPipeline<P> {
    /// Replace the progress sink.
    pub fn with_progress<Q: ProgressSink>(
        self,
        progress: Q,
    ) -> ParallelBatchPipeline<Q> {
        ParallelBatchPipeline {
            options: self.options,
            chunk_size: self.chunk_size,
            progress,
        }
    }

    /// The chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Augment a stream of rows; see [`crate::batch::BatchPipeline::process`].
    pub fn process<I, R, E, A>(
        self,
        rows: I,
        augmenter: A,
    ) -> ParallelBatchIter<I::IntoIter, A, P, R, E>
    where
        I: IntoIterator<Item = Result<R, E>>,
        R: BatchRecord + Send,
        E: Send,
        A: RowAugmenter + Sync,
    {
        ParallelBatchIter {
            rows: rows.into_iter(),
            augmenter,
            chunk_size: self.chunk_size,
            counter: ProgressCounter::new(self.progress, self.options.progress_every),
            ready: VecDeque::with_capacity(self.chunk_size),
        }
    }
}

/// The iterator returned by [`ParallelBatchPipeline::process`].
#[derive(Debug)]
pub struct ParallelBatchIter<I, A, P, R, E> {
    rows: I,
    augmenter: A,
    chunk_size: usize,
    counter: ProgressCounter<P>,
    ready: VecDeque<Result<AugmentedRow<R>, E>>,
}

impl<I, A, P, R, E> ParallelBatchIter<I, A, P, R, E>
where
    I: Iterator<Item = Result<R, E>>,
    R: BatchRecord + Send,
    E: Send,
    A: RowAugmenter + Sync,
    P: ProgressSink,
{
    fn fill(&mut self) {
        let chunk: Vec<Result<R, E>> = self.rows.by_ref().take(self.chunk_size).collect();
        if chunk.is_empty() {
            return;
        }
        let augmenter = &self.augmenter;
        let augmented: Vec<Result<AugmentedRow<R>, E>> = chunk
            .into_par_iter()
            .map(|row| row.map(|row| augmenter.augment_row(row)))
            .collect();
        self.ready.extend(augmented);
    }
}

impl<I, A, P, R, E> Iterator for ParallelBatchIter<I, A, P, R, E>
where
    I: Iterator<Item = Result<R, E>>,
    R: BatchRecord + Send,
    E: Send,
    A: RowAugmenter + Sync,
    P: ProgressSink,
{
    type Item = Result<AugmentedRow<R>, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.ready.is_empty() {
            self.fill();
        }
        match self.ready.pop_front() {
            Some(item) => {
                if item.is_ok() {
                    self.counter.tick();
                }
                Some(item)
            }
            None => {
                self.counter.finish();
                None
            }
        }
    }
}
