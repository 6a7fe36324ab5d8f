//! Static row decomposition.
//!
//! The rows of the image are divided into `num_threads` contiguous blocks.
//! When the height is not a multiple of the thread count the remainder goes
//! to the first blocks, one row each, so two blocks never differ by more
//! than one row.
use std::ops::Range;

use log::debug;

use crate::core::err::ConfigError;

/// The block of rows assigned to one thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkAssignment {
    pub thread_id: usize,
    pub num_threads: usize,
    pub start_row: usize,
    pub row_count: usize,
}

impl WorkAssignment {
    /// Compute the block of thread `thread_id` out of `num_threads` over `height` rows.
    ///
    /// # Panics
    /// Panics if `num_threads` is 0 or `thread_id >= num_threads`.
    pub fn new(thread_id: usize, num_threads: usize, height: usize) -> Self {
        assert!(thread_id < num_threads);
        let base_rows = height / num_threads;
        let remainder = height % num_threads;

        WorkAssignment {
            thread_id,
            num_threads,
            start_row: thread_id * base_rows + thread_id.min(remainder),
            row_count: base_rows + usize::from(thread_id < remainder),
        }
    }

    pub fn end_row(&self) -> usize {
        self.start_row + self.row_count
    }

    pub fn rows(&self) -> Range<usize> {
        self.start_row..self.end_row()
    }
}

/// Check that `num_threads` is in `1..=max_threads`.
pub fn check_threads(num_threads: usize, max_threads: usize) -> Result<(), ConfigError> {
    if num_threads == 0 {
        Err(ConfigError::ZeroThreads)
    } else if num_threads > max_threads {
        Err(ConfigError::TooManyThreads {
            requested: num_threads,
            max: max_threads,
        })
    } else {
        Ok(())
    }
}

/// Divide `height` rows among `num_threads` threads.
///
/// The returned assignments are ordered by thread id, which is also the
/// order of their rows. If there are more threads than rows the trailing
/// assignments are empty.
pub fn partition(
    height: usize,
    num_threads: usize,
    max_threads: usize,
) -> Result<Vec<WorkAssignment>, ConfigError> {
    check_threads(num_threads, max_threads)?;
    if height == 0 {
        return Err(ConfigError::EmptyImage { width: 0, height });
    }

    let assignments: Vec<WorkAssignment> = (0..num_threads)
        .map(|i| WorkAssignment::new(i, num_threads, height))
        .collect();
    debug!(
        "Partitioned {} rows among {} threads ({}..={} rows each)",
        height,
        num_threads,
        height / num_threads,
        height.div_ceil(num_threads)
    );
    Ok(assignments)
}
