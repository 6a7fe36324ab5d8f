//! Multi-threaded renderer based on static row decomposition.
//!
//! Each call partitions the rows of the image, starts one scoped thread per
//! block except the first, computes the first block on the calling thread and
//! joins every worker before returning. Every worker owns a disjoint mutable
//! block of the output buffer, so no lock is involved in the write path.
//! Threads are created and destroyed at every call.
use std::panic::{self, AssertUnwindSafe};
use std::{error, fmt, thread};

use log::{debug, error};

use crate::core::configuration::{Configuration, DEFAULT_MAX_THREADS};
use crate::core::err::ConfigError;
use crate::fractal::buffer::IterationBuffer;
use crate::fractal::kernel::PixelKernel;
use crate::fractal::Scene;
use crate::partition::{self, WorkAssignment};
use crate::thread::Thread;
pub use crate::thread::ThreadError;

/// An error returned by the engine.
///
/// When an error is returned the content of the output buffer is undefined.
#[derive(Debug)]
pub enum EngineError {
    /// The requested configuration is invalid. Nothing was computed.
    Config(ConfigError),
    /// A worker could not be started or did not complete.
    Thread(ThreadError),
    /// The output buffer doesn't have the size of the scene.
    Dimensions {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Config(err) => write!(f, "Configuration error: {}", err),
            EngineError::Thread(err) => write!(f, "Worker error: {}", err),
            EngineError::Dimensions { expected, actual } => write!(
                f,
                "Buffer is {}x{}, scene is {}x{}.",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl error::Error for EngineError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            EngineError::Config(err) => Some(err),
            EngineError::Thread(err) => Some(err),
            EngineError::Dimensions { .. } => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err)
    }
}

impl From<ThreadError> for EngineError {
    fn from(err: ThreadError) -> Self {
        EngineError::Thread(err)
    }
}

/// Check that `buffer` has the size of `scene`.
pub(crate) fn check_dimensions(
    scene: &Scene,
    buffer: &IterationBuffer,
) -> Result<(), EngineError> {
    if buffer.fits(scene) {
        Ok(())
    } else {
        Err(EngineError::Dimensions {
            expected: (scene.width(), scene.height()),
            actual: (buffer.width(), buffer.height()),
        })
    }
}

/// Parallel compute engine.
#[derive(Debug, Clone)]
pub struct Engine {
    max_threads: usize,
    pinning: bool,
    thread_mapping: Vec<usize>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_THREADS)
    }
}

impl Engine {
    /// Create an engine accepting up to `max_threads` threads, without pinning.
    pub fn new(max_threads: usize) -> Self {
        Engine {
            max_threads,
            pinning: false,
            thread_mapping: Vec::new(),
        }
    }

    /// Create an engine from the global configuration.
    pub fn from_configuration(configuration: &Configuration) -> Self {
        Engine {
            max_threads: configuration.max_threads(),
            pinning: configuration.pinning(),
            thread_mapping: configuration.thread_mapping().to_vec(),
        }
    }

    /// Get the maximum number of threads accepted.
    pub fn max_threads(&self) -> usize {
        self.max_threads
    }

    /// Check that `num_threads` is accepted by this engine.
    pub fn check_threads(&self, num_threads: usize) -> Result<(), ConfigError> {
        partition::check_threads(num_threads, self.max_threads)
    }

    /// Core position the worker `thread_id` is pinned on, if pinning is enabled.
    fn pin_position(&self, thread_id: usize) -> Option<usize> {
        if !self.pinning || self.thread_mapping.is_empty() {
            return None;
        }
        Some(self.thread_mapping[thread_id % self.thread_mapping.len()])
    }

    /// Render `scene` with `num_threads` threads into a new buffer.
    pub fn compute<K>(
        &self,
        kernel: &K,
        num_threads: usize,
        scene: &Scene,
    ) -> Result<IterationBuffer, EngineError>
    where
        K: PixelKernel,
    {
        let mut buffer = IterationBuffer::for_scene(scene);
        self.compute_into(kernel, num_threads, scene, &mut buffer)?;
        Ok(buffer)
    }

    /// Render `scene` with `num_threads` threads into `buffer`.
    ///
    /// Every pixel of `buffer` is written exactly once. The call returns only
    /// after all the workers ended. A panic in any block, the one computed on
    /// the calling thread included, is returned as [`ThreadError::Join`].
    pub fn compute_into<K>(
        &self,
        kernel: &K,
        num_threads: usize,
        scene: &Scene,
        buffer: &mut IterationBuffer,
    ) -> Result<(), EngineError>
    where
        K: PixelKernel,
    {
        check_dimensions(scene, buffer)?;
        let assignments = partition::partition(scene.height(), num_threads, self.max_threads)?;
        let width = scene.width();
        let mut blocks = buffer.split_rows_mut(&assignments).into_iter();
        let first = blocks.next();

        thread::scope(|s| {
            let mut workers = Vec::with_capacity(num_threads - 1);
            let mut failure: Option<EngineError> = None;

            for (assignment, block) in assignments.iter().skip(1).zip(blocks) {
                let WorkAssignment {
                    thread_id,
                    start_row,
                    ..
                } = *assignment;
                let pin = self.pin_position(thread_id);
                let started = Thread::start(s, thread_id, pin, move || {
                    kernel.compute_rows(scene, start_row, block)
                });
                match started {
                    Ok(worker) => workers.push(worker),
                    Err(err) => {
                        error!("{}", err);
                        failure = Some(err.into());
                        break;
                    }
                }
            }

            // The calling thread works on block 0.
            if failure.is_none() {
                if let Some(block) = first {
                    debug_assert_eq!(block.len(), assignments[0].row_count * width);
                    let start_row = assignments[0].start_row;
                    let inline = panic::catch_unwind(AssertUnwindSafe(|| {
                        kernel.compute_rows(scene, start_row, block)
                    }));
                    if inline.is_err() {
                        error!("Thread[0] panicked.");
                        failure = Some(ThreadError::Join { id: 0 }.into());
                    }
                }
            }

            for worker in workers {
                let id = worker.id();
                if let Err(err) = worker.wait() {
                    debug!("Worker {} failed", id);
                    if failure.is_none() {
                        failure = Some(err.into());
                    }
                }
            }

            match failure {
                Some(err) => Err(err),
                None => Ok(()),
            }
        })
    }
}
