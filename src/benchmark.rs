//! Benchmark driver.
//!
//! A measurement runs the same computation several times and keeps the
//! minimum elapsed time, which filters out most of the scheduling noise.
//! A [`Sweep`] measures the engine over a range of thread counts and keeps
//! the fastest one. The driver does no reporting: samples are handed back to
//! the caller, that decides what to print.
use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::core::configuration::DEFAULT_TRIALS;
use crate::core::err::ConfigError;
use crate::engine::{Engine, EngineError};
use crate::fractal::buffer::IterationBuffer;
use crate::fractal::kernel::PixelKernel;
use crate::fractal::Scene;
use crate::serial;

/// Run `f` `trials` times on `buffer` and return the minimum elapsed time.
///
/// The buffer is zeroed before each trial. The first error returned by `f`
/// aborts the measurement.
///
/// # Panics
/// Panics if `trials` is 0.
pub fn time_repeated<F, E>(
    trials: usize,
    buffer: &mut IterationBuffer,
    mut f: F,
) -> Result<Duration, E>
where
    F: FnMut(&mut IterationBuffer) -> Result<(), E>,
{
    assert!(trials > 0, "at least one trial is required");
    let mut min = Duration::MAX;
    for trial in 0..trials {
        buffer.clear();
        let start = Instant::now();
        f(buffer)?;
        let elapsed = start.elapsed();
        trace!("Trial {} took {:?}", trial, elapsed);
        min = min.min(elapsed);
    }
    Ok(min)
}

/// Time the serial renderer on `scene` and leave its output in `buffer`.
pub fn serial_baseline<K>(
    kernel: &K,
    scene: &Scene,
    trials: usize,
    buffer: &mut IterationBuffer,
) -> Result<Duration, EngineError>
where
    K: PixelKernel,
{
    let min = time_repeated(trials, buffer, |buf| serial::compute_into(kernel, scene, buf))?;
    info!("Serial baseline: {:?}", min);
    Ok(min)
}

/// The minimum time measured for one thread count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub num_threads: usize,
    pub min_time: Duration,
}

impl Sample {
    pub fn millis(&self) -> f64 {
        self.min_time.as_secs_f64() * 1000.0
    }
}

/// The best thread count seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimalConfig {
    pub best_time: Duration,
    pub num_threads: usize,
}

impl Default for OptimalConfig {
    /// No measurement yet: infinite time on a single thread.
    fn default() -> Self {
        OptimalConfig {
            best_time: Duration::MAX,
            num_threads: 1,
        }
    }
}

impl OptimalConfig {
    /// Fold `sample` into the optimum.
    /// The optimum is replaced only if the sample is strictly faster.
    /// Returns true if it was replaced.
    pub fn update(&mut self, sample: &Sample) -> bool {
        if sample.min_time < self.best_time {
            self.best_time = sample.min_time;
            self.num_threads = sample.num_threads;
            true
        } else {
            false
        }
    }

    pub fn millis(&self) -> f64 {
        self.best_time.as_secs_f64() * 1000.0
    }

    /// Speedup of the optimum over a `baseline` time.
    pub fn speedup(&self, baseline: Duration) -> f64 {
        baseline.as_secs_f64() / self.best_time.as_secs_f64()
    }
}

/// The outcome of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    /// One sample per thread count, in sweep order.
    pub samples: Vec<Sample>,
    pub optimal: OptimalConfig,
}

impl SweepReport {
    /// Thread counts whose time is within `tolerance`, relative, of the best time.
    /// The best thread count is always part of them.
    pub fn near_optimal(&self, tolerance: f64) -> Vec<usize> {
        let limit = self.optimal.best_time.as_secs_f64() * (1.0 + tolerance);
        self.samples
            .iter()
            .filter(|s| s.min_time.as_secs_f64() <= limit)
            .map(|s| s.num_threads)
            .collect()
    }
}

/// A sweep of the engine over a range of thread counts.
pub struct Sweep<'a, K> {
    engine: &'a Engine,
    kernel: &'a K,
    scene: &'a Scene,
    threads: RangeInclusive<usize>,
    trials: usize,
}

impl<'a, K> Sweep<'a, K>
where
    K: PixelKernel,
{
    /// Create a sweep from 2 threads up to the engine limit, with the default trials.
    pub fn new(engine: &'a Engine, kernel: &'a K, scene: &'a Scene) -> Self {
        Sweep {
            engine,
            kernel,
            scene,
            threads: 2..=engine.max_threads(),
            trials: DEFAULT_TRIALS,
        }
    }

    /// Set the inclusive range of thread counts.
    pub fn threads(mut self, threads: RangeInclusive<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Set the number of trials per thread count.
    ///
    /// # Panics
    /// Panics if `trials` is 0.
    pub fn trials(mut self, trials: usize) -> Self {
        assert!(trials > 0, "at least one trial is required");
        self.trials = trials;
        self
    }

    fn check(&self) -> Result<(), ConfigError> {
        let (min, max) = (*self.threads.start(), *self.threads.end());
        if min == 0 || min > max {
            return Err(ConfigError::InvalidSweep { min, max });
        }
        self.engine.check_threads(max)
    }

    /// Run the sweep, reusing `buffer` for every measurement.
    /// At the end `buffer` holds the output of the last thread count.
    pub fn run(&self, buffer: &mut IterationBuffer) -> Result<SweepReport, EngineError> {
        self.run_with(buffer, |_, _| {})
    }

    /// Run the sweep, calling `observer` after each thread count with its
    /// sample and the buffer it rendered.
    pub fn run_with<F>(
        &self,
        buffer: &mut IterationBuffer,
        mut observer: F,
    ) -> Result<SweepReport, EngineError>
    where
        F: FnMut(&Sample, &IterationBuffer),
    {
        self.check()?;
        let mut samples = Vec::with_capacity(self.threads.clone().count());
        let mut optimal = OptimalConfig::default();

        for num_threads in self.threads.clone() {
            let min_time = time_repeated(self.trials, buffer, |buf| {
                self.engine.compute_into(self.kernel, num_threads, self.scene, buf)
            })?;
            let sample = Sample {
                num_threads,
                min_time,
            };
            if optimal.update(&sample) {
                debug!("New optimum: {} threads in {:?}", num_threads, min_time);
            } else {
                debug!("{} threads in {:?}", num_threads, min_time);
            }
            observer(&sample, buffer);
            samples.push(sample);
        }

        info!(
            "Optimal configuration: {} threads in {:?}",
            optimal.num_threads, optimal.best_time
        );
        Ok(SweepReport { samples, optimal })
    }
}

/// Sweep the engine over the thread counts in `threads` and return the best
/// time with its thread count.
pub fn find_optimal<K>(
    engine: &Engine,
    kernel: &K,
    scene: &Scene,
    threads: RangeInclusive<usize>,
    buffer: &mut IterationBuffer,
) -> Result<OptimalConfig, EngineError>
where
    K: PixelKernel,
{
    Sweep::new(engine, kernel, scene)
        .threads(threads)
        .run(buffer)
        .map(|report| report.optimal)
}
