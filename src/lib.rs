//! Mandelsweep is a statically partitioned multi-threaded Mandelbrot renderer.
//!
//! The image rows are divided into contiguous blocks, one per thread, and
//! each block is computed on its own OS thread. A benchmark driver measures
//! the engine over a range of thread counts to find the best degree of
//! parallelism for the machine, validating the output against a serial run.
//#![warn(missing_docs)]

pub mod benchmark;
pub mod core;
pub mod engine;
pub mod fractal;
pub mod image_writer;
pub mod partition;
pub mod serial;
mod thread;
pub mod verify;

pub mod prelude {
    //! This module contains the most used types and traits.
    pub use crate::benchmark::{time_repeated, OptimalConfig, Sample, Sweep, SweepReport};
    pub use crate::core::configuration::Configuration;
    pub use crate::core::err::ConfigError;
    pub use crate::engine::{Engine, EngineError};
    pub use crate::fractal::buffer::IterationBuffer;
    pub use crate::fractal::kernel::{Mandelbrot, PixelKernel};
    pub use crate::fractal::viewport::{View, Viewport};
    pub use crate::fractal::Scene;
    pub use crate::partition::WorkAssignment;
    pub use crate::verify::{verify, Mismatch, VerifyError};
}
