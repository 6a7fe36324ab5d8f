//! Core components of the renderer.
//!
//! This module contains the runtime configuration, read from the environment,
//! and the configuration errors shared by the partitioner, the engine and
//! the command line.
//!
pub mod configuration;
pub mod err;
