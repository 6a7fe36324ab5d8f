use std::{error, fmt};

/// An error in the configuration of a run.
///
/// Configuration errors are detected before any computation starts and are
/// never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Zero worker threads were requested.
    ZeroThreads,
    /// More worker threads were requested than the engine allows.
    TooManyThreads { requested: usize, max: usize },
    /// The image has no rows or no columns.
    EmptyImage { width: usize, height: usize },
    /// The view index has no preset.
    InvalidView(i64),
    /// The thread-count sweep covers no valid thread count.
    InvalidSweep { min: usize, max: usize },
    /// An environment variable holds a value that can't be used.
    InvalidEnv { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroThreads => write!(f, "At least one thread is required."),
            ConfigError::TooManyThreads { requested, max } => {
                write!(f, "Max allowed threads is {}, requested {}.", max, requested)
            }
            ConfigError::EmptyImage { width, height } => {
                write!(f, "Image size {}x{} has no pixels.", width, height)
            }
            ConfigError::InvalidView(index) => write!(f, "Invalid view index {}.", index),
            ConfigError::InvalidSweep { min, max } => {
                write!(f, "Invalid thread sweep {}..={}.", min, max)
            }
            ConfigError::InvalidEnv { var, value } => {
                write!(f, "Invalid value {:?} for {}.", value, var)
            }
        }
    }
}

impl error::Error for ConfigError {}
