use std::env;
use std::str::FromStr;

use super::err::ConfigError;

/// Default upper bound on the number of threads the engine accepts.
pub const DEFAULT_MAX_THREADS: usize = 32;
/// Default number of trials per measurement.
pub const DEFAULT_TRIALS: usize = 5;
/// Default relative tolerance used to report near-optimal thread counts.
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Global configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    max_threads: usize,
    thread_mapping: Vec<usize>,
    pinning: bool,
    trials: usize,
    tolerance: f64,
}

/// Read and parse an environment variable, `None` if it is not set.
fn parse_env<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value: val }),
        Err(_) => Ok(None),
    }
}

/// Parse the core mapping from the environment variable MANDEL_THREAD_MAPPING.
fn parse_core_mapping() -> Result<Vec<usize>, ConfigError> {
    match env::var("MANDEL_THREAD_MAPPING") {
        Ok(val) => val
            .split(',')
            .map(|pos| pos.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::InvalidEnv {
                var: "MANDEL_THREAD_MAPPING",
                value: val.clone(),
            }),
        Err(_) => Ok((0..num_cpus::get()).collect()),
    }
}

impl Configuration {
    pub fn new(max_threads: usize, pinning: bool, trials: usize) -> Configuration {
        Configuration {
            max_threads,
            thread_mapping: (0..num_cpus::get()).collect(),
            pinning,
            trials,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Build the configuration from the `MANDEL_*` environment variables,
    /// falling back to the defaults for the unset ones.
    pub fn new_default() -> Result<Configuration, ConfigError> {
        let max_threads = parse_env::<usize>("MANDEL_MAX_THREADS")?.unwrap_or(DEFAULT_MAX_THREADS);
        if max_threads == 0 {
            return Err(ConfigError::InvalidEnv {
                var: "MANDEL_MAX_THREADS",
                value: max_threads.to_string(),
            });
        }
        let trials = parse_env::<usize>("MANDEL_TRIALS")?.unwrap_or(DEFAULT_TRIALS);
        if trials == 0 {
            return Err(ConfigError::InvalidEnv {
                var: "MANDEL_TRIALS",
                value: trials.to_string(),
            });
        }
        let pinning = parse_env::<bool>("MANDEL_PINNING")?.unwrap_or(false);
        let tolerance = parse_env::<f64>("MANDEL_TOLERANCE")?.unwrap_or(DEFAULT_TOLERANCE);
        if !(tolerance >= 0.0 && tolerance.is_finite()) {
            return Err(ConfigError::InvalidEnv {
                var: "MANDEL_TOLERANCE",
                value: tolerance.to_string(),
            });
        }

        Ok(Configuration {
            max_threads,
            thread_mapping: parse_core_mapping()?,
            pinning,
            trials,
            tolerance,
        })
    }

    /// Get the maximum number of threads allowed.
    pub fn max_threads(&self) -> usize {
        self.max_threads
    }

    /// Get the thread mapping.
    /// Entry `i` is the core position worker `i` is pinned on.
    pub fn thread_mapping(&self) -> &[usize] {
        &self.thread_mapping
    }

    /// Get the pinning flag.
    pub fn pinning(&self) -> bool {
        self.pinning
    }

    /// Get the number of trials per measurement.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Get the relative tolerance within which a thread count counts as optimal.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new(DEFAULT_MAX_THREADS, false, DEFAULT_TRIALS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::serial_test::serial;

    fn reset_env() {
        env::remove_var("MANDEL_MAX_THREADS");
        env::remove_var("MANDEL_PINNING");
        env::remove_var("MANDEL_TRIALS");
        env::remove_var("MANDEL_THREAD_MAPPING");
        env::remove_var("MANDEL_TOLERANCE");
    }

    #[test]
    #[serial]
    fn test_configuration() {
        reset_env();
        let conf = Configuration::new_default().unwrap();
        assert_eq!(conf.max_threads(), DEFAULT_MAX_THREADS);
        assert_eq!(conf.trials(), DEFAULT_TRIALS);
        assert_eq!(conf.thread_mapping().len(), num_cpus::get());
        assert!(!conf.pinning());
        assert_eq!(conf, Configuration::default());
    }

    #[test]
    #[serial]
    fn test_configuration_with_env() {
        env::set_var("MANDEL_MAX_THREADS", "4");
        env::set_var("MANDEL_PINNING", "true");
        env::set_var("MANDEL_TRIALS", "3");
        env::set_var("MANDEL_TOLERANCE", "0.1");

        let conf = Configuration::new_default().unwrap();
        assert_eq!(conf.max_threads(), 4);
        assert!(conf.pinning());
        assert_eq!(conf.trials(), 3);
        assert_eq!(conf.tolerance(), 0.1);
        reset_env();
    }

    #[test]
    #[serial]
    fn test_configuration_with_mapping() {
        env::set_var("MANDEL_THREAD_MAPPING", "1, 0,2,3");
        let conf = Configuration::new_default().unwrap();
        assert_eq!(conf.thread_mapping(), &[1, 0, 2, 3]);
        reset_env();
    }

    #[test]
    #[serial]
    fn test_configuration_rejects_bad_values() {
        env::set_var("MANDEL_MAX_THREADS", "many");
        assert_eq!(
            Configuration::new_default().unwrap_err(),
            ConfigError::InvalidEnv {
                var: "MANDEL_MAX_THREADS",
                value: "many".to_string()
            }
        );
        reset_env();

        env::set_var("MANDEL_TRIALS", "0");
        assert!(Configuration::new_default().is_err());
        reset_env();

        env::set_var("MANDEL_THREAD_MAPPING", "0,x");
        assert!(Configuration::new_default().is_err());
        reset_env();

        env::set_var("MANDEL_TOLERANCE", "-1");
        assert!(Configuration::new_default().is_err());
        reset_env();
    }
}
