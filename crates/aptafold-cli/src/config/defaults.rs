use aptafold::engine::config::{DEFAULT_EXECUTABLE, DEFAULT_TIMEOUT};
use std::thread;

/// Environment variable naming the RNAfold executable to use when neither the
/// configuration file nor the command line choose one.
pub const RNAFOLD_BIN_ENV: &str = "APTAFOLD_RNAFOLD_BIN";

pub struct DefaultsConfig {
    pub executable: String,
    pub timeout_secs: u64,
    pub jobs: usize,
    pub include_metrics: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            executable: std::env::var(RNAFOLD_BIN_ENV)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string()),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            jobs: thread::available_parallelism().map_or(1, |n| n.get()),
            include_metrics: false,
        }
    }
}
