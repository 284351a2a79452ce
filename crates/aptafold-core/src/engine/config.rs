use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_EXECUTABLE: &str = "RNAfold";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// How the folding executable is launched.
///
/// `temperature`, `parameter_file` and `extra_args` are handed to the executable as-is;
/// nothing else in the pipeline interprets them.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldConfig {
    pub executable: PathBuf,
    pub temperature: Option<f64>,
    pub parameter_file: Option<PathBuf>,
    pub extra_args: Vec<String>,
    pub timeout: Duration,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            temperature: None,
            parameter_file: None,
            extra_args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    pub jobs: usize, // Concurrent folding invocations; 0 and 1 both mean sequential
}

impl BatchConfig {
    pub fn sequential() -> Self {
        Self { jobs: 1 }
    }

    pub fn with_jobs(jobs: usize) -> Self {
        Self { jobs }
    }

    pub(crate) fn effective_jobs(&self) -> usize {
        self.jobs.max(1)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::sequential()
    }
}

#[derive(Default)]
pub struct FoldConfigBuilder {
    executable: Option<PathBuf>,
    temperature: Option<f64>,
    parameter_file: Option<PathBuf>,
    extra_args: Vec<String>,
    timeout: Option<Duration>,
}

impl FoldConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }
    pub fn temperature(mut self, celsius: Option<f64>) -> Self {
        self.temperature = celsius;
        self
    }
    pub fn parameter_file(mut self, path: Option<PathBuf>) -> Self {
        self.parameter_file = path;
        self
    }
    pub fn extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<FoldConfig, ConfigError> {
        let executable = self
            .executable
            .ok_or(ConfigError::MissingParameter("executable"))?;
        if executable.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                parameter: "executable",
                reason: "must not be empty".to_string(),
            });
        }

        let timeout = self.timeout.ok_or(ConfigError::MissingParameter("timeout"))?;
        if timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                parameter: "timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        if let Some(t) = self.temperature {
            if !t.is_finite() || t <= ABSOLUTE_ZERO_CELSIUS {
                return Err(ConfigError::InvalidValue {
                    parameter: "temperature",
                    reason: format!("{} is not a valid temperature in degrees Celsius", t),
                });
            }
        }

        Ok(FoldConfig {
            executable,
            temperature: self.temperature,
            parameter_file: self.parameter_file,
            extra_args: self.extra_args,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_config_with_all_values() {
        let config = FoldConfigBuilder::new()
            .executable("/opt/vienna/bin/RNAfold")
            .temperature(Some(25.0))
            .parameter_file(Some(PathBuf::from("dna_mathews2004.par")))
            .extra_args(vec!["--noLP".to_string()])
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.executable, PathBuf::from("/opt/vienna/bin/RNAfold"));
        assert_eq!(config.temperature, Some(25.0));
        assert_eq!(
            config.parameter_file,
            Some(PathBuf::from("dna_mathews2004.par"))
        );
        assert_eq!(config.extra_args, vec!["--noLP".to_string()]);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn builder_requires_executable_and_timeout() {
        let missing_exe = FoldConfigBuilder::new()
            .timeout(Duration::from_secs(1))
            .build();
        assert_eq!(
            missing_exe,
            Err(ConfigError::MissingParameter("executable"))
        );

        let missing_timeout = FoldConfigBuilder::new().executable("RNAfold").build();
        assert_eq!(
            missing_timeout,
            Err(ConfigError::MissingParameter("timeout"))
        );
    }

    #[test]
    fn builder_rejects_zero_timeout() {
        let result = FoldConfigBuilder::new()
            .executable("RNAfold")
            .timeout(Duration::ZERO)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "timeout",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_impossible_temperature() {
        for t in [f64::NAN, f64::INFINITY, -300.0] {
            let result = FoldConfigBuilder::new()
                .executable("RNAfold")
                .timeout(Duration::from_secs(1))
                .temperature(Some(t))
                .build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidValue {
                    parameter: "temperature",
                    ..
                })
            ));
        }
    }

    #[test]
    fn batch_config_treats_zero_jobs_as_sequential() {
        assert_eq!(BatchConfig::with_jobs(0).effective_jobs(), 1);
        assert_eq!(BatchConfig::with_jobs(8).effective_jobs(), 8);
        assert_eq!(BatchConfig::default(), BatchConfig::sequential());
    }
}
