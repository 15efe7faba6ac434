//! Configuration options for the solver.
//!
//! This module provides configuration structs that control the iteration
//! budget and reporting cadence of the solver, and the statistics it
//! records while training.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration for the solver.
///
/// # Example
/// ```
/// use kuhn_solver::cfr::SolverConfig;
///
/// let config = SolverConfig::default().with_iterations(10_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Number of iterations [`KuhnSolver::run`](crate::cfr::KuhnSolver::run) performs.
    pub iterations: u64,

    /// How often (in iterations) the regret signal is recorded and logged.
    pub checkpoint_interval: u64,

    /// Compute exploitability at every checkpoint.
    ///
    /// Exact, but enumerates every pure strategy of both players, so it is
    /// much slower than an iteration.
    pub track_exploitability: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iterations: 50_000,
            checkpoint_interval: 1_000,
            track_exploitability: false,
        }
    }
}

impl SolverConfig {
    /// Create a new SolverConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the iteration budget.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder method: set the checkpoint interval.
    pub fn with_checkpoint_interval(mut self, interval: u64) -> Self {
        self.checkpoint_interval = interval;
        self
    }

    /// Builder method: set whether to track exploitability at checkpoints.
    pub fn with_exploitability(mut self, enable: bool) -> Self {
        self.track_exploitability = enable;
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::InvalidIterations);
        }
        if self.checkpoint_interval == 0 {
            return Err(ConfigError::InvalidCheckpointInterval);
        }
        Ok(())
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Iteration budget is zero.
    #[error("iteration count must be positive")]
    InvalidIterations,
    /// Checkpoint interval is zero.
    #[error("checkpoint interval must be positive")]
    InvalidCheckpointInterval,
    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(String),
    /// Configuration file is not valid JSON for this struct.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Statistics tracked during training.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverStats {
    /// Total number of iterations completed.
    pub iterations: u64,

    /// Number of information sets.
    pub info_sets: usize,

    /// Total time spent training (in seconds).
    pub elapsed_seconds: f64,

    /// Iterations per second.
    pub iterations_per_second: f64,

    /// Total regret added by the most recent iteration.
    pub last_total_regret: f64,

    /// Most recent exploitability measurement, if tracked.
    pub exploitability: Option<f64>,

    /// Regret signal recorded at each checkpoint.
    pub regret_history: Vec<RegretPoint>,
}

/// The convergence signal at a specific iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegretPoint {
    /// Iteration number when this measurement was taken.
    pub iteration: u64,
    /// Total regret added by that iteration.
    pub total_regret: f64,
    /// Exploitability at that iteration, if tracked.
    pub exploitability: Option<f64>,
}

impl SolverStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update iterations per second based on elapsed time.
    pub fn update_rate(&mut self) {
        if self.elapsed_seconds > 0.0 {
            self.iterations_per_second = self.iterations as f64 / self.elapsed_seconds;
        }
    }

    /// Record a checkpoint.
    pub fn record_checkpoint(&mut self, iteration: u64, total_regret: f64, exploitability: Option<f64>) {
        if exploitability.is_some() {
            self.exploitability = exploitability;
        }
        self.regret_history.push(RegretPoint {
            iteration,
            total_regret,
            exploitability,
        });
    }
}
