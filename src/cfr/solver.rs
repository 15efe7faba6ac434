//! Information-set regret minimization solver.
//!
//! The orchestrator owns the graph and the registry and runs the fixed
//! sequence of stages once per iteration:
//!
//! 1. **Strategy**: regret matching snapshots the strategy used this iteration
//! 2. **Belief**: each node's posterior over the opponent's card
//! 3. **Utility**: action values, evaluated leaf to root
//! 4. **Reach**: chance and opponent reach of each node
//! 5. **Regret**: reach-weighted positive utility gaps accumulate
//! 6. **Strategy**: refresh so the registry is consistent for inspection
//!    and for the next iteration's belief stage

use std::time::Instant;
use thiserror::Error;

use crate::cfr::config::{ConfigError, SolverConfig, SolverStats};
use crate::cfr::evaluation;
use crate::cfr::graph::{GraphError, InfoSetGraph};
use crate::cfr::stages::{belief, reach, regret, strategy, utility};
use crate::cfr::storage::{InfoSet, InfoSetRegistry, SolverSnapshot};
use crate::games::kuhn::NUM_ACTIONS;

/// Errors raised when constructing a solver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Inconsistent label universe.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// The solver.
///
/// # Example
/// ```
/// use kuhn_solver::cfr::{KuhnSolver, SolverConfig};
///
/// let mut solver = KuhnSolver::new(SolverConfig::default()).unwrap();
/// solver.train(1_000);
///
/// let king = solver.strategy("K").unwrap();
/// assert!((king[0] + king[1] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct KuhnSolver {
    /// Static info-set structure.
    graph: InfoSetGraph,

    /// Configuration for the solver.
    config: SolverConfig,

    /// Per-info-set mutable state.
    registry: InfoSetRegistry,

    /// Current iteration count.
    iteration: u64,

    /// Total regret added by the most recent iteration.
    last_total_regret: f64,

    /// Statistics tracking.
    stats: SolverStats,
}

impl KuhnSolver {
    /// Create a solver over the canonical Kuhn poker graph.
    pub fn new(config: SolverConfig) -> Result<Self, SolverError> {
        Self::with_graph(config, InfoSetGraph::kuhn())
    }

    /// Create a solver over a validated graph.
    pub fn with_graph(config: SolverConfig, graph: InfoSetGraph) -> Result<Self, SolverError> {
        config.validate()?;
        let registry = InfoSetRegistry::new(&graph);
        Ok(Self {
            graph,
            config,
            registry,
            iteration: 0,
            last_total_regret: 0.0,
            stats: SolverStats::new(),
        })
    }

    /// Create a solver over a graph built from labels.
    pub fn from_labels<S: AsRef<str>>(config: SolverConfig, labels: &[S]) -> Result<Self, SolverError> {
        let graph = InfoSetGraph::from_labels(labels)?;
        Self::with_graph(config, graph)
    }

    /// Run a single iteration of every stage.
    ///
    /// Returns the total regret added, summed over all info sets and actions.
    pub fn run_iteration(&mut self) -> f64 {
        self.iteration += 1;

        strategy::update(&mut self.registry);
        belief::update(&self.graph, &mut self.registry);
        utility::update(&self.graph, &mut self.registry);
        reach::update(&self.graph, &mut self.registry);
        let total = regret::update(&mut self.registry);
        strategy::update(&mut self.registry);

        self.last_total_regret = total;
        log::trace!("iteration {:<10} total regret {:.6e}", self.iteration, total);
        total
    }

    /// Run the number of iterations given by the configuration.
    pub fn run(&mut self) -> &SolverStats {
        let iterations = self.config.iterations;
        let interval = self.config.checkpoint_interval;
        self.train_with_callback(iterations, interval, |_| {})
    }

    /// Train the solver for a specified number of iterations.
    ///
    /// # Arguments
    /// * `iterations` - Number of iterations to run; zero leaves the registry untouched
    ///
    /// # Returns
    /// Statistics from the training run.
    pub fn train(&mut self, iterations: u64) -> &SolverStats {
        let interval = self.config.checkpoint_interval;
        self.train_with_callback(iterations, interval, |_| {})
    }

    /// Train with a callback for progress tracking.
    ///
    /// # Arguments
    /// * `iterations` - Number of iterations to run
    /// * `callback_interval` - How often to record a checkpoint and call the callback
    /// * `callback` - Function called at every checkpoint
    pub fn train_with_callback<F>(
        &mut self,
        iterations: u64,
        callback_interval: u64,
        mut callback: F,
    ) -> &SolverStats
    where
        F: FnMut(&SolverStats),
    {
        let start_time = Instant::now();
        let interval = callback_interval.max(1);
        log::info!(
            "{:<32}{:<16}{:<16}",
            "training kuhn solver",
            format!("{} iterations", iterations),
            format!("{} info sets", self.graph.len())
        );

        for i in 0..iterations {
            let total = self.run_iteration();

            if (i + 1) % interval == 0 {
                let exploitability = self
                    .config
                    .track_exploitability
                    .then(|| self.exploitability());
                self.stats.record_checkpoint(self.iteration, total, exploitability);
                self.update_stats(start_time);
                match exploitability {
                    Some(e) => log::debug!(
                        "checkpoint {:<10} total regret {:.6e} exploitability {:.6e}",
                        self.iteration,
                        total,
                        e
                    ),
                    None => log::debug!("checkpoint {:<10} total regret {:.6e}", self.iteration, total),
                }
                callback(&self.stats);
            }
        }

        self.update_stats(start_time);
        log::info!(
            "{:<32}{:<16}{:.2}s",
            "finished training",
            format!("{} iterations", self.iteration),
            self.stats.elapsed_seconds
        );
        &self.stats
    }

    fn update_stats(&mut self, start_time: Instant) {
        self.stats.iterations = self.iteration;
        self.stats.info_sets = self.graph.len();
        self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
        self.stats.last_total_regret = self.last_total_regret;
        self.stats.update_rate();
    }

    /// Get the current strategy for an information set label.
    pub fn strategy(&self, label: &str) -> Result<[f64; NUM_ACTIONS], GraphError> {
        self.info_set(label).map(InfoSet::strategy)
    }

    /// Get an information set by label.
    pub fn info_set(&self, label: &str) -> Result<&InfoSet, GraphError> {
        let node = self.graph.index_of_label(label)?;
        Ok(&self.registry[node])
    }

    /// Snapshot every information set for reporting.
    pub fn snapshot(&self) -> SolverSnapshot {
        SolverSnapshot {
            iteration: self.iteration,
            total_regret: self.last_total_regret,
            info_sets: self.registry.snapshot(),
        }
    }

    /// Expected payoff to the first player under the current strategies.
    pub fn game_value(&self) -> f64 {
        evaluation::game_value(&self.graph, &self.registry)
    }

    /// Exploitability of the current strategies.
    pub fn exploitability(&self) -> f64 {
        evaluation::exploitability(&self.graph, &self.registry)
    }

    /// Get the current iteration count.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Total regret added by the most recent iteration.
    pub fn last_total_regret(&self) -> f64 {
        self.last_total_regret
    }

    /// Get current statistics.
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Get reference to the graph.
    pub fn graph(&self) -> &InfoSetGraph {
        &self.graph
    }

    /// Get reference to the registry for analysis.
    pub fn registry(&self) -> &InfoSetRegistry {
        &self.registry
    }

    /// Get mutable access to the registry (for seeding regret sums).
    pub fn registry_mut(&mut self) -> &mut InfoSetRegistry {
        &mut self.registry
    }

    /// Overwrite an info set's regret sums; negatives are clamped to zero.
    pub fn seed_regret_sum(&mut self, label: &str, regret_sum: [f64; NUM_ACTIONS]) -> Result<(), GraphError> {
        self.registry.seed_regret_sum(&self.graph, label, regret_sum)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Reset the solver to initial state.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.iteration = 0;
        self.last_total_regret = 0.0;
        self.stats = SolverStats::new();
    }
}
