//! Regret solver over an explicit information-set graph.
//!
//! This module implements regret matching over the twelve decision points
//! of Kuhn poker. Instead of sampling or recursing over the game tree, every
//! info set is enumerated up front and each iteration updates all of them
//! in five passes.
//!
//! # Overview
//!
//! One iteration:
//! 1. Derive each info set's strategy from its accumulated positive regret
//! 2. Propagate beliefs about the opponent's card from the parents' strategies
//! 3. Evaluate action utilities from the leaves back to the roots
//! 4. Compute counterfactual reach probabilities
//! 5. Add reach-weighted positive regret and re-derive the strategy
//!
//! The total regret added in step 5 is the convergence signal; it shrinks
//! towards zero as the profile approaches equilibrium.
//!
//! # Example
//!
//! ```
//! use kuhn_solver::cfr::{KuhnSolver, SolverConfig};
//!
//! let config = SolverConfig::default().with_iterations(2_000);
//! let mut solver = KuhnSolver::new(config).unwrap();
//! let stats = solver.run();
//! println!("{} info sets, {:.2}s", stats.info_sets, stats.elapsed_seconds);
//!
//! // King facing a bet always calls
//! let kb = solver.strategy("Kb").unwrap();
//! assert!(kb[0] > 0.9);
//! ```
//!
//! # Theory
//!
//! **Regret**: how much better an action did than the current mix, weighted
//! by the probability that the opponent and chance lead to this info set.
//! ```text
//! Regret(a) = max(0, u(a) - EU) * reach
//! ```
//!
//! **Regret Matching**: play each action in proportion to its regret sum.
//! ```text
//! Strategy(a) = RegretSum(a) / sum(RegretSum(a'))
//! ```

pub mod config;
pub mod evaluation;
pub mod graph;
pub mod solver;
pub mod stages;
pub mod storage;

// Re-export main types for convenient access
pub use config::{ConfigError, RegretPoint, SolverConfig, SolverStats};
pub use graph::{Edge, GraphError, InfoSetGraph, InfoSetKey};
pub use solver::{KuhnSolver, SolverError};
pub use storage::{InfoSet, InfoSetRegistry, InfoSetSnapshot, SolverSnapshot};
