//! # Kuhn Solver
//!
//! A regret-matching solver that computes equilibrium strategies for Kuhn
//! poker by updating an explicit graph of its twelve information sets.
//!
//! ## Features
//!
//! - **Enumerated Info Sets**: every decision point is a node in a validated graph
//! - **Deterministic Iterations**: five full passes per iteration, no sampling
//! - **Convergence Signal**: total regret added per iteration, recorded at checkpoints
//! - **Exact Evaluation**: game value and exploitability by full enumeration
//! - **Snapshots**: JSON export of every info set's state
//!
//! ## Quick Start
//!
//! ```
//! use kuhn_solver::{KuhnSolver, SolverConfig};
//!
//! let mut solver = KuhnSolver::new(SolverConfig::default()).unwrap();
//! solver.train(1_000);
//!
//! let strategy = solver.strategy("Qb").unwrap();
//! println!("Queen facing a bet: call {:.3}, fold {:.3}", strategy[0], strategy[1]);
//! ```
//!
//! ## Modules
//!
//! - [`cfr`]: Info-set graph, per-iteration stages and the solver
//! - [`games`]: Kuhn poker rules (cards, histories, payoffs)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          KuhnSolver                             │
//! │  - Iteration loop         - Checkpoints and stats               │
//! │  - Snapshots              - Game value / exploitability         │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ runs stages over
//!                               ▼
//!         ┌─────────────────────┼─────────────────────┐
//!         │                     │                     │
//!         ▼                     ▼                     ▼
//!   ┌───────────┐        ┌─────────────┐       ┌─────────────┐
//!   │ InfoSet   │        │ InfoSet     │       │ Kuhn rules  │
//!   │ Graph     │        │ Registry    │       │ & payoffs   │
//!   └───────────┘        └─────────────┘       └─────────────┘
//! ```

#![warn(missing_docs)]

/// Regret solver module.
///
/// Contains the info-set graph, the iteration stages and the solver.
pub mod cfr;

/// Game definitions module.
///
/// Contains the rules of Kuhn poker the graph is built from.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use cfr::{InfoSetGraph, InfoSetKey, KuhnSolver, SolverConfig, SolverError, SolverSnapshot, SolverStats};
pub use games::kuhn::{Card, History, KuhnAction};
