//! Game definitions for the solver.
//!
//! ## Available Games
//!
//! - [`kuhn`]: Kuhn Poker - a simplified 3-card poker game with a known Nash equilibrium
//!
//! The solver's information-set graph is built from the fixed structure
//! described here: three cards, two actions and at most three plies.

pub mod kuhn;
