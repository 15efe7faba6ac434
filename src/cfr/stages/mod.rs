//! The five per-iteration stages.
//!
//! Each stage is a pass over the whole registry. The orchestrator runs them
//! in a fixed order every iteration:
//!
//! ```text
//! strategy → belief → utility (leaf to root) → reach → regret → strategy
//! ```
//!
//! Stages read only values produced earlier in the same iteration, or
//! values of the same stage that the traversal order has already produced
//! (the utility stage reads its children's results).

pub mod belief;
pub mod reach;
pub mod regret;
pub mod strategy;
pub mod utility;

/// Normalize a pair of non-negative weights, falling back to uniform when
/// their total is not positive.
///
/// Both regret matching and belief updates use this policy, so a degenerate
/// total is never an error.
pub fn normalize_or_uniform(weights: [f64; 2]) -> [f64; 2] {
    let total = weights[0] + weights[1];
    if total > 0.0 {
        [weights[0] / total, weights[1] / total]
    } else {
        [0.5, 0.5]
    }
}
