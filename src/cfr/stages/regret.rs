//! Counterfactual regret accumulation.

use crate::cfr::storage::InfoSetRegistry;
use crate::games::kuhn::NUM_ACTIONS;

/// Add `max(0, utility(a) - expected utility) * reach` to each action's
/// regret sum.
///
/// Returns the total regret added across all info sets and actions, the
/// solver's convergence signal.
pub fn update(registry: &mut InfoSetRegistry) -> f64 {
    let mut total = 0.0;
    for info_set in registry.iter_mut() {
        let expected = info_set.expected_utility;
        let reach = info_set.reach;
        for a in 0..NUM_ACTIONS {
            let gap = info_set.action_utilities[a] - expected;
            total += info_set.add_regret(a, gap.max(0.0) * reach);
        }
    }
    total
}
