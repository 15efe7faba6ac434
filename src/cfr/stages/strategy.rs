//! Regret matching.

use crate::cfr::stages::normalize_or_uniform;
use crate::cfr::storage::InfoSetRegistry;

/// Set every info set's strategy proportional to its accumulated regret.
///
/// Info sets with no accumulated regret play uniformly.
pub fn update(registry: &mut InfoSetRegistry) {
    for info_set in registry.iter_mut() {
        info_set.strategy = normalize_or_uniform(info_set.regret_sum);
    }
}
