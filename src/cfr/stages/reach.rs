//! Reach probabilities.
//!
//! The reach of an info set is the probability, over the deal and the
//! opponent's strategy, of arriving at it. The acting player's own earlier
//! choices are not included: a second decision is reached through a fixed
//! continuation whatever its owner eventually does there.

use crate::cfr::graph::InfoSetGraph;
use crate::cfr::storage::InfoSetRegistry;
use crate::games::kuhn::{DEAL_PROBABILITY, OPPONENT_DEAL_PROBABILITY};

/// Recompute every info set's reach probability from current strategies.
pub fn update(graph: &InfoSetGraph, registry: &mut InfoSetRegistry) {
    for node in 0..graph.len() {
        let key = graph.key(node);
        let reach = match (graph.parents(node), key.history.last_action()) {
            (Some(parents), Some(action)) => {
                let a = action.index();
                parents
                    .iter()
                    .map(|&p| DEAL_PROBABILITY * OPPONENT_DEAL_PROBABILITY * registry[p].strategy[a])
                    .sum::<f64>()
            }
            _ => DEAL_PROBABILITY,
        };
        registry[node].reach = reach;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::stages::strategy;
    use crate::games::kuhn::History;

    fn layer_sum(registry: &InfoSetRegistry, histories: &[History]) -> f64 {
        registry
            .iter()
            .filter(|s| histories.contains(&s.key().history))
            .map(|s| s.reach())
            .sum()
    }

    #[test]
    fn test_root_reach_is_chance() {
        let graph = InfoSetGraph::kuhn();
        let mut registry = InfoSetRegistry::new(&graph);
        registry.seed_regret_sum(&graph, "K", [1.0, 0.0]).unwrap();
        strategy::update(&mut registry);
        update(&graph, &mut registry);

        for label in ["K", "Q", "J"] {
            let node = graph.index_of_label(label).unwrap();
            assert!((registry[node].reach() - 1.0 / 3.0).abs() < 1e-12);
        }
        assert!((layer_sum(&registry, &[History::Root]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_second_player_reach() {
        let graph = InfoSetGraph::kuhn();
        let mut registry = InfoSetRegistry::new(&graph);
        // K always bets, J bets 1/4, Q uniform
        registry.seed_regret_sum(&graph, "K", [1.0, 0.0]).unwrap();
        registry.seed_regret_sum(&graph, "J", [1.0, 3.0]).unwrap();
        strategy::update(&mut registry);
        update(&graph, &mut registry);

        let reach = |label: &str| registry[graph.index_of_label(label).unwrap()].reach();

        // Q facing a bet: (1/6)(1) + (1/6)(1/4)
        assert!((reach("Qb") - 5.0 / 24.0).abs() < 1e-12);
        // K after a pass: (1/6)(1/2) + (1/6)(3/4)
        assert!((reach("Kp") - 5.0 / 24.0).abs() < 1e-12);

        // Each opening action reaches exactly one second-player info set per deal
        let second = layer_sum(&registry, &[History::Bet, History::Pass]);
        assert!((second - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_second_decision_reach_uses_opponent_bet() {
        let graph = InfoSetGraph::kuhn();
        let mut registry = InfoSetRegistry::new(&graph);
        // After a pass: K always bets, Q never does, J bets 1/2
        registry.seed_regret_sum(&graph, "Kp", [1.0, 0.0]).unwrap();
        registry.seed_regret_sum(&graph, "Qp", [0.0, 1.0]).unwrap();
        // The first player's own opening strategy must not matter
        registry.seed_regret_sum(&graph, "Q", [1.0, 0.0]).unwrap();
        strategy::update(&mut registry);
        update(&graph, &mut registry);

        let reach = |label: &str| registry[graph.index_of_label(label).unwrap()].reach();
        assert!((reach("Qpb") - (1.0 / 6.0 + 1.0 / 12.0)).abs() < 1e-12);
        assert!((reach("Jpb") - 1.0 / 6.0).abs() < 1e-12);
        assert!((reach("Kpb") - 1.0 / 12.0).abs() < 1e-12);
    }
}
