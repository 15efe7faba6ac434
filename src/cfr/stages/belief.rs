//! Belief propagation.
//!
//! A node's belief over the opponent's card is proportional to the
//! probability that each parent (one per opponent card) chose the action
//! that produced this node's history.

use crate::cfr::graph::InfoSetGraph;
use crate::cfr::stages::normalize_or_uniform;
use crate::cfr::storage::InfoSetRegistry;

/// Recompute every info set's beliefs from its parents' current strategies.
pub fn update(graph: &InfoSetGraph, registry: &mut InfoSetRegistry) {
    for node in 0..graph.len() {
        let key = graph.key(node);
        let beliefs = match (graph.parents(node), key.history.last_action()) {
            (Some(parents), Some(action)) => {
                let a = action.index();
                normalize_or_uniform(parents.map(|p| registry[p].strategy[a]))
            }
            // Uniform deal, nothing observed yet
            _ => [0.5, 0.5],
        };
        registry[node].beliefs = beliefs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::stages::strategy;

    fn setup() -> (InfoSetGraph, InfoSetRegistry) {
        let graph = InfoSetGraph::kuhn();
        let registry = InfoSetRegistry::new(&graph);
        (graph, registry)
    }

    #[test]
    fn test_root_beliefs_uniform() {
        let (graph, mut registry) = setup();
        registry.seed_regret_sum(&graph, "K", [5.0, 0.0]).unwrap();
        strategy::update(&mut registry);
        update(&graph, &mut registry);

        for label in ["K", "Q", "J"] {
            let node = graph.index_of_label(label).unwrap();
            assert_eq!(registry[node].beliefs(), [0.5, 0.5]);
        }
    }

    #[test]
    fn test_beliefs_follow_parent_strategies() {
        let (graph, mut registry) = setup();
        // K bets 3/4, J bets 1/4
        registry.seed_regret_sum(&graph, "K", [3.0, 1.0]).unwrap();
        registry.seed_regret_sum(&graph, "J", [1.0, 3.0]).unwrap();
        strategy::update(&mut registry);
        update(&graph, &mut registry);

        // Q facing a bet: opponents [K, J] bet with 0.75 and 0.25
        let qb = graph.index_of_label("Qb").unwrap();
        assert_eq!(registry[qb].beliefs(), [0.75, 0.25]);

        // Q after a pass: opponents pass with 0.25 and 0.75
        let qp = graph.index_of_label("Qp").unwrap();
        assert_eq!(registry[qp].beliefs(), [0.25, 0.75]);

        // K facing a bet: opponents [Q, J] bet with 0.5 and 0.25
        let kb = graph.index_of_label("Kb").unwrap();
        let b = registry[kb].beliefs();
        assert!((b[0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((b[1] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_parent_probability_falls_back() {
        let (graph, mut registry) = setup();
        // Neither Q nor J ever bets after a pass
        registry.seed_regret_sum(&graph, "Qp", [0.0, 1.0]).unwrap();
        registry.seed_regret_sum(&graph, "Jp", [0.0, 1.0]).unwrap();
        strategy::update(&mut registry);
        update(&graph, &mut registry);

        let kpb = graph.index_of_label("Kpb").unwrap();
        assert_eq!(registry[kpb].beliefs(), [0.5, 0.5]);
    }

    #[test]
    fn test_beliefs_sum_to_one() {
        let (graph, mut registry) = setup();
        for (i, label) in InfoSetGraph::KUHN_LABELS.iter().enumerate() {
            let x = i as f64;
            registry.seed_regret_sum(&graph, label, [x, 12.0 - x]).unwrap();
        }
        strategy::update(&mut registry);
        update(&graph, &mut registry);

        for info_set in registry.iter() {
            let b = info_set.beliefs();
            assert!((b[0] + b[1] - 1.0).abs() < 1e-12, "{}", info_set.key());
        }
    }
}
