//! Backward utility evaluation.
//!
//! Runs over the graph's leaf-to-root order. For every node, each action is
//! valued separately against each possible opponent card:
//!
//! - a terminal action pays the showdown or fold payoff directly;
//! - otherwise the opponent's info set for that card mixes over its two
//!   actions, each of which either ends the hand (the opponent's payoff,
//!   negated) or hands the decision back to this player's own later info
//!   set, whose per-opponent value was computed earlier in the traversal.
//!
//! Action utilities are the belief-weighted average over opponent cards;
//! roots carry uniform beliefs because the deal is uniform.

use crate::cfr::graph::{Edge, InfoSetGraph};
use crate::cfr::storage::InfoSetRegistry;
use crate::games::kuhn::{Card, KuhnAction, NUM_ACTIONS};

/// Recompute action utilities, expected utility and per-opponent values.
///
/// Must run after the strategy and belief stages of the same iteration.
pub fn update(graph: &InfoSetGraph, registry: &mut InfoSetRegistry) {
    for &node in graph.leaf_to_root() {
        let card = graph.key(node).card;
        let opponents = card.others();

        // values[i][a]: payoff of action a against opponent card i
        let mut values = [[0.0; NUM_ACTIONS]; 2];
        for action in KuhnAction::ALL {
            let a = action.index();
            match graph.edges(node)[a] {
                Edge::Terminal(terminal) => {
                    for (i, &opponent) in opponents.iter().enumerate() {
                        values[i][a] = terminal.payoff(card, opponent);
                    }
                }
                Edge::Decision(children) => {
                    for (i, &opponent) in opponents.iter().enumerate() {
                        values[i][a] = response_value(graph, registry, children[i], i, card, opponent);
                    }
                }
            }
        }

        let info_set = &mut registry[node];
        let strategy = info_set.strategy;
        let beliefs = info_set.beliefs;

        for a in 0..NUM_ACTIONS {
            info_set.action_utilities[a] = beliefs[0] * values[0][a] + beliefs[1] * values[1][a];
        }
        for i in 0..2 {
            info_set.opponent_values[i] = strategy[0] * values[i][0] + strategy[1] * values[i][1];
        }
        info_set.expected_utility =
            strategy[0] * info_set.action_utilities[0] + strategy[1] * info_set.action_utilities[1];
    }
}

/// Value to the holder of `card` once the opponent holding `opponent`
/// (index `i` among `card`'s opponents) decides at `child`.
fn response_value(
    graph: &InfoSetGraph,
    registry: &InfoSetRegistry,
    child: usize,
    i: usize,
    card: Card,
    opponent: Card,
) -> f64 {
    let response = registry[child].strategy;
    let mut value = 0.0;
    for (b, edge) in graph.edges(child).iter().enumerate() {
        let continuation = match *edge {
            // Zero-sum: the opponent acted last
            Edge::Terminal(terminal) => -terminal.payoff(opponent, card),
            Edge::Decision(grandchildren) => {
                // Back to our own info set; pick the one holding `card`
                let Some(j) = opponent.other_index(card) else {
                    continue;
                };
                registry[grandchildren[j]].opponent_values[i]
            }
        };
        value += response[b] * continuation;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::stages::{belief, strategy};

    const EPS: f64 = 1e-12;

    fn evaluate(seeds: &[(&str, [f64; 2])]) -> (InfoSetGraph, InfoSetRegistry) {
        let graph = InfoSetGraph::kuhn();
        let mut registry = InfoSetRegistry::new(&graph);
        for &(label, sums) in seeds {
            registry.seed_regret_sum(&graph, label, sums).unwrap();
        }
        strategy::update(&mut registry);
        belief::update(&graph, &mut registry);
        update(&graph, &mut registry);
        (graph, registry)
    }

    fn utilities(graph: &InfoSetGraph, registry: &InfoSetRegistry, label: &str) -> ([f64; 2], f64) {
        let info_set = &registry[graph.index_of_label(label).unwrap()];
        (info_set.action_utilities(), info_set.expected_utility())
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < EPS, "{actual} != {expected}");
    }

    #[test]
    fn test_terminal_utilities_uniform() {
        let (graph, registry) = evaluate(&[]);

        // King facing a bet: call wins 2, fold loses 1
        let (u, eu) = utilities(&graph, &registry, "Kb");
        assert_close(u[0], 2.0);
        assert_close(u[1], -1.0);
        assert_close(eu, 0.5);

        // Queen facing a bet: call is a coin flip
        let (u, eu) = utilities(&graph, &registry, "Qb");
        assert_close(u[0], 0.0);
        assert_close(u[1], -1.0);
        assert_close(eu, -0.5);

        // Jack after check-bet: calling always loses 2
        let (u, _) = utilities(&graph, &registry, "Jpb");
        assert_close(u[0], -2.0);
        assert_close(u[1], -1.0);
    }

    #[test]
    fn test_second_player_bet_after_pass() {
        let (graph, registry) = evaluate(&[]);

        // K bets: opponent Q/J call (K wins 2) or fold (K wins 1), half each
        let (u, eu) = utilities(&graph, &registry, "Kp");
        assert_close(u[0], 1.5);
        assert_close(u[1], 1.0);
        assert_close(eu, 1.25);

        // Q bets: vs K -1/2, vs J 3/2; pass: vs K -1, vs J +1
        let (u, eu) = utilities(&graph, &registry, "Qp");
        assert_close(u[0], 0.5);
        assert_close(u[1], 0.0);
        assert_close(eu, 0.25);
    }

    #[test]
    fn test_root_unrolls_two_plies() {
        let (graph, registry) = evaluate(&[]);

        let (u, eu) = utilities(&graph, &registry, "K");
        assert_close(u[0], 1.5);
        assert_close(u[1], 0.75);
        assert_close(eu, 1.125);

        // Q passing then facing a bet uses Qpb's value against the actual opponent
        let (u, eu) = utilities(&graph, &registry, "Q");
        assert_close(u[0], 0.5);
        assert_close(u[1], -0.25);
        assert_close(eu, 0.125);

        let qpb = &registry[graph.index_of_label("Qpb").unwrap()];
        assert_close(qpb.opponent_values()[0], -1.5);
        assert_close(qpb.opponent_values()[1], 0.5);
    }

    #[test]
    fn test_grandchild_matches_opponent_card() {
        // Q always calls after check-bet, J always folds
        let (graph, registry) = evaluate(&[("Qpb", [1.0, 0.0]), ("Jpb", [0.0, 1.0])]);

        // Q calling: vs K -2, vs J +2
        let qpb = &registry[graph.index_of_label("Qpb").unwrap()];
        assert_close(qpb.opponent_values()[0], -2.0);
        assert_close(qpb.opponent_values()[1], 2.0);

        // Q passing at the root, opponent bets half the time:
        // vs K: 0.5 * -1 + 0.5 * -2 = -1.5; vs J: 0.5 * 1 + 0.5 * 2 = 1.5
        let (u, _) = utilities(&graph, &registry, "Q");
        assert_close(u[1], 0.0);

        // J passing: vs K: 0.5 * -1 + 0.5 * -1, vs Q the same
        let (u, _) = utilities(&graph, &registry, "J");
        assert_close(u[1], -1.0);
    }

    #[test]
    fn test_expected_utility_is_belief_weighted_value() {
        let (graph, registry) = evaluate(&[
            ("K", [2.0, 1.0]),
            ("J", [1.0, 4.0]),
            ("Qb", [1.0, 2.0]),
            ("Kp", [3.0, 1.0]),
            ("Qpb", [1.0, 1.0]),
        ]);

        for node in 0..graph.len() {
            let info_set = &registry[node];
            let b = info_set.beliefs();
            let v = info_set.opponent_values();
            assert_close(info_set.expected_utility(), b[0] * v[0] + b[1] * v[1]);
        }
    }
}
