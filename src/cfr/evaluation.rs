//! Exact evaluation of a strategy profile.
//!
//! Kuhn poker has six deals and six information sets per player, so game
//! value and best responses are computed exactly: the value by walking the
//! tree for every deal, the best response by enumerating all 64 pure
//! strategies of the responding player.

use crate::cfr::graph::{InfoSetGraph, InfoSetKey};
use crate::cfr::storage::InfoSetRegistry;
use crate::games::kuhn::{deals, Card, Continuation, History, KuhnAction, Player, NUM_ACTIONS};

/// Expected payoff to the first player when both play `registry`'s strategies.
pub fn game_value(graph: &InfoSetGraph, registry: &InfoSetRegistry) -> f64 {
    let policy = current_policy(graph, registry);
    expected_first_player_value(&policy)
}

/// Best payoff `player` can obtain against the opponent's current strategy.
pub fn best_response_value(graph: &InfoSetGraph, registry: &InfoSetRegistry, player: Player) -> f64 {
    let current = current_policy(graph, registry);
    let own: Vec<InfoSetKey> = Card::ALL
        .iter()
        .flat_map(|&card| History::ALL.map(|history| InfoSetKey::new(card, history)))
        .filter(|key| key.history.player() == player)
        .collect();

    let mut best = f64::NEG_INFINITY;
    for mask in 0u32..(1 << own.len()) {
        let policy = |key: InfoSetKey| -> [f64; NUM_ACTIONS] {
            match own.iter().position(|k| *k == key) {
                Some(bit) if mask & (1 << bit) != 0 => [1.0, 0.0],
                Some(_) => [0.0, 1.0],
                None => current(key),
            }
        };
        let value = expected_first_player_value(&policy);
        let value = match player {
            Player::First => value,
            Player::Second => -value,
        };
        best = best.max(value);
    }
    best
}

/// Mean gain of a best response over the current profile, across both seats.
///
/// Zero exactly at a Nash equilibrium.
pub fn exploitability(graph: &InfoSetGraph, registry: &InfoSetRegistry) -> f64 {
    let first = best_response_value(graph, registry, Player::First);
    let second = best_response_value(graph, registry, Player::Second);
    (first + second) / 2.0
}

fn current_policy<'a>(
    graph: &'a InfoSetGraph,
    registry: &'a InfoSetRegistry,
) -> impl Fn(InfoSetKey) -> [f64; NUM_ACTIONS] + 'a {
    move |key| {
        graph
            .index_of(&key)
            .and_then(|node| registry.get(node))
            .map_or([0.5; NUM_ACTIONS], |info_set| info_set.strategy())
    }
}

fn expected_first_player_value<F>(policy: &F) -> f64
where
    F: Fn(InfoSetKey) -> [f64; NUM_ACTIONS],
{
    let weight = 1.0 / deals().count() as f64;
    deals()
        .map(|(first, second)| weight * first_player_value(policy, first, second, History::Root))
        .sum()
}

fn first_player_value<F>(policy: &F, first: Card, second: Card, history: History) -> f64
where
    F: Fn(InfoSetKey) -> [f64; NUM_ACTIONS],
{
    let card = match history.player() {
        Player::First => first,
        Player::Second => second,
    };
    let strategy = policy(InfoSetKey::new(card, history));

    KuhnAction::ALL
        .iter()
        .map(|&action| {
            let value = match history.then(action) {
                Continuation::Terminal(terminal) => terminal.first_player_payoff(first, second),
                Continuation::Decision(next) => first_player_value(policy, first, second, next),
            };
            strategy[action.index()] * value
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::stages::strategy;

    const GAME_VALUE: f64 = -1.0 / 18.0;

    /// The equilibrium family, parameterised by the Jack's bluffing frequency.
    fn equilibrium(alpha: f64) -> (InfoSetGraph, InfoSetRegistry) {
        let graph = InfoSetGraph::kuhn();
        let mut registry = InfoSetRegistry::new(&graph);
        let seeds = [
            ("K", [3.0 * alpha, 1.0 - 3.0 * alpha]),
            ("Q", [0.0, 1.0]),
            ("J", [alpha, 1.0 - alpha]),
            ("Kb", [1.0, 0.0]),
            ("Qb", [1.0 / 3.0, 2.0 / 3.0]),
            ("Jb", [0.0, 1.0]),
            ("Kp", [1.0, 0.0]),
            ("Qp", [0.0, 1.0]),
            ("Jp", [1.0 / 3.0, 2.0 / 3.0]),
            ("Kpb", [1.0, 0.0]),
            ("Qpb", [alpha + 1.0 / 3.0, 2.0 / 3.0 - alpha]),
            ("Jpb", [0.0, 1.0]),
        ];
        for (label, sums) in seeds {
            registry.seed_regret_sum(&graph, label, sums).unwrap();
        }
        strategy::update(&mut registry);
        (graph, registry)
    }

    #[test]
    fn test_equilibrium_family_value() {
        for alpha in [0.0, 0.1, 0.2, 1.0 / 3.0] {
            let (graph, registry) = equilibrium(alpha);
            let value = game_value(&graph, &registry);
            assert!((value - GAME_VALUE).abs() < 1e-9, "alpha {alpha}: value {value}");
        }
    }

    #[test]
    fn test_equilibrium_is_unexploitable() {
        for alpha in [0.0, 0.25, 1.0 / 3.0] {
            let (graph, registry) = equilibrium(alpha);
            let e = exploitability(&graph, &registry);
            assert!(e.abs() < 1e-9, "alpha {alpha}: exploitability {e}");
        }
    }

    #[test]
    fn test_uniform_profile_is_exploitable() {
        let graph = InfoSetGraph::kuhn();
        let registry = InfoSetRegistry::new(&graph);

        let value = game_value(&graph, &registry);
        assert!((value - 0.125).abs() < 1e-12);
        let first = best_response_value(&graph, &registry, Player::First);
        let second = best_response_value(&graph, &registry, Player::Second);
        assert!(first > value);
        assert!(second > -value);
        assert!(exploitability(&graph, &registry) > 0.1);
    }

    #[test]
    fn test_best_response_to_always_bet() {
        let graph = InfoSetGraph::kuhn();
        let mut registry = InfoSetRegistry::new(&graph);
        for label in ["K", "Q", "J", "Kpb", "Qpb", "Jpb"] {
            registry.seed_regret_sum(&graph, label, [1.0, 0.0]).unwrap();
        }
        strategy::update(&mut registry);

        // Facing a bet, the best response calls with King (+2, +2), calls with
        // Queen (-2 vs King, +2 vs Jack beats folding twice) and folds Jack (-1, -1)
        let expected = (2.0 + 2.0 - 2.0 + 2.0 - 1.0 - 1.0) / 6.0;
        let second = best_response_value(&graph, &registry, Player::Second);
        assert!((second - expected).abs() < 1e-12, "{second}");
    }
}
