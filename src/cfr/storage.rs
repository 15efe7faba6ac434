//! Storage for per-information-set solver state.
//!
//! This module provides the registry that owns every information set's
//! strategy, beliefs, utilities, reach probability and regret sums. The
//! registry is the only mutable state of the solver; each stage takes it
//! by mutable reference and the orchestrator owns it.

use serde::{Deserialize, Serialize};

use crate::cfr::graph::{GraphError, InfoSetGraph, InfoSetKey};
use crate::games::kuhn::NUM_ACTIONS;

/// Mutable state of a single information set.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoSet {
    pub(crate) key: InfoSetKey,
    pub(crate) strategy: [f64; NUM_ACTIONS],
    pub(crate) beliefs: [f64; 2],
    pub(crate) action_utilities: [f64; NUM_ACTIONS],
    pub(crate) expected_utility: f64,
    pub(crate) opponent_values: [f64; 2],
    pub(crate) reach: f64,
    pub(crate) regret_sum: [f64; NUM_ACTIONS],
}

impl InfoSet {
    /// Create an info set with neutral state: uniform strategy and beliefs,
    /// zero utilities, reach and regret.
    pub fn new(key: InfoSetKey) -> Self {
        Self {
            key,
            strategy: [0.5; NUM_ACTIONS],
            beliefs: [0.5; 2],
            action_utilities: [0.0; NUM_ACTIONS],
            expected_utility: 0.0,
            opponent_values: [0.0; 2],
            reach: 0.0,
            regret_sum: [0.0; NUM_ACTIONS],
        }
    }

    /// The info set's key.
    pub fn key(&self) -> InfoSetKey {
        self.key
    }

    /// Action probabilities, indexed by [`KuhnAction::index`](crate::games::kuhn::KuhnAction::index).
    pub fn strategy(&self) -> [f64; NUM_ACTIONS] {
        self.strategy
    }

    /// Distribution over the opponent's card, ordered like
    /// [`Card::others`](crate::games::kuhn::Card::others).
    pub fn beliefs(&self) -> [f64; 2] {
        self.beliefs
    }

    /// Expected payoff of each action to the acting player.
    pub fn action_utilities(&self) -> [f64; NUM_ACTIONS] {
        self.action_utilities
    }

    /// Strategy-weighted average of the action utilities.
    pub fn expected_utility(&self) -> f64 {
        self.expected_utility
    }

    /// Strategy-weighted value against each possible opponent card.
    pub fn opponent_values(&self) -> [f64; 2] {
        self.opponent_values
    }

    /// Probability of reaching this info set under chance and the opponent's strategy.
    pub fn reach(&self) -> f64 {
        self.reach
    }

    /// Accumulated non-negative counterfactual regret per action.
    pub fn regret_sum(&self) -> [f64; NUM_ACTIONS] {
        self.regret_sum
    }

    /// Add non-negative regret; negative contributions are dropped.
    ///
    /// Returns the amount actually added.
    pub(crate) fn add_regret(&mut self, action: usize, regret: f64) -> f64 {
        let gain = regret.max(0.0);
        self.regret_sum[action] += gain;
        gain
    }

    /// Snapshot for reporting.
    pub fn snapshot(&self) -> InfoSetSnapshot {
        InfoSetSnapshot {
            label: self.key.to_string(),
            strategy: self.strategy,
            beliefs: self.beliefs,
            action_utilities: self.action_utilities,
            expected_utility: self.expected_utility,
            reach: self.reach,
            regret_sum: self.regret_sum,
        }
    }
}

/// Owned collection of all information sets, indexed like the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoSetRegistry {
    info_sets: Vec<InfoSet>,
}

impl InfoSetRegistry {
    /// Create one neutral info set per graph node.
    pub fn new(graph: &InfoSetGraph) -> Self {
        Self {
            info_sets: graph.keys().iter().copied().map(InfoSet::new).collect(),
        }
    }

    /// Number of information sets stored.
    pub fn len(&self) -> usize {
        self.info_sets.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.info_sets.is_empty()
    }

    /// Info set by node index.
    pub fn get(&self, node: usize) -> Option<&InfoSet> {
        self.info_sets.get(node)
    }

    /// All info sets in graph order.
    pub fn iter(&self) -> impl Iterator<Item = &InfoSet> {
        self.info_sets.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut InfoSet> {
        self.info_sets.iter_mut()
    }

    /// Overwrite an info set's regret sums, clamping negatives to zero.
    ///
    /// The new sums take effect at the next strategy stage.
    pub fn seed_regret_sum(
        &mut self,
        graph: &InfoSetGraph,
        label: &str,
        regret_sum: [f64; NUM_ACTIONS],
    ) -> Result<(), GraphError> {
        let node = graph.index_of_label(label)?;
        let info_set = &mut self.info_sets[node];
        info_set.regret_sum = regret_sum.map(|r| r.max(0.0));
        Ok(())
    }

    /// Snapshot every info set in graph order.
    pub fn snapshot(&self) -> Vec<InfoSetSnapshot> {
        self.info_sets.iter().map(InfoSet::snapshot).collect()
    }

    /// Reset all info sets to their neutral state.
    pub fn clear(&mut self) {
        for info_set in &mut self.info_sets {
            *info_set = InfoSet::new(info_set.key);
        }
    }
}

impl std::ops::Index<usize> for InfoSetRegistry {
    type Output = InfoSet;

    fn index(&self, node: usize) -> &InfoSet {
        &self.info_sets[node]
    }
}

impl std::ops::IndexMut<usize> for InfoSetRegistry {
    fn index_mut(&mut self, node: usize) -> &mut InfoSet {
        &mut self.info_sets[node]
    }
}

/// Serializable view of one info set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoSetSnapshot {
    /// Classic label, e.g. `"Kpb"`
    pub label: String,
    /// Probability of bet, pass
    pub strategy: [f64; NUM_ACTIONS],
    /// Distribution over the two possible opponent cards
    pub beliefs: [f64; 2],
    /// Expected payoff of bet, pass
    pub action_utilities: [f64; NUM_ACTIONS],
    /// Strategy-weighted utility
    pub expected_utility: f64,
    /// Reach probability
    pub reach: f64,
    /// Accumulated regret of bet, pass
    pub regret_sum: [f64; NUM_ACTIONS],
}

/// Serializable view of the whole solver after an iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSnapshot {
    /// Iterations completed
    pub iteration: u64,
    /// Total regret added in the last iteration
    pub total_regret: f64,
    /// Every info set in declaration order
    pub info_sets: Vec<InfoSetSnapshot>,
}

impl SolverSnapshot {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Find an info set by label.
    pub fn get(&self, label: &str) -> Option<&InfoSetSnapshot> {
        self.info_sets.iter().find(|s| s.label == label)
    }
}
