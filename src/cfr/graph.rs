//! Information-set graph.
//!
//! The graph is the static part of the solver: the enumerated information
//! sets, keyed by the owning player's card and the public action history,
//! together with the parent and child relations derived from those keys.
//! All links are resolved to indices once at construction so the stages
//! never look up labels while iterating.

use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::games::kuhn::{Card, Continuation, History, KuhnAction, Terminal, NUM_ACTIONS};

/// Identity of an information set: own card plus public history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoSetKey {
    /// The acting player's private card
    pub card: Card,
    /// Actions observed so far
    pub history: History,
}

impl InfoSetKey {
    /// Create a key.
    pub fn new(card: Card, history: History) -> Self {
        Self { card, history }
    }

    /// Whether this is a first decision (no parents).
    pub fn is_root(&self) -> bool {
        self.history == History::Root
    }

    /// Keys of the two info sets, one action shorter, that could have
    /// produced this history: the other two cards, in [`Card::others`] order.
    pub fn parents(&self) -> Option<[InfoSetKey; 2]> {
        let (history, _) = self.history.parent()?;
        Some(self.card.others().map(|card| InfoSetKey::new(card, history)))
    }

    /// Keys reached by the opponent after `action`, one per opponent card.
    ///
    /// Returns the terminal sequence instead if `action` ends the hand.
    pub fn children(&self, action: KuhnAction) -> Result<[InfoSetKey; 2], Terminal> {
        match self.history.then(action) {
            Continuation::Decision(next) => {
                Ok(self.card.others().map(|card| InfoSetKey::new(card, next)))
            }
            Continuation::Terminal(terminal) => Err(terminal),
        }
    }
}

impl fmt::Display for InfoSetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.card, self.history)
    }
}

impl FromStr for InfoSetKey {
    type Err = GraphError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let invalid = || GraphError::InvalidLabel(label.to_string());
        let mut chars = label.chars();
        let card = chars.next().and_then(Card::from_symbol).ok_or_else(invalid)?;
        let actions = chars
            .map(KuhnAction::from_symbol)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;
        let history = History::from_actions(&actions).ok_or_else(invalid)?;
        Ok(InfoSetKey::new(card, history))
    }
}

/// Errors raised when the label universe is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Label does not name a decision point.
    #[error("invalid info set label `{0}`")]
    InvalidLabel(String),
    /// Same label listed twice.
    #[error("duplicate info set label `{0}`")]
    DuplicateLabel(String),
    /// A non-root info set's parent is absent.
    #[error("info set `{label}` references missing parent `{parent}`")]
    MissingParent {
        /// The referencing info set
        label: String,
        /// The absent parent
        parent: String,
    },
    /// A non-terminal continuation's info set is absent.
    #[error("info set `{label}` references missing child `{child}`")]
    MissingChild {
        /// The referencing info set
        label: String,
        /// The absent child
        child: String,
    },
    /// Lookup of a label that is not in the graph.
    #[error("unknown info set `{0}`")]
    UnknownLabel(String),
}

/// Outcome of taking an action at an info set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// The hand ends
    Terminal(Terminal),
    /// The opponent decides next; one node index per opponent card,
    /// in [`Card::others`] order of the acting card
    Decision([usize; 2]),
}

/// The static set of information sets and their relations.
#[derive(Debug, Clone)]
pub struct InfoSetGraph {
    keys: Vec<InfoSetKey>,
    index: FxHashMap<InfoSetKey, usize>,
    parents: Vec<Option<[usize; 2]>>,
    edges: Vec<[Edge; NUM_ACTIONS]>,
    leaf_to_root: Vec<usize>,
}

impl InfoSetGraph {
    /// The canonical 12 labels of Kuhn poker, in declaration order.
    pub const KUHN_LABELS: [&'static str; 12] = [
        "K", "Q", "J", "Kb", "Kp", "Qb", "Qp", "Jb", "Jp", "Kpb", "Qpb", "Jpb",
    ];

    /// Build the canonical Kuhn poker graph.
    pub fn kuhn() -> Self {
        // The canonical universe is closed under both relations
        Self::from_labels(&Self::KUHN_LABELS).unwrap_or_else(|e| unreachable!("canonical graph: {e}"))
    }

    /// Build a graph from labels, validating that it is closed under the
    /// parent and child relations.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, GraphError> {
        let keys = labels
            .iter()
            .map(|label| label.as_ref().parse())
            .collect::<Result<Vec<InfoSetKey>, _>>()?;
        Self::from_keys(keys)
    }

    /// Build a graph from keys, validating closure.
    pub fn from_keys(keys: Vec<InfoSetKey>) -> Result<Self, GraphError> {
        let mut index = FxHashMap::with_capacity_and_hasher(keys.len(), Default::default());
        for (i, key) in keys.iter().enumerate() {
            if index.insert(*key, i).is_some() {
                return Err(GraphError::DuplicateLabel(key.to_string()));
            }
        }

        let lookup = |key: &InfoSetKey| index.get(key).copied();

        let mut parents = Vec::with_capacity(keys.len());
        for key in &keys {
            let resolved = match key.parents() {
                None => None,
                Some(pair) => {
                    let mut found = [0; 2];
                    for (slot, parent) in found.iter_mut().zip(pair.iter()) {
                        *slot = lookup(parent).ok_or_else(|| GraphError::MissingParent {
                            label: key.to_string(),
                            parent: parent.to_string(),
                        })?;
                    }
                    Some(found)
                }
            };
            parents.push(resolved);
        }

        let mut edges = Vec::with_capacity(keys.len());
        for key in &keys {
            let mut node_edges = [Edge::Decision([0; 2]); NUM_ACTIONS];
            for action in KuhnAction::ALL {
                node_edges[action.index()] = match key.children(action) {
                    Err(terminal) => Edge::Terminal(terminal),
                    Ok(pair) => {
                        let mut found = [0; 2];
                        for (slot, child) in found.iter_mut().zip(pair.iter()) {
                            *slot = lookup(child).ok_or_else(|| GraphError::MissingChild {
                                label: key.to_string(),
                                child: child.to_string(),
                            })?;
                        }
                        Edge::Decision(found)
                    }
                };
            }
            edges.push(node_edges);
        }

        let leaf_to_root = post_order(&keys, &edges);

        Ok(Self {
            keys,
            index,
            parents,
            edges,
            leaf_to_root,
        })
    }

    /// Number of information sets.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> &[InfoSetKey] {
        &self.keys
    }

    /// Key of a node.
    pub fn key(&self, node: usize) -> InfoSetKey {
        self.keys[node]
    }

    /// Node index of a key.
    pub fn index_of(&self, key: &InfoSetKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Node index of a label.
    pub fn index_of_label(&self, label: &str) -> Result<usize, GraphError> {
        let key: InfoSetKey = label.parse()?;
        self.index_of(&key)
            .ok_or_else(|| GraphError::UnknownLabel(label.to_string()))
    }

    /// Parent nodes, ordered like the node card's [`Card::others`].
    pub fn parents(&self, node: usize) -> Option<[usize; 2]> {
        self.parents[node]
    }

    /// Outgoing edges indexed by action.
    pub fn edges(&self, node: usize) -> &[Edge; NUM_ACTIONS] {
        &self.edges[node]
    }

    /// Node order in which every descendant precedes its ancestors.
    pub fn leaf_to_root(&self) -> &[usize] {
        &self.leaf_to_root
    }
}

/// Depth-first post-order over decision edges, starting from roots.
fn post_order(keys: &[InfoSetKey], edges: &[[Edge; NUM_ACTIONS]]) -> Vec<usize> {
    fn visit(node: usize, edges: &[[Edge; NUM_ACTIONS]], seen: &mut [bool], order: &mut Vec<usize>) {
        if seen[node] {
            return;
        }
        seen[node] = true;
        for edge in &edges[node] {
            if let Edge::Decision(children) = edge {
                for &child in children {
                    visit(child, edges, seen, order);
                }
            }
        }
        order.push(node);
    }

    let mut seen = vec![false; keys.len()];
    let mut order = Vec::with_capacity(keys.len());

    let roots = (0..keys.len()).filter(|&i| keys[i].is_root());
    let rest = (0..keys.len()).filter(|&i| !keys[i].is_root());
    for node in roots.chain(rest) {
        visit(node, edges, &mut seen, &mut order);
    }
    order
}
