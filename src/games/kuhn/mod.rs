//! Kuhn Poker rules.
//!
//! Kuhn Poker is a simplified poker game used to validate CFR implementations
//! because it has a known, mathematically proven Nash equilibrium.
//!
//! ## Game Rules
//!
//! - 3 cards: Jack, Queen, King
//! - 2 players, each antes 1 chip
//! - Each player receives 1 card
//! - Player 1 acts first: Pass or Bet (1 chip)
//! - Player 2 responds based on P1's action
//! - Higher card wins at showdown
//!
//! ## Game Tree
//!
//! ```text
//! P1 (first to act)
//! ├── Pass
//! │   └── P2
//! │       ├── Pass → Showdown (pot = 2)
//! │       └── Bet
//! │           └── P1
//! │               ├── Pass → P2 wins (pot = 3)
//! │               └── Bet → Showdown (pot = 4)
//! └── Bet
//!     └── P2
//!         ├── Pass → P1 wins (pot = 3)
//!         └── Bet → Showdown (pot = 4)
//! ```
//!
//! ## Known Nash Equilibrium
//!
//! The first player's equilibrium is a one-parameter family, α ∈ [0, 1/3]:
//!
//! - **Player 1 with Jack**: Bet with probability α
//! - **Player 1 with Queen**: Always Pass; call a check-raise bet with probability α + 1/3
//! - **Player 1 with King**: Bet with probability 3α; always call
//! - **Player 2 facing Bet**: Jack folds, Queen calls 1/3, King calls
//! - **Player 2 after Pass**: Jack bets 1/3, Queen passes, King bets
//!
//! **Expected Value**: Player 1 EV = -1/18 ≈ -0.0556

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of actions available at every decision point.
pub const NUM_ACTIONS: usize = 2;

/// Chance probability of any particular card being dealt to a player.
pub const DEAL_PROBABILITY: f64 = 1.0 / 3.0;

/// Chance probability of the opponent's card given one's own card.
pub const OPPONENT_DEAL_PROBABILITY: f64 = 1.0 / 2.0;

/// A private card, ordered by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Card {
    /// Lowest card
    Jack,
    /// Middle card
    Queen,
    /// Highest card
    King,
}

impl Card {
    /// All cards in label declaration order (highest first).
    pub const ALL: [Card; 3] = [Card::King, Card::Queen, Card::Jack];

    /// Single-character label symbol.
    pub fn symbol(self) -> char {
        match self {
            Card::Jack => 'J',
            Card::Queen => 'Q',
            Card::King => 'K',
        }
    }

    /// Parse a label symbol.
    pub fn from_symbol(symbol: char) -> Option<Card> {
        match symbol {
            'J' => Some(Card::Jack),
            'Q' => Some(Card::Queen),
            'K' => Some(Card::King),
            _ => None,
        }
    }

    /// The two cards the opponent may hold, in declaration order.
    ///
    /// Index `i` of this pair is the index used for beliefs, parents and
    /// per-opponent values throughout the solver.
    pub fn others(self) -> [Card; 2] {
        match self {
            Card::King => [Card::Queen, Card::Jack],
            Card::Queen => [Card::King, Card::Jack],
            Card::Jack => [Card::King, Card::Queen],
        }
    }

    /// Position of `other` within [`Card::others`], if it is not `self`.
    pub fn other_index(self, other: Card) -> Option<usize> {
        self.others().iter().position(|&c| c == other)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Actions in Kuhn Poker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KuhnAction {
    /// Bet (or call if facing bet)
    Bet,
    /// Pass (check if no bet, fold if facing bet)
    Pass,
}

impl KuhnAction {
    /// Actions in strategy-vector order.
    pub const ALL: [KuhnAction; NUM_ACTIONS] = [KuhnAction::Bet, KuhnAction::Pass];

    /// Index into strategy, utility and regret vectors.
    pub fn index(self) -> usize {
        match self {
            KuhnAction::Bet => 0,
            KuhnAction::Pass => 1,
        }
    }

    /// Single-character label symbol.
    pub fn symbol(self) -> char {
        match self {
            KuhnAction::Bet => 'b',
            KuhnAction::Pass => 'p',
        }
    }

    /// Parse a label symbol.
    pub fn from_symbol(symbol: char) -> Option<KuhnAction> {
        match symbol {
            'b' => Some(KuhnAction::Bet),
            'p' => Some(KuhnAction::Pass),
            _ => None,
        }
    }
}

impl fmt::Display for KuhnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KuhnAction::Bet => write!(f, "Bet"),
            KuhnAction::Pass => write!(f, "Pass"),
        }
    }
}

/// The two seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Acts first, and again after pass-bet
    First,
    /// Responds to the first player's opening action
    Second,
}

/// Public action history at a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum History {
    /// No action yet
    Root,
    /// First player bet
    Bet,
    /// First player passed
    Pass,
    /// First player passed, second player bet
    PassBet,
}

/// What follows an action taken at a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Another player must decide
    Decision(History),
    /// The hand is over
    Terminal(Terminal),
}

impl History {
    /// All decision histories in label declaration order.
    pub const ALL: [History; 4] = [History::Root, History::Bet, History::Pass, History::PassBet];

    /// The actions taken so far.
    pub fn actions(self) -> &'static [KuhnAction] {
        match self {
            History::Root => &[],
            History::Bet => &[KuhnAction::Bet],
            History::Pass => &[KuhnAction::Pass],
            History::PassBet => &[KuhnAction::Pass, KuhnAction::Bet],
        }
    }

    /// Build a decision history from an action sequence.
    ///
    /// Returns `None` for terminal or impossible sequences.
    pub fn from_actions(actions: &[KuhnAction]) -> Option<History> {
        match actions {
            [] => Some(History::Root),
            [KuhnAction::Bet] => Some(History::Bet),
            [KuhnAction::Pass] => Some(History::Pass),
            [KuhnAction::Pass, KuhnAction::Bet] => Some(History::PassBet),
            _ => None,
        }
    }

    /// The player to act.
    pub fn player(self) -> Player {
        match self {
            History::Root | History::PassBet => Player::First,
            History::Bet | History::Pass => Player::Second,
        }
    }

    /// The last action taken, if any.
    pub fn last_action(self) -> Option<KuhnAction> {
        self.actions().last().copied()
    }

    /// The history one action shorter and the action that produced this one.
    pub fn parent(self) -> Option<(History, KuhnAction)> {
        match self {
            History::Root => None,
            History::Bet => Some((History::Root, KuhnAction::Bet)),
            History::Pass => Some((History::Root, KuhnAction::Pass)),
            History::PassBet => Some((History::Pass, KuhnAction::Bet)),
        }
    }

    /// Apply an action.
    pub fn then(self, action: KuhnAction) -> Continuation {
        match (self, action) {
            (History::Root, KuhnAction::Bet) => Continuation::Decision(History::Bet),
            (History::Root, KuhnAction::Pass) => Continuation::Decision(History::Pass),
            (History::Bet, KuhnAction::Bet) => Continuation::Terminal(Terminal::BetCall),
            (History::Bet, KuhnAction::Pass) => Continuation::Terminal(Terminal::BetFold),
            (History::Pass, KuhnAction::Bet) => Continuation::Decision(History::PassBet),
            (History::Pass, KuhnAction::Pass) => Continuation::Terminal(Terminal::CheckCheck),
            (History::PassBet, KuhnAction::Bet) => Continuation::Terminal(Terminal::CheckBetCall),
            (History::PassBet, KuhnAction::Pass) => Continuation::Terminal(Terminal::CheckBetFold),
        }
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for action in self.actions() {
            write!(f, "{}", action.symbol())?;
        }
        Ok(())
    }
}

/// Terminal action sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    /// "bb" - bet, call, showdown
    BetCall,
    /// "bp" - bet, fold
    BetFold,
    /// "pp" - both pass, showdown
    CheckCheck,
    /// "pbb" - pass, bet, call, showdown
    CheckBetCall,
    /// "pbp" - pass, bet, fold
    CheckBetFold,
}

impl Terminal {
    /// Payoff to the player who took the final action, holding `actor`
    /// against `opponent`.
    pub fn payoff(self, actor: Card, opponent: Card) -> f64 {
        match self {
            Terminal::BetCall | Terminal::CheckBetCall => showdown(actor, opponent, 2.0),
            Terminal::CheckCheck => showdown(actor, opponent, 1.0),
            // Folding forfeits the ante
            Terminal::BetFold | Terminal::CheckBetFold => -1.0,
        }
    }

    /// Payoff to the first player, given both players' cards.
    pub fn first_player_payoff(self, first: Card, second: Card) -> f64 {
        match self {
            // Second player acted last
            Terminal::BetCall | Terminal::BetFold | Terminal::CheckCheck => {
                -self.payoff(second, first)
            }
            Terminal::CheckBetCall | Terminal::CheckBetFold => self.payoff(first, second),
        }
    }
}

/// Showdown payoff of `stake` chips to the holder of `own`.
pub fn showdown(own: Card, opponent: Card, stake: f64) -> f64 {
    if own > opponent {
        stake
    } else {
        -stake
    }
}

/// All six ordered deals `(first player's card, second player's card)`.
pub fn deals() -> impl Iterator<Item = (Card, Card)> {
    Card::ALL
        .into_iter()
        .flat_map(|first| first.others().into_iter().map(move |second| (first, second)))
}
