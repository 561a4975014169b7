//! Round outcomes and recommendable sides.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a resolved round.
///
/// Exhaustive: there is no fourth value. A tie is a legal round outcome
/// but never a legal recommendation — see [`BetSide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Banker,
    Player,
    Tie,
}

impl Side {
    /// Single-letter symbol used in sequence tables and audit strings.
    pub fn symbol(&self) -> char {
        match self {
            Side::Banker => 'B',
            Side::Player => 'P',
            Side::Tie => 'T',
        }
    }

    /// The recommendable side this outcome maps to, if any.
    pub fn bet_side(&self) -> Option<BetSide> {
        match self {
            Side::Banker => Some(BetSide::Banker),
            Side::Player => Some(BetSide::Player),
            Side::Tie => None,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Side::Tie)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Banker => write!(f, "Banker"),
            Side::Player => write!(f, "Player"),
            Side::Tie => write!(f, "Tie"),
        }
    }
}

/// A side the engine may recommend.
///
/// Ties are unrepresentable here, which makes the domain-closure
/// invariant (a decision is always Banker or Player) a type-level fact
/// rather than a runtime check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BetSide {
    Banker,
    Player,
}

impl BetSide {
    pub fn opposite(&self) -> BetSide {
        match self {
            BetSide::Banker => BetSide::Player,
            BetSide::Player => BetSide::Banker,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            BetSide::Banker => 'B',
            BetSide::Player => 'P',
        }
    }
}

impl From<BetSide> for Side {
    fn from(side: BetSide) -> Self {
        match side {
            BetSide::Banker => Side::Banker,
            BetSide::Player => Side::Player,
        }
    }
}

impl fmt::Display for BetSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetSide::Banker => write!(f, "Banker"),
            BetSide::Player => write!(f, "Player"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_has_no_bet_side() {
        assert_eq!(Side::Tie.bet_side(), None);
        assert_eq!(Side::Banker.bet_side(), Some(BetSide::Banker));
        assert_eq!(Side::Player.bet_side(), Some(BetSide::Player));
    }

    #[test]
    fn opposite_is_involutive() {
        assert_eq!(BetSide::Banker.opposite(), BetSide::Player);
        assert_eq!(BetSide::Player.opposite().opposite(), BetSide::Player);
    }

    #[test]
    fn symbols_match_sequence_encoding() {
        assert_eq!(Side::Banker.symbol(), 'B');
        assert_eq!(Side::Player.symbol(), 'P');
        assert_eq!(Side::Tie.symbol(), 'T');
    }
}
