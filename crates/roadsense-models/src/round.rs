//! Rounds and the ingestion boundary.

use crate::outcome::Side;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest legal hand total.
pub const MAX_SCORE: u8 = 9;

/// One resolved round, validated and immutable.
///
/// Created only by [`RoundEvent::validate`]; never mutated; destroyed
/// only by eviction from a bounded history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub side: Side,
    /// Player hand total, 0..=9.
    pub score_player: u8,
    /// Banker hand total, 0..=9.
    pub score_banker: u8,
    pub pair_player: bool,
    pub pair_banker: bool,
    /// Either hand stood on a natural 8 or 9.
    pub is_natural: bool,
    /// Cumulative cards consumed from the current shoe.
    pub cards_out: u32,
}

impl Round {
    /// Total of the winning hand. `None` for ties.
    pub fn winner_score(&self) -> Option<u8> {
        match self.side {
            Side::Banker => Some(self.score_banker),
            Side::Player => Some(self.score_player),
            Side::Tie => None,
        }
    }

    /// Absolute score margin between the two hands.
    pub fn score_margin(&self) -> u8 {
        self.score_player.abs_diff(self.score_banker)
    }
}

/// Round event as delivered by the ingestion collaborator.
///
/// Carries everything a [`Round`] does plus feed-side metadata
/// (`shoe_game_count`, ingest timestamp). `validate` is the single
/// checkpoint where malformed input is rejected; the engine assumes
/// validated rounds past this point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundEvent {
    /// Ingest timestamp.
    pub ts: DateTime<Utc>,
    pub side: Side,
    pub score_player: u8,
    pub score_banker: u8,
    #[serde(default)]
    pub pair_player: bool,
    #[serde(default)]
    pub pair_banker: bool,
    #[serde(default)]
    pub is_natural: bool,
    /// Cumulative cards consumed from the current shoe.
    pub cards_out: u32,
    /// Feed-side round counter within the shoe. Audit only.
    #[serde(default)]
    pub shoe_game_count: u32,
}

impl RoundEvent {
    /// Check score ranges and produce the immutable round value.
    pub fn validate(&self) -> Result<Round, IngestError> {
        if self.score_player > MAX_SCORE {
            return Err(IngestError::PlayerScoreOutOfRange(self.score_player));
        }
        if self.score_banker > MAX_SCORE {
            return Err(IngestError::BankerScoreOutOfRange(self.score_banker));
        }
        Ok(Round {
            side: self.side,
            score_player: self.score_player,
            score_banker: self.score_banker,
            pair_player: self.pair_player,
            pair_banker: self.pair_banker,
            is_natural: self.is_natural,
            cards_out: self.cards_out,
        })
    }
}

/// Rejection at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IngestError {
    #[error("player score {0} outside 0..=9")]
    PlayerScoreOutOfRange(u8),

    #[error("banker score {0} outside 0..=9")]
    BankerScoreOutOfRange(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(side: Side, ps: u8, bs: u8) -> RoundEvent {
        RoundEvent {
            ts: Utc::now(),
            side,
            score_player: ps,
            score_banker: bs,
            pair_player: false,
            pair_banker: false,
            is_natural: ps >= 8 || bs >= 8,
            cards_out: 0,
            shoe_game_count: 0,
        }
    }

    #[test]
    fn validate_accepts_legal_scores() {
        let round = event(Side::Player, 9, 4).validate().unwrap();
        assert_eq!(round.side, Side::Player);
        assert_eq!(round.winner_score(), Some(9));
        assert_eq!(round.score_margin(), 5);
    }

    #[test]
    fn validate_rejects_out_of_range_scores() {
        assert_eq!(
            event(Side::Banker, 12, 4).validate(),
            Err(IngestError::PlayerScoreOutOfRange(12))
        );
        assert_eq!(
            event(Side::Banker, 4, 10).validate(),
            Err(IngestError::BankerScoreOutOfRange(10))
        );
    }

    #[test]
    fn tie_round_has_no_winner_score() {
        let round = event(Side::Tie, 6, 6).validate().unwrap();
        assert_eq!(round.winner_score(), None);
    }

    #[test]
    fn round_event_roundtrips_through_json() {
        let ev = event(Side::Banker, 3, 7);
        let json = serde_json::to_string(&ev).unwrap();
        let back: RoundEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.side, Side::Banker);
        assert_eq!(back.score_banker, 7);
    }
}
