//! Detector votes and the consensus decision.

use crate::outcome::BetSide;
use serde::{Deserialize, Serialize};

/// Hard ceiling for every confidence value in the system (0–100 scale).
///
/// No detector and no consensus reduction may emit above this.
pub const CONFIDENCE_CAP: f64 = 95.0;

/// One detector's opinion for the upcoming round.
///
/// Transient: produced during an evaluation, consumed by the consensus
/// engine, never persisted by this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorVote {
    /// Detector class label, e.g. `"memory_3"`.
    pub label: String,
    pub side: BetSide,
    /// 0–100 scale, clamped to [`CONFIDENCE_CAP`] at construction.
    pub confidence: f64,
    /// Per-detector-class weight, assigned at admission time from the
    /// configured policy table.
    pub weight: f64,
    /// Human-readable trigger description for audit output,
    /// e.g. `"P5→B"` or `"BBP seen 4x"`.
    pub detail: String,
}

impl DetectorVote {
    pub fn new(label: &str, side: BetSide, confidence: f64, detail: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            side,
            confidence: confidence.clamp(0.0, CONFIDENCE_CAP),
            weight: 1.0,
            detail: detail.into(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// The reduced decision: one side, one calibrated confidence, and the
/// admitted votes that produced it (in admission order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    pub side: BetSide,
    /// 0–100 scale, always within `[0, CONFIDENCE_CAP]`.
    pub confidence: f64,
    pub votes: Vec<DetectorVote>,
    /// All admitted weight landed on `side`, from at least two distinct
    /// detectors.
    pub unanimous: bool,
}

impl ConsensusResult {
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_confidence_is_clamped_at_cap() {
        let vote = DetectorVote::new("dragon_tail", BetSide::Player, 120.0, "runaway");
        assert_eq!(vote.confidence, CONFIDENCE_CAP);

        let vote = DetectorVote::new("dragon_tail", BetSide::Player, -3.0, "runaway");
        assert_eq!(vote.confidence, 0.0);
    }

    #[test]
    fn with_weight_replaces_default() {
        let vote = DetectorVote::new("score_combo", BetSide::Banker, 67.0, "B1-9→B").with_weight(3.5);
        assert_eq!(vote.weight, 3.5);
    }

    #[test]
    fn consensus_result_roundtrips_through_json() {
        let result = ConsensusResult {
            side: BetSide::Banker,
            confidence: 64.5,
            votes: vec![DetectorVote::new("sequence", BetSide::Banker, 64.0, "Seq[BT]→B")],
            unanimous: false,
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: ConsensusResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
