//! The consensus engine.
//!
//! Reduces the detector votes of one evaluation to a single side and a
//! calibrated confidence. Admission, weighting and tie-breaking are all
//! deterministic: identical vote sets always reduce to the identical
//! decision.

use crate::config::EngineConfig;
use crate::detectors::MEMORY_3_NAME;
use roadsense_models::{BetSide, ConsensusResult, DetectorVote, Round, CONFIDENCE_CAP};

/// Label of the last-resort fallback pseudo-detector.
pub const LAST_RESULT_NAME: &str = "last_result";

/// Weighted vote reduction with per-detector admission gates.
pub struct ConsensusEngine {
    config: EngineConfig,
}

impl ConsensusEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Reduce one evaluation's detector statuses to a decision.
    ///
    /// `statuses` holds every detector's label and optional vote in bank
    /// order; `short` is the current shoe window. Returns `None` only
    /// when the history is too thin to decide at all (fewer than three
    /// rounds, or no non-tie round yet).
    pub fn decide(
        &self,
        statuses: &[(&'static str, Option<DetectorVote>)],
        short: &[Round],
    ) -> Option<ConsensusResult> {
        if short.len() < 3 {
            return None;
        }
        let last_winner = short.iter().rev().find_map(|r| r.side.bet_side())?;

        let mut admitted: Vec<DetectorVote> = Vec::new();
        for (label, vote) in statuses {
            let Some(vote) = vote else { continue };
            let policy = self.config.policy(label);
            if vote.confidence >= policy.min_confidence {
                admitted.push(vote.clone().with_weight(policy.weight));
            }
        }

        // Declared fallback order: pattern memory (length 3) without its
        // gate, then the last actual winner at fixed confidence.
        if admitted.is_empty() {
            if let Some((_, Some(vote))) = statuses.iter().find(|(label, _)| *label == MEMORY_3_NAME)
            {
                let weight = self.config.policy(MEMORY_3_NAME).weight;
                admitted.push(vote.clone().with_weight(weight));
            }
        }
        if admitted.is_empty() {
            let vote = DetectorVote::new(
                LAST_RESULT_NAME,
                last_winner,
                self.config.fallback_confidence,
                "last non-tie result",
            );
            return Some(ConsensusResult {
                side: last_winner,
                confidence: vote.confidence,
                votes: vec![vote],
                unanimous: false,
            });
        }

        let banker_weight: f64 = side_weight(&admitted, BetSide::Banker);
        let player_weight: f64 = side_weight(&admitted, BetSide::Player);
        let total_weight = banker_weight + player_weight;

        let side = if banker_weight > player_weight {
            BetSide::Banker
        } else if player_weight > banker_weight {
            BetSide::Player
        } else {
            // True weight tie: the single most confident vote decides.
            strongest(&admitted).side
        };

        let weighted_confidence: f64 = admitted.iter().map(|v| v.confidence * v.weight).sum();
        let mut confidence = if total_weight > 0.0 {
            weighted_confidence / total_weight
        } else {
            0.0
        };

        let winning_weight = side_weight(&admitted, side);
        let unanimous = admitted.len() >= 2 && winning_weight == total_weight;
        if unanimous {
            confidence += self.config.unanimity_bonus;
        }
        confidence = confidence.clamp(0.0, CONFIDENCE_CAP);

        tracing::debug!(
            side = %side,
            confidence,
            votes = admitted.len(),
            unanimous,
            "consensus decision"
        );

        Some(ConsensusResult {
            side,
            confidence,
            votes: admitted,
            unanimous,
        })
    }
}

fn side_weight(votes: &[DetectorVote], side: BetSide) -> f64 {
    votes
        .iter()
        .filter(|v| v.side == side)
        .map(|v| v.weight)
        .sum()
}

/// First vote with the maximal confidence (stable under reordering of
/// equal-confidence votes only by taking the earliest).
fn strongest(votes: &[DetectorVote]) -> &DetectorVote {
    let mut best = &votes[0];
    for vote in &votes[1..] {
        if vote.confidence > best.confidence {
            best = vote;
        }
    }
    best
}
