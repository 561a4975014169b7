//! Pattern memory.
//!
//! Takes the N outcomes immediately preceding the latest round as a
//! pattern, scans the whole long window for prior occurrences, and
//! votes for whatever historically followed — weighting recent
//! occurrences up to twice as heavily as ones at the very start of the
//! window.

use super::{Detector, DetectorContext};
use roadsense_models::{BetSide, DetectorVote, Side, CONFIDENCE_CAP};

pub const MEMORY_3_NAME: &str = "memory_3";
pub const MEMORY_4_NAME: &str = "memory_4";

/// Minimum qualifying occurrences before the detector will vote.
const MIN_OCCURRENCES: usize = 2;

/// Pattern-memory detector parameterized by pattern length.
pub struct PatternMemory {
    length: usize,
    label: &'static str,
}

impl PatternMemory {
    pub fn length_3() -> Self {
        Self {
            length: 3,
            label: MEMORY_3_NAME,
        }
    }

    pub fn length_4() -> Self {
        Self {
            length: 4,
            label: MEMORY_4_NAME,
        }
    }
}

impl Detector for PatternMemory {
    fn label(&self) -> &'static str {
        self.label
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        let outcomes: Vec<Side> = ctx.long.iter().map(|r| r.side).collect();
        let n = outcomes.len();
        // Enough room for the pattern, the latest round, and at least
        // MIN_OCCURRENCES earlier occurrences with followers.
        if n < self.length + MIN_OCCURRENCES + 4 {
            return None;
        }

        // The pattern is the `length` outcomes *before* the latest round.
        let pattern = &outcomes[n - 1 - self.length..n - 1];
        // Scan stops short of the pattern itself and its follower.
        let scan_len = n - self.length - 2;

        let mut banker_weight = 0.0;
        let mut player_weight = 0.0;
        let mut tie_weight = 0.0;
        let mut banker_count = 0usize;
        let mut player_count = 0usize;
        let mut occurrences = 0usize;

        for i in 0..scan_len {
            if &outcomes[i..i + self.length] != pattern {
                continue;
            }
            let follower = outcomes[i + self.length];
            // Recency weighting: 0.5 at the window start, up to 1.0 for
            // the most recent occurrence.
            let weight = 0.5 + 0.5 * (i as f64 / scan_len.max(1) as f64);
            occurrences += 1;
            match follower {
                Side::Banker => {
                    banker_weight += weight;
                    banker_count += 1;
                }
                Side::Player => {
                    player_weight += weight;
                    player_count += 1;
                }
                Side::Tie => tie_weight += weight,
            }
        }

        if occurrences < MIN_OCCURRENCES {
            return None;
        }

        let total_weight = banker_weight + player_weight + tie_weight;
        let boost = 1.0 + occurrences.min(10) as f64 * 0.02;

        let (side, mut confidence) = if banker_weight >= player_weight && banker_weight >= tie_weight
        {
            (
                BetSide::Banker,
                ((banker_weight / total_weight) * 100.0 * boost).min(CONFIDENCE_CAP),
            )
        } else if player_weight >= banker_weight && player_weight >= tie_weight {
            (
                BetSide::Player,
                ((player_weight / total_weight) * 100.0 * boost).min(CONFIDENCE_CAP),
            )
        } else if banker_count >= player_count {
            // Ties dominated the follower weight: fall back to the raw
            // occurrence majority, discounted and unboosted.
            (BetSide::Banker, (banker_weight / total_weight) * 80.0)
        } else {
            (BetSide::Player, (player_weight / total_weight) * 80.0)
        };

        confidence = (confidence * ctx.phase.memory_scale()).min(CONFIDENCE_CAP);

        let pattern_str: String = pattern.iter().map(|s| s.symbol()).collect();
        Some(DetectorVote::new(
            self.label,
            side,
            confidence,
            format!("{pattern_str} seen {occurrences}x"),
        ))
    }
}
