//! Shoe phase classification.
//!
//! Only the pattern-memory detectors consume the phase (their confidence
//! scales up as the shoe matures); every other detector ignores it.

use serde::{Deserialize, Serialize};

/// How deep into the current shoe the table is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShoePhase {
    Early,
    Middle,
    Late,
}

impl ShoePhase {
    /// Classify by consumed-card fraction when the feed reports
    /// `cards_out`, else by how many rounds the long window holds.
    ///
    /// Cut points: <35% / <70% of the shoe by cards, or <20 / <60
    /// rounds.
    pub fn classify(cards_out: Option<u32>, rounds_seen: usize, shoe_cards: u32) -> Self {
        match cards_out {
            Some(cards) if cards > 0 && shoe_cards > 0 => {
                let used = f64::from(cards) / f64::from(shoe_cards);
                if used < 0.35 {
                    ShoePhase::Early
                } else if used < 0.70 {
                    ShoePhase::Middle
                } else {
                    ShoePhase::Late
                }
            }
            _ => {
                if rounds_seen < 20 {
                    ShoePhase::Early
                } else if rounds_seen < 60 {
                    ShoePhase::Middle
                } else {
                    ShoePhase::Late
                }
            }
        }
    }

    /// Confidence multiplier applied by pattern memory.
    pub fn memory_scale(&self) -> f64 {
        match self {
            ShoePhase::Early => 1.0,
            ShoePhase::Middle => 1.05,
            ShoePhase::Late => 1.10,
        }
    }
}
