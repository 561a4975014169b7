//! The detector bank.
//!
//! Each detector is one independent, stateless rule evaluator
//! contributing at most one vote per evaluation. Detectors read the
//! history windows and/or the roads, never each other's votes, and
//! signal "nothing to say" by returning `None` — a detector that cannot
//! vote simply contributes nothing downstream.

pub mod memory;
pub mod recent;
pub mod roads;
pub mod scores;
pub mod tables;

#[cfg(test)]
pub(crate) mod testutil;

use crate::phase::ShoePhase;
use crate::road::RoadSet;
use roadsense_models::{DetectorVote, Round};

pub use memory::{PatternMemory, MEMORY_3_NAME, MEMORY_4_NAME};
pub use recent::{
    Clustering, PairPattern, SectorDominance, Streak, TieFollowup, CLUSTERING_NAME,
    PAIR_PATTERN_NAME, SECTOR_DOMINANCE_NAME, STREAK_NAME, TIE_FOLLOWUP_NAME,
};
pub use roads::{
    BigEye, Chop, DragonTail, FourRoads, StreakRoads, BIG_EYE_NAME, CHOP_NAME, DRAGON_TAIL_NAME,
    FOUR_ROADS_NAME, STREAK_ROADS_NAME,
};
pub use scores::{
    EvenOdd, RepeatScore, ScoreDiff, ScoreDistribution, EVEN_ODD_NAME, REPEAT_SCORE_NAME,
    SCORE_DIFF_NAME, SCORE_DISTRIBUTION_NAME,
};
pub use tables::{ScoreColor, ScoreCombo, Sequence, SCORE_COLOR_NAME, SCORE_COMBO_NAME, SEQUENCE_NAME};

/// Everything a detector may look at for one evaluation.
///
/// `short` covers the current shoe, `long` the whole session; both are
/// chronological (oldest first). Roads are derived from the short
/// window. Only pattern memory reads `phase`.
#[derive(Debug, Clone, Copy)]
pub struct DetectorContext<'a> {
    pub short: &'a [Round],
    pub long: &'a [Round],
    pub roads: &'a RoadSet,
    pub phase: ShoePhase,
}

/// One pattern detector.
pub trait Detector: Send + Sync {
    /// Stable label, also the key into the configured policy table.
    fn label(&self) -> &'static str;

    /// Evaluate against the current state. `None` means no signal.
    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote>;
}

/// The assembled bank, evaluated in declared order.
pub struct DetectorBank {
    detectors: Vec<Box<dyn Detector>>,
}

impl Default for DetectorBank {
    fn default() -> Self {
        Self::standard()
    }
}

impl DetectorBank {
    /// The standard bank, ordered by consensus weight rank.
    pub fn standard() -> Self {
        Self {
            detectors: vec![
                Box::new(ScoreCombo),
                Box::new(PatternMemory::length_3()),
                Box::new(Sequence),
                Box::new(ScoreColor),
                Box::new(FourRoads),
                Box::new(PatternMemory::length_4()),
                Box::new(DragonTail),
                Box::new(StreakRoads),
                Box::new(ScoreDiff),
                Box::new(ScoreDistribution),
                Box::new(Chop),
                Box::new(Clustering),
                Box::new(SectorDominance),
                Box::new(PairPattern),
                Box::new(RepeatScore),
                Box::new(TieFollowup),
                Box::new(Streak),
                Box::new(EvenOdd),
                Box::new(BigEye),
            ],
        }
    }

    /// Evaluate every detector, preserving bank order.
    pub fn evaluate_all(
        &self,
        ctx: &DetectorContext<'_>,
    ) -> Vec<(&'static str, Option<DetectorVote>)> {
        self.detectors
            .iter()
            .map(|d| (d.label(), d.evaluate(ctx)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}
