//! Shared fixtures for detector tests.

use crate::detectors::DetectorContext;
use crate::phase::ShoePhase;
use crate::road::{DerivedRoad, RoadSet};
use roadsense_models::{Round, Side};

/// Owns the borrowed pieces of a [`DetectorContext`].
pub struct TestCtx {
    short: Vec<Round>,
    long: Vec<Round>,
    roads: RoadSet,
    phase: ShoePhase,
}

impl TestCtx {
    pub fn context(&self) -> DetectorContext<'_> {
        DetectorContext {
            short: &self.short,
            long: &self.long,
            roads: &self.roads,
            phase: self.phase,
        }
    }

    pub fn with_phase(mut self, phase: ShoePhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn set_big_eye(&mut self, road: DerivedRoad) {
        self.roads.big_eye = road;
    }

    pub fn set_small(&mut self, road: DerivedRoad) {
        self.roads.small = road;
    }

    pub fn set_cockroach(&mut self, road: DerivedRoad) {
        self.roads.cockroach = road;
    }
}

/// Context over explicit short/long windows; roads come from the short
/// window, phase defaults to early.
pub fn ctx(short: &[Round], long: &[Round]) -> TestCtx {
    TestCtx {
        short: short.to_vec(),
        long: long.to_vec(),
        roads: RoadSet::build(short),
        phase: ShoePhase::Early,
    }
}

/// A round with plausible scores for its outcome.
pub fn round(side: Side) -> Round {
    match side {
        Side::Banker => scored(side, 3, 7),
        Side::Player => scored(side, 7, 3),
        Side::Tie => scored(side, 6, 6),
    }
}

pub fn scored(side: Side, score_player: u8, score_banker: u8) -> Round {
    Round {
        side,
        score_player,
        score_banker,
        pair_player: false,
        pair_banker: false,
        is_natural: score_player >= 8 || score_banker >= 8,
        cards_out: 0,
    }
}

pub fn with_pairs(side: Side, pair_player: bool, pair_banker: bool) -> Round {
    Round {
        pair_player,
        pair_banker,
        ..round(side)
    }
}

pub fn rounds_from(sides: &[Side]) -> Vec<Round> {
    sides.iter().copied().map(round).collect()
}
