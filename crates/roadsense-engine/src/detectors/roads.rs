//! Road-based detectors.
//!
//! These read the primary and derived roads instead of raw history:
//! dragon tails, derived-road regularity, chop alternation, road-backed
//! streaks, and the combined four-roads signal.

use super::{Detector, DetectorContext};
use crate::road::{DerivedRoad, RoadColor};
use roadsense_models::{BetSide, DetectorVote};

pub const DRAGON_TAIL_NAME: &str = "dragon_tail";
pub const BIG_EYE_NAME: &str = "big_eye";
pub const CHOP_NAME: &str = "chop";
pub const STREAK_ROADS_NAME: &str = "streak_roads";
pub const FOUR_ROADS_NAME: &str = "four_roads";

/// A primary column of six or more cells is a dragon tail: bet on the
/// break, harder the longer it runs.
pub struct DragonTail;

impl Detector for DragonTail {
    fn label(&self) -> &'static str {
        DRAGON_TAIL_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        let columns = ctx.roads.primary.columns();
        if columns.len() < 2 {
            return None;
        }
        let last = columns.last()?;
        if last.len() < 6 {
            return None;
        }
        let side = last.side().opposite();
        let confidence = (60.0 + last.len() as f64 * 5.0).min(90.0);
        Some(DetectorVote::new(
            DRAGON_TAIL_NAME,
            side,
            confidence,
            format!("dragon {} → break to {}", last.len(), side.symbol()),
        ))
    }
}

/// Red/blue imbalance over the last three big-eye columns.
pub struct BigEye;

impl Detector for BigEye {
    fn label(&self) -> &'static str {
        BIG_EYE_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        let columns = ctx.roads.big_eye.columns();
        if columns.len() < 3 {
            return None;
        }
        let recent = &columns[columns.len() - 3..];
        let red: usize = recent
            .iter()
            .filter(|c| c.color == RoadColor::Red)
            .map(|c| c.len)
            .sum();
        let blue: usize = recent
            .iter()
            .filter(|c| c.color == RoadColor::Blue)
            .map(|c| c.len)
            .sum();

        let (side, detail) = if red > blue * 2 {
            (BetSide::Banker, format!("big eye {red}R/{blue}B → B"))
        } else if blue > red * 2 {
            (BetSide::Player, format!("big eye {red}R/{blue}B → P"))
        } else {
            return None;
        };
        Some(DetectorVote::new(BIG_EYE_NAME, side, 55.0, detail))
    }
}

/// Five single-cell columns in a row: a chop. Keep riding the
/// alternation.
pub struct Chop;

impl Detector for Chop {
    fn label(&self) -> &'static str {
        CHOP_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        let columns = ctx.roads.primary.columns();
        if columns.len() < 5 {
            return None;
        }
        let recent = &columns[columns.len() - 5..];
        if !recent.iter().all(|c| c.len() == 1) {
            return None;
        }
        // Tie-closed columns can repeat a side, so alternation is a real
        // condition here, not a road invariant.
        if !recent.windows(2).all(|w| w[0].side() != w[1].side()) {
            return None;
        }

        let side = recent[4].side().opposite();
        Some(DetectorVote::new(
            CHOP_NAME,
            side,
            70.0,
            format!("chop ×5 → {}", side.symbol()),
        ))
    }
}

/// Road-backed streak reading: the last primary column's run with the
/// same follow/break policy as the history streak detector, firmed up by
/// developed small and cockroach roads.
pub struct StreakRoads;

fn developed(road: &DerivedRoad) -> bool {
    road.columns().len() >= 2
}

impl Detector for StreakRoads {
    fn label(&self) -> &'static str {
        STREAK_ROADS_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        let last = ctx.roads.primary.last_column()?;
        let run = last.len();
        if run < 4 {
            return None;
        }
        let confirms = [&ctx.roads.small, &ctx.roads.cockroach]
            .into_iter()
            .filter(|road| developed(road))
            .count();

        let (side, confidence, action) = if run >= 7 {
            (
                last.side().opposite(),
                55.0 + confirms as f64 * 8.0,
                "break",
            )
        } else {
            (
                last.side(),
                50.0 + run as f64 * 3.0 + confirms as f64 * 10.0,
                "follow",
            )
        };
        let confidence = confidence.min(85.0);

        Some(DetectorVote::new(
            STREAK_ROADS_NAME,
            side,
            confidence,
            format!("road run {run} → {action} {}", side.symbol()),
        ))
    }
}

/// The combined signal: primary road's last side, confirmed (red) or
/// contradicted (blue) by the last cell of each derived road.
pub struct FourRoads;

impl Detector for FourRoads {
    fn label(&self) -> &'static str {
        FOUR_ROADS_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        if ctx.roads.primary.columns().len() < 3 {
            return None;
        }
        let primary_side = ctx.roads.primary.last_side()?;

        let signals: Vec<RoadColor> = [&ctx.roads.big_eye, &ctx.roads.small, &ctx.roads.cockroach]
            .into_iter()
            .filter_map(|road| road.last_color())
            .collect();
        if signals.is_empty() {
            return None;
        }

        let red = signals.iter().filter(|c| **c == RoadColor::Red).count();
        let blue = signals.len() - red;

        let (side, confidence) = if red == 3 {
            (primary_side, 80.0)
        } else if red == 2 {
            (primary_side, 65.0)
        } else if red == 1 && blue == 2 {
            // Two derived roads disagree with the primary signal: flip.
            (primary_side.opposite(), 45.0)
        } else {
            return None;
        };

        Some(DetectorVote::new(
            FOUR_ROADS_NAME,
            side,
            confidence,
            format!("{red}R/{blue}B on {} → {}", primary_side.symbol(), side.symbol()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::testutil::{ctx, rounds_from};
    use crate::road::DerivedColumn;
    use roadsense_models::Side::{Banker as B, Player as P};

    #[test]
    fn dragon_tail_bets_the_break() {
        let rounds = rounds_from(&[P, B, B, B, B, B, B]);
        let c = ctx(&rounds, &rounds);
        let vote = DragonTail.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Player);
        assert_eq!(vote.confidence, 90.0);
    }

    #[test]
    fn dragon_tail_needs_six_cells() {
        let rounds = rounds_from(&[P, B, B, B, B, B]);
        let c = ctx(&rounds, &rounds);
        assert!(DragonTail.evaluate(&c.context()).is_none());
    }

    #[test]
    fn chop_rides_the_alternation() {
        let rounds = rounds_from(&[B, P, B, P, B]);
        let c = ctx(&rounds, &rounds);
        let vote = Chop.evaluate(&c.context()).unwrap();
        // last column is B, the alternation continues with P
        assert_eq!(vote.side, BetSide::Player);
        assert_eq!(vote.confidence, 70.0);
    }

    #[test]
    fn chop_requires_all_singles() {
        let rounds = rounds_from(&[B, B, P, B, P, B]);
        let c = ctx(&rounds, &rounds);
        assert!(Chop.evaluate(&c.context()).is_none());
    }

    #[test]
    fn chop_rejects_tie_split_repeat() {
        // B,T,B yields two adjacent single B columns: singles, but not
        // an alternation.
        use roadsense_models::Side::Tie as T;
        let rounds = rounds_from(&[B, P, B, T, B, P, B]);
        let c = ctx(&rounds, &rounds);
        assert!(Chop.evaluate(&c.context()).is_none());
    }

    #[test]
    fn streak_roads_follows_moderate_run() {
        let rounds = rounds_from(&[P, B, B, B, B]);
        let c = ctx(&rounds, &rounds);
        let vote = StreakRoads.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Banker);
        // no developed derived roads on this short window
        assert_eq!(vote.confidence, 62.0); // 50 + 4×3
    }

    #[test]
    fn streak_roads_breaks_long_run() {
        let rounds = rounds_from(&[P, B, B, B, B, B, B, B]);
        let c = ctx(&rounds, &rounds);
        let vote = StreakRoads.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Player);
        assert_eq!(vote.confidence, 55.0);
    }

    #[test]
    fn big_eye_flags_blue_imbalance() {
        let rounds = rounds_from(&[B, P, B]);
        let mut c = ctx(&rounds, &rounds);
        c.set_big_eye(DerivedRoad::from_columns(vec![
            DerivedColumn {
                color: RoadColor::Blue,
                len: 1,
            },
            DerivedColumn {
                color: RoadColor::Red,
                len: 1,
            },
            DerivedColumn {
                color: RoadColor::Blue,
                len: 3,
            },
        ]));
        let vote = BigEye.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Player);
        assert_eq!(vote.confidence, 55.0);
    }

    #[test]
    fn big_eye_balanced_is_silent() {
        let rounds = rounds_from(&[B, P, B]);
        let mut c = ctx(&rounds, &rounds);
        c.set_big_eye(DerivedRoad::from_columns(vec![
            DerivedColumn {
                color: RoadColor::Red,
                len: 1,
            },
            DerivedColumn {
                color: RoadColor::Blue,
                len: 1,
            },
            DerivedColumn {
                color: RoadColor::Red,
                len: 1,
            },
        ]));
        assert!(BigEye.evaluate(&c.context()).is_none());
    }

    #[test]
    fn four_roads_majority_blue_flips_the_signal() {
        // Primary says Banker; one red vs two blue flips to Player at
        // reduced confidence.
        let rounds = rounds_from(&[B, P, B]);
        let mut c = ctx(&rounds, &rounds);
        let red = DerivedRoad::from_columns(vec![DerivedColumn {
            color: RoadColor::Red,
            len: 1,
        }]);
        let blue = DerivedRoad::from_columns(vec![DerivedColumn {
            color: RoadColor::Blue,
            len: 1,
        }]);
        c.set_big_eye(red);
        c.set_small(blue.clone());
        c.set_cockroach(blue);
        let vote = FourRoads.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Player);
        assert_eq!(vote.confidence, 45.0);
    }

    #[test]
    fn four_roads_unanimous_confirmation() {
        // Perfectly regular alternation keeps every derived road red.
        let rounds = rounds_from(&[B, P, B, P, B, P, B, P, B, P]);
        let c = ctx(&rounds, &rounds);
        let vote = FourRoads.evaluate(&c.context()).unwrap();
        // primary last side is P, all derived roads confirm
        assert_eq!(vote.side, BetSide::Player);
        assert_eq!(vote.confidence, 80.0);
    }

    #[test]
    fn four_roads_needs_three_columns() {
        let rounds = rounds_from(&[B, B, P]);
        let c = ctx(&rounds, &rounds);
        assert!(FourRoads.evaluate(&c.context()).is_none());
    }
}
