//! Short-horizon pattern detectors.
//!
//! Pairs, tie follow-ups, streaks, sector dominance and clustering — all
//! read the most recent rounds directly rather than the roads.

use super::scores::tail;
use super::{Detector, DetectorContext};
use roadsense_models::{BetSide, DetectorVote, Round, Side};

pub const PAIR_PATTERN_NAME: &str = "pair_pattern";
pub const TIE_FOLLOWUP_NAME: &str = "tie_followup";
pub const STREAK_NAME: &str = "streak";
pub const SECTOR_DOMINANCE_NAME: &str = "sector_dominance";
pub const CLUSTERING_NAME: &str = "clustering";

/// Pair flags over the last three rounds.
///
/// Pairs concentrated on one hand follow that hand; pairs on both hands
/// read as churn and vote the opposite of the last winner; a pairless
/// stretch defaults quietly to Banker.
pub struct PairPattern;

impl Detector for PairPattern {
    fn label(&self) -> &'static str {
        PAIR_PATTERN_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        if ctx.short.len() < 3 {
            return None;
        }
        let recent = tail(ctx.short, 3);
        let player_pairs = recent.iter().filter(|r| r.pair_player).count();
        let banker_pairs = recent.iter().filter(|r| r.pair_banker).count();
        let last = recent.last()?;

        let (side, confidence, detail) = if player_pairs >= 2 && banker_pairs == 0 {
            (BetSide::Player, 65.0, format!("P pairs ×{player_pairs} → P"))
        } else if banker_pairs >= 2 && player_pairs == 0 {
            (BetSide::Banker, 65.0, format!("B pairs ×{banker_pairs} → B"))
        } else if player_pairs > 0 && banker_pairs > 0 {
            let side = if last.side == Side::Player {
                BetSide::Banker
            } else {
                BetSide::Player
            };
            (side, 58.0, format!("mixed pairs → {}", side.symbol()))
        } else if player_pairs + banker_pairs == 0 {
            (BetSide::Banker, 52.0, "no pairs in 3 → B".to_string())
        } else {
            return None;
        };

        Some(DetectorVote::new(PAIR_PATTERN_NAME, side, confidence, detail))
    }
}

/// Fires only when the latest round was a tie: vote the side that won
/// just before it, more confidently when that side was already on a
/// two-win run.
pub struct TieFollowup;

impl Detector for TieFollowup {
    fn label(&self) -> &'static str {
        TIE_FOLLOWUP_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        let n = ctx.short.len();
        if n < 3 {
            return None;
        }
        if ctx.short[n - 1].side != Side::Tie {
            return None;
        }
        let before_tie = ctx.short[n - 2].side.bet_side()?;

        let (confidence, detail) = if n >= 4 {
            if ctx.short[n - 3].side == ctx.short[n - 2].side {
                (
                    68.0,
                    format!(
                        "tie after {}{} → {}",
                        before_tie.symbol(),
                        before_tie.symbol(),
                        before_tie.symbol()
                    ),
                )
            } else {
                (
                    58.0,
                    format!("tie after {} → {}", before_tie.symbol(), before_tie.symbol()),
                )
            }
        } else {
            (55.0, format!("tie → {}", before_tie.symbol()))
        };

        Some(DetectorVote::new(
            TIE_FOLLOWUP_NAME,
            before_tie,
            confidence,
            detail,
        ))
    }
}

/// Current same-side run (ties excluded) over the last ten rounds.
///
/// Moderate runs (4–6) continue; very long runs (7+) break.
pub struct Streak;

/// Length and side of the trailing same-side run among non-tie rounds.
fn trailing_run(rounds: &[Round]) -> Option<(BetSide, usize)> {
    let non_tie: Vec<BetSide> = rounds.iter().filter_map(|r| r.side.bet_side()).collect();
    let current = *non_tie.last()?;
    let run = non_tie.iter().rev().take_while(|s| **s == current).count();
    Some((current, run))
}

impl Detector for Streak {
    fn label(&self) -> &'static str {
        STREAK_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        if ctx.short.len() < 4 {
            return None;
        }
        let recent = tail(ctx.short, 10);
        let non_tie_count = recent.iter().filter(|r| !r.side.is_tie()).count();
        if non_tie_count < 4 {
            return None;
        }
        let (current, run) = trailing_run(recent)?;
        if run < 4 {
            return None;
        }

        if run <= 6 {
            let confidence = (52.0 + run as f64 * 3.0).min(70.0);
            Some(DetectorVote::new(
                STREAK_NAME,
                current,
                confidence,
                format!("run {run} → follow {}", current.symbol()),
            ))
        } else {
            let side = current.opposite();
            Some(DetectorVote::new(
                STREAK_NAME,
                side,
                55.0,
                format!("run {run} → break to {}", side.symbol()),
            ))
        }
    }
}

/// Majority side of the long window's four sectors.
///
/// Consecutive same-majority sectors at the end of the window read as a
/// table-wide lean worth following.
pub struct SectorDominance;

impl Detector for SectorDominance {
    fn label(&self) -> &'static str {
        SECTOR_DOMINANCE_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        let n = ctx.long.len();
        if n < 20 {
            return None;
        }
        let sector_size = (n / 4).max(5);

        let mut sectors: Vec<Option<BetSide>> = Vec::new();
        for i in 0..4 {
            let start = i * sector_size;
            if start >= n {
                break;
            }
            let end = (start + sector_size).min(n);
            let sector = &ctx.long[start..end];
            let banker = sector.iter().filter(|r| r.side == Side::Banker).count();
            let player = sector.iter().filter(|r| r.side == Side::Player).count();
            sectors.push(match banker.cmp(&player) {
                std::cmp::Ordering::Greater => Some(BetSide::Banker),
                std::cmp::Ordering::Less => Some(BetSide::Player),
                std::cmp::Ordering::Equal => None,
            });
        }
        if sectors.len() < 3 {
            return None;
        }

        let last_3 = &sectors[sectors.len() - 3..];
        let last_2 = &sectors[sectors.len() - 2..];

        if let Some(side) = last_3[0] {
            if last_3.iter().all(|s| *s == Some(side)) {
                return Some(DetectorVote::new(
                    SECTOR_DOMINANCE_NAME,
                    side,
                    72.0,
                    format!("3 sectors → {}", side.symbol()),
                ));
            }
        }
        if let Some(side) = last_2[0] {
            if last_2.iter().all(|s| *s == Some(side)) {
                return Some(DetectorVote::new(
                    SECTOR_DOMINANCE_NAME,
                    side,
                    65.0,
                    format!("2 sectors → {}", side.symbol()),
                ));
            }
        }
        None
    }
}

/// Same-side clusters in five-round sliding windows over the last 15.
///
/// An active 4-of-5 cluster continues; a saturated 5-of-5 cluster breaks;
/// a cluster-heavy table follows its latest two-in-a-row at low
/// confidence.
pub struct Clustering;

impl Detector for Clustering {
    fn label(&self) -> &'static str {
        CLUSTERING_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        if ctx.short.len() < 10 {
            return None;
        }
        let recent = tail(ctx.short, 15);

        let clusters = recent
            .windows(5)
            .filter(|w| {
                let banker = w.iter().filter(|r| r.side == Side::Banker).count();
                let player = w.iter().filter(|r| r.side == Side::Player).count();
                banker >= 4 || player >= 4
            })
            .count();

        let last_5 = tail(recent, 5);
        let banker_5 = last_5.iter().filter(|r| r.side == Side::Banker).count();
        let player_5 = last_5.iter().filter(|r| r.side == Side::Player).count();

        let active = |side: BetSide| {
            let confidence = (54.0 + clusters as f64 * 2.0).min(66.0);
            DetectorVote::new(
                CLUSTERING_NAME,
                side,
                confidence,
                format!("4/5 cluster → {}", side.symbol()),
            )
        };

        if banker_5 == 4 {
            return Some(active(BetSide::Banker));
        }
        if player_5 == 4 {
            return Some(active(BetSide::Player));
        }
        if banker_5 == 5 {
            return Some(DetectorVote::new(
                CLUSTERING_NAME,
                BetSide::Player,
                58.0,
                "5/5 cluster → break to P",
            ));
        }
        if player_5 == 5 {
            return Some(DetectorVote::new(
                CLUSTERING_NAME,
                BetSide::Banker,
                58.0,
                "5/5 cluster → break to B",
            ));
        }

        if clusters >= 3 {
            let last_3: Vec<BetSide> = tail(recent, 3)
                .iter()
                .filter_map(|r| r.side.bet_side())
                .collect();
            if last_3.len() >= 2 && last_3[last_3.len() - 1] == last_3[last_3.len() - 2] {
                let side = last_3[last_3.len() - 1];
                return Some(DetectorVote::new(
                    CLUSTERING_NAME,
                    side,
                    52.0,
                    format!("volatile table → {}", side.symbol()),
                ));
            }
        }
        None
    }
}
