//! Score-driven detectors.
//!
//! These classify recent rounds by their hand totals: margin between the
//! hands, repeated winning scores, parity bias, and "hot" score values.

use super::{Detector, DetectorContext};
use roadsense_models::{BetSide, DetectorVote, Round, Side};

pub const SCORE_DIFF_NAME: &str = "score_diff";
pub const REPEAT_SCORE_NAME: &str = "repeat_score";
pub const EVEN_ODD_NAME: &str = "even_odd";
pub const SCORE_DISTRIBUTION_NAME: &str = "score_distribution";

/// Classifies the last round by score margin and naturals.
///
/// Naturals tend to continue (tied naturals default to Banker); a wide
/// margin tends to oscillate; a minimal margin defaults to Banker on the
/// house edge.
pub struct ScoreDiff;

impl Detector for ScoreDiff {
    fn label(&self) -> &'static str {
        SCORE_DIFF_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        if ctx.short.len() < 2 {
            return None;
        }
        let last = ctx.short.last()?;
        let margin = last.score_margin();
        let natural = last.score_player >= 8 || last.score_banker >= 8;

        let (side, confidence, detail) = if natural {
            match last.side.bet_side() {
                None => (BetSide::Banker, 55.0, "natural tie → B".to_string()),
                Some(winner) => (
                    winner,
                    60.0,
                    format!(
                        "natural {}{}-{} → {}",
                        winner.symbol(),
                        last.score_player,
                        last.score_banker,
                        winner.symbol()
                    ),
                ),
            }
        } else {
            let winner = last.side.bet_side()?;
            if margin >= 4 {
                let side = winner.opposite();
                (side, 58.0, format!("diff{margin} → {}", side.symbol()))
            } else if margin <= 1 {
                (BetSide::Banker, 52.0, format!("diff{margin} → B"))
            } else {
                return None;
            }
        };

        Some(DetectorVote::new(SCORE_DIFF_NAME, side, confidence, detail))
    }
}

/// Fires when the winning score repeats for the same winning side across
/// the last two rounds.
pub struct RepeatScore;

impl Detector for RepeatScore {
    fn label(&self) -> &'static str {
        REPEAT_SCORE_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        let [prev, last] = ctx.short.last_chunk::<2>()?;
        let winner = last.side.bet_side()?;
        if prev.side != last.side {
            return None;
        }
        let score = last.winner_score()?;
        if score != prev.winner_score()? {
            return None;
        }

        let (side, confidence, kind) = if score <= 3 {
            // Low repeated score: the table tends to turn.
            (winner.opposite(), 62.0, "low")
        } else if score >= 6 {
            // High repeated score: Banker default.
            let confidence = if winner == BetSide::Banker { 58.0 } else { 55.0 };
            (BetSide::Banker, confidence, "high")
        } else {
            return None;
        };

        Some(DetectorVote::new(
            REPEAT_SCORE_NAME,
            side,
            confidence,
            format!(
                "{}{score} repeat → {} ({kind})",
                winner.symbol(),
                side.symbol()
            ),
        ))
    }
}

/// Winning-score parity bias over the last 15 rounds.
///
/// When the last five winning scores lean even (or odd) and one side
/// takes a disproportionate share of that parity class, vote it.
pub struct EvenOdd;

impl Detector for EvenOdd {
    fn label(&self) -> &'static str {
        EVEN_ODD_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        if ctx.short.len() < 10 {
            return None;
        }
        let recent = tail(ctx.short, 15);

        let mut even_banker = 0usize;
        let mut odd_banker = 0usize;
        let mut even_player = 0usize;
        let mut odd_player = 0usize;
        for r in recent {
            match (r.side, r.winner_score()) {
                (Side::Banker, Some(score)) if score % 2 == 0 => even_banker += 1,
                (Side::Banker, Some(_)) => odd_banker += 1,
                (Side::Player, Some(score)) if score % 2 == 0 => even_player += 1,
                (Side::Player, Some(_)) => odd_player += 1,
                _ => {}
            }
        }

        let last_5_scores: Vec<u8> = tail(ctx.short, 5)
            .iter()
            .filter_map(|r| r.winner_score())
            .collect();
        let even_count = last_5_scores.iter().filter(|s| *s % 2 == 0).count();

        let (parity, side_count, total) = if even_count >= 3 {
            ("even", even_banker, even_banker + even_player)
        } else {
            ("odd", odd_banker, odd_banker + odd_player)
        };
        if total == 0 {
            return None;
        }

        let banker_ratio = side_count as f64 / total as f64;
        let (side, ratio) = if banker_ratio > 0.6 {
            (BetSide::Banker, banker_ratio)
        } else if banker_ratio < 0.4 {
            (BetSide::Player, 1.0 - banker_ratio)
        } else {
            return None;
        };

        let confidence = (50.0 + (ratio - 0.6) * 50.0).min(70.0);
        Some(DetectorVote::new(
            EVEN_ODD_NAME,
            side,
            confidence,
            format!("{parity}-dominant → {}", side.symbol()),
        ))
    }
}

/// Hot winning-score values.
///
/// A score that showed up twice in the last ten rounds, and whose
/// winners over the last twenty lean >60% to one side, votes that side.
pub struct ScoreDistribution;

impl Detector for ScoreDistribution {
    fn label(&self) -> &'static str {
        SCORE_DISTRIBUTION_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        if ctx.short.len() < 15 {
            return None;
        }
        let recent_20 = tail(ctx.short, 20);
        let recent_10 = tail(ctx.short, 10);

        // Winner counts per (side, score) over the wider window.
        let mut wins = [[0usize; 10]; 2]; // [banker, player] × score
        for r in recent_20 {
            if let (Some(bet), Some(score)) = (r.side.bet_side(), r.winner_score()) {
                let row = match bet {
                    BetSide::Banker => 0,
                    BetSide::Player => 1,
                };
                wins[row][score as usize] += 1;
            }
        }

        // Hot scores in first-appearance order, so the pick is
        // deterministic for a given window.
        let mut hot: Vec<(u8, usize)> = Vec::new();
        for r in recent_10 {
            if let Some(score) = r.winner_score() {
                match hot.iter_mut().find(|(s, _)| *s == score) {
                    Some((_, count)) => *count += 1,
                    None => hot.push((score, 1)),
                }
            }
        }

        for (score, appearances) in hot.into_iter().filter(|(_, c)| *c >= 2) {
            let banker = wins[0][score as usize];
            let player = wins[1][score as usize];
            let total = banker + player;
            if total < 2 {
                continue;
            }
            let (side, ratio) = if player > banker {
                (BetSide::Player, player as f64 / total as f64)
            } else {
                (BetSide::Banker, banker as f64 / total as f64)
            };
            if ratio > 0.6 {
                let confidence = (50.0 + (ratio - 0.6) * 100.0).min(75.0);
                return Some(DetectorVote::new(
                    SCORE_DISTRIBUTION_NAME,
                    side,
                    confidence,
                    format!("hot {}{score} ×{appearances}", side.symbol()),
                ));
            }
        }

        None
    }
}

/// Last `n` rounds of a window (the whole window when shorter).
pub(super) fn tail(rounds: &[Round], n: usize) -> &[Round] {
    &rounds[rounds.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::testutil::{ctx, round, rounds_from, scored};
    use roadsense_models::Side::{Banker as B, Player as P, Tie as T};

    #[test]
    fn score_diff_natural_continues_winner() {
        let rounds = vec![round(B), scored(P, 9, 4)];
        let c = ctx(&rounds, &rounds);
        let vote = ScoreDiff.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Player);
        assert_eq!(vote.confidence, 60.0);
    }

    #[test]
    fn score_diff_natural_tie_defaults_to_banker() {
        let rounds = vec![round(B), scored(T, 9, 9)];
        let c = ctx(&rounds, &rounds);
        let vote = ScoreDiff.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Banker);
        assert_eq!(vote.confidence, 55.0);
    }

    #[test]
    fn score_diff_wide_margin_oscillates() {
        let rounds = vec![round(B), scored(P, 7, 2)];
        let c = ctx(&rounds, &rounds);
        let vote = ScoreDiff.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Banker);
        assert_eq!(vote.confidence, 58.0);
    }

    #[test]
    fn score_diff_narrow_margin_takes_house_edge() {
        let rounds = vec![round(B), scored(P, 6, 5)];
        let c = ctx(&rounds, &rounds);
        let vote = ScoreDiff.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Banker);
        assert_eq!(vote.confidence, 52.0);
    }

    #[test]
    fn score_diff_middle_margin_is_silent() {
        let rounds = vec![round(B), scored(P, 6, 3)];
        let c = ctx(&rounds, &rounds);
        assert!(ScoreDiff.evaluate(&c.context()).is_none());
    }

    #[test]
    fn repeat_low_score_votes_change() {
        let rounds = vec![scored(P, 3, 1), scored(P, 3, 2)];
        let c = ctx(&rounds, &rounds);
        let vote = RepeatScore.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Banker);
        assert_eq!(vote.confidence, 62.0);
    }

    #[test]
    fn repeat_high_banker_score_votes_banker() {
        let rounds = vec![scored(B, 2, 7), scored(B, 4, 7)];
        let c = ctx(&rounds, &rounds);
        let vote = RepeatScore.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Banker);
        assert_eq!(vote.confidence, 58.0);
    }

    #[test]
    fn repeat_requires_same_winner_and_score() {
        let rounds = vec![scored(B, 2, 7), scored(P, 7, 2)];
        let c = ctx(&rounds, &rounds);
        assert!(RepeatScore.evaluate(&c.context()).is_none());

        let rounds = vec![scored(B, 2, 6), scored(B, 2, 7)];
        let c = ctx(&rounds, &rounds);
        assert!(RepeatScore.evaluate(&c.context()).is_none());
    }

    #[test]
    fn repeat_middle_score_is_silent() {
        let rounds = vec![scored(B, 2, 5), scored(B, 1, 5)];
        let c = ctx(&rounds, &rounds);
        assert!(RepeatScore.evaluate(&c.context()).is_none());
    }

    #[test]
    fn even_bias_votes_dominant_side() {
        // Banker wins with even scores throughout: even-dominant recent
        // parity and a 100% banker ratio on evens.
        let rounds: Vec<_> = (0..12).map(|_| scored(B, 3, 6)).collect();
        let c = ctx(&rounds, &rounds);
        let vote = EvenOdd.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Banker);
        assert_eq!(vote.confidence, 70.0);
    }

    #[test]
    fn odd_bias_votes_player_when_banker_share_low() {
        let rounds: Vec<_> = (0..12).map(|_| scored(P, 7, 4)).collect();
        let c = ctx(&rounds, &rounds);
        let vote = EvenOdd.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Player);
    }

    #[test]
    fn balanced_parity_is_silent() {
        // Alternating banker/player wins on the same parity: ratio 0.5.
        let rounds: Vec<_> = (0..12)
            .map(|i| {
                if i % 2 == 0 {
                    scored(B, 3, 6)
                } else {
                    scored(P, 6, 3)
                }
            })
            .collect();
        let c = ctx(&rounds, &rounds);
        assert!(EvenOdd.evaluate(&c.context()).is_none());
    }

    #[test]
    fn hot_score_with_dominant_side_votes() {
        // Filler rounds with one-off winning scores, then Player keeps
        // winning with 7s: score 7 is hot and 100% Player.
        let mut rounds = Vec::new();
        for i in 0..12u8 {
            rounds.push(if i % 2 == 0 {
                scored(B, 1, 4)
            } else {
                scored(P, 5, 2)
            });
        }
        rounds.extend([scored(P, 7, 2), scored(P, 7, 3), scored(P, 7, 0)]);
        let c = ctx(&rounds, &rounds);
        let vote = ScoreDistribution.evaluate(&c.context()).unwrap();
        assert_eq!(vote.side, BetSide::Player);
        assert!(vote.confidence >= 50.0);
    }

    #[test]
    fn score_distribution_needs_history() {
        let rounds = rounds_from(&[B, P, B]);
        let c = ctx(&rounds, &rounds);
        assert!(ScoreDistribution.evaluate(&c.context()).is_none());
    }

    #[test]
    fn split_hot_score_is_silent() {
        // Score 6 is hot but evenly split between the sides.
        let mut rounds = Vec::new();
        for i in 0..16u8 {
            rounds.push(if i % 2 == 0 {
                scored(B, 2, 6)
            } else {
                scored(P, 6, 2)
            });
        }
        let c = ctx(&rounds, &rounds);
        assert!(ScoreDistribution.evaluate(&c.context()).is_none());
    }
}
