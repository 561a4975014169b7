//! Fixed-table detectors.
//!
//! These look up the most recent outcome(s) in tables of historically
//! validated triggers. The confidences are the measured accuracies of
//! each trigger on the validation corpus (1,438–1,450 rounds), so a
//! table hit votes at exactly its historical hit rate.

use super::{Detector, DetectorContext};
use roadsense_models::{BetSide, DetectorVote, Side};

pub const SCORE_COMBO_NAME: &str = "score_combo";
pub const SEQUENCE_NAME: &str = "sequence";
pub const SCORE_COLOR_NAME: &str = "score_color";

/// Exact `(winner, player score, banker score)` triples with >60%
/// accuracy and enough samples to matter.
const COMBO_RULES: &[((Side, u8, u8), (BetSide, f64))] = &[
    ((Side::Banker, 2, 9), (BetSide::Player, 87.0)),
    ((Side::Banker, 7, 9), (BetSide::Banker, 71.0)),
    ((Side::Player, 7, 0), (BetSide::Banker, 71.0)),
    ((Side::Player, 8, 7), (BetSide::Player, 69.0)),
    ((Side::Tie, 7, 7), (BetSide::Banker, 68.0)),
    ((Side::Banker, 1, 9), (BetSide::Banker, 67.0)),
    ((Side::Banker, 3, 9), (BetSide::Banker, 67.0)),
    ((Side::Banker, 8, 9), (BetSide::Banker, 67.0)),
    ((Side::Player, 5, 4), (BetSide::Banker, 67.0)),
    ((Side::Player, 9, 7), (BetSide::Player, 67.0)),
    ((Side::Banker, 7, 8), (BetSide::Banker, 65.0)),
    ((Side::Player, 9, 2), (BetSide::Player, 65.0)),
    ((Side::Banker, 0, 9), (BetSide::Banker, 64.0)),
    ((Side::Banker, 4, 9), (BetSide::Banker, 63.0)),
    ((Side::Banker, 1, 4), (BetSide::Player, 63.0)),
    ((Side::Banker, 2, 5), (BetSide::Player, 63.0)),
    ((Side::Player, 6, 2), (BetSide::Player, 63.0)),
    ((Side::Tie, 5, 5), (BetSide::Banker, 63.0)),
    ((Side::Banker, 4, 8), (BetSide::Banker, 62.0)),
    ((Side::Banker, 5, 8), (BetSide::Player, 60.0)),
    ((Side::Player, 6, 4), (BetSide::Banker, 60.0)),
    ((Side::Player, 9, 8), (BetSide::Player, 60.0)),
];

/// Looks up the last round's exact score combination.
pub struct ScoreCombo;

impl Detector for ScoreCombo {
    fn label(&self) -> &'static str {
        SCORE_COMBO_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        let last = ctx.short.last()?;
        let key = (last.side, last.score_player, last.score_banker);
        let (side, confidence) = COMBO_RULES
            .iter()
            .find(|(rule_key, _)| *rule_key == key)
            .map(|(_, outcome)| *outcome)?;

        Some(DetectorVote::new(
            SCORE_COMBO_NAME,
            side,
            confidence,
            format!(
                "{}{}-{}→{}",
                last.side.symbol(),
                last.score_player,
                last.score_banker,
                side.symbol()
            ),
        ))
    }
}

/// Length-3 outcome sequences. Checked before the length-2 table.
const SEQ3_RULES: &[(&str, BetSide, f64)] = &[
    ("TBP", BetSide::Banker, 76.0),
    ("PBT", BetSide::Banker, 71.0),
    ("PTB", BetSide::Banker, 64.0),
    ("BBP", BetSide::Player, 58.0),
    ("TPB", BetSide::Banker, 56.0),
    ("PPT", BetSide::Banker, 56.0),
];

/// Length-2 outcome sequences, the fallback when no length-3 rule hits.
const SEQ2_RULES: &[(&str, BetSide, f64)] = &[
    ("BT", BetSide::Banker, 64.0),
    ("TB", BetSide::Banker, 55.0),
];

/// Encodes the last two or three outcomes as a symbol string and looks
/// it up; a length-3 match takes priority over length-2.
pub struct Sequence;

impl Detector for Sequence {
    fn label(&self) -> &'static str {
        SEQUENCE_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        if ctx.short.len() < 2 {
            return None;
        }
        let start = ctx.short.len().saturating_sub(3);
        let symbols: String = ctx.short[start..].iter().map(|r| r.side.symbol()).collect();

        if symbols.len() >= 3 {
            if let Some((seq, side, confidence)) = SEQ3_RULES
                .iter()
                .find(|(seq, _, _)| *seq == symbols.as_str())
            {
                return Some(DetectorVote::new(
                    SEQUENCE_NAME,
                    *side,
                    *confidence,
                    format!("Seq[{seq}]→{}", side.symbol()),
                ));
            }
        }

        let tail = &symbols[symbols.len() - 2..];
        let (seq, side, confidence) = SEQ2_RULES.iter().find(|(seq, _, _)| *seq == tail)?;
        Some(DetectorVote::new(
            SEQUENCE_NAME,
            *side,
            *confidence,
            format!("Seq[{seq}]→{}", side.symbol()),
        ))
    }
}

/// Single-score triggers: the last round's winner and winning score.
///
/// Each arm is one validated trigger, ordered by accuracy.
pub struct ScoreColor;

impl Detector for ScoreColor {
    fn label(&self) -> &'static str {
        SCORE_COLOR_NAME
    }

    fn evaluate(&self, ctx: &DetectorContext<'_>) -> Option<DetectorVote> {
        let last = ctx.short.last()?;
        let ps = last.score_player;
        let bs = last.score_banker;

        let (side, confidence) = match last.side {
            Side::Player if ps == 5 => (BetSide::Banker, 62.0),
            Side::Player if ps == 4 => (BetSide::Banker, 61.0),
            Side::Banker if bs == 4 => (BetSide::Player, 60.0),
            Side::Player if ps == 2 => (BetSide::Banker, 58.0),
            Side::Player if ps == 6 => (BetSide::Player, 58.0),
            Side::Player if ps == 9 => (BetSide::Player, 57.0),
            Side::Banker if bs == 9 => (BetSide::Banker, 56.0),
            Side::Banker if bs == 6 => (BetSide::Player, 55.0),
            Side::Tie => (BetSide::Banker, 55.0),
            Side::Banker if bs == 7 => (BetSide::Player, 54.0),
            _ => return None,
        };

        let trigger = match last.side {
            Side::Tie => "Tie".to_string(),
            Side::Player => format!("P{ps}"),
            Side::Banker => format!("B{bs}"),
        };
        Some(DetectorVote::new(
            SCORE_COLOR_NAME,
            side,
            confidence,
            format!("{trigger}→{}", side.symbol()),
        ))
    }
}
