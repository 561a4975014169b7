//! Road structures.
//!
//! The primary road is a run-length encoding of non-tie outcomes into
//! same-side columns; ties attach as overlay counters and close the
//! active column. The three derived roads (big eye at offset 1, small at
//! offset 2, cockroach at offset 3) compare primary column shapes at a
//! fixed offset and produce red/blue regularity sequences.
//!
//! All roads are rebuilt from scratch on every update. Windows are small,
//! so a full rebuild keeps the code simple and trivially idempotent.

use roadsense_models::{BetSide, Round, Side};
use serde::{Deserialize, Serialize};

/// One cell of the primary road: a non-tie outcome plus the number of
/// ties that landed on it as overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadCell {
    pub side: BetSide,
    pub tie_overlay: u8,
}

/// A run of same-side cells. Adjacent columns only share a side when a
/// tie closed the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadColumn {
    cells: Vec<RoadCell>,
}

impl RoadColumn {
    fn open(side: BetSide) -> Self {
        Self {
            cells: vec![RoadCell {
                side,
                tie_overlay: 0,
            }],
        }
    }

    fn extend(&mut self, side: BetSide) {
        debug_assert_eq!(side, self.side());
        self.cells.push(RoadCell {
            side,
            tie_overlay: 0,
        });
    }

    fn overlay_tie(&mut self) {
        if let Some(cell) = self.cells.last_mut() {
            cell.tie_overlay = cell.tie_overlay.saturating_add(1);
        }
    }

    /// Side of every cell in this column.
    pub fn side(&self) -> BetSide {
        // A column is never constructed empty.
        self.cells[0].side
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[RoadCell] {
        &self.cells
    }
}

/// The primary road: ordered columns of run-length-encoded outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryRoad {
    columns: Vec<RoadColumn>,
}

impl PrimaryRoad {
    /// Rebuild from a chronological round window.
    ///
    /// Column boundary rule: a non-tie round opens a new column when its
    /// side differs from the previous non-tie side, or when one or more
    /// ties intervened since the last non-tie round. A tie increments the
    /// overlay counter of the last cell of the active column; ties before
    /// any column exists are dropped.
    pub fn build(rounds: &[Round]) -> Self {
        let mut columns: Vec<RoadColumn> = Vec::new();
        let mut tie_pending = false;

        for round in rounds {
            let Some(side) = round.side.bet_side() else {
                debug_assert_eq!(round.side, Side::Tie);
                if let Some(column) = columns.last_mut() {
                    column.overlay_tie();
                    tie_pending = true;
                }
                continue;
            };

            let start_new = match columns.last() {
                Some(column) => tie_pending || column.side() != side,
                None => true,
            };
            if start_new {
                columns.push(RoadColumn::open(side));
            } else if let Some(column) = columns.last_mut() {
                column.extend(side);
            }
            tie_pending = false;
        }

        Self { columns }
    }

    pub fn columns(&self) -> &[RoadColumn] {
        &self.columns
    }

    pub fn last_column(&self) -> Option<&RoadColumn> {
        self.columns.last()
    }

    /// Side of the most recent cell, if any column exists.
    pub fn last_side(&self) -> Option<BetSide> {
        self.columns.last().map(|c| c.side())
    }

    /// Derive the red/blue regularity road at the given offset.
    ///
    /// For a column-start cell at column `k`, compare the lengths of
    /// columns `k-1` and `k-1-delta`: equal ⇒ red, unequal ⇒ blue. For an
    /// in-column cell at row `m`, check whether column `k-delta` has a
    /// cell at row `m`: present ⇒ red, absent ⇒ blue. Cells whose
    /// comparison is undefined (not enough columns yet) are skipped, so a
    /// primary road with fewer than `delta + 1` columns derives an empty
    /// road — "no signal", never a default color.
    pub fn derive(&self, delta: usize) -> DerivedRoad {
        let columns = &self.columns;
        if columns.len() <= delta {
            return DerivedRoad::default();
        }

        let mut runs: Vec<DerivedColumn> = Vec::new();
        for k in 0..columns.len() {
            for m in 0..columns[k].len() {
                let is_column_start = m == 0;
                if is_column_start {
                    if k < delta + 1 {
                        continue;
                    }
                } else if k < delta {
                    continue;
                }

                let color = if is_column_start {
                    if columns[k - 1].len() == columns[k - 1 - delta].len() {
                        RoadColor::Red
                    } else {
                        RoadColor::Blue
                    }
                } else if m < columns[k - delta].len() {
                    RoadColor::Red
                } else {
                    RoadColor::Blue
                };

                match runs.last_mut() {
                    Some(run) if run.color == color => run.len += 1,
                    _ => runs.push(DerivedColumn { color, len: 1 }),
                }
            }
        }

        DerivedRoad { columns: runs }
    }
}

/// Cell color of a derived road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoadColor {
    Red,
    Blue,
}

/// A run of same-colored derived cells. No overlay concept here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedColumn {
    pub color: RoadColor,
    pub len: usize,
}

/// A derived road: run-length encoded red/blue cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedRoad {
    columns: Vec<DerivedColumn>,
}

impl DerivedRoad {
    #[cfg(test)]
    pub(crate) fn from_columns(columns: Vec<DerivedColumn>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[DerivedColumn] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Color of the most recent cell, if any.
    pub fn last_color(&self) -> Option<RoadColor> {
        self.columns.last().map(|c| c.color)
    }
}

/// The primary road plus its three derived roads, recomputed together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadSet {
    pub primary: PrimaryRoad,
    pub big_eye: DerivedRoad,
    pub small: DerivedRoad,
    pub cockroach: DerivedRoad,
}

impl RoadSet {
    pub fn build(rounds: &[Round]) -> Self {
        let primary = PrimaryRoad::build(rounds);
        let big_eye = primary.derive(1);
        let small = primary.derive(2);
        let cockroach = primary.derive(3);
        Self {
            primary,
            big_eye,
            small,
            cockroach,
        }
    }

    pub fn derived(&self, delta: usize) -> Option<&DerivedRoad> {
        match delta {
            1 => Some(&self.big_eye),
            2 => Some(&self.small),
            3 => Some(&self.cockroach),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(side: Side) -> Round {
        Round {
            side,
            score_player: 0,
            score_banker: 0,
            pair_player: false,
            pair_banker: false,
            is_natural: false,
            cards_out: 0,
        }
    }

    fn rounds(outcomes: &[Side]) -> Vec<Round> {
        outcomes.iter().copied().map(round).collect()
    }

    use Side::{Banker as B, Player as P, Tie as T};

    #[test]
    fn runs_group_into_columns() {
        let road = PrimaryRoad::build(&rounds(&[B, B, P, P, P, B]));
        let lens: Vec<usize> = road.columns().iter().map(|c| c.len()).collect();
        assert_eq!(lens, vec![2, 3, 1]);
        assert_eq!(road.columns()[0].side(), BetSide::Banker);
        assert_eq!(road.columns()[1].side(), BetSide::Player);
    }

    #[test]
    fn tie_overlays_and_closes_the_column() {
        // [B,B,P,P,P,B,T,B] → [BB, PPP, B(+1 tie), B]: the tie attaches
        // to the third column's cell and the trailing B opens a fourth
        // column even though the side repeats.
        let road = PrimaryRoad::build(&rounds(&[B, B, P, P, P, B, T, B]));
        let lens: Vec<usize> = road.columns().iter().map(|c| c.len()).collect();
        assert_eq!(lens, vec![2, 3, 1, 1]);
        assert_eq!(road.columns()[2].cells()[0].tie_overlay, 1);
        assert_eq!(road.columns()[3].cells()[0].tie_overlay, 0);
        assert_eq!(road.columns()[2].side(), BetSide::Banker);
        assert_eq!(road.columns()[3].side(), BetSide::Banker);
    }

    #[test]
    fn leading_ties_are_dropped() {
        let road = PrimaryRoad::build(&rounds(&[T, T, B, P]));
        assert_eq!(road.columns().len(), 2);
        assert_eq!(road.columns()[0].cells()[0].tie_overlay, 0);
    }

    #[test]
    fn consecutive_ties_stack_on_one_cell() {
        let road = PrimaryRoad::build(&rounds(&[B, T, T, P]));
        assert_eq!(road.columns()[0].cells()[0].tie_overlay, 2);
        assert_eq!(road.columns().len(), 2);
    }

    #[test]
    fn build_is_idempotent() {
        let window = rounds(&[B, B, P, T, P, B, B, B, P]);
        assert_eq!(PrimaryRoad::build(&window), PrimaryRoad::build(&window));
    }

    #[test]
    fn derived_road_empty_below_minimum_columns() {
        let road = PrimaryRoad::build(&rounds(&[B, B, P]));
        // two columns: offset 2 and 3 are undefined everywhere
        assert!(road.derive(2).is_empty());
        assert!(road.derive(3).is_empty());
    }

    #[test]
    fn derived_road_compares_column_shapes() {
        // Columns: [BB, PP, B]. Offset 1 defines two cells: column 1
        // row 1 (column 0 has a row 1 ⇒ red) and column 2 row 0
        // (len(col 1) == len(col 0) ⇒ red). Same color, one run.
        let road = PrimaryRoad::build(&rounds(&[B, B, P, P, B]));
        let derived = road.derive(1);
        assert_eq!(derived.columns().len(), 1);
        assert_eq!(derived.columns()[0].color, RoadColor::Red);
        assert_eq!(derived.columns()[0].len, 2);
    }

    #[test]
    fn derived_in_column_cell_checks_offset_depth() {
        // Columns: [B, P, BB]. Offset 1: col 1 row 0 ⇒ len(col 0) vs
        // undefined? k=1 < delta+1=2, skipped. col 2 row 0: len(col 1)==
        // len(col 0) ⇒ red. col 2 row 1: col 1 has no row 1 ⇒ blue.
        let road = PrimaryRoad::build(&rounds(&[B, P, B, B]));
        let derived = road.derive(1);
        let cells: Vec<(RoadColor, usize)> =
            derived.columns().iter().map(|c| (c.color, c.len)).collect();
        assert_eq!(
            cells,
            vec![(RoadColor::Red, 1), (RoadColor::Blue, 1)]
        );
    }

    #[test]
    fn derive_is_pure_in_the_primary_road() {
        let road = PrimaryRoad::build(&rounds(&[B, B, P, P, B, P, B, B, P]));
        assert_eq!(road.derive(1), road.derive(1));
        assert_eq!(road.derive(3), road.derive(3));
    }

    #[test]
    fn road_set_roundtrips_through_json() {
        let set = RoadSet::build(&rounds(&[B, B, P, T, P, B, B, B, P]));
        let json = serde_json::to_string(&set).unwrap();
        let back: RoadSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn road_set_builds_all_offsets_together() {
        let window = rounds(&[B, B, P, P, B, P, B, B, P, P, B]);
        let set = RoadSet::build(&window);
        assert_eq!(set.derived(1), Some(&set.primary.derive(1)));
        assert_eq!(set.derived(2), Some(&set.primary.derive(2)));
        assert_eq!(set.derived(3), Some(&set.primary.derive(3)));
        assert_eq!(set.derived(4), None);
    }
}
