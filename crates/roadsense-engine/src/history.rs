//! Bounded round history.
//!
//! One ring-buffer type with a single, auditable reset rule: the *short*
//! window covers the current shoe (cleared when `cards_out` goes
//! backwards), the *long* window covers the whole session (cleared only
//! by explicit resync).

use roadsense_models::Round;

/// Fixed-capacity, chronological round window.
///
/// Append-only from the caller's perspective; the oldest entry is
/// silently evicted once the capacity is reached. Insertion order is
/// never reordered.
#[derive(Debug, Clone)]
pub struct HistoryWindow {
    rounds: Vec<Round>,
    capacity: usize,
}

impl HistoryWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            rounds: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, round: Round) {
        self.rounds.push(round);
        if self.rounds.len() > self.capacity {
            self.rounds.remove(0);
        }
    }

    pub fn clear(&mut self) {
        self.rounds.clear();
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Immutable chronological view (oldest first).
    pub fn as_slice(&self) -> &[Round] {
        &self.rounds
    }

    pub fn last(&self) -> Option<&Round> {
        self.rounds.last()
    }
}

/// The two windows every evaluation reads from.
#[derive(Debug, Clone)]
pub struct OutcomeHistory {
    short: HistoryWindow,
    long: HistoryWindow,
}

impl OutcomeHistory {
    pub fn new(short_capacity: usize, long_capacity: usize) -> Self {
        Self {
            short: HistoryWindow::new(short_capacity),
            long: HistoryWindow::new(long_capacity),
        }
    }

    /// Append a round to both windows.
    ///
    /// If `cards_out` decreased relative to the previous round in the
    /// short window, a new shoe has started: the short window is cleared
    /// *before* the append. Returns `true` when that reset fired.
    pub fn push(&mut self, round: Round) -> bool {
        let new_shoe = self
            .short
            .last()
            .map(|prev| round.cards_out < prev.cards_out)
            .unwrap_or(false);

        if new_shoe {
            tracing::info!(
                previous_cards_out = self.short.last().map(|r| r.cards_out),
                cards_out = round.cards_out,
                "shoe change detected, clearing short window"
            );
            self.short.clear();
        }

        self.short.push(round);
        self.long.push(round);
        new_shoe
    }

    /// Clear both windows (full resynchronization only).
    pub fn reset(&mut self) {
        self.short.clear();
        self.long.clear();
    }

    pub fn short(&self) -> &[Round] {
        self.short.as_slice()
    }

    pub fn long(&self) -> &[Round] {
        self.long.as_slice()
    }

    pub fn last(&self) -> Option<&Round> {
        self.long.last()
    }
}
