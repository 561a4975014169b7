//! The prediction engine facade.
//!
//! Owns the history windows, the road set, the detector bank and the
//! consensus engine. Mutation is confined to `push`/`resync`;
//! `evaluate` and the accessors are read-only, so the single-writer
//! discipline of the caller is the only synchronization needed.

use crate::canonical::canonical_hash;
use crate::config::EngineConfig;
use crate::consensus::ConsensusEngine;
use crate::detectors::{DetectorBank, DetectorContext};
use crate::history::OutcomeHistory;
use crate::phase::ShoePhase;
use crate::road::{DerivedRoad, PrimaryRoad, RoadSet};
use roadsense_models::{ConsensusResult, DetectorVote, IngestError, RoundEvent};
use std::collections::BTreeMap;

/// Detection-and-consensus engine over a stream of round events.
pub struct PredictionEngine {
    config: EngineConfig,
    config_hash: String,
    history: OutcomeHistory,
    roads: RoadSet,
    bank: DetectorBank,
    consensus: ConsensusEngine,
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl PredictionEngine {
    pub fn new(config: EngineConfig) -> Self {
        let config_hash = canonical_hash(&config);
        let history = OutcomeHistory::new(config.short_window, config.long_window);
        let consensus = ConsensusEngine::new(config.clone());
        tracing::info!(config_hash = %config_hash, "prediction engine ready");
        Self {
            config,
            config_hash,
            history,
            roads: RoadSet::default(),
            bank: DetectorBank::standard(),
            consensus,
        }
    }

    /// Ingest one resolved round.
    ///
    /// Validates the event, appends it to both windows (clearing the
    /// short window first when the shoe changed) and rebuilds the roads
    /// from the short window. Must be serialized with respect to
    /// `evaluate` by the caller.
    pub fn push(&mut self, event: &RoundEvent) -> Result<(), IngestError> {
        let round = event.validate()?;
        self.history.push(round);
        self.roads = RoadSet::build(self.history.short());
        Ok(())
    }

    /// Rebuild both windows from an authoritative shoe history, e.g.
    /// after a reconnect. Returns how many rounds were replayed.
    pub fn resync(&mut self, events: &[RoundEvent]) -> Result<usize, IngestError> {
        // Validate everything first so a malformed batch cannot leave
        // the engine half-reset.
        let mut rounds = Vec::with_capacity(events.len());
        for event in events {
            rounds.push(event.validate()?);
        }

        self.history.reset();
        for round in rounds {
            self.history.push(round);
        }
        self.roads = RoadSet::build(self.history.short());
        tracing::info!(rounds = events.len(), "resynchronized from full shoe history");
        Ok(events.len())
    }

    /// Produce the consensus decision for the upcoming round.
    ///
    /// `None` signals insufficient history, never an error. Pure: calling
    /// it repeatedly against the same state yields identical results.
    pub fn evaluate(&self) -> Option<ConsensusResult> {
        let statuses = self.bank.evaluate_all(&self.context());
        self.consensus.decide(&statuses, self.history.short())
    }

    /// Every detector's current opinion, for audit and reporting.
    pub fn per_detector_status(&self) -> BTreeMap<&'static str, Option<DetectorVote>> {
        self.bank.evaluate_all(&self.context()).into_iter().collect()
    }

    pub fn primary_road(&self) -> &PrimaryRoad {
        &self.roads.primary
    }

    /// Derived road at offset 1, 2 or 3; `None` for any other offset.
    pub fn derived_road(&self, delta: usize) -> Option<&DerivedRoad> {
        self.roads.derived(delta)
    }

    pub fn shoe_phase(&self) -> ShoePhase {
        ShoePhase::classify(
            self.history.last().map(|r| r.cards_out),
            self.history.long().len(),
            self.config.shoe_cards,
        )
    }

    /// Rounds currently held in the (short, long) windows.
    pub fn rounds_seen(&self) -> (usize, usize) {
        (self.history.short().len(), self.history.long().len())
    }

    /// Deterministic hash of the active configuration.
    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn context(&self) -> DetectorContext<'_> {
        DetectorContext {
            short: self.history.short(),
            long: self.history.long(),
            roads: &self.roads,
            phase: self.shoe_phase(),
        }
    }
}
