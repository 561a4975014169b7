//! # Roadsense Engine
//!
//! Detection-and-consensus engine for a three-outcome two-hand
//! comparison game. The engine observes resolved rounds, maintains two
//! bounded history windows and the derived road structures, evaluates a
//! bank of independent statistical pattern detectors, and reduces their
//! votes to one recommended side with a calibrated confidence.
//!
//! ## Pipeline
//!
//! One-directional per round:
//!
//! 1. [`PredictionEngine::push`] validates and appends the round
//!    (clearing the short window on a shoe change) and rebuilds the
//!    roads.
//! 2. [`PredictionEngine::evaluate`] classifies the shoe phase, runs
//!    every detector against the windows and roads, and reduces the
//!    admitted votes under the configured weight table.
//!
//! ## Contract
//!
//! Identical input history ⇒ identical decision. The decision side is
//! always Banker or Player (ties are input signals only), and every
//! confidence lies in `[0, 95]` on the 0–100 scale.
//!
//! ## Usage
//! ```ignore
//! use roadsense_engine::PredictionEngine;
//!
//! let mut engine = PredictionEngine::default();
//! for event in feed {
//!     engine.push(&event)?;
//!     if let Some(decision) = engine.evaluate() {
//!         println!("{} @ {:.0}%", decision.side, decision.confidence);
//!     }
//! }
//! ```

pub mod canonical;
pub mod config;
pub mod consensus;
pub mod detectors;
pub mod engine;
pub mod history;
pub mod phase;
pub mod road;

pub use canonical::{canonical_hash, CanonicalBytes, CONFIG_ENCODING_VERSION};
pub use config::{DetectorPolicy, EngineConfig};
pub use consensus::{ConsensusEngine, LAST_RESULT_NAME};
pub use detectors::{Detector, DetectorBank, DetectorContext};
pub use engine::PredictionEngine;
pub use history::{HistoryWindow, OutcomeHistory};
pub use phase::ShoePhase;
pub use road::{DerivedRoad, PrimaryRoad, RoadCell, RoadColor, RoadColumn, RoadSet};

// Re-export the shared value types for convenience.
pub use roadsense_models::{
    BetSide, ConsensusResult, DetectorVote, IngestError, Round, RoundEvent, Side, CONFIDENCE_CAP,
};
