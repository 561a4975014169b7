//! Roadsense Models
//!
//! Shared value types for the roadsense detection-and-consensus engine.
//!
//! ## Key Principles
//!
//! 1. **Closed outcome domain**: round outcomes are the three-variant
//!    [`Side`] enum; recommendations are the two-variant [`BetSide`] enum.
//!    A tie can never appear as a vote or decision because the type does
//!    not admit it.
//!
//! 2. **Validated ingestion boundary**: external feeds hand over
//!    [`RoundEvent`]s, which are checked once ([`RoundEvent::validate`])
//!    and converted into immutable [`Round`] values. Everything past the
//!    boundary assumes validated input.
//!
//! 3. **One confidence scale**: 0–100, capped at [`CONFIDENCE_CAP`].
//!    No 0–1 probabilities cross any detector boundary.

pub mod outcome;
pub mod round;
pub mod vote;

pub use outcome::{BetSide, Side};
pub use round::{IngestError, Round, RoundEvent, MAX_SCORE};
pub use vote::{ConsensusResult, DetectorVote, CONFIDENCE_CAP};
