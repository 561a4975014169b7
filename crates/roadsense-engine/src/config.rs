//! Engine configuration.
//!
//! Every detector weight and confidence gate lives in one table keyed by
//! detector label, declared once and never recomputed per call. The
//! table (and the window/shoe parameters) can be overridden from a TOML
//! file; everything defaults to the values measured on the validation
//! round corpus.

use crate::canonical::{
    encode_f64, encode_string, encode_u32, CanonicalBytes, CONFIG_ENCODING_VERSION,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Admission policy for one detector class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorPolicy {
    /// Fixed per-class weight in the consensus sum.
    pub weight: f64,
    /// Minimum confidence for a vote to be admitted. 0 admits every
    /// vote the detector fires.
    pub min_confidence: f64,
}

impl DetectorPolicy {
    pub const fn new(weight: f64, min_confidence: f64) -> Self {
        Self {
            weight,
            min_confidence,
        }
    }
}

/// Policy applied to labels missing from the table.
const FALLBACK_POLICY: DetectorPolicy = DetectorPolicy::new(1.0, 55.0);

/// Default weight/gate table.
///
/// Weights rank the detector classes by their validated accuracy on the
/// validation round corpus (score combos 60–87%, memory-3 67.6%, sequences
/// 55–76%, score colors 55–62%, memory-4 58.8%, score diff 54.1%, ...).
/// Gates are the minimum confidence each class must clear to be
/// admitted; `score_diff` is admitted unfiltered (gate 0).
const DEFAULT_POLICIES: &[(&str, DetectorPolicy)] = &[
    ("score_combo", DetectorPolicy::new(3.5, 60.0)),
    ("memory_3", DetectorPolicy::new(3.0, 55.0)),
    ("sequence", DetectorPolicy::new(2.8, 55.0)),
    ("score_color", DetectorPolicy::new(2.5, 55.0)),
    ("four_roads", DetectorPolicy::new(2.2, 45.0)),
    ("memory_4", DetectorPolicy::new(2.0, 55.0)),
    ("dragon_tail", DetectorPolicy::new(1.8, 60.0)),
    ("streak_roads", DetectorPolicy::new(1.6, 55.0)),
    ("score_diff", DetectorPolicy::new(1.5, 0.0)),
    ("score_distribution", DetectorPolicy::new(1.5, 55.0)),
    ("chop", DetectorPolicy::new(1.5, 55.0)),
    ("clustering", DetectorPolicy::new(1.4, 52.0)),
    ("sector_dominance", DetectorPolicy::new(1.3, 55.0)),
    ("pair_pattern", DetectorPolicy::new(1.2, 55.0)),
    ("repeat_score", DetectorPolicy::new(1.2, 55.0)),
    ("tie_followup", DetectorPolicy::new(1.2, 55.0)),
    ("streak", DetectorPolicy::new(1.2, 55.0)),
    ("even_odd", DetectorPolicy::new(1.1, 55.0)),
    ("big_eye", DetectorPolicy::new(1.0, 55.0)),
];

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Short (per-shoe) window capacity.
    pub short_window: usize,
    /// Long (session) window capacity.
    pub long_window: usize,
    /// Cards in a full shoe (8 decks).
    pub shoe_cards: u32,
    /// Confidence of the last-resort fallback decision.
    pub fallback_confidence: f64,
    /// Flat bonus when all admitted weight agrees across ≥2 detectors.
    pub unanimity_bonus: f64,
    /// Per-label weight and admission gate.
    pub policies: BTreeMap<String, DetectorPolicy>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            short_window: 30,
            long_window: 500,
            shoe_cards: 416,
            fallback_confidence: 51.0,
            unanimity_bonus: 5.0,
            policies: DEFAULT_POLICIES
                .iter()
                .map(|(label, policy)| (label.to_string(), *policy))
                .collect(),
        }
    }
}

impl EngineConfig {
    /// Load from a TOML file. Missing fields keep their defaults.
    pub fn from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading engine config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing engine config {}", path.display()))?;
        Ok(config)
    }

    /// Policy for a detector label, falling back to weight 1.0 / gate 55
    /// for labels not in the table.
    pub fn policy(&self, label: &str) -> DetectorPolicy {
        self.policies.get(label).copied().unwrap_or(FALLBACK_POLICY)
    }
}

impl CanonicalBytes for EngineConfig {
    fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(CONFIG_ENCODING_VERSION);
        encode_u32(&mut buf, self.short_window as u32);
        encode_u32(&mut buf, self.long_window as u32);
        encode_u32(&mut buf, self.shoe_cards);
        encode_f64(&mut buf, self.fallback_confidence);
        encode_f64(&mut buf, self.unanimity_bonus);
        // BTreeMap iterates in label order, so the encoding is stable.
        encode_u32(&mut buf, self.policies.len() as u32);
        for (label, policy) in &self.policies {
            encode_string(&mut buf, label);
            encode_f64(&mut buf, policy.weight);
            encode_f64(&mut buf, policy.min_confidence);
        }
        buf
    }
}
