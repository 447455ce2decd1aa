//! Weight vector for target prioritization scoring.

use serde::{Deserialize, Serialize};

/// The 5-component weight vector W. Weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    /// Normalised PubMed evidence volume
    #[serde(default = "default_pubmed_evidence")]
    pub pubmed_evidence: f64,
    /// Pathway importance
    #[serde(default = "default_pathway")]
    pub pathway: f64,
    /// Druggability class
    #[serde(default = "default_druggability")]
    pub druggability: f64,
    /// Disease-phase relevance
    #[serde(default = "default_phase")]
    pub phase: f64,
    /// Bounded stochastic term
    #[serde(default = "default_stochastic")]
    pub stochastic: f64,
}

/// Expert prior weights.
pub const DEFAULT_WEIGHTS: WeightVector = WeightVector {
    pubmed_evidence: 0.35,
    pathway:         0.25,
    druggability:    0.20,
    phase:           0.10,
    stochastic:      0.10,
};

/// Tolerance used when checking that the weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

fn default_pubmed_evidence() -> f64 { DEFAULT_WEIGHTS.pubmed_evidence }
fn default_pathway()         -> f64 { DEFAULT_WEIGHTS.pathway }
fn default_druggability()    -> f64 { DEFAULT_WEIGHTS.druggability }
fn default_phase()           -> f64 { DEFAULT_WEIGHTS.phase }
fn default_stochastic()      -> f64 { DEFAULT_WEIGHTS.stochastic }

impl Default for WeightVector {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl WeightVector {
    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Validate that all weights are non-negative and sum to ~1.0
    pub fn validate(&self) -> bool {
        self.as_array().iter().all(|w| w.is_finite() && *w >= 0.0)
            && (self.sum() - 1.0).abs() < WEIGHT_SUM_TOLERANCE
    }

    /// Convert to array for iteration, in the same order as
    /// `ComponentScores::as_array`.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.pubmed_evidence,
            self.pathway,
            self.druggability,
            self.phase,
            self.stochastic,
        ]
    }
}
