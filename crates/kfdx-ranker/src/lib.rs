//! kfdx-ranker — Host target prioritization scoring engine.
//!
//! Loads the curated gene signature, scores every target from five weighted
//! sub-scores plus the priority-target bonus, and emits the ranked table.

pub mod scorer;
pub mod normalise;
pub mod weights;
pub mod stochastic;
pub mod table;
pub mod summary;

pub use scorer::{BonusPolicy, RankedTarget, TargetRanker};
pub use stochastic::{FixedStochastic, SeededUniform, StochasticSource};
pub use weights::WeightVector;
