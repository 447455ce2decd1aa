//! Composite target score computation and ranking.
//!
//! S(g) = Σ(w_i × n_i) + B(g)
//!
//! where n = (PubMed_Norm, Pathway_Score, Drug_Score, Phase_Score,
//! Stochastic_Score) and B is the priority-target bonus.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use kfdx_common::{GeneSignatureEntry, KfdxError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::normalise::max_normalise;
use crate::stochastic::StochasticSource;
use crate::weights::WeightVector;

/// Normalised component scores (all in [0, 1]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub pubmed_norm: f64,
    pub pathway: f64,
    pub druggability: f64,
    pub phase: f64,
    pub stochastic: f64,
}

impl ComponentScores {
    /// Look up the categorical sub-scores for `entry`.
    pub fn for_entry(entry: &GeneSignatureEntry, pubmed_norm: f64, stochastic: f64) -> Self {
        Self {
            pubmed_norm,
            pathway: entry.pathway.weight(),
            druggability: entry.druggability.weight(),
            phase: entry.phase_relevance.weight(),
            stochastic,
        }
    }

    pub fn as_array(&self) -> [f64; 5] {
        [
            self.pubmed_norm,
            self.pathway,
            self.druggability,
            self.phase,
            self.stochastic,
        ]
    }
}

/// Weighted sum of the components, before any override.
pub fn compute_base_score(components: &ComponentScores, weights: &WeightVector) -> f64 {
    components
        .as_array()
        .iter()
        .zip(weights.as_array().iter())
        .map(|(n, w)| n * w)
        .sum()
}

// ── Priority-target bonus ───────────────────────────────────────────────────

/// Known high-severity mediators of vascular leak and coagulopathy.
pub const PRIORITY_TARGETS: [&str; 6] = ["ANGPT2", "TNF", "IL6", "F3", "SERPINE1", "THBD"];

/// Flat bonus added to priority targets.
pub const PRIORITY_BONUS: f64 = 0.05;

/// Named exception to the weighted model: listed symbols receive a flat
/// bonus after the weighted sum. Not capped, so a bonused score may exceed 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct BonusPolicy {
    symbols: BTreeSet<String>,
    amount: f64,
}

impl Default for BonusPolicy {
    fn default() -> Self {
        Self {
            symbols: PRIORITY_TARGETS.iter().map(|s| s.to_string()).collect(),
            amount: PRIORITY_BONUS,
        }
    }
}

impl BonusPolicy {
    /// A policy that never applies. Used to compare bonused and un-bonused scores.
    pub fn disabled() -> Self {
        Self {
            symbols: BTreeSet::new(),
            amount: 0.0,
        }
    }

    /// Bonus for `symbol`, if it is on the allow-list.
    pub fn bonus_for(&self, symbol: &str) -> Option<f64> {
        self.symbols.contains(symbol).then_some(self.amount)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

// ── Ranked output ───────────────────────────────────────────────────────────

/// Final scored and ranked target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTarget {
    pub entry: GeneSignatureEntry,
    pub components: ComponentScores,
    /// Weighted sum before the bonus override.
    pub base_score: f64,
    /// Bonus applied by the priority-target policy, 0.0 if none.
    pub bonus: f64,
    pub composite_score: f64,
    /// 1-based position in the ranking.
    pub rank: usize,
}

impl RankedTarget {
    pub fn symbol(&self) -> &str {
        &self.entry.symbol
    }

    pub fn bonus_applied(&self) -> bool {
        self.bonus > 0.0
    }
}

/// Check the structural preconditions of a gene signature: non-empty with
/// unique symbols.
pub fn validate_entries(entries: &[GeneSignatureEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(KfdxError::EmptyInput);
    }
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if !seen.insert(entry.symbol.as_str()) {
            return Err(KfdxError::DuplicateSymbol(entry.symbol.clone()));
        }
    }
    Ok(())
}

/// Descending by composite score; exact ties resolved by symbol ascending.
fn ranking_order(a: &RankedTarget, b: &RankedTarget) -> Ordering {
    b.composite_score
        .total_cmp(&a.composite_score)
        .then_with(|| a.entry.symbol.cmp(&b.entry.symbol))
}

/// Scores and ranks a full gene signature.
#[derive(Debug, Clone)]
pub struct TargetRanker {
    weights: WeightVector,
    bonus: BonusPolicy,
}

impl Default for TargetRanker {
    fn default() -> Self {
        Self {
            weights: WeightVector::default(),
            bonus: BonusPolicy::default(),
        }
    }
}

impl TargetRanker {
    /// Build a ranker; the weight vector must sum to 1.0.
    pub fn new(weights: WeightVector) -> Result<Self> {
        if !weights.validate() {
            return Err(KfdxError::Config(format!(
                "scoring weights must be non-negative and sum to 1.0 (got {:.6})",
                weights.sum()
            )));
        }
        Ok(Self {
            weights,
            bonus: BonusPolicy::default(),
        })
    }

    pub fn with_bonus_policy(mut self, bonus: BonusPolicy) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn bonus_policy(&self) -> &BonusPolicy {
        &self.bonus
    }

    /// Score every entry and return them in rank order.
    ///
    /// One stochastic draw is taken per entry, in input order, so a seeded
    /// source reproduces the ranking bit for bit. Fails without producing
    /// any ranking on empty input, duplicate symbols or all-zero evidence.
    pub fn rank(
        &self,
        entries: &[GeneSignatureEntry],
        stochastic: &mut dyn StochasticSource,
    ) -> Result<Vec<RankedTarget>> {
        validate_entries(entries)?;

        let counts: Vec<u64> = entries.iter().map(|e| e.pubmed_count).collect();
        let pubmed_norm = max_normalise(&counts)?;

        let mut ranked: Vec<RankedTarget> = entries
            .iter()
            .zip(pubmed_norm)
            .map(|(entry, norm)| {
                let components = ComponentScores::for_entry(entry, norm, stochastic.draw());
                let base_score = compute_base_score(&components, &self.weights);
                let bonus = self.bonus.bonus_for(&entry.symbol).unwrap_or(0.0);
                if bonus > 0.0 {
                    debug!(symbol = %entry.symbol, bonus, "priority-target bonus applied");
                }
                RankedTarget {
                    entry: entry.clone(),
                    components,
                    base_score,
                    bonus,
                    composite_score: base_score + bonus,
                    rank: 0,
                }
            })
            .collect();

        ranked.sort_by(ranking_order);
        for (i, target) in ranked.iter_mut().enumerate() {
            target.rank = i + 1;
        }

        info!("Ranked {} targets", ranked.len());
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stochastic::{FixedStochastic, SeededUniform, STOCHASTIC_MAX, STOCHASTIC_MIN};
    use kfdx_common::{Druggability, Pathway, PhaseRelevance};
    use kfdx_test_utils::entry;

    fn f3_table() -> Vec<GeneSignatureEntry> {
        vec![
            entry("F3", Pathway::Coagulation, PhaseRelevance::Hemorrhagic, 380, Druggability::High),
            entry("VEGFA", Pathway::Endothelial, PhaseRelevance::Hemorrhagic, 1250, Druggability::High),
        ]
    }

    #[test]
    fn test_f3_worked_example() {
        let ranker = TargetRanker::default();
        for stochastic in [STOCHASTIC_MIN, STOCHASTIC_MAX] {
            let ranked = ranker.rank(&f3_table(), &mut FixedStochastic(stochastic)).unwrap();
            let f3 = ranked.iter().find(|t| t.symbol() == "F3").unwrap();
            assert!((f3.components.pubmed_norm - 0.304).abs() < 1e-9);
            assert_eq!(f3.components.pathway, 0.95);
            assert_eq!(f3.components.phase, 1.0);
            assert_eq!(f3.components.druggability, 0.9);
            assert_eq!(f3.bonus, PRIORITY_BONUS);

            // 0.35*0.304 + 0.25*0.95 + 0.20*0.9 + 0.10*1.0 = 0.6239
            let deterministic = f3.base_score - 0.10 * stochastic;
            assert!((deterministic - 0.6239).abs() < 1e-9, "{deterministic}");
            assert!((0.609..=0.629).contains(&deterministic));
            assert!(
                f3.composite_score >= 0.7139 - 1e-9 && f3.composite_score <= 0.7339 + 1e-9,
                "F3 composite out of range: {}",
                f3.composite_score
            );
        }
    }

    #[test]
    fn test_bonus_strictly_raises_score() {
        let table = vec![entry(
            "ANGPT2",
            Pathway::Endothelial,
            PhaseRelevance::Hemorrhagic,
            900,
            Druggability::High,
        )];
        let with_bonus = TargetRanker::default()
            .rank(&table, &mut FixedStochastic::midpoint())
            .unwrap();
        let without_bonus = TargetRanker::default()
            .with_bonus_policy(BonusPolicy::disabled())
            .rank(&table, &mut FixedStochastic::midpoint())
            .unwrap();
        assert!(with_bonus[0].bonus_applied());
        assert!(!without_bonus[0].bonus_applied());
        assert!(with_bonus[0].composite_score > without_bonus[0].composite_score);
    }

    #[test]
    fn test_bonus_is_uncapped() {
        let components = ComponentScores {
            pubmed_norm: 1.0,
            pathway: 1.0,
            druggability: 1.0,
            phase: 1.0,
            stochastic: 1.0,
        };
        let base = compute_base_score(&components, &WeightVector::default());
        assert!((base - 1.0).abs() < 1e-9);
        let bonus = BonusPolicy::default().bonus_for("TNF").unwrap();
        assert!(base + bonus > 1.0);
    }

    #[test]
    fn test_bonus_policy_allow_list() {
        let policy = BonusPolicy::default();
        let symbols: Vec<&str> = policy.symbols().collect();
        assert_eq!(symbols, vec!["ANGPT2", "F3", "IL6", "SERPINE1", "THBD", "TNF"]);
        assert_eq!(policy.bonus_for("IL6"), Some(0.05));
        assert_eq!(policy.bonus_for("IL1B"), None);
        assert_eq!(policy.bonus_for("il6"), None);
    }

    #[test]
    fn test_ranks_form_permutation() {
        let table = kfdx_test_utils::kfd_signature();
        let ranked = TargetRanker::default()
            .rank(&table, &mut SeededUniform::new(11))
            .unwrap();
        assert_eq!(ranked.len(), table.len());
        let ranks: Vec<usize> = ranked.iter().map(|t| t.rank).collect();
        assert_eq!(ranks, (1..=table.len()).collect::<Vec<_>>());
        for pair in ranked.windows(2) {
            assert!(pair[0].composite_score >= pair[1].composite_score);
        }
    }

    #[test]
    fn test_exact_ties_break_by_symbol() {
        let table = vec![
            entry("ZZZ1", Pathway::Cytokine, PhaseRelevance::Febrile, 100, Druggability::Low),
            entry("AAA1", Pathway::Cytokine, PhaseRelevance::Febrile, 100, Druggability::Low),
            entry("MMM1", Pathway::Cytokine, PhaseRelevance::Febrile, 100, Druggability::Low),
        ];
        let ranked = TargetRanker::default()
            .rank(&table, &mut FixedStochastic(0.45))
            .unwrap();
        let order: Vec<&str> = ranked.iter().map(|t| t.symbol()).collect();
        assert_eq!(order, vec!["AAA1", "MMM1", "ZZZ1"]);
    }

    #[test]
    fn test_identical_entries_differ_only_by_stochastic_spread() {
        let table = vec![
            entry("GENE1", Pathway::Platelet, PhaseRelevance::Both, 300, Druggability::Moderate),
            entry("GENE2", Pathway::Platelet, PhaseRelevance::Both, 300, Druggability::Moderate),
        ];
        for seed in 0..50 {
            let ranked = TargetRanker::default()
                .rank(&table, &mut SeededUniform::new(seed))
                .unwrap();
            let spread = (ranked[0].composite_score - ranked[1].composite_score).abs();
            let max_spread =
                crate::weights::DEFAULT_WEIGHTS.stochastic * (STOCHASTIC_MAX - STOCHASTIC_MIN);
            assert!(spread <= max_spread + 1e-12, "seed {seed}: spread {spread}");
        }
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = TargetRanker::default()
            .rank(&[], &mut FixedStochastic::midpoint())
            .unwrap_err();
        assert!(matches!(err, KfdxError::EmptyInput));
    }

    #[test]
    fn test_all_zero_evidence_rejected() {
        let table = vec![
            entry("A", Pathway::Cytokine, PhaseRelevance::Febrile, 0, Druggability::Low),
            entry("B", Pathway::Oxidative, PhaseRelevance::Both, 0, Druggability::High),
        ];
        let err = TargetRanker::default()
            .rank(&table, &mut FixedStochastic::midpoint())
            .unwrap_err();
        assert!(matches!(err, KfdxError::DegenerateEvidence));
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let table = vec![
            entry("TNF", Pathway::Cytokine, PhaseRelevance::Both, 10, Druggability::High),
            entry("TNF", Pathway::Cytokine, PhaseRelevance::Both, 20, Druggability::High),
        ];
        let err = TargetRanker::default()
            .rank(&table, &mut FixedStochastic::midpoint())
            .unwrap_err();
        assert!(matches!(err, KfdxError::DuplicateSymbol(ref s) if s == "TNF"));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let weights = WeightVector {
            pubmed_evidence: 0.50,
            ..WeightVector::default()
        };
        assert!(matches!(TargetRanker::new(weights), Err(KfdxError::Config(_))));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let table = kfdx_test_utils::kfd_signature();
        let ranker = TargetRanker::default();
        let a = ranker.rank(&table, &mut SeededUniform::new(2024)).unwrap();
        let b = ranker.rank(&table, &mut SeededUniform::new(2024)).unwrap();
        assert_eq!(a, b);
    }
}
