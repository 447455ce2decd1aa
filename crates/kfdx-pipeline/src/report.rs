//! Run manifest and console summary.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use kfdx_catalog::stats::{evidence_breakdown, max_potency_by_gene};
use kfdx_catalog::{CatalogAdvisory, CompoundCatalog};
use kfdx_ranker::summary::{PathwaySummary, ScoreRange};
use kfdx_ranker::{RankedTarget, WeightVector};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Everything needed to audit or replay a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: Uuid,
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub input: PathBuf,
    /// Seed of the stochastic term; `None` only for sources without one.
    pub seed: Option<u64>,
    pub weights: WeightVector,
    pub priority_targets: Vec<String>,
    pub priority_bonus: f64,
    pub target_count: usize,
    pub compound_count: usize,
    pub score_range: Option<ScoreRange>,
    pub artifacts: Vec<PathBuf>,
    pub advisories: Vec<CatalogAdvisory>,
}

pub fn log_top_targets(targets: &[RankedTarget], n: usize) {
    info!("--- TOP {} TARGETS ---", n.min(targets.len()));
    for t in targets.iter().take(n) {
        info!(
            "{:>3}  {:<10} {:<16} {:.3}",
            t.rank,
            t.symbol(),
            t.entry.pathway,
            t.composite_score
        );
    }
}

pub fn log_top_compounds(catalog: &CompoundCatalog, n: usize) {
    info!("--- TOP {} COMPOUNDS ---", n.min(catalog.len()));
    for c in catalog.records().iter().take(n) {
        info!(
            "{:<22} {:<16} {:>4.1}  {}",
            c.drug, c.target, c.pchembl, c.evidence
        );
    }
}

pub fn log_pathway_summary(pathways: &[PathwaySummary]) {
    info!("--- PATHWAYS ---");
    for p in pathways {
        match p.std_score {
            Some(std) => info!("{:<16} n={:<3} mean={:.3} sd={:.3}", p.pathway, p.count, p.mean_score, std),
            None => info!("{:<16} n={:<3} mean={:.3}", p.pathway, p.count, p.mean_score),
        }
    }
}

/// Evidence-label frequencies and the strongest compound per related gene.
pub fn log_catalog_stats(catalog: &CompoundCatalog, n: usize) {
    info!("--- COMPOUND EVIDENCE ---");
    for (label, count) in evidence_breakdown(catalog) {
        info!("{:<26} {}", label, count);
    }
    info!("--- MAX POTENCY BY GENE ---");
    for (gene, pchembl) in max_potency_by_gene(catalog).into_iter().take(n) {
        info!("{:<10} {:.1}", gene, pchembl);
    }
}
