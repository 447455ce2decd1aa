//! One pipeline run: rank targets, build the compound catalog, persist both
//! tables together.

use anyhow::Context;
use chrono::Utc;
use kfdx_catalog::{CatalogAdvisory, CompoundCatalog};
use kfdx_ranker::summary::{score_range, summarise_pathways, write_pathway_summary, PathwaySummary};
use kfdx_ranker::table::{load_gene_signature, write_ranked_targets};
use kfdx_ranker::{RankedTarget, SeededUniform, StochasticSource, TargetRanker};
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::persist::OutputBatch;
use crate::report::RunManifest;

/// Result of a completed run.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub manifest: RunManifest,
    pub targets: Vec<RankedTarget>,
    pub catalog: CompoundCatalog,
    pub pathways: Vec<PathwaySummary>,
}

impl PipelineOutcome {
    pub fn advisories(&self) -> &[CatalogAdvisory] {
        &self.manifest.advisories
    }
}

/// Run with the stochastic source described by the config (seeded if a seed
/// is set, otherwise from a fresh recorded seed).
pub fn run(config: &Config) -> anyhow::Result<PipelineOutcome> {
    let mut source = SeededUniform::from_optional_seed(config.ranking.seed);
    run_with_source(config, &mut source)
}

/// Run with an explicit stochastic source.
///
/// All fatal errors surface before the output directory is touched; the
/// tables, the optional pathway summary and the manifest then replace the
/// previous run's artifacts together.
pub fn run_with_source(
    config: &Config,
    stochastic: &mut dyn StochasticSource,
) -> anyhow::Result<PipelineOutcome> {
    config.validate()?;

    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    info!(%run_id, seed = ?stochastic.seed(), "Starting prioritization run");

    // Target ranking
    let input = &config.input.gene_signature;
    let entries = load_gene_signature(input)
        .with_context(|| format!("Failed to load gene signature {}", input.display()))?;
    let ranker = TargetRanker::new(config.ranking.weights)?;
    let targets = ranker.rank(&entries, stochastic)?;

    // Compound catalog; independent of the scores, checked against the symbols only
    let catalog = CompoundCatalog::authored();
    let advisories = catalog.check_related_genes(targets.iter().map(|t| t.symbol()));
    info!(
        "Compound catalog: {} records, {} advisories",
        catalog.len(),
        advisories.len()
    );

    let pathways = summarise_pathways(&targets);
    let range = score_range(&targets);

    // Persist
    let out = &config.output;
    let mut batch = OutputBatch::new(&out.dir)?;
    batch.stage(&out.targets_file, |w| write_ranked_targets(w, &targets))?;
    batch.stage(&out.compounds_file, |w| catalog.write_csv(w))?;
    if out.write_pathway_summary {
        batch.stage(&out.pathway_summary_file, |w| write_pathway_summary(w, &pathways))?;
    }

    let mut artifacts = batch.targets();
    artifacts.push(out.dir.join(&out.manifest_file));
    let manifest = RunManifest {
        run_id,
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at,
        completed_at: Utc::now(),
        input: input.clone(),
        seed: stochastic.seed(),
        weights: *ranker.weights(),
        priority_targets: ranker.bonus_policy().symbols().map(str::to_string).collect(),
        priority_bonus: ranker.bonus_policy().amount(),
        target_count: targets.len(),
        compound_count: catalog.len(),
        score_range: range,
        artifacts,
        advisories,
    };
    batch.stage(&out.manifest_file, |w| Ok(serde_json::to_writer_pretty(w, &manifest)?))?;

    let written = batch.commit()?;
    for path in &written {
        info!("Saved: {}", path.display());
    }

    Ok(PipelineOutcome {
        manifest,
        targets,
        catalog,
        pathways,
    })
}
