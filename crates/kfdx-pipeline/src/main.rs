//! kfdx — Host-directed therapy target prioritization.
//! Entry point for the pipeline binary.

use clap::Parser;
use kfdx_common::KfdxError;
use kfdx_pipeline::cli::Cli;
use kfdx_pipeline::{report, Config};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kfdx=debug,info")),
        )
        .init();

    let cli = Cli::parse();
    info!("kfdx {} starting", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    let outcome = match kfdx_pipeline::run(&config) {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(kfdx) = e.downcast_ref::<KfdxError>() {
                error!(class = ?kfdx.class(), "Run aborted, no artifacts written: {e:#}");
            } else {
                error!("Run aborted, no artifacts written: {e:#}");
            }
            return Err(e);
        }
    };

    let top_n = config.output.top_n;
    report::log_top_targets(&outcome.targets, top_n);
    report::log_top_compounds(&outcome.catalog, top_n);
    report::log_catalog_stats(&outcome.catalog, top_n);
    report::log_pathway_summary(&outcome.pathways);

    if let Some(range) = outcome.manifest.score_range {
        info!("Composite scores range {:.3} to {:.3}", range.min, range.max);
    }
    for advisory in outcome.advisories() {
        warn!("Advisory: {}", advisory);
    }
    if let Some(seed) = outcome.manifest.seed {
        info!("Replay this run with --seed {}", seed);
    }
    info!("Pipeline complete (run {})", outcome.manifest.run_id);
    Ok(())
}
