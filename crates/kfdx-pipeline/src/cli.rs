//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(
    name = "kfdx",
    version,
    about = "Rank host targets and candidate compounds for Kyasanur Forest Disease"
)]
pub struct Cli {
    /// Config file (TOML, YAML or JSON). Defaults to $KFDX_CONFIG or ./kfdx.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Gene-signature CSV
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory for the output tables
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Seed for the stochastic scoring term
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rows shown in the console summary
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Skip writing pathway_summary.csv
    #[arg(long)]
    pub no_pathway_summary: bool,
}

impl Cli {
    /// Flags take precedence over the config file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref input) = self.input {
            config.input.gene_signature = input.clone();
        }
        if let Some(ref dir) = self.output_dir {
            config.output.dir = dir.clone();
        }
        if self.seed.is_some() {
            config.ranking.seed = self.seed;
        }
        if let Some(n) = self.top_n {
            config.output.top_n = n;
        }
        if self.no_pathway_summary {
            config.output.write_pathway_summary = false;
        }
    }
}
