//! Configuration loading for kfdx.
//! Reads kfdx.toml from the current directory or the path in the KFDX_CONFIG
//! env var. YAML and JSON files are accepted by extension.

use std::path::{Path, PathBuf};

use anyhow::Context;
use kfdx_common::KfdxError;
use kfdx_ranker::WeightVector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const CONFIG_ENV_VAR: &str = "KFDX_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "kfdx.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_gene_signature")]
    pub gene_signature: PathBuf,
}

fn default_gene_signature() -> PathBuf { PathBuf::from("data/gene_signature.csv") }

impl Default for InputConfig {
    fn default() -> Self {
        Self { gene_signature: default_gene_signature() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_targets_file")]
    pub targets_file: String,
    #[serde(default = "default_compounds_file")]
    pub compounds_file: String,
    #[serde(default = "default_pathway_summary_file")]
    pub pathway_summary_file: String,
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
    /// Persist the per-pathway summary table alongside the ranking.
    #[serde(default = "default_true")]
    pub write_pathway_summary: bool,
    /// Rows shown in the console summary.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_output_dir()           -> PathBuf { PathBuf::from("outputs/tables") }
fn default_targets_file()         -> String  { "targets_ranked.csv".to_string() }
fn default_compounds_file()       -> String  { "compounds_ranked.csv".to_string() }
fn default_pathway_summary_file() -> String  { "pathway_summary.csv".to_string() }
fn default_manifest_file()        -> String  { "run_manifest.json".to_string() }
fn default_true()                 -> bool    { true }
fn default_top_n()                -> usize   { 10 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            targets_file: default_targets_file(),
            compounds_file: default_compounds_file(),
            pathway_summary_file: default_pathway_summary_file(),
            manifest_file: default_manifest_file(),
            write_pathway_summary: default_true(),
            top_n: default_top_n(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Seed for the stochastic term. Unset means a fresh seed per run; the
    /// seed actually used is recorded in the run manifest.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub weights: WeightVector,
}

impl Config {
    /// Load configuration. An explicit path or KFDX_CONFIG must exist; a
    /// missing kfdx.toml in the working directory falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Self::from_path(&path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_path(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => {
                info!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    /// Parse a config file, choosing the format from its extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");
        let config: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations that could never produce a valid run.
    pub fn validate(&self) -> Result<(), KfdxError> {
        if !self.ranking.weights.validate() {
            return Err(KfdxError::Config(format!(
                "ranking.weights must be non-negative and sum to 1.0 (got {:.6})",
                self.ranking.weights.sum()
            )));
        }
        let names = self.output.artifact_names();
        for (i, a) in names.iter().enumerate() {
            if a.is_empty() {
                return Err(KfdxError::Config("output file names must not be empty".into()));
            }
            if names[i + 1..].contains(a) {
                return Err(KfdxError::Config(format!("output file name '{a}' is used twice")));
            }
        }
        Ok(())
    }
}

impl OutputConfig {
    fn artifact_names(&self) -> [&str; 4] {
        [
            self.targets_file.as_str(),
            self.compounds_file.as_str(),
            self.pathway_summary_file.as_str(),
            self.manifest_file.as_str(),
        ]
    }

    pub fn targets_path(&self) -> PathBuf {
        self.dir.join(&self.targets_file)
    }

    pub fn compounds_path(&self) -> PathBuf {
        self.dir.join(&self.compounds_file)
    }
}
