//! kfdx-pipeline — Host-directed therapy prioritization pipeline.
//!
//! Ranks the curated host targets, emits the compound catalog, and persists
//! both tables (plus a pathway summary and a run manifest) for downstream
//! figure and manuscript generation.

pub mod cli;
pub mod config;
pub mod persist;
pub mod pipeline;
pub mod report;

pub use config::Config;
pub use pipeline::{run, run_with_source, PipelineOutcome};
