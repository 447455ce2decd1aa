//! Aggregate views over a finished ranking. These read composite scores as
//! emitted; nothing here re-scores a target.

use std::collections::BTreeMap;
use std::io::Write;

use csv::WriterBuilder;
use kfdx_common::{Pathway, Result};
use serde::{Deserialize, Serialize};

use crate::scorer::RankedTarget;

/// Per-pathway composite score statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathwaySummary {
    #[serde(rename = "Pathway")]
    pub pathway: Pathway,
    #[serde(rename = "Count")]
    pub count: usize,
    #[serde(rename = "Mean_Score")]
    pub mean_score: f64,
    /// Sample standard deviation; undefined for a single target.
    #[serde(rename = "Std_Score")]
    pub std_score: Option<f64>,
}

/// Lowest and highest composite score of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

pub fn score_range(targets: &[RankedTarget]) -> Option<ScoreRange> {
    let mut scores = targets.iter().map(|t| t.composite_score);
    let first = scores.next()?;
    Some(scores.fold(ScoreRange { min: first, max: first }, |r, s| ScoreRange {
        min: r.min.min(s),
        max: r.max.max(s),
    }))
}

/// Group targets by pathway, sorted by mean composite score descending.
pub fn summarise_pathways(targets: &[RankedTarget]) -> Vec<PathwaySummary> {
    let mut groups: BTreeMap<Pathway, Vec<f64>> = BTreeMap::new();
    for t in targets {
        groups.entry(t.entry.pathway).or_default().push(t.composite_score);
    }

    let mut summaries: Vec<PathwaySummary> = groups
        .into_iter()
        .map(|(pathway, scores)| {
            let n = scores.len();
            let mean = scores.iter().sum::<f64>() / n as f64;
            let std_score = (n > 1).then(|| {
                let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>()
                    / (n - 1) as f64;
                variance.sqrt()
            });
            PathwaySummary {
                pathway,
                count: n,
                mean_score: mean,
                std_score,
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.mean_score
            .total_cmp(&a.mean_score)
            .then_with(|| a.pathway.cmp(&b.pathway))
    });
    summaries
}

pub fn write_pathway_summary<W: Write>(writer: W, summaries: &[PathwaySummary]) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    for s in summaries {
        wtr.serialize(s)?;
    }
    wtr.flush()?;
    Ok(())
}
