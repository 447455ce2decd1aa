//! Core entity types shared by the ranker, the compound catalog and the
//! pipeline binary. Column names follow the curated CSV tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownCategory;

// ---------------------------------------------------------------------------
// Pathway
// ---------------------------------------------------------------------------

/// Biological-mechanism grouping of a host target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pathway {
    Endothelial,
    Coagulation,
    Cytokine,
    Platelet,
    Interferon,
    Neurological,
    Oxidative,
    Neuroprotection,
}

impl Pathway {
    pub const ALL: [Pathway; 8] = [
        Pathway::Endothelial,
        Pathway::Coagulation,
        Pathway::Cytokine,
        Pathway::Platelet,
        Pathway::Interferon,
        Pathway::Neurological,
        Pathway::Oxidative,
        Pathway::Neuroprotection,
    ];

    /// Pathway importance weight. Endothelial and coagulation dominate
    /// hemorrhagic-fever pathology.
    pub fn weight(&self) -> f64 {
        match self {
            Pathway::Endothelial     => 0.95,
            Pathway::Coagulation     => 0.95,
            Pathway::Cytokine        => 0.90,
            Pathway::Platelet        => 0.90,
            Pathway::Interferon      => 0.85,
            Pathway::Neurological    => 0.85,
            Pathway::Oxidative       => 0.80,
            Pathway::Neuroprotection => 0.85,
        }
    }

    /// Serialize to the string used in the tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Pathway::Endothelial     => "endothelial",
            Pathway::Coagulation     => "coagulation",
            Pathway::Cytokine        => "cytokine",
            Pathway::Platelet        => "platelet",
            Pathway::Interferon      => "interferon",
            Pathway::Neurological    => "neurological",
            Pathway::Oxidative       => "oxidative",
            Pathway::Neuroprotection => "neuroprotection",
        }
    }
}

impl FromStr for Pathway {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pathway::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| unknown("Pathway", s, Pathway::ALL.iter().map(|p| p.as_str())))
    }
}

// ---------------------------------------------------------------------------
// Phase relevance
// ---------------------------------------------------------------------------

/// Disease phase a target is most relevant to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseRelevance {
    Hemorrhagic,
    Febrile,
    Neurological,
    Protective,
    Both,
}

impl PhaseRelevance {
    pub const ALL: [PhaseRelevance; 5] = [
        PhaseRelevance::Hemorrhagic,
        PhaseRelevance::Febrile,
        PhaseRelevance::Neurological,
        PhaseRelevance::Protective,
        PhaseRelevance::Both,
    ];

    pub fn weight(&self) -> f64 {
        match self {
            PhaseRelevance::Hemorrhagic  => 1.0,
            PhaseRelevance::Febrile      => 0.9,
            PhaseRelevance::Neurological => 0.85,
            PhaseRelevance::Protective   => 0.85,
            PhaseRelevance::Both         => 0.8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseRelevance::Hemorrhagic  => "Hemorrhagic",
            PhaseRelevance::Febrile      => "Febrile",
            PhaseRelevance::Neurological => "Neurological",
            PhaseRelevance::Protective   => "Protective",
            PhaseRelevance::Both         => "Both",
        }
    }
}

impl FromStr for PhaseRelevance {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PhaseRelevance::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                unknown("Phase_Relevance", s, PhaseRelevance::ALL.iter().map(|p| p.as_str()))
            })
    }
}

// ---------------------------------------------------------------------------
// Druggability
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Druggability {
    High,
    Moderate,
    Low,
}

impl Druggability {
    pub const ALL: [Druggability; 3] = [Druggability::High, Druggability::Moderate, Druggability::Low];

    pub fn weight(&self) -> f64 {
        match self {
            Druggability::High     => 0.9,
            Druggability::Moderate => 0.6,
            Druggability::Low      => 0.3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Druggability::High     => "High",
            Druggability::Moderate => "Moderate",
            Druggability::Low      => "Low",
        }
    }
}

impl FromStr for Druggability {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Druggability::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| unknown("Druggability", s, Druggability::ALL.iter().map(|d| d.as_str())))
    }
}

macro_rules! display_as_str {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        })*
    };
}

display_as_str!(Pathway, PhaseRelevance, Druggability);

fn unknown<'a>(
    column: &'static str,
    value: &str,
    allowed: impl Iterator<Item = &'a str>,
) -> UnknownCategory {
    UnknownCategory {
        column,
        value: value.to_string(),
        allowed: allowed.collect::<Vec<_>>().join(", "),
    }
}

// ---------------------------------------------------------------------------
// Gene signature row
// ---------------------------------------------------------------------------

/// One curated host target with its evidence annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneSignatureEntry {
    #[serde(rename = "Gene")]
    pub gene: String,
    /// Canonical display key, unique within a table.
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Pathway")]
    pub pathway: Pathway,
    #[serde(rename = "Phase_Relevance")]
    pub phase_relevance: PhaseRelevance,
    /// Literature volume proxy.
    #[serde(rename = "PubMed_Count")]
    pub pubmed_count: u64,
    #[serde(rename = "Druggability")]
    pub druggability: Druggability,
}

// ---------------------------------------------------------------------------
// Compound catalog row
// ---------------------------------------------------------------------------

/// A curated candidate intervention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundRecord {
    #[serde(rename = "Drug")]
    pub drug: String,
    /// Protein or mechanism label.
    #[serde(rename = "Target")]
    pub target: String,
    /// Soft reference to a gene-signature Symbol; not enforced.
    #[serde(rename = "Related_Gene")]
    pub related_gene: String,
    /// Potency proxy; 0 for non-pharmacological interventions.
    #[serde(rename = "pChEMBL")]
    pub pchembl: f64,
    /// Drug-development phase marker.
    #[serde(rename = "Phase")]
    pub phase: u8,
    #[serde(rename = "Evidence")]
    pub evidence: String,
}

impl CompoundRecord {
    /// True when `pChEMBL` carries a real potency value.
    pub fn has_potency(&self) -> bool {
        self.pchembl > 0.0
    }
}
