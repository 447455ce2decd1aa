//! kfdx-common — Shared types and errors used across all kfdx crates.

pub mod error;
pub mod entities;

// Re-export commonly used types
pub use entities::{CompoundRecord, Druggability, GeneSignatureEntry, Pathway, PhaseRelevance};
pub use error::{ErrorClass, KfdxError, Result};
