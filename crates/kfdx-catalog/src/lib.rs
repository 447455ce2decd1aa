//! kfdx-catalog — Curated compound catalog.
//!
//! The catalog is authored data, emitted verbatim every run:
//! 1. The authored drug/target/evidence records
//! 2. A soft cross-check of each record's related gene against the ranked symbols
//! 3. Evidence and potency breakdowns for reporting

pub mod catalog;
pub mod stats;

pub use catalog::{CatalogAdvisory, CompoundCatalog, COMPOUND_COLUMNS};
