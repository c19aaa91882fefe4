//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - search outputs (`SubsetRecord`, `SubsetTable`)
//! - criterion-based choices (`Criterion`, `CriterionChoice`)
//! - the run configuration (`RunConfig`, `DataSource`)

pub mod types;

pub use types::*;
