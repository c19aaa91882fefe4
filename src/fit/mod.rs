//! Best-subsets search orchestration.
//!
//! Responsibilities:
//!
//! - enumerate predictor subsets in lexicographic order
//! - fit and rank each candidate subset (parallel)
//! - pick a preferred model size per criterion

pub mod combinations;
pub mod evaluator;
pub mod selection;

pub use combinations::*;
pub use evaluator::*;
pub use selection::*;
