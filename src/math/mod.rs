//! Mathematical utilities: least squares and model-fit criteria.

pub mod criteria;
pub mod ols;

pub use criteria::*;
pub use ols::*;
