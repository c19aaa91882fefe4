//! Observation data: the in-memory table and a synthetic generator.

pub mod synthetic;
pub mod table;

pub use synthetic::*;
pub use table::*;
