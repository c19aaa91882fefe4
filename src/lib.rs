//! `best-subsets` library crate.
//!
//! The binary (`subsets`) is a thin wrapper around this library so that:
//!
//! - the search is testable without spawning processes
//! - the evaluator can be embedded in other tools
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod report;
