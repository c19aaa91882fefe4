//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during the search
//! - exported to JSON/CSV
//! - rendered by the terminal report

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Fit statistics for one evaluated predictor subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsetRecord {
    /// Number of predictors `p` (intercept excluded).
    pub size: usize,
    /// 1 = lowest RSS at this size.
    pub rank: usize,
    /// Predictor column indices, ascending.
    pub predictors: Vec<usize>,
    /// Parameters including the intercept (`p + 1`).
    pub k: usize,
    pub rss: f64,
    pub r2: f64,
    pub adj_r2: f64,
    pub cp: f64,
    /// `None` when `n - k - 1 <= 0`.
    pub aicc: Option<f64>,
    pub bic: f64,
    /// Intercept first, then one coefficient per entry of `predictors`.
    pub coefficients: Vec<f64>,
}

/// Output of a best-subsets search: one or more records per model size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsetTable {
    /// Observations used.
    pub n: usize,
    /// Candidate predictor count `K`.
    pub n_predictors: usize,
    pub max_size: usize,
    pub best_per_size: usize,
    pub tss: f64,
    pub rss_full: f64,
    pub mse_full: f64,
    /// Predictor names in column order (empty when the caller supplied a bare matrix).
    pub predictor_names: Vec<String>,
    /// Ordered by size, then rank.
    pub records: Vec<SubsetRecord>,
}

impl SubsetTable {
    /// The rank-1 record of every size, in size order.
    pub fn best(&self) -> impl Iterator<Item = &SubsetRecord> {
        self.records.iter().filter(|r| r.rank == 1)
    }

    /// The rank-1 record for a given size.
    pub fn best_at(&self, size: usize) -> Option<&SubsetRecord> {
        self.best().find(|r| r.size == size)
    }

    /// Human-readable predictor label for a record (`lcavol+lweight`).
    pub fn label(&self, record: &SubsetRecord) -> String {
        record
            .predictors
            .iter()
            .map(|&j| {
                self.predictor_names
                    .get(j)
                    .cloned()
                    .unwrap_or_else(|| format!("x{}", j + 1))
            })
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Criteria used to pick a preferred model size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Criterion {
    AdjR2,
    Cp,
    Aicc,
    Bic,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [Criterion::AdjR2, Criterion::Cp, Criterion::Aicc, Criterion::Bic];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Criterion::AdjR2 => "adjR2",
            Criterion::Cp => "Cp",
            Criterion::Aicc => "AICc",
            Criterion::Bic => "BIC",
        }
    }
}

/// Preferred model size under each criterion (rank-1 records only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionChoice {
    /// Size maximizing adjusted R².
    pub adj_r2: Option<usize>,
    /// Size minimizing Cp.
    pub cp: Option<usize>,
    /// Smallest size with `Cp <= p + 1`.
    pub cp_within_p: Option<usize>,
    /// Size minimizing AICc over sizes where it is defined.
    pub aicc: Option<usize>,
    /// Size minimizing BIC.
    pub bic: Option<usize>,
}

impl CriterionChoice {
    pub fn get(&self, criterion: Criterion) -> Option<usize> {
        match criterion {
            Criterion::AdjR2 => self.adj_r2,
            Criterion::Cp => self.cp,
            Criterion::Aicc => self.aicc,
            Criterion::Bic => self.bic,
        }
    }
}

/// Where the observations come from.
#[derive(Debug, Clone)]
pub enum DataSource {
    Csv {
        path: PathBuf,
        delimiter: u8,
    },
    Synthetic {
        n: usize,
        coefficients: Vec<f64>,
        noise_sd: f64,
        seed: u64,
    },
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: DataSource,
    pub response: String,
    /// Empty means "every column except the response".
    pub predictors: Vec<String>,
    /// Columns to expand into indicator columns before the search.
    pub categorical: Vec<String>,
    /// Drop rows with a missing value in any selected column.
    pub drop_missing: bool,

    /// `None` means "all candidate predictors" (capped by sample size).
    pub max_size: Option<usize>,
    pub best_per_size: usize,
    /// Criterion whose preferred model is reported in detail.
    pub criterion: Criterion,

    pub export_results: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// A saved search result (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsFile {
    pub tool: String,
    pub response: String,
    pub table: SubsetTable,
    pub choice: CriterionChoice,
}
