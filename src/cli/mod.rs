//! Command-line parsing for the best-subsets tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the search/math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Criterion;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "subsets", version, about = "Exhaustive best-subsets linear regression")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search all predictor subsets of a CSV dataset and report fit statistics per size.
    Fit(FitArgs),
    /// Run the search on a seeded synthetic dataset with a known true model.
    Demo(DemoArgs),
    /// Print a previously exported results JSON.
    Show(ShowArgs),
}

/// Options shared by every command that runs a search.
#[derive(Debug, Args, Clone)]
pub struct SearchArgs {
    /// Largest subset size to search (defaults to all predictors, capped at n - 2).
    #[arg(long, env = "SUBSETS_MAX_SIZE")]
    pub max_size: Option<usize>,

    /// Number of subsets to keep per size.
    #[arg(long, env = "SUBSETS_NBEST", default_value_t = 1)]
    pub nbest: usize,

    /// Criterion whose preferred model is printed with coefficients.
    #[arg(long, value_enum, default_value_t = Criterion::Bic)]
    pub criterion: Criterion,

    /// Export one row per retained subset to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full result table to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for `subsets fit`.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input CSV with a header row.
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    /// Response column.
    #[arg(short = 'y', long)]
    pub response: String,

    /// Candidate predictor columns (comma-separated). Defaults to every other column.
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub predictors: Vec<String>,

    /// Categorical columns to expand into indicator columns (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub categorical: Vec<String>,

    /// Field delimiter.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Drop rows with a missing value in the response or any predictor.
    #[arg(long)]
    pub drop_missing: bool,

    #[command(flatten)]
    pub search: SearchArgs,
}

/// Options for `subsets demo`.
#[derive(Debug, Parser, Clone)]
pub struct DemoArgs {
    /// Number of observations.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub n: usize,

    /// True coefficients, one per predictor (zeros make noise predictors).
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_value = "3,-2,1.5,1,0,0,0,0"
    )]
    pub coefficients: Vec<f64>,

    /// Standard deviation of the additive noise.
    #[arg(long, default_value_t = 1.0)]
    pub noise_sd: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub search: SearchArgs,
}

/// Options for `subsets show`.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Results JSON produced by `--export-json`.
    #[arg(long, value_name = "JSON")]
    pub json: PathBuf,

    /// Criterion whose preferred model is printed with coefficients.
    #[arg(long, value_enum, default_value_t = Criterion::Bic)]
    pub criterion: Criterion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fit_with_lists() {
        let cli = Cli::try_parse_from([
            "subsets", "fit", "--csv", "prostate.csv", "-y", "lpsa", "-x", "lcavol,lweight,svi",
            "--nbest", "2", "--criterion", "adj-r2",
        ])
        .unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.predictors, vec!["lcavol", "lweight", "svi"]);
        assert_eq!(args.search.nbest, 2);
        assert_eq!(args.search.criterion, Criterion::AdjR2);
        assert_eq!(args.delimiter, ',');
    }

    #[test]
    fn demo_accepts_negative_coefficients() {
        let cli = Cli::try_parse_from(["subsets", "demo", "--coefficients", "1,-2.5,0"]).unwrap();
        let Command::Demo(args) = cli.command else {
            panic!("expected demo");
        };
        assert_eq!(args.coefficients, vec![1.0, -2.5, 0.0]);
        assert_eq!(args.seed, 42);
    }
}
