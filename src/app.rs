//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` defaults and initializes logging
//! - parses CLI arguments
//! - runs the subset search
//! - prints reports and writes optional exports

use clap::Parser;

use crate::cli::{Command, DemoArgs, FitArgs, SearchArgs, ShowArgs};
use crate::data::RESPONSE;
use crate::domain::{DataSource, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `subsets` binary.
pub fn run() -> Result<(), AppError> {
    // Missing `.env` is the normal case.
    dotenvy::dotenv().ok();
    init_logging();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => {
            let config = run_config_from_fit_args(&args)?;
            handle_search(&config)
        }
        Command::Demo(args) => {
            let config = run_config_from_demo_args(&args);
            handle_search(&config)
        }
        Command::Show(args) => handle_show(args),
    }
}

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn");
    // A logger may already be installed when embedded; keep the existing one.
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn handle_search(config: &RunConfig) -> Result<(), AppError> {
    let run = pipeline::run_search(config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.source, &run.response, &run.table)
    );
    println!("{}", crate::report::format_table(&run.table, &run.choice));
    println!("{}", crate::report::format_path(&run.table));
    println!(
        "{}",
        crate::report::format_choice(&run.table, &run.choice, config.criterion)
    );

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.table)?;
        log::info!("wrote results CSV to {}", path.display());
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_results_json(path, &run.response, &run.table, &run.choice)?;
        log::info!("wrote results JSON to {}", path.display());
    }

    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let results = crate::io::export::read_results_json(&args.json)?;
    let source = format!("{} (saved by {})", args.json.display(), results.tool);

    println!(
        "{}",
        crate::report::format_run_summary(&source, &results.response, &results.table)
    );
    println!("{}", crate::report::format_table(&results.table, &results.choice));
    println!(
        "{}",
        crate::report::format_choice(&results.table, &results.choice, args.criterion)
    );
    Ok(())
}

pub fn run_config_from_fit_args(args: &FitArgs) -> Result<RunConfig, AppError> {
    if !args.delimiter.is_ascii() {
        return Err(AppError::new(
            2,
            format!("Delimiter must be a single ASCII character, got '{}'.", args.delimiter),
        ));
    }

    Ok(RunConfig {
        source: DataSource::Csv {
            path: args.csv.clone(),
            delimiter: args.delimiter as u8,
        },
        response: args.response.clone(),
        predictors: args.predictors.clone(),
        categorical: args.categorical.clone(),
        drop_missing: args.drop_missing,
        ..search_config(&args.search)
    })
}

pub fn run_config_from_demo_args(args: &DemoArgs) -> RunConfig {
    RunConfig {
        source: DataSource::Synthetic {
            n: args.n,
            coefficients: args.coefficients.clone(),
            noise_sd: args.noise_sd,
            seed: args.seed,
        },
        ..search_config(&args.search)
    }
}

/// Search options shared by `fit` and `demo`, with a synthetic placeholder source.
fn search_config(args: &SearchArgs) -> RunConfig {
    RunConfig {
        source: DataSource::Synthetic {
            n: 0,
            coefficients: Vec::new(),
            noise_sd: 0.0,
            seed: 0,
        },
        response: RESPONSE.to_string(),
        predictors: Vec::new(),
        categorical: Vec::new(),
        drop_missing: false,
        max_size: args.max_size,
        best_per_size: args.nbest,
        criterion: args.criterion,
        export_results: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}
