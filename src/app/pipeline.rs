//! Shared search pipeline used by the `fit` and `demo` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> encode categoricals -> complete cases -> search -> criterion choice
//!
//! The commands can then focus on presentation.

use crate::data::{synthetic_dataset, ObservationTable};
use crate::domain::{CriterionChoice, DataSource, RunConfig, SubsetTable};
use crate::error::AppError;
use crate::fit::{choose, evaluate_table};
use crate::io::ingest::load_table;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Human-readable description of where the data came from.
    pub source: String,
    pub response: String,
    pub table: SubsetTable,
    pub choice: CriterionChoice,
}

/// Execute the full search pipeline and return the computed outputs.
pub fn run_search(config: &RunConfig) -> Result<RunOutput, AppError> {
    let (data, source) = load_source(&config.source)?;
    run_search_on(config, data, source)
}

/// Execute the pipeline on an already-loaded table.
pub fn run_search_on(config: &RunConfig, data: ObservationTable, source: String) -> Result<RunOutput, AppError> {
    data.column(&config.response)?;

    // 1) Resolve the candidate predictor list.
    let requested: Vec<String> = if config.predictors.is_empty() {
        data.names()
            .iter()
            .filter(|n| **n != config.response)
            .cloned()
            .collect()
    } else {
        config.predictors.clone()
    };
    if requested.iter().any(|p| *p == config.response) {
        return Err(AppError::new(
            2,
            format!("Response `{}` cannot also be a predictor.", config.response),
        ));
    }
    if let Some(c) = config.categorical.iter().find(|c| !requested.contains(c)) {
        return Err(AppError::new(
            2,
            format!("Categorical column `{c}` is not among the predictors."),
        ));
    }

    // 2) Expand categoricals into indicator columns, keeping predictor order.
    let mut predictors = Vec::with_capacity(requested.len());
    for name in &requested {
        if config.categorical.contains(name) {
            predictors.extend(data.dummy_names(name)?);
        } else {
            data.column(name)?;
            predictors.push(name.clone());
        }
    }
    let data = if config.categorical.is_empty() {
        data
    } else {
        data.encode_dummies(&config.categorical)?
    };

    // 3) Complete cases over the columns the search will touch.
    let data = if config.drop_missing {
        let mut used = predictors.clone();
        used.push(config.response.clone());
        data.drop_missing_rows(&used)?
    } else {
        data
    };
    if data.n_rows() == 0 {
        return Err(AppError::new(3, "No complete rows remain after dropping missing values."));
    }

    // 4) Search.
    let max_size = config
        .max_size
        .unwrap_or_else(|| predictors.len().min(data.n_rows().saturating_sub(2)));
    let table = evaluate_table(&data, &config.response, &predictors, max_size, config.best_per_size)?;

    // 5) Criterion choice.
    let choice = choose(&table);

    Ok(RunOutput {
        source,
        response: config.response.clone(),
        table,
        choice,
    })
}

fn load_source(source: &DataSource) -> Result<(ObservationTable, String), AppError> {
    match source {
        DataSource::Csv { path, delimiter } => {
            let ingest = load_table(path, *delimiter)?;
            let label = format!("{} ({} rows)", path.display(), ingest.rows_read);
            Ok((ingest.table, label))
        }
        DataSource::Synthetic {
            n,
            coefficients,
            noise_sd,
            seed,
        } => {
            let table = synthetic_dataset(*n, coefficients, *noise_sd, *seed)?;
            let label = format!("synthetic (n={n}, seed={seed}, noise_sd={noise_sd}, beta={coefficients:?})");
            Ok((table, label))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Column;
    use crate::domain::Criterion;

    fn config(source: DataSource) -> RunConfig {
        RunConfig {
            source,
            response: "y".to_string(),
            predictors: Vec::new(),
            categorical: Vec::new(),
            drop_missing: false,
            max_size: None,
            best_per_size: 1,
            criterion: Criterion::Bic,
            export_results: None,
            export_json: None,
        }
    }

    fn synthetic() -> DataSource {
        DataSource::Synthetic {
            n: 60,
            coefficients: vec![4.0, 0.0, -3.0],
            noise_sd: 0.5,
            seed: 11,
        }
    }

    #[test]
    fn synthetic_run_recovers_true_predictors() {
        let out = run_search(&config(synthetic())).unwrap();
        assert_eq!(out.table.max_size, 3);
        assert_eq!(out.table.predictor_names, vec!["x1", "x2", "x3"]);
        let best2 = out.table.best_at(2).unwrap();
        assert_eq!(best2.predictors, vec![0, 2]);
        assert!(out.choice.bic.unwrap() >= 2);
    }

    #[test]
    fn categorical_predictors_are_expanded_in_place() {
        let mut data = synthetic_dataset(40, &[2.0, 1.0], 0.3, 3).unwrap();
        let groups: Vec<String> = (0..40).map(|i| ["a", "b", "c"][i % 3].to_string()).collect();
        data.push("group", Column::Categorical(groups)).unwrap();

        let mut cfg = config(synthetic());
        cfg.predictors = vec!["x1".into(), "group".into(), "x2".into()];
        cfg.categorical = vec!["group".into()];
        let out = run_search_on(&cfg, data, "test".into()).unwrap();

        assert_eq!(out.table.predictor_names, vec!["x1", "group_b", "group_c", "x2"]);
        assert_eq!(out.table.max_size, 4);
    }

    #[test]
    fn unencoded_categorical_is_an_input_error() {
        let mut data = synthetic_dataset(20, &[1.0], 0.3, 3).unwrap();
        data.push("group", Column::Categorical(vec!["a".into(); 20])).unwrap();

        let err = run_search_on(&config(synthetic()), data, "test".into()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("categorical"), "{err}");
    }

    #[test]
    fn rejects_response_listed_as_predictor() {
        let mut cfg = config(synthetic());
        cfg.predictors = vec!["x1".into(), "y".into()];
        assert_eq!(run_search(&cfg).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn drop_missing_filters_rows_before_search() {
        let mut data = ObservationTable::new();
        let y: Vec<f64> = (0..10).map(|i| i as f64 * 1.5 + (i % 3) as f64).collect();
        let mut x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        x[4] = f64::NAN;
        let z: Vec<f64> = (0..10).map(|i| ((i * 7) % 4) as f64).collect();
        data.push("y", Column::Numeric(y)).unwrap();
        data.push("x", Column::Numeric(x)).unwrap();
        data.push("z", Column::Numeric(z)).unwrap();

        let mut cfg = config(synthetic());
        assert_eq!(run_search_on(&cfg, data.clone(), "t".into()).unwrap_err().exit_code(), 2);

        cfg.drop_missing = true;
        let out = run_search_on(&cfg, data, "t".into()).unwrap();
        assert_eq!(out.table.n, 9);
    }
}
