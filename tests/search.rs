//! End-to-end checks of the subset search on generated and file-backed data.

use std::io::Write;

use approx::assert_relative_eq;
use best_subsets::app::pipeline::run_search;
use best_subsets::data::{synthetic_dataset, Column, ObservationTable, RESPONSE};
use best_subsets::domain::{Criterion, DataSource, RunConfig, SubsetTable};
use best_subsets::error::SubsetError;
use best_subsets::fit::{choose, evaluate, evaluate_table};
use best_subsets::report::predictor_path;
use nalgebra::DMatrix;

fn columns(k: usize) -> Vec<String> {
    (1..=k).map(|j| format!("x{j}")).collect()
}

fn search(n: usize, coefficients: &[f64], noise_sd: f64, seed: u64, max_size: usize, nbest: usize) -> SubsetTable {
    let data = synthetic_dataset(n, coefficients, noise_sd, seed).unwrap();
    let predictors = columns(coefficients.len());
    evaluate_table(&data, RESPONSE, &predictors, max_size, nbest).unwrap()
}

fn numeric(table: &ObservationTable, name: &str) -> Vec<f64> {
    match table.column(name).unwrap() {
        Column::Numeric(v) => v.clone(),
        Column::Categorical(_) => panic!("{name} is categorical"),
    }
}

fn correlation(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let ma = a.iter().sum::<f64>() / n;
    let mb = b.iter().sum::<f64>() / n;
    let cov: f64 = a.iter().zip(b).map(|(x, y)| (x - ma) * (y - mb)).sum();
    let va: f64 = a.iter().map(|x| (x - ma).powi(2)).sum();
    let vb: f64 = b.iter().map(|y| (y - mb).powi(2)).sum();
    cov / (va * vb).sqrt()
}

#[test]
fn strong_effects_enter_in_order_and_nest() {
    let table = search(100, &[5.0, 3.0, 2.0, 1.0, 0.0, 0.0], 0.1, 2024, 6, 1);

    let best: Vec<Vec<usize>> = table.best().map(|r| r.predictors.clone()).collect();
    assert_eq!(best[0], vec![0]);
    assert_eq!(best[1], vec![0, 1]);
    assert_eq!(best[2], vec![0, 1, 2]);
    assert_eq!(best[3], vec![0, 1, 2, 3]);
    assert!(predictor_path(&table).iter().all(|step| step.is_nested()));

    let choice = choose(&table);
    assert!(choice.bic.unwrap() >= 4);
    assert!(choice.adj_r2.unwrap() >= 4);
}

#[test]
fn best_single_predictor_has_largest_absolute_correlation() {
    let data = synthetic_dataset(80, &[0.5, -2.0, 1.0, 0.0], 1.0, 9).unwrap();
    let predictors = columns(4);
    let table = evaluate_table(&data, RESPONSE, &predictors, 1, 4).unwrap();

    let y = numeric(&data, RESPONSE);
    let (best_j, best_r) = predictors
        .iter()
        .enumerate()
        .map(|(j, name)| (j, correlation(&y, &numeric(&data, name))))
        .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
        .unwrap();

    let top = table.best_at(1).unwrap();
    assert_eq!(top.predictors, vec![best_j]);
    assert_relative_eq!(top.r2, best_r * best_r, epsilon = 1e-9);

    // Every size-1 subset is retained, ranked by RSS.
    assert_eq!(table.records.len(), 4);
    assert!(table.records.windows(2).all(|w| w[0].rss <= w[1].rss));
}

#[test]
fn results_do_not_depend_on_thread_count() {
    let run = || search(60, &[1.0, 0.5, 0.0, -0.7, 0.2, 0.0, 0.3], 1.0, 5, 5, 3);

    let parallel = run();
    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(run);

    assert_eq!(parallel, single);
    assert_eq!(parallel, run());
}

#[test]
fn size_n_minus_two_succeeds_without_aicc_at_the_top() {
    let n = 8;
    let coefficients = [1.0, -1.0, 0.5, 0.0, 0.3, 0.8];
    let table = search(n, &coefficients, 0.5, 17, n - 2, 1);

    let last = table.best_at(n - 2).unwrap();
    assert_eq!(last.k, n - 1);
    assert!(last.aicc.is_none());
    assert!(table.best_at(n - 3).unwrap().aicc.is_some());

    let data = synthetic_dataset(n, &coefficients, 0.5, 17).unwrap();
    let err = evaluate_table(&data, RESPONSE, &columns(6), n - 1, 1).unwrap_err();
    assert!(matches!(err, SubsetError::Domain(_)), "{err}");
}

#[test]
fn full_model_cp_equals_its_parameter_count() {
    let table = search(40, &[1.0, 2.0, 0.0, -1.0], 0.8, 3, 4, 1);
    let full = table.best_at(4).unwrap();
    assert_relative_eq!(full.cp, 5.0, epsilon = 1e-9);
    assert_relative_eq!(full.rss, table.rss_full, epsilon = 1e-12);
}

#[test]
fn matrix_entry_point_matches_table_entry_point() {
    let data = synthetic_dataset(30, &[1.0, 0.0, 2.0], 0.4, 1).unwrap();
    let predictors = columns(3);
    let y = numeric(&data, RESPONSE);
    let x = DMatrix::from_fn(30, 3, |i, j| numeric(&data, &predictors[j])[i]);

    let from_matrix = evaluate(&y, &x, 3, 2).unwrap();
    let from_table = evaluate_table(&data, RESPONSE, &predictors, 3, 2).unwrap();
    assert_eq!(from_matrix.records, from_table.records);
    assert!(from_matrix.predictor_names.is_empty());
}

#[test]
fn csv_with_categorical_column_runs_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cars.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, ",mpg,weight,origin,hp").unwrap();
    let origins = ["us", "eu", "jp"];
    for i in 0..24 {
        let weight = 2.0 + (i % 7) as f64 * 0.3;
        let hp = 80.0 + ((i * 5) % 11) as f64 * 6.0;
        let origin = origins[i % 3];
        let shift = match origin {
            "eu" => 1.5,
            "jp" => 3.0,
            _ => 0.0,
        };
        let wobble = ((i * 13) % 5) as f64 * 0.2;
        let mpg = 40.0 - 5.0 * weight - 0.02 * hp + shift + wobble;
        let hp_cell = if i == 10 { "NA".to_string() } else { hp.to_string() };
        writeln!(file, "{i},{mpg},{weight},{origin},{hp_cell}").unwrap();
    }
    drop(file);

    let mut config = RunConfig {
        source: DataSource::Csv {
            path: path.clone(),
            delimiter: b',',
        },
        response: "mpg".to_string(),
        predictors: Vec::new(),
        categorical: vec!["origin".to_string()],
        drop_missing: true,
        max_size: None,
        best_per_size: 2,
        criterion: Criterion::Bic,
        export_results: None,
        export_json: None,
    };

    let out = run_search(&config).unwrap();
    assert_eq!(out.table.n, 23);
    assert_eq!(
        out.table.predictor_names,
        vec!["weight", "origin_jp", "origin_us", "hp"]
    );
    assert_eq!(out.table.max_size, 4);
    assert_eq!(out.table.best_at(1).unwrap().predictors, vec![0]);

    // Without encoding, the text column cannot enter the search.
    config.categorical.clear();
    let err = run_search(&config).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}
