//! Seeded synthetic regression data.
//!
//! Predictors `x1..xK` are independent standard normals and the response is
//! `y = Σ β_j x_j + ε` with `ε ~ N(0, noise_sd²)`. Used by `subsets demo` and
//! by tests that need a dataset with a known true model.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::data::table::{Column, ObservationTable};
use crate::error::{SubsetError, SubsetResult};

/// Name of the response column in generated tables.
pub const RESPONSE: &str = "y";

pub fn synthetic_dataset(
    n: usize,
    coefficients: &[f64],
    noise_sd: f64,
    seed: u64,
) -> SubsetResult<ObservationTable> {
    if n == 0 {
        return Err(SubsetError::domain("sample size must be > 0"));
    }
    if coefficients.is_empty() {
        return Err(SubsetError::domain("at least one coefficient is required"));
    }
    if coefficients.iter().any(|b| !b.is_finite()) {
        return Err(SubsetError::input("coefficients must be finite"));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let standard = Normal::new(0.0, 1.0)
        .map_err(|e| SubsetError::domain(format!("noise distribution error: {e}")))?;
    let noise = Normal::new(0.0, noise_sd)
        .map_err(|e| SubsetError::domain(format!("noise distribution error: {e}")))?;

    let xs: Vec<Vec<f64>> = coefficients
        .iter()
        .map(|_| (0..n).map(|_| standard.sample(&mut rng)).collect())
        .collect();

    let y: Vec<f64> = (0..n)
        .map(|i| {
            let signal: f64 = coefficients.iter().zip(&xs).map(|(b, x)| b * x[i]).sum();
            signal + noise.sample(&mut rng)
        })
        .collect();

    let mut table = ObservationTable::new();
    table.push(RESPONSE, Column::Numeric(y))?;
    for (j, x) in xs.into_iter().enumerate() {
        table.push(format!("x{}", j + 1), Column::Numeric(x))?;
    }
    Ok(table)
}
