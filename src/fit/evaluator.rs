//! Exhaustive best-subsets evaluation.
//!
//! Given:
//! - a response `y` (length `n`)
//! - a predictor matrix `X` (`n × K`)
//!
//! we fit, for every subset of `1..=max_size` columns:
//! - an OLS model `y ~ 1 + X[:, subset]`
//! - the resulting RSS
//!
//! keep the `best_per_size` lowest-RSS subsets at each size, and score them
//! with R², adjusted R², Cp, AICc and BIC.

use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::data::{Column, ObservationTable};
use crate::domain::{SubsetRecord, SubsetTable};
use crate::error::{SubsetError, SubsetResult};
use crate::fit::combinations::{n_choose_k, subset_count, Combinations};
use crate::math::{
    adjusted_r_squared, aicc, bic, design_with_intercept, mallows_cp, r_squared, total_sum_of_squares,
    LinearFit, SvdLinearFit,
};

/// Upper bound on the number of subset fits a single search may request.
pub const MAX_SUBSET_FITS: usize = 50_000_000;

/// Full-model RSS at or below `TSS` times this is an exact fit.
const EXACT_FIT_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone)]
struct Candidate {
    /// Position in the lexicographic enumeration for this size.
    idx: usize,
    columns: Vec<usize>,
    rss: f64,
    coefficients: Vec<f64>,
}

/// Run a best-subsets search with the default SVD solver.
pub fn evaluate(
    response: &[f64],
    predictors: &DMatrix<f64>,
    max_size: usize,
    best_per_size: usize,
) -> SubsetResult<SubsetTable> {
    evaluate_with(&SvdLinearFit, response, predictors, max_size, best_per_size)
}

/// Run a best-subsets search with a caller-supplied least-squares solver.
pub fn evaluate_with<F>(
    fitter: &F,
    response: &[f64],
    predictors: &DMatrix<f64>,
    max_size: usize,
    best_per_size: usize,
) -> SubsetResult<SubsetTable>
where
    F: LinearFit + Sync,
{
    validate_inputs(response, predictors, max_size, best_per_size)?;

    let n = response.len();
    let k_total = predictors.ncols();

    let tss = total_sum_of_squares(response);
    if !(tss.is_finite() && tss > 0.0) {
        return Err(SubsetError::input("response has zero variance"));
    }

    let n_fits = subset_count(k_total, max_size);
    if n_fits > MAX_SUBSET_FITS {
        return Err(SubsetError::domain(format!(
            "search requires {n_fits} subset fits (limit {MAX_SUBSET_FITS}); lower max_size"
        )));
    }

    let y = DVector::from_column_slice(response);

    // The full model is fitted once; its residual mean square anchors Cp at every size.
    let all_columns: Vec<usize> = (0..k_total).collect();
    let full = fit_subset(fitter, &y, predictors, 0, all_columns)?;
    let mse_full = full.rss / (n - k_total - 1) as f64;
    // An exact fit leaves rounding-level RSS; treat it as zero relative to TSS.
    if !(mse_full.is_finite() && full.rss > tss * EXACT_FIT_TOLERANCE) {
        return Err(SubsetError::domain(
            "full model has zero residual variance; Mallows' Cp is undefined",
        ));
    }

    log::info!(
        "best subsets: n={n}, K={k_total}, max_size={max_size}, nbest={best_per_size}, fits={n_fits}"
    );

    // `best_per_size` is unbounded; size by what each level can actually hold.
    let capacity = (1..=max_size)
        .map(|p| n_choose_k(k_total, p).min(best_per_size))
        .fold(0usize, usize::saturating_add);
    let mut records = Vec::with_capacity(capacity);
    for p in 1..=max_size {
        let best = best_candidates(fitter, &y, predictors, p, best_per_size)?;
        log::debug!(
            "size {p}: kept {} of {} subsets, best rss={:.6}",
            best.len(),
            n_choose_k(k_total, p),
            best.first().map(|c| c.rss).unwrap_or(f64::NAN)
        );

        for (rank, cand) in best.into_iter().enumerate() {
            records.push(score(cand, rank + 1, p, n, tss, mse_full));
        }
    }

    Ok(SubsetTable {
        n,
        n_predictors: k_total,
        max_size,
        best_per_size,
        tss,
        rss_full: full.rss,
        mse_full,
        predictor_names: Vec::new(),
        records,
    })
}

/// Run a search over named columns of an observation table.
///
/// Categorical predictors are rejected; expand them first with
/// [`ObservationTable::encode_dummies`].
pub fn evaluate_table(
    table: &ObservationTable,
    response: &str,
    predictors: &[String],
    max_size: usize,
    best_per_size: usize,
) -> SubsetResult<SubsetTable> {
    let y = match table.column(response)? {
        Column::Numeric(values) => values.clone(),
        Column::Categorical(_) => {
            return Err(SubsetError::input(format!(
                "response column `{response}` is not numeric"
            )));
        }
    };
    let x = table.matrix(predictors)?;

    let mut out = evaluate(&y, &x, max_size, best_per_size)?;
    out.predictor_names = predictors.to_vec();
    Ok(out)
}

fn validate_inputs(
    response: &[f64],
    predictors: &DMatrix<f64>,
    max_size: usize,
    best_per_size: usize,
) -> SubsetResult<()> {
    let n = response.len();
    let k_total = predictors.ncols();

    if predictors.nrows() != n {
        return Err(SubsetError::Dimension {
            what: "predictor matrix".to_string(),
            expected: n,
            found: predictors.nrows(),
        });
    }
    if k_total == 0 {
        return Err(SubsetError::input("no predictor columns supplied"));
    }
    if let Some(i) = response.iter().position(|v| !v.is_finite()) {
        return Err(SubsetError::input(format!(
            "response has a missing or non-finite value at row {}",
            i + 1
        )));
    }
    for (j, col) in predictors.column_iter().enumerate() {
        if let Some(i) = col.iter().position(|v| !v.is_finite()) {
            return Err(SubsetError::input(format!(
                "predictor column {} has a missing or non-finite value at row {}",
                j + 1,
                i + 1
            )));
        }
    }

    if max_size == 0 {
        return Err(SubsetError::domain("max_size must be at least 1"));
    }
    if best_per_size == 0 {
        return Err(SubsetError::domain("best_per_size must be at least 1"));
    }
    if max_size > k_total {
        return Err(SubsetError::domain(format!(
            "max_size={max_size} exceeds the number of predictors ({k_total})"
        )));
    }
    if max_size + 1 >= n {
        return Err(SubsetError::domain(format!(
            "n={n} must exceed max_size + 1 = {}",
            max_size + 1
        )));
    }
    if n < k_total + 2 {
        return Err(SubsetError::domain(format!(
            "full model with {k_total} predictors leaves no residual degrees of freedom (n={n})"
        )));
    }

    Ok(())
}

/// Fit every subset of size `p` and return the `keep` lowest-RSS candidates,
/// ordered by `(rss, enumeration index)`.
fn best_candidates<F>(
    fitter: &F,
    y: &DVector<f64>,
    predictors: &DMatrix<f64>,
    p: usize,
    keep: usize,
) -> SubsetResult<Vec<Candidate>>
where
    F: LinearFit + Sync,
{
    // The retained set is unique under the total order `(rss, idx)`, so the
    // result does not depend on how rayon splits the work.
    Combinations::new(predictors.ncols(), p)
        .enumerate()
        .par_bridge()
        .map(|(idx, columns)| fit_subset(fitter, y, predictors, idx, columns))
        .try_fold(Vec::new, |mut acc: Vec<Candidate>, cand: SubsetResult<Candidate>| {
            keep_best(&mut acc, cand?, keep);
            Ok::<_, SubsetError>(acc)
        })
        .try_reduce(Vec::new, |mut a, b| {
            for cand in b {
                keep_best(&mut a, cand, keep);
            }
            Ok(a)
        })
}

fn fit_subset<F: LinearFit>(
    fitter: &F,
    y: &DVector<f64>,
    predictors: &DMatrix<f64>,
    idx: usize,
    columns: Vec<usize>,
) -> SubsetResult<Candidate> {
    let design = design_with_intercept(predictors, &columns);
    let fit = fitter.fit(y, &design).ok_or_else(|| {
        SubsetError::domain(format!("least-squares solve failed for columns {columns:?}"))
    })?;

    Ok(Candidate {
        idx,
        columns,
        rss: fit.rss,
        coefficients: fit.coefficients,
    })
}

/// Insert `cand` into the sorted list `acc`, keeping at most `keep` entries.
fn keep_best(acc: &mut Vec<Candidate>, cand: Candidate, keep: usize) {
    let pos = acc.partition_point(|c| {
        c.rss
            .total_cmp(&cand.rss)
            .then(c.idx.cmp(&cand.idx))
            .is_lt()
    });
    if pos >= keep {
        return;
    }
    acc.insert(pos, cand);
    acc.truncate(keep);
}

fn score(cand: Candidate, rank: usize, p: usize, n: usize, tss: f64, mse_full: f64) -> SubsetRecord {
    let k = p + 1;
    let r2 = r_squared(cand.rss, tss);

    SubsetRecord {
        size: p,
        rank,
        predictors: cand.columns,
        k,
        rss: cand.rss,
        r2,
        adj_r2: adjusted_r_squared(r2, n, p),
        cp: mallows_cp(cand.rss, mse_full, n, p),
        aicc: aicc(n, cand.rss, k).ok(),
        bic: bic(n, cand.rss, k),
        coefficients: cand.coefficients,
    }
}
