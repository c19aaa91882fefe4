//! Ordinary least squares, the linear fit behind every subset score.
//!
//! The evaluator only needs three things from a fit: the coefficients, the
//! residual sum of squares and the residual degrees of freedom. Those are
//! exposed through the [`LinearFit`] trait so the enumeration code does not
//! care how the solve is done.
//!
//! Implementation choices:
//! - We use SVD to solve the least-squares problem robustly for tall design
//!   matrices. (Nalgebra's `QR::solve` is intended for square systems and will
//!   panic for non-square matrices.)
//! - Near-zero singular values are truncated, so collinear columns (e.g. a full
//!   set of dummy indicators next to the intercept) yield the minimum-norm
//!   solution instead of failing.

use nalgebra::{DMatrix, DVector};

/// Result of one least-squares fit.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFitOutput {
    /// Coefficients in design-column order (intercept first when present).
    pub coefficients: Vec<f64>,
    /// Residual sum of squares.
    pub rss: f64,
    /// Residual degrees of freedom (`n - columns`).
    pub df: usize,
}

/// A least-squares solver for `response ~ design`.
///
/// Returns `None` when the system cannot be solved to finite values.
pub trait LinearFit {
    fn fit(&self, response: &DVector<f64>, design: &DMatrix<f64>) -> Option<LinearFitOutput>;
}

/// SVD-backed solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvdLinearFit;

impl LinearFit for SvdLinearFit {
    fn fit(&self, response: &DVector<f64>, design: &DMatrix<f64>) -> Option<LinearFitOutput> {
        let beta = solve_least_squares(design, response)?;
        let fitted = design * &beta;
        let rss = response
            .iter()
            .zip(fitted.iter())
            .map(|(y, f)| (y - f) * (y - f))
            .sum::<f64>();
        if !rss.is_finite() {
            return None;
        }

        Some(LinearFitOutput {
            coefficients: beta.iter().copied().collect(),
            rss,
            df: design.nrows().saturating_sub(design.ncols()),
        })
    }
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Build `[1 | X[:, columns]]` for an intercept model on the selected columns.
pub fn design_with_intercept(predictors: &DMatrix<f64>, columns: &[usize]) -> DMatrix<f64> {
    let n = predictors.nrows();
    let mut design = DMatrix::<f64>::zeros(n, columns.len() + 1);
    design.column_mut(0).fill(1.0);
    for (j, &col) in columns.iter().enumerate() {
        design.column_mut(j + 1).copy_from(&predictors.column(col));
    }
    design
}
