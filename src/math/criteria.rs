//! Model-fit criteria for linear models with an intercept.
//!
//! Notation: `n` observations, `p` predictors (excluding the intercept),
//! `k = p + 1` estimated coefficients.
//!
//! - `R² = 1 - RSS/TSS`
//! - `adjR² = 1 - (1 - R²)(n - 1)/(n - p - 1)`
//! - `Cp = RSS/MSE_full - n + 2(p + 1)`
//! - `AICc = n ln(RSS/n) + 2k + 2k(k + 1)/(n - k - 1)`
//! - `BIC = n ln(RSS/n) + k ln(n)`
//!
//! AIC and BIC are only defined up to an additive constant. We drop the
//! Gaussian normalisation terms entirely and count the intercept in `k`, so
//! values are comparable within this crate but not with tools that keep the
//! `n(ln 2π + 1)` term.

use crate::error::{SubsetError, SubsetResult};

/// Floor applied to `RSS/n` before taking logs (perfect fits would give `-inf`).
const MIN_RSS_PER_OBS: f64 = 1e-12;

/// Total sum of squares of `y` about its mean.
pub fn total_sum_of_squares(y: &[f64]) -> f64 {
    if y.is_empty() {
        return 0.0;
    }
    let mean = y.iter().sum::<f64>() / y.len() as f64;
    y.iter().map(|v| (v - mean) * (v - mean)).sum()
}

pub fn r_squared(rss: f64, tss: f64) -> f64 {
    1.0 - rss / tss
}

/// Adjusted R² for `p` predictors. Requires `n > p + 1`.
pub fn adjusted_r_squared(r2: f64, n: usize, p: usize) -> f64 {
    let n_f = n as f64;
    1.0 - (1.0 - r2) * (n_f - 1.0) / (n_f - p as f64 - 1.0)
}

/// Mallows' Cp against the residual mean square of the full model.
pub fn mallows_cp(rss: f64, mse_full: f64, n: usize, p: usize) -> f64 {
    rss / mse_full - n as f64 + 2.0 * (p as f64 + 1.0)
}

/// Bias-corrected AIC.
///
/// Fails with [`SubsetError::Domain`] when `n - k - 1 <= 0`, where the small
/// sample correction has no finite value.
pub fn aicc(n: usize, rss: f64, k: usize) -> SubsetResult<f64> {
    if n <= k + 1 {
        return Err(SubsetError::domain(format!(
            "AICc undefined for n={n}, k={k} (requires n - k - 1 > 0)"
        )));
    }
    let n_f = n as f64;
    let k_f = k as f64;
    Ok(log_likelihood_term(n, rss) + 2.0 * k_f + 2.0 * k_f * (k_f + 1.0) / (n_f - k_f - 1.0))
}

/// Schwarz criterion.
pub fn bic(n: usize, rss: f64, k: usize) -> f64 {
    let n_f = n as f64;
    log_likelihood_term(n, rss) + (k as f64) * n_f.ln()
}

fn log_likelihood_term(n: usize, rss: f64) -> f64 {
    let n_f = n as f64;
    let rss_per = (rss / n_f).max(MIN_RSS_PER_OBS);
    n_f * rss_per.ln()
}
