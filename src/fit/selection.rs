//! Model-size selection over a best-subsets table.
//!
//! Each criterion looks only at the rank-1 subset of every size:
//! - adjusted R²: maximum
//! - Cp, AICc, BIC: minimum (AICc skips sizes where it is undefined)
//! - "Cp ≈ p": smallest size whose `Cp <= p + 1`
//!
//! Ties go to the smaller model.

use crate::domain::{CriterionChoice, SubsetRecord, SubsetTable};

pub fn choose(table: &SubsetTable) -> CriterionChoice {
    let best: Vec<&SubsetRecord> = table.best().collect();

    CriterionChoice {
        adj_r2: argmin_size(&best, |r| Some(-r.adj_r2)),
        cp: argmin_size(&best, |r| Some(r.cp)),
        cp_within_p: best
            .iter()
            .find(|r| r.cp <= r.k as f64)
            .map(|r| r.size),
        aicc: argmin_size(&best, |r| r.aicc),
        bic: argmin_size(&best, |r| Some(r.bic)),
    }
}

/// Size with the smallest key; strict `<` keeps the first (smallest) size on ties.
fn argmin_size<F>(records: &[&SubsetRecord], key: F) -> Option<usize>
where
    F: Fn(&SubsetRecord) -> Option<f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for r in records {
        let Some(v) = key(*r).filter(|v| v.is_finite()) else {
            continue;
        };
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((r.size, v)),
        }
    }
    best.map(|(size, _)| size)
}
