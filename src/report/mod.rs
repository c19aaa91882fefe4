//! Reporting utilities: the predictor path across sizes and formatted output.

pub mod format;

pub use format::*;

use crate::domain::SubsetTable;

/// How the best subset changes from size `p - 1` to size `p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub size: usize,
    pub added: Vec<usize>,
    pub removed: Vec<usize>,
}

impl PathStep {
    /// True when the best subset at this size contains the previous one.
    pub fn is_nested(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Column additions/removals along the rank-1 subsets, in size order.
pub fn predictor_path(table: &SubsetTable) -> Vec<PathStep> {
    let mut out = Vec::new();
    let mut prev: Vec<usize> = Vec::new();
    for rec in table.best() {
        let added = rec
            .predictors
            .iter()
            .copied()
            .filter(|j| !prev.contains(j))
            .collect();
        let removed = prev
            .iter()
            .copied()
            .filter(|j| !rec.predictors.contains(j))
            .collect();
        out.push(PathStep {
            size: rec.size,
            added,
            removed,
        });
        prev = rec.predictors.clone();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubsetRecord;

    fn rec(size: usize, predictors: Vec<usize>) -> SubsetRecord {
        SubsetRecord {
            size,
            rank: 1,
            predictors,
            k: size + 1,
            rss: 1.0,
            r2: 0.5,
            adj_r2: 0.5,
            cp: 1.0,
            aicc: None,
            bic: 0.0,
            coefficients: Vec::new(),
        }
    }

    #[test]
    fn path_reports_swaps() {
        let table = SubsetTable {
            n: 20,
            n_predictors: 3,
            max_size: 3,
            best_per_size: 1,
            tss: 1.0,
            rss_full: 1.0,
            mse_full: 1.0,
            predictor_names: Vec::new(),
            records: vec![rec(1, vec![2]), rec(2, vec![0, 1]), rec(3, vec![0, 1, 2])],
        };

        let path = predictor_path(&table);
        assert_eq!(path.len(), 3);
        assert_eq!(path[0].added, vec![2]);
        assert!(!path[1].is_nested());
        assert_eq!(path[1].removed, vec![2]);
        assert_eq!(path[2].added, vec![2]);
        assert!(path[2].is_nested());
    }
}
