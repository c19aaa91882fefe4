//! Candidate subset enumeration.
//!
//! Subsets are emitted in lexicographic order of their (ascending) column
//! indices. The evaluator relies on that order for deterministic tie-breaks.

/// Number of `k`-subsets of `n` items, saturating at `usize::MAX`.
pub fn n_choose_k(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // Exact at every step: acc * (n - i) is divisible by (i + 1).
        acc = acc * (n - i) as u128 / (i as u128 + 1);
        if acc > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    acc as usize
}

/// Total number of subsets of sizes `1..=max_size` drawn from `n` columns.
pub fn subset_count(n: usize, max_size: usize) -> usize {
    (1..=max_size.min(n)).fold(0usize, |acc, p| acc.saturating_add(n_choose_k(n, p)))
}

/// Lexicographic iterator over `k`-subsets of `0..n`.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    current: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            current: (0..k).collect(),
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.current.clone();

        // Advance: find the rightmost slot that can still move right.
        let k = self.current.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.current[i] < self.n - k + i {
                self.current[i] += 1;
                for j in i + 1..k {
                    self.current[j] = self.current[j - 1] + 1;
                }
                break;
            }
        }

        Some(out)
    }
}
