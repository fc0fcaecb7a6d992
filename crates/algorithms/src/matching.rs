//! Matched pairs from a Pearson matrix

use std::collections::BTreeSet;
use std::fmt::Write as _;

use rayon::prelude::*;
use sigcorr_api::{Error, Result};
use tracing::{info, warn};

use crate::correlation::PearsonMatrix;

/// Best-correlated partner of every column
///
/// The mapping is expected to pair columns up, but nothing enforces it:
/// [`is_involution`](Self::is_involution) reports whether it does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartnerMapping {
    pairs: Vec<usize>,
}

impl PartnerMapping {
    /// Wrap a partner table, checking every entry is a valid column
    pub fn from_partners(pairs: Vec<usize>) -> Result<Self> {
        let len = pairs.len();
        if let Some((i, &p)) = pairs.iter().enumerate().find(|&(_, &p)| p >= len) {
            return Err(Error::config(
                "partner mapping",
                format!("column {} is matched with {}, outside 0..{}", i, p, len),
            ));
        }
        Ok(Self { pairs })
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if the mapping covers no columns
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Partner of column `i`
    pub fn partner(&self, i: usize) -> usize {
        self.pairs[i]
    }

    /// Partner table indexed by column
    pub fn as_slice(&self) -> &[usize] {
        &self.pairs
    }

    /// Check `pairs[pairs[i]] == i` for every column
    pub fn is_involution(&self) -> bool {
        self.pairs.iter().enumerate().all(|(i, &p)| self.pairs[p] == i)
    }

    /// Columns matched with themselves
    pub fn self_matched(&self) -> Vec<usize> {
        self.pairs
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i == p)
            .map(|(i, _)| i)
            .collect()
    }

    /// Distinct pairs as `(low, high)`, self-matches included as `(i, i)`
    pub fn unordered_pairs(&self) -> BTreeSet<(usize, usize)> {
        self.pairs
            .iter()
            .enumerate()
            .map(|(i, &p)| (i.min(p), i.max(p)))
            .collect()
    }

    /// One `i partner` line per column, in column order
    pub fn lines(&self) -> String {
        let mut out = String::with_capacity(self.pairs.len() * 12);
        for (i, p) in self.pairs.iter().enumerate() {
            // Writing to a String cannot fail
            let _ = writeln!(out, "{} {}", i, p);
        }
        out
    }
}

/// Picks the most positively correlated partner of each column
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchedPairSolver;

impl MatchedPairSolver {
    /// Row-wise argmax of `pearson`
    ///
    /// Ties go to the smallest column and NaN entries are never chosen. The
    /// zero diagonal takes part in the argmax, so a column whose off-diagonal
    /// coefficients are all negative is matched with itself.
    pub fn solve(pearson: &PearsonMatrix) -> PartnerMapping {
        let pairs: Vec<usize> = (0..pearson.len())
            .into_par_iter()
            .map(|i| best_partner(pearson.row(i), i))
            .collect();
        let mapping = PartnerMapping { pairs };

        let involution = mapping.is_involution();
        let selfies = mapping.self_matched();
        info!(columns = mapping.len(), involution, "matched pairs computed");
        if !involution {
            warn!("partner mapping is not an involution");
        }
        if !selfies.is_empty() {
            warn!(
                count = selfies.len(),
                first = selfies[0],
                "columns matched with themselves; all their coefficients are negative"
            );
        }
        mapping
    }
}

fn best_partner(row: &[f64], fallback: usize) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (k, &value) in row.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if value <= top => {}
            _ => best = Some((k, value)),
        }
    }
    best.map_or(fallback, |(k, _)| k)
}
