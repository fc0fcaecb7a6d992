//! Pearson coefficients from finished correlation tables

use rayon::prelude::*;
use sigcorr_api::{validate, Error, Result};

use super::table::CorrelationTable;

/// Scaling applied to a pair covariance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Normalization {
    /// `cov / sqrt((1 - mX²)(1 - mY²))`, the Pearson coefficient of two spin
    /// columns, always within `[-1, 1]`
    #[default]
    Textbook,
    /// `cov / sqrt((n - mX²)(n - mY²))`, the scaling of the legacy collector
    /// tools
    ///
    /// The denominator is close to `n` for every pair, so a row ranks its
    /// partners by covariance rather than by correlation.
    Legacy,
}

impl Normalization {
    #[inline]
    fn coefficient(self, samples: f64, mean_xy: f64, mean_x: f64, mean_y: f64) -> f64 {
        let covariance = mean_xy - mean_x * mean_y;
        match self {
            // For spins the variance of a column is `1 - mean^2`
            Normalization::Textbook => {
                let scale = ((1.0 - mean_x * mean_x) * (1.0 - mean_y * mean_y)).sqrt();
                (covariance / scale).clamp(-1.0, 1.0)
            }
            Normalization::Legacy => {
                covariance / ((samples - mean_x * mean_x) * (samples - mean_y * mean_y)).sqrt()
            }
        }
    }
}

/// Symmetric matrix of pairwise Pearson coefficients
///
/// The diagonal is zero rather than one: self-correlation carries no
/// information for pair matching. Pairs touching a zero-variance column hold
/// NaN when the matrix was finished leniently.
#[derive(Clone, Debug, PartialEq)]
pub struct PearsonMatrix {
    len: usize,
    values: Vec<f64>,
    degenerate: Vec<usize>,
}

impl PearsonMatrix {
    /// Finish a table with [`Normalization::Textbook`], failing on the first
    /// zero-variance column
    pub fn finish(table: &CorrelationTable) -> Result<Self> {
        Self::finish_with(table, Normalization::Textbook)
    }

    /// Finish a table with [`Normalization::Textbook`], writing NaN for every
    /// pair that touches a zero-variance column
    pub fn finish_lenient(table: &CorrelationTable) -> Result<Self> {
        Self::finish_lenient_with(table, Normalization::Textbook)
    }

    /// Finish a table, failing on the first zero-variance column
    pub fn finish_with(table: &CorrelationTable, normalization: Normalization) -> Result<Self> {
        let n = table.samples();
        if n == 0 {
            return Err(Error::DegenerateStatistics {
                column: 0,
                samples: 0,
            });
        }
        if let Some(column) = degenerate_columns(table).next() {
            return Err(Error::DegenerateStatistics { column, samples: n });
        }
        Self::finish_lenient_with(table, normalization)
    }

    /// Finish a table, writing NaN for every pair that touches a
    /// zero-variance column
    pub fn finish_lenient_with(
        table: &CorrelationTable,
        normalization: Normalization,
    ) -> Result<Self> {
        let len = table.len();
        let n = table.samples() as f64;
        let degenerate: Vec<usize> = degenerate_columns(table).collect();

        let means: Vec<f64> = table.sum_x().iter().map(|&s| s as f64 / n).collect();
        let mut flagged = vec![false; len];
        for &j in &degenerate {
            flagged[j] = true;
        }

        let mut values = Vec::new();
        values
            .try_reserve_exact(len * len)
            .map_err(|_| Error::Allocation {
                context: "pearson matrix",
                bytes: len * len * core::mem::size_of::<f64>(),
            })?;
        values.resize(len * len, 0.0);

        // Each row is computed on its own; (j, k) and (k, j) evaluate the same
        // commutative expression, so the result is exactly symmetric.
        values.par_chunks_mut(len).enumerate().for_each(|(j, row)| {
            for (k, value) in row.iter_mut().enumerate() {
                *value = if j == k {
                    0.0
                } else if flagged[j] || flagged[k] {
                    f64::NAN
                } else {
                    let mean_xy = table.pair(j, k) as f64 / n;
                    normalization.coefficient(n, mean_xy, means[j], means[k])
                };
            }
        });

        Ok(Self {
            len,
            values,
            degenerate,
        })
    }

    /// Wrap a hand-built square matrix given row by row
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let len = rows.len();
        let mut values = Vec::with_capacity(len * len);
        for row in rows {
            validate::length("pearson row", row.as_ref().len(), len)?;
            values.extend_from_slice(row.as_ref());
        }
        Ok(Self {
            len,
            values,
            degenerate: Vec::new(),
        })
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the matrix has no columns
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Coefficient of columns `j` and `k`
    pub fn get(&self, j: usize, k: usize) -> f64 {
        self.values[j * self.len + k]
    }

    /// Row `j`
    pub fn row(&self, j: usize) -> &[f64] {
        &self.values[j * self.len..(j + 1) * self.len]
    }

    /// All coefficients, row-major
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Columns found to have zero variance
    pub fn degenerate_columns(&self) -> &[usize] {
        &self.degenerate
    }

    /// Check exact symmetry, treating NaN as equal to NaN
    pub fn is_symmetric(&self) -> bool {
        (0..self.len).all(|j| {
            (j + 1..self.len).all(|k| {
                let (a, b) = (self.get(j, k), self.get(k, j));
                a == b || (a.is_nan() && b.is_nan())
            })
        })
    }
}

fn degenerate_columns(table: &CorrelationTable) -> impl Iterator<Item = usize> + '_ {
    let n = table.samples();
    table
        .sum_x()
        .iter()
        .enumerate()
        .filter(move |&(_, &s)| s.unsigned_abs() == n)
        .map(|(j, _)| j)
}
