//! Correlation over sequences of half-folds
//!
//! A fold path such as `UV` first and-folds the full width, then xor-folds
//! the remaining half. Summing the correlation of every path with a given
//! number of each step exposes the structure one recursion level down.

use core::fmt;
use core::str::FromStr;

use sigcorr_api::{Error, Result};
use tracing::info;

use crate::correlation::{CorrelationReducer, CorrelationTable};
use crate::samples::SampleSet;
use crate::transform::{and_fold_half, xor_fold_half};

/// One half-fold
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FoldStep {
    /// [`and_fold_half`]
    U,
    /// [`xor_fold_half`]
    V,
}

impl FoldStep {
    /// Fold the first `len` columns of every sample in half
    pub fn apply(self, samples: &mut SampleSet, len: usize) -> Result<()> {
        match self {
            FoldStep::U => and_fold_half(samples, len),
            FoldStep::V => xor_fold_half(samples, len),
        }
    }

    fn letter(self) -> char {
        match self {
            FoldStep::U => 'U',
            FoldStep::V => 'V',
        }
    }
}

/// Sequence of half-folds, written as a string of `U` and `V`
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FoldPath(Vec<FoldStep>);

impl FoldPath {
    /// Path with no steps
    pub fn empty() -> Self {
        Self::default()
    }

    /// Steps in order
    pub fn steps(&self) -> &[FoldStep] {
        &self.0
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the path has no steps
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Width left after folding `code_len` columns along this path
    pub fn folded_width(&self, code_len: usize) -> Result<usize> {
        let steps = self.0.len();
        if steps >= usize::BITS as usize || code_len % (1usize << steps) != 0 {
            return Err(Error::config(
                "fold path",
                format!("{} columns cannot be halved {} times", code_len, steps),
            ));
        }
        Ok(code_len >> steps)
    }

    /// Fold every sample along this path, starting from `code_len` columns
    ///
    /// Returns the width left after the last step.
    pub fn apply(&self, samples: &mut SampleSet, code_len: usize) -> Result<usize> {
        let width = self.folded_width(code_len)?;
        let mut len = code_len;
        for step in &self.0 {
            step.apply(samples, len)?;
            len /= 2;
        }
        Ok(width)
    }

    fn push(&self, step: FoldStep) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }
}

impl From<Vec<FoldStep>> for FoldPath {
    fn from(steps: Vec<FoldStep>) -> Self {
        Self(steps)
    }
}

impl FromStr for FoldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| match c.to_ascii_uppercase() {
                'U' => Ok(FoldStep::U),
                'V' => Ok(FoldStep::V),
                other => Err(Error::config(
                    "fold path",
                    format!("unknown fold step '{}'", other),
                )),
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl fmt::Display for FoldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.0 {
            write!(f, "{}", step.letter())?;
        }
        Ok(())
    }
}

/// Every extension of `prefix` by exactly `u` U-steps and `v` V-steps
///
/// Paths come out in lexicographic order, U before V.
pub fn fold_paths(prefix: &FoldPath, u: usize, v: usize) -> Vec<FoldPath> {
    let mut out = Vec::new();
    extend_paths(prefix.clone(), u, v, &mut out);
    out
}

fn extend_paths(current: FoldPath, u: usize, v: usize, out: &mut Vec<FoldPath>) {
    if u == 0 && v == 0 {
        out.push(current);
        return;
    }
    if u > 0 {
        extend_paths(current.push(FoldStep::U), u - 1, v, out);
    }
    if v > 0 {
        extend_paths(current.push(FoldStep::V), u, v - 1, out);
    }
}

/// Accumulate the correlation of every fold path into one table
///
/// Every start path is extended with `u` U-steps and `v` V-steps. For each
/// resulting path a copy of `samples` is folded and reduced into a shared
/// table whose width is what the paths leave of the code length. All start
/// paths must have the same length.
pub fn correlate_paths(
    samples: &SampleSet,
    start_paths: &[FoldPath],
    u: usize,
    v: usize,
    reducer: &CorrelationReducer,
) -> Result<CorrelationTable> {
    let depth = match start_paths.split_first() {
        Some((first, rest)) if rest.iter().all(|p| p.len() == first.len()) => first.len(),
        Some(_) => {
            return Err(Error::config(
                "fold paths",
                "start paths must all have the same length",
            ))
        }
        None => return Err(Error::config("fold paths", "no start path given")),
    };

    let code_len = samples.code_len();
    let width = FoldPath::from(vec![FoldStep::U; depth + u + v]).folded_width(code_len)?;
    let mut table = CorrelationTable::new(width)?;

    for start in start_paths {
        for path in fold_paths(start, u, v) {
            let mut folded = samples.clone();
            path.apply(&mut folded, code_len)?;
            let added = reducer.reduce_into(&mut table, &folded)?;
            info!(path = %path, width, added, "fold path reduced");
        }
    }
    Ok(table)
}
