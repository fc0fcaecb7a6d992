//! Scoring recovered structure against a known secret key
//!
//! The secret key of the scheme starts with a column permutation `Q` of the
//! code, stored as little-endian `u16` values. Column `Q⁻¹(i)` and column
//! `Q⁻¹(i + L/2)` are the two halves of one `(u | u + v)` coordinate, which is
//! what a correct matched pair or recovered permutation has to reproduce.

use std::collections::BTreeSet;
use std::fmt;

use sigcorr_api::{validate, Error, Result};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::permutation::Permutation;

/// Column permutation `Q` held in a secret key
///
/// Wiped from memory when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretPermutation(Vec<u16>);

impl SecretPermutation {
    /// Wrap the permutation table read from a secret key
    pub fn new(values: Vec<u16>) -> Result<Self> {
        let len = values.len();
        validate::even("secret permutation", len)?;
        let mut seen = vec![false; len];
        let bijective = values.iter().all(|&v| {
            let v = v as usize;
            v < len && !core::mem::replace(&mut seen[v], true)
        });
        if !bijective {
            let mut values = values;
            values.zeroize();
            return Err(Error::config(
                "secret permutation",
                "secret key does not start with a permutation",
            ));
        }
        Ok(Self(values))
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the permutation is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Q⁻¹` as a table: entry `i` is the position holding `i`
    fn inverse(&self) -> Zeroizing<Vec<usize>> {
        let mut inv = Zeroizing::new(vec![0usize; self.0.len()]);
        for (j, &v) in self.0.iter().enumerate() {
            inv[v as usize] = j;
        }
        inv
    }

    /// Columns that truly belong together, as `(low, high)`
    pub fn true_pairs(&self) -> BTreeSet<(usize, usize)> {
        let inv = self.inverse();
        let half = self.0.len() / 2;
        (0..half)
            .map(|i| {
                let (a, b) = (inv[i], inv[i + half]);
                (a.min(b), a.max(b))
            })
            .collect()
    }
}

impl fmt::Debug for SecretPermutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretPermutation")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

/// How many recovered pairs are true pairs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairScore {
    /// Recovered pairs that are true pairs
    pub found: usize,
    /// Number of true pairs
    pub total: usize,
}

impl fmt::Display for PairScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Found {} matched pairs out of {}", self.found, self.total)
    }
}

/// Count recovered pairs that match the secret structure
///
/// Pairs are unordered; `(a, b)` and `(b, a)` count once.
pub fn count_good_pairs(
    recovered: &BTreeSet<(usize, usize)>,
    secret: &SecretPermutation,
) -> PairScore {
    let truth = secret.true_pairs();
    let normalised: BTreeSet<(usize, usize)> = recovered
        .iter()
        .map(|&(a, b)| (a.min(b), a.max(b)))
        .collect();
    PairScore {
        found: normalised.intersection(&truth).count(),
        total: truth.len(),
    }
}

/// Check that `recovered` exposes the `(U | U + V)` structure of the key
///
/// Composing `Q⁻¹` with the recovered permutation must send the first half
/// of the columns onto the first half, and column `i + L/2` to the image of
/// column `i` shifted by `L/2`.
pub fn verify_u_uv_permutation(
    secret: &SecretPermutation,
    recovered: &Permutation,
) -> Result<bool> {
    validate::length("recovered permutation", recovered.len(), secret.len())?;
    let inv = secret.inverse();
    let half = secret.len() / 2;
    Ok((0..half).all(|i| {
        let left = recovered.get(inv[i]);
        let right = recovered.get(inv[i + half]);
        left < half && right == left + half
    }))
}
