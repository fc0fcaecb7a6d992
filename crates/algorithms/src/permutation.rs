//! Column permutations
//!
//! A [`Permutation`] maps every old column `j` to its new column `perm[j]`.
//! Composition helpers rearrange destinations, which is how matched pairs
//! are turned into a column order block by block.

use sigcorr_api::{validate, Error, Result};

/// Bijection on `0..len`, old column to new column
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Permutation {
    map: Vec<usize>,
}

impl Permutation {
    /// Validate and wrap a destination table
    pub fn new(map: Vec<usize>) -> Result<Self> {
        let len = map.len();
        let mut seen = vec![false; len];
        for (j, &dest) in map.iter().enumerate() {
            if dest >= len {
                return Err(Error::config(
                    "permutation",
                    format!("column {} maps to {}, outside 0..{}", j, dest, len),
                ));
            }
            if core::mem::replace(&mut seen[dest], true) {
                return Err(Error::config(
                    "permutation",
                    format!("destination {} is used more than once", dest),
                ));
            }
        }
        Ok(Self { map })
    }

    /// The permutation that moves nothing
    pub fn identity(len: usize) -> Self {
        Self {
            map: (0..len).collect(),
        }
    }

    /// Order columns pair by pair
    ///
    /// With `k` pairs `(a_i, b_i)`, column `a_i` moves to `i` and column
    /// `b_i` moves to `i + k`. The pairs must cover `0..2k` exactly once.
    pub fn from_pairs(pairs: &[(usize, usize)]) -> Result<Self> {
        let k = pairs.len();
        let mut map = vec![usize::MAX; 2 * k];
        for (i, &(a, b)) in pairs.iter().enumerate() {
            for (column, dest) in [(a, i), (b, i + k)] {
                if column >= 2 * k || map[column] != usize::MAX {
                    return Err(Error::config(
                        "permutation from pairs",
                        format!("column {} is out of range or paired twice", column),
                    ));
                }
                map[column] = dest;
            }
        }
        Ok(Self { map })
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the permutation acts on no columns
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Destination of column `j`
    #[inline]
    pub fn get(&self, j: usize) -> usize {
        self.map[j]
    }

    /// Destination table
    pub fn as_slice(&self) -> &[usize] {
        &self.map
    }

    /// Consume and return the destination table
    pub fn into_vec(self) -> Vec<usize> {
        self.map
    }

    /// Permutation undoing this one
    pub fn inverse(&self) -> Self {
        let mut map = vec![0; self.map.len()];
        for (j, &dest) in self.map.iter().enumerate() {
            map[dest] = j;
        }
        Self { map }
    }

    /// Apply `self` first and `next` afterwards
    pub fn then(&self, next: &Permutation) -> Result<Self> {
        validate::length("permutation composition", next.len(), self.len())?;
        Ok(Self {
            map: self.map.iter().map(|&dest| next.map[dest]).collect(),
        })
    }

    /// Check whether applying the permutation twice moves nothing
    pub fn is_involution(&self) -> bool {
        self.map.iter().enumerate().all(|(j, &dest)| self.map[dest] == j)
    }

    /// Cycles of length two or more, each starting at its smallest column
    ///
    /// Within a cycle, column `c[i]` moves to `c[i + 1]` and the last column
    /// moves to `c[0]`.
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.map.len()];
        let mut cycles = Vec::new();
        for start in 0..self.map.len() {
            if visited[start] || self.map[start] == start {
                visited[start] = true;
                continue;
            }
            let mut cycle = Vec::new();
            let mut j = start;
            while !visited[j] {
                visited[j] = true;
                cycle.push(j);
                j = self.map[j];
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// Exchange destinations `j` and `j + k` in every block of `2k`
    /// destinations where `swaps[j]` is set
    pub fn apply_swaps(&self, swaps: &[bool]) -> Result<Self> {
        let k = swaps.len();
        validate::parameter(k > 0, "swap pattern", "at least one swap flag is required")?;
        if self.len() % (2 * k) != 0 {
            return Err(Error::config(
                "swap pattern",
                format!("{} columns do not split into blocks of {}", self.len(), 2 * k),
            ));
        }
        let map = self
            .map
            .iter()
            .map(|&dest| {
                let offset = dest % (2 * k);
                let j = offset % k;
                match (swaps[j], offset < k) {
                    (false, _) => dest,
                    (true, true) => dest + k,
                    (true, false) => dest - k,
                }
            })
            .collect();
        Ok(Self { map })
    }

    /// Rearrange every block of `inner.len()` destinations by `inner`
    ///
    /// A column sent to position `j` of a block ends up at position
    /// `inner[j]` of the same block.
    pub fn blockwise(&self, inner: &Permutation) -> Result<Self> {
        let k = inner.len();
        validate::parameter(k > 0, "blockwise permutation", "block permutation is empty")?;
        if self.len() % k != 0 {
            return Err(Error::config(
                "blockwise permutation",
                format!("{} columns do not split into blocks of {}", self.len(), k),
            ));
        }
        let map = self
            .map
            .iter()
            .map(|&dest| dest - dest % k + inner.map[dest % k])
            .collect();
        Ok(Self { map })
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = Error;

    fn try_from(map: Vec<usize>) -> Result<Self> {
        Self::new(map)
    }
}

impl AsRef<[usize]> for Permutation {
    fn as_ref(&self) -> &[usize] {
        &self.map
    }
}
