//! Running sums for pairwise column correlation
//!
//! Every column is read in spin form (`+1` for a clear bit, `-1` for a set
//! bit). The table keeps the sum of each column and the sum of every
//! pairwise product over the strict upper triangle. All arithmetic is exact
//! integer arithmetic, so tables built from any partition of the same
//! samples merge to identical contents.

use sigcorr_api::{validate, Error, Result};
use sigcorr_internal::{BitUnpacker, Bits};

/// Number of unordered column pairs for `len` columns
#[inline(always)]
pub const fn pair_count(len: usize) -> usize {
    len * len.saturating_sub(1) / 2
}

/// Position of the pair `(j, k)`, `j < k < len`, in the packed triangle
///
/// Rows are stored one after the other: row `j` holds the pairs
/// `(j, j + 1) .. (j, len - 1)`.
#[inline(always)]
pub const fn pair_index(len: usize, j: usize, k: usize) -> usize {
    debug_assert!(j < k && k < len);
    j * (2 * len - j - 1) / 2 + (k - j - 1)
}

fn zeroed(count: usize, context: &'static str) -> Result<Vec<i64>> {
    let mut v = Vec::new();
    v.try_reserve_exact(count).map_err(|_| Error::Allocation {
        context,
        bytes: count.saturating_mul(core::mem::size_of::<i64>()),
    })?;
    v.resize(count, 0);
    Ok(v)
}

/// Accumulator of per-column and per-pair spin sums
#[derive(Clone, Debug)]
pub struct CorrelationTable {
    len: usize,
    n: u64,
    sum_x: Vec<i64>,
    sum_xy: Vec<i64>,
    // Unpacked lanes of the sample being accumulated
    lanes: Vec<i8>,
}

impl CorrelationTable {
    /// Create an empty table for `len` columns
    pub fn new(len: usize) -> Result<Self> {
        validate::parameter(len >= 1, "correlation table", "at least one column is required")?;
        Ok(Self {
            len,
            n: 0,
            sum_x: zeroed(len, "correlation column sums")?,
            sum_xy: zeroed(pair_count(len), "correlation pair sums")?,
            lanes: vec![0; len],
        })
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: a table has at least one column
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of samples accumulated so far
    pub fn samples(&self) -> u64 {
        self.n
    }

    /// Per-column spin sums
    pub fn sum_x(&self) -> &[i64] {
        &self.sum_x
    }

    /// Packed upper-triangle pair sums, see [`pair_index`]
    pub fn sum_xy(&self) -> &[i64] {
        &self.sum_xy
    }

    /// Pair sum for any two columns
    ///
    /// The diagonal is the sample count, since every spin squares to one.
    pub fn pair(&self, j: usize, k: usize) -> i64 {
        match j.cmp(&k) {
            core::cmp::Ordering::Less => self.sum_xy[pair_index(self.len, j, k)],
            core::cmp::Ordering::Greater => self.sum_xy[pair_index(self.len, k, j)],
            core::cmp::Ordering::Equal => self.n as i64,
        }
    }

    /// Add one sample
    ///
    /// Only the first [`len`](Self::len) bits of `sample` are read.
    pub fn accumulate(&mut self, sample: Bits<'_>) -> Result<()> {
        validate::min_length("correlation sample", sample.len(), self.len)?;
        self.accumulate_unchecked(sample);
        Ok(())
    }

    /// Add one sample already known to be wide enough
    #[inline]
    pub(crate) fn accumulate_unchecked(&mut self, sample: Bits<'_>) {
        let Self {
            len,
            n,
            sum_x,
            sum_xy,
            lanes,
        } = self;
        let len = *len;

        BitUnpacker::unpack_into(sample.as_bytes(), len, lanes);

        let mut row_start = 0;
        for j in 0..len {
            let sj = lanes[j];
            sum_x[j] += sj as i64;

            let row_len = len - j - 1;
            let row = &mut sum_xy[row_start..row_start + row_len];
            for (acc, &sk) in row.iter_mut().zip(&lanes[j + 1..]) {
                *acc += (sj * sk) as i64;
            }
            row_start += row_len;
        }
        *n += 1;
    }

    /// Fold the sums of `other` into this table
    pub fn merge(&mut self, other: &CorrelationTable) -> Result<()> {
        if other.len != self.len {
            return Err(Error::config(
                "correlation merge",
                format!(
                    "cannot merge a {}-column table into a {}-column table",
                    other.len, self.len
                ),
            ));
        }
        self.n += other.n;
        for (acc, v) in self.sum_x.iter_mut().zip(&other.sum_x) {
            *acc += v;
        }
        for (acc, v) in self.sum_xy.iter_mut().zip(&other.sum_xy) {
            *acc += v;
        }
        Ok(())
    }

    /// Reset every sum to zero, keeping the allocation
    pub fn clear(&mut self) {
        self.n = 0;
        self.sum_x.iter_mut().for_each(|v| *v = 0);
        self.sum_xy.iter_mut().for_each(|v| *v = 0);
    }
}

impl PartialEq for CorrelationTable {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.n == other.n
            && self.sum_x == other.sum_x
            && self.sum_xy == other.sum_xy
    }
}

impl Eq for CorrelationTable {}
