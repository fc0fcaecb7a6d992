//! In-place structural transforms over a whole sample set
//!
//! Every sample is transformed independently, so records are handed to the
//! rayon pool one at a time with no coordination beyond the split itself.

use sigcorr_api::{validate, Error, Result};
use sigcorr_internal::BitsMut;
use tracing::debug;

use crate::permutation::Permutation;
use crate::samples::SampleSet;

/// Move column `j` of every sample to column `perm[j]`
///
/// The permutation may be shorter than the code length; columns past its end
/// stay where they are. Each nontrivial cycle is rotated once per sample, so
/// no copy of the data set is made.
pub fn apply_permutation(samples: &mut SampleSet, perm: &Permutation) -> Result<()> {
    if perm.len() > samples.code_len() {
        return Err(Error::InvalidLength {
            context: "permutation",
            expected: samples.code_len(),
            actual: perm.len(),
        });
    }
    let cycles = perm.cycles();
    debug!(cycles = cycles.len(), samples = samples.len(), "applying permutation");
    if cycles.is_empty() {
        return Ok(());
    }
    samples.par_for_each_mut(|mut bits| {
        for cycle in &cycles {
            rotate(&mut bits, cycle);
        }
    });
    Ok(())
}

/// Carry each bit of `cycle` one step forward
fn rotate(bits: &mut BitsMut<'_>, cycle: &[usize]) {
    let mut carry = bits.get(cycle[0]);
    for &j in &cycle[1..] {
        let next = bits.get(j);
        bits.set(j, carry);
        carry = next;
    }
    bits.set(cycle[0], carry);
}

/// `bit[j] ^= bit[j + len / 2]` for every `j < len / 2`
///
/// The second half is left as it was.
pub fn xor_fold_half(samples: &mut SampleSet, len: usize) -> Result<()> {
    let half = fold_half(samples, len, "xor fold")?;
    samples.par_for_each_mut(|mut bits| {
        for j in 0..half {
            if bits.get(j + half) {
                bits.flip(j);
            }
        }
    });
    Ok(())
}

/// Clear `bit[j]` wherever it is set and `bit[j + len / 2]` is not, for
/// every `j < len / 2`
///
/// This is `bit[j] &= bit[j + len / 2]`. The second half is left as it was.
pub fn and_fold_half(samples: &mut SampleSet, len: usize) -> Result<()> {
    let half = fold_half(samples, len, "and fold")?;
    samples.par_for_each_mut(|mut bits| {
        for j in 0..half {
            if bits.get(j) && !bits.get(j + half) {
                bits.set(j, false);
            }
        }
    });
    Ok(())
}

fn fold_half(samples: &SampleSet, len: usize, context: &'static str) -> Result<usize> {
    validate::even(context, len)?;
    if len > samples.code_len() {
        return Err(Error::InvalidLength {
            context,
            expected: samples.code_len(),
            actual: len,
        });
    }
    Ok(len / 2)
}
