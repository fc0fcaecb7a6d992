//! In-memory corpus of error vectors
//!
//! A [`SampleSet`] owns the raw record buffer exactly as it was stored and
//! exposes the error vector of each record as a packed bit view. Transforms
//! rewrite the error field in place, so the rest of each record (counter,
//! message, salt) is preserved byte for byte.

use rayon::prelude::*;
use sigcorr_api::{validate, Error, Result};
use sigcorr_internal::{byte_len, Bits, BitsMut};
use sigcorr_params::RecordLayout;
use tracing::warn;

/// Fixed-stride records with an embedded error vector each
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleSet {
    data: Vec<u8>,
    layout: RecordLayout,
    count: usize,
}

impl SampleSet {
    /// Wrap a raw corpus buffer
    ///
    /// Trailing bytes that do not form a whole record are dropped.
    pub fn from_bytes(mut data: Vec<u8>, layout: RecordLayout) -> Result<Self> {
        layout.validate()?;
        let count = layout.record_count(data.len());
        let trailing = layout.trailing_bytes(data.len());
        if trailing != 0 {
            warn!(
                trailing,
                stride = layout.stride(),
                "corpus size is not a multiple of the record stride; ignoring trailing bytes"
            );
        }
        data.truncate(count * layout.stride());
        Ok(Self {
            data,
            layout,
            count,
        })
    }

    /// Build a set from bare packed error vectors of `code_len` bits
    pub fn from_error_vectors<I, V>(vectors: I, code_len: usize) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<[u8]>,
    {
        let width = byte_len(code_len);
        let layout = RecordLayout::custom(width, 0, code_len)?;
        let mut data = Vec::new();
        for vector in vectors {
            let vector = vector.as_ref();
            validate::length("error vector", vector.len(), width)?;
            data.extend_from_slice(vector);
        }
        Self::from_bytes(data, layout)
    }

    /// Build a set from unpacked rows holding one `0`/`1` value per column
    pub fn from_bit_rows<I, R>(rows: I, code_len: usize) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let mut packed = Vec::new();
        for row in rows {
            let row = row.as_ref();
            validate::length("bit row", row.len(), code_len)?;
            let mut bytes = vec![0u8; byte_len(code_len)];
            for (j, &bit) in row.iter().enumerate() {
                if bit > 1 {
                    return Err(Error::config("bit row", format!("value {} is not a bit", bit)));
                }
                bytes[j / 8] |= bit << (j % 8);
            }
            packed.push(bytes);
        }
        Self::from_error_vectors(packed, code_len)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if the set holds no samples
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Record layout of the underlying buffer
    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }

    /// Bit width of every error vector
    pub fn code_len(&self) -> usize {
        self.layout.code_len()
    }

    /// Error vector of sample `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn sample(&self, index: usize) -> Bits<'_> {
        assert!(index < self.count, "sample {} out of range {}", index, self.count);
        let start = index * self.layout.stride();
        let range = self.layout.error_range();
        Bits::new(
            &self.data[start + range.start..start + range.end],
            self.layout.code_len(),
        )
    }

    /// Mutable error vector of sample `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn sample_mut(&mut self, index: usize) -> BitsMut<'_> {
        assert!(index < self.count, "sample {} out of range {}", index, self.count);
        let start = index * self.layout.stride();
        let range = self.layout.error_range();
        BitsMut::new(
            &mut self.data[start + range.start..start + range.end],
            self.layout.code_len(),
        )
    }

    /// Iterate over all error vectors in record order
    pub fn iter(&self) -> impl Iterator<Item = Bits<'_>> + '_ {
        (0..self.count).map(move |i| self.sample(i))
    }

    /// Run `f` on every error vector, one record per task
    ///
    /// Records are disjoint, so each one is handed to exactly one worker.
    pub fn par_for_each_mut<F>(&mut self, f: F)
    where
        F: Fn(BitsMut<'_>) + Send + Sync,
    {
        let range = self.layout.error_range();
        let code_len = self.layout.code_len();
        self.data
            .par_chunks_mut(self.layout.stride())
            .for_each(|record| f(BitsMut::new(&mut record[range.clone()], code_len)));
    }

    /// Raw record buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
