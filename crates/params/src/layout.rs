//! Fixed-stride record layouts of signature corpora
//!
//! A corpus is a flat concatenation of records. Each record holds the
//! message and the signature, optionally preceded by an 8-byte counter, and
//! the error vector occupies the first `ceil(L / 8)` bytes of the signature.

use core::ops::Range;

use sigcorr_api::{validate, Error, Result};

use crate::pqc::pqsigrm::{SchemeParams, RECORD_COUNTER_BYTES};

/// Where the error vector sits inside each record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordLayout {
    stride: usize,
    error_offset: usize,
    code_len: usize,
}

impl RecordLayout {
    /// `[counter][message][signature]` records
    pub fn with_counter(mlen: usize, crypto_bytes: usize, code_len: usize) -> Result<Self> {
        Self::custom(
            RECORD_COUNTER_BYTES + mlen + crypto_bytes,
            RECORD_COUNTER_BYTES + mlen,
            code_len,
        )
    }

    /// `[message][signature]` records
    pub fn without_counter(mlen: usize, crypto_bytes: usize, code_len: usize) -> Result<Self> {
        Self::custom(mlen + crypto_bytes, mlen, code_len)
    }

    /// Counterless stride read at the counter-prefixed offset
    ///
    /// This is how corpora written by the reference generator were read by
    /// the first collectors, and is kept so old result files can be
    /// reproduced.
    pub fn legacy(mlen: usize, crypto_bytes: usize, code_len: usize) -> Result<Self> {
        Self::custom(mlen + crypto_bytes, RECORD_COUNTER_BYTES + mlen, code_len)
    }

    /// Counter-prefixed layout for a known parameter set
    pub fn for_scheme<P: SchemeParams>() -> Result<Self> {
        Self::with_counter(P::MLEN, P::CRYPTO_BYTES, P::CODE_N)
    }

    /// Arbitrary stride and error offset
    pub fn custom(stride: usize, error_offset: usize, code_len: usize) -> Result<Self> {
        let layout = Self {
            stride,
            error_offset,
            code_len,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Check that the error field fits inside one record
    pub fn validate(&self) -> Result<()> {
        validate::parameter(self.code_len > 0, "record layout", "code length must be positive")?;
        validate::parameter(self.stride > 0, "record layout", "stride must be positive")?;
        let end = self.error_offset + self.error_bytes();
        if end > self.stride {
            return Err(Error::config(
                "record layout",
                format!(
                    "error field [{}, {}) does not fit in a {}-byte record",
                    self.error_offset, end, self.stride
                ),
            ));
        }
        Ok(())
    }

    /// Bytes per record
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Offset of the error vector inside a record
    pub fn error_offset(&self) -> usize {
        self.error_offset
    }

    /// Bit width of the error vector
    pub fn code_len(&self) -> usize {
        self.code_len
    }

    /// Packed size of the error vector
    pub fn error_bytes(&self) -> usize {
        (self.code_len + 7) / 8
    }

    /// Byte range of the error vector relative to the record start
    pub fn error_range(&self) -> Range<usize> {
        self.error_offset..self.error_offset + self.error_bytes()
    }

    /// Number of whole records in a buffer of `total` bytes
    pub fn record_count(&self, total: usize) -> usize {
        total / self.stride
    }

    /// Bytes left over after the last whole record
    pub fn trailing_bytes(&self, total: usize) -> usize {
        total % self.stride
    }
}
