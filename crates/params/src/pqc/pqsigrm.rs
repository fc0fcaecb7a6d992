//! Constants for the pqsigrm Reed-Muller signature scheme

/// Message length used by the corpus generator
pub const PQSIGRM_MLEN: usize = 32;

/// Width of the counter field prefixed to each stored record
pub const RECORD_COUNTER_BYTES: usize = 8;

/// Common trait for code-based signature parameter sets
pub trait SchemeParams: Send + Sync + 'static {
    /// Parameter set name
    const NAME: &'static str;

    /// Code length, the bit width of the error vector
    const CODE_N: usize;
    /// Code dimension
    const CODE_K: usize;
    /// Reed-Muller order r
    const CODE_R: usize;
    /// Reed-Muller log-length m
    const CODE_M: usize;

    /// Signature size in bytes
    const CRYPTO_BYTES: usize;
    /// Message length in bytes stored alongside each signature
    const MLEN: usize = PQSIGRM_MLEN;

    /// Number of rows appended to the public code
    const K_APP: usize;
}

/// pqsigrm-613 (RM(6, 13), n = 8192)
pub struct Pqsigrm613;

impl SchemeParams for Pqsigrm613 {
    const NAME: &'static str = "pqsigrm-613";

    const CODE_N: usize = 8192;
    const CODE_K: usize = 4096;
    const CODE_R: usize = 6;
    const CODE_M: usize = 13;

    // salt (64 bits) || error vector || padding
    const CRYPTO_BYTES: usize = (64 + 8192 + 64) / 8;

    const K_APP: usize = 2;
}
