//! Statistical analysis of signature error vectors
//!
//! This crate holds the computational core of the toolkit:
//!
//! - [`SampleSet`]: a corpus of fixed-stride records with an error vector each
//! - [`correlation`]: exact pairwise spin sums, their parallel reduction and
//!   the Pearson coefficients derived from them
//! - [`MatchedPairSolver`]: best-correlated partner of every column
//! - [`transform`]: in-place permutation and half-folds of every sample
//! - [`paths`]: correlation summed over sequences of half-folds
//! - [`scoring`]: comparison of recovered structure with a known secret key
//!
//! All accumulation is integer arithmetic, so results do not depend on the
//! number of worker threads or on how the corpus is split between them.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod correlation;
pub mod matching;
pub mod paths;
pub mod permutation;
pub mod samples;
pub mod scoring;
pub mod transform;

pub use correlation::{
    pair_count, pair_index, CorrelationReducer, CorrelationTable, Normalization, PearsonMatrix,
    ReducerConfig, DEFAULT_CHUNK_SIZE,
};
pub use matching::{MatchedPairSolver, PartnerMapping};
pub use paths::{correlate_paths, fold_paths, FoldPath, FoldStep};
pub use permutation::Permutation;
pub use samples::SampleSet;
pub use scoring::{count_good_pairs, verify_u_uv_permutation, PairScore, SecretPermutation};
pub use transform::{and_fold_half, apply_permutation, xor_fold_half};

pub use sigcorr_api::{Error, Result};
