//! # sigcorr
//!
//! Statistical analysis of code-based signature corpora.
//!
//! Given many signatures produced with one secret key, sigcorr estimates the
//! pairwise Pearson correlation of the bits of the error vector carried in
//! every signature, derives the best-correlated partner of each column, and
//! applies the permutation and half-fold transforms used to expose the hidden
//! `(U | U + V)` structure of the code.
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`sigcorr-api`]: error type and validation helpers
//! - [`sigcorr-internal`]: packed bit views
//! - [`sigcorr-params`]: scheme constants and record layouts
//! - [`sigcorr-algorithms`]: correlation, matching and transforms
//! - [`sigcorr-utils`]: file formats
//!
//! The [`pipeline`] module strings these together the way the `sigcorr`
//! binary does.

#![forbid(unsafe_code)]

pub use sigcorr_algorithms as algorithms;
pub use sigcorr_api as api;
pub use sigcorr_internal as internal;
pub use sigcorr_params as params;
pub use sigcorr_utils as utils;

pub mod pipeline;

/// Common imports for sigcorr users
pub mod prelude {
    pub use crate::api::{Error, Result};

    pub use crate::params::{Pqsigrm613, RecordLayout, SchemeParams};

    pub use crate::algorithms::{
        CorrelationReducer, CorrelationTable, FoldPath, FoldStep, MatchedPairSolver, Normalization,
        PartnerMapping, PearsonMatrix, Permutation, ReducerConfig, SampleSet, SecretPermutation,
    };

    pub use crate::pipeline::{matched_pairs, MatchedPairsOptions};
}
