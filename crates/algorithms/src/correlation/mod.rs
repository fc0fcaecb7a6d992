//! Pairwise column correlation of error vectors
//!
//! [`CorrelationTable`] holds exact integer sums, [`CorrelationReducer`]
//! fills one from a whole corpus on a worker pool, and [`PearsonMatrix`]
//! turns the finished sums into coefficients.

pub mod pearson;
pub mod reducer;
pub mod table;

pub use pearson::{Normalization, PearsonMatrix};
pub use reducer::{CorrelationReducer, ReducerConfig, DEFAULT_CHUNK_SIZE};
pub use table::{pair_count, pair_index, CorrelationTable};
