//! File formats used by the sigcorr tools
//!
//! - corpora: flat concatenations of fixed-stride signature records
//! - pair lists: one `i partner` line per column
//! - `u16` tables: permutations and secret keys, little-endian

pub mod corpus;
pub mod pairs;
pub mod u16_table;

pub use corpus::{read_corpus, write_corpus};
pub use pairs::{parse_pairs, read_pairs, write_pairs};
pub use u16_table::{read_permutation, read_secret_permutation, write_permutation};
