//! Constants for code-based signature schemes under analysis

pub mod pqsigrm;
