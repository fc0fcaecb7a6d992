//! Public API types for the sigcorr workspace
//!
//! This crate provides the error taxonomy and validation helpers used
//! throughout the sigcorr ecosystem. Every fallible operation in the other
//! crates returns [`Result`].

pub mod error;

// Re-export commonly used items at the crate level for convenience
pub use error::{validate, Error, IoResultExt, Result, ResultExt};
