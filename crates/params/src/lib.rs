//! Scheme parameters and record layouts
//!
//! Constants of the signature schemes whose corpora are analysed, and the
//! byte layout used to locate the error vector inside each stored record.

pub mod layout;
pub mod pqc;

pub use layout::RecordLayout;
pub use pqc::pqsigrm::{Pqsigrm613, SchemeParams};
