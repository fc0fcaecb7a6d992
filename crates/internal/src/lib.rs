//! Internal utilities for the sigcorr workspace
//!
//! Bit-level helpers shared by the correlation and transform code. Nothing
//! here is part of the stable public surface.

pub mod bits;

pub use bits::{byte_len, BitUnpacker, Bits, BitsMut};
