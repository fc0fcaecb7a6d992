//! Packed bit vectors and sign unpacking
//!
//! Error vectors are stored packed, eight columns per byte: column `j` lives
//! in byte `j / 8` at bit position `j % 8`. This layout is fixed by the
//! signature format and every helper here preserves it.

/// Number of bytes needed to hold `bits` packed bits
#[inline(always)]
pub const fn byte_len(bits: usize) -> usize {
    (bits + 7) / 8
}

const fn build_sign_table() -> [[i8; 8]; 256] {
    let mut table = [[0i8; 8]; 256];
    let mut byte = 0;
    while byte < 256 {
        let mut bit = 0;
        while bit < 8 {
            table[byte][bit] = 1 - 2 * ((byte >> bit) & 1) as i8;
            bit += 1;
        }
        byte += 1;
    }
    table
}

static SIGN_TABLE: [[i8; 8]; 256] = build_sign_table();

/// Expands packed bytes into spin lanes
///
/// Bit value `0` maps to `+1` and bit value `1` maps to `-1`, so the product
/// of two lanes equals `1 - 2 * (a ^ b)`.
pub struct BitUnpacker;

impl BitUnpacker {
    /// Sign lanes of one byte, indexed by bit position
    #[inline(always)]
    pub fn signs(byte: u8) -> [i8; 8] {
        SIGN_TABLE[byte as usize]
    }

    /// Unpack the first `len` bits of `bytes` into `out[..len]`
    ///
    /// # Panics
    ///
    /// Panics if `bytes` holds fewer than `len` bits or `out` is shorter
    /// than `len`.
    pub fn unpack_into(bytes: &[u8], len: usize, out: &mut [i8]) {
        let out = &mut out[..len];
        for (lanes, &byte) in out.chunks_mut(8).zip(&bytes[..byte_len(len)]) {
            let signs = Self::signs(byte);
            lanes.copy_from_slice(&signs[..lanes.len()]);
        }
    }
}

#[inline(always)]
fn read_bit(bytes: &[u8], index: usize) -> bool {
    (bytes[index / 8] >> (index % 8)) & 1 == 1
}

/// Read-only view of a packed bit vector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bits<'a> {
    bytes: &'a [u8],
    len: usize,
}

impl<'a> Bits<'a> {
    /// View the first `len` bits of `bytes`
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is too short for `len` bits.
    pub fn new(bytes: &'a [u8], len: usize) -> Self {
        assert!(
            bytes.len() >= byte_len(len),
            "{} bytes cannot hold {} bits",
            bytes.len(),
            len
        );
        Self {
            bytes: &bytes[..byte_len(len)],
            len,
        }
    }

    /// Number of bits in the view
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the view is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit `index`
    #[inline(always)]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit {} out of range {}", index, self.len);
        read_bit(self.bytes, index)
    }

    /// Underlying packed bytes
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Restrict the view to its first `len` bits
    pub fn truncate(self, len: usize) -> Self {
        assert!(len <= self.len, "cannot widen a view from {} to {}", self.len, len);
        Self::new(self.bytes, len)
    }

    /// Iterate over the bits in column order
    pub fn iter(&self) -> impl Iterator<Item = bool> + 'a {
        let bytes = self.bytes;
        (0..self.len).map(move |j| read_bit(bytes, j))
    }
}

/// Mutable view of a packed bit vector
#[derive(Debug)]
pub struct BitsMut<'a> {
    bytes: &'a mut [u8],
    len: usize,
}

impl<'a> BitsMut<'a> {
    /// View the first `len` bits of `bytes` mutably
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is too short for `len` bits.
    pub fn new(bytes: &'a mut [u8], len: usize) -> Self {
        assert!(
            bytes.len() >= byte_len(len),
            "{} bytes cannot hold {} bits",
            bytes.len(),
            len
        );
        Self {
            bytes: &mut bytes[..byte_len(len)],
            len,
        }
    }

    /// Number of bits in the view
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the view is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit `index`
    #[inline(always)]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit {} out of range {}", index, self.len);
        read_bit(&*self.bytes, index)
    }

    /// Set bit `index` to `value`
    #[inline(always)]
    pub fn set(&mut self, index: usize, value: bool) {
        assert!(index < self.len, "bit {} out of range {}", index, self.len);
        let mask = 1u8 << (index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    /// Flip bit `index`
    #[inline(always)]
    pub fn flip(&mut self, index: usize) {
        assert!(index < self.len, "bit {} out of range {}", index, self.len);
        self.bytes[index / 8] ^= 1u8 << (index % 8);
    }

    /// Exchange bits `a` and `b`
    #[inline(always)]
    pub fn swap(&mut self, a: usize, b: usize) {
        let (x, y) = (self.get(a), self.get(b));
        if x != y {
            self.flip(a);
            self.flip(b);
        }
    }

    /// Read-only view of the same bits
    pub fn as_bits(&self) -> Bits<'_> {
        Bits {
            bytes: &*self.bytes,
            len: self.len,
        }
    }
}
