//! Little-endian `u16` tables
//!
//! Secret keys of the scheme start with the column permutation as `L`
//! little-endian `u16` values; recovered permutations are written in the
//! same format so the two can be compared directly.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use sigcorr_algorithms::{Permutation, SecretPermutation};
use sigcorr_api::{Error, IoResultExt, Result};
use zeroize::Zeroize;

fn read_u16s(path: &Path, count: usize) -> Result<Vec<u16>> {
    let resource = path.display().to_string();
    let file = File::open(path).on_resource(resource.clone())?;
    let available = file.metadata().on_resource(resource.clone())?.len();
    let needed = 2 * count as u64;
    if available < needed {
        return Err(Error::InvalidLength {
            context: "u16 table",
            expected: needed as usize,
            actual: available as usize,
        });
    }

    let mut values = vec![0u16; count];
    BufReader::new(file)
        .take(needed)
        .read_u16_into::<LittleEndian>(&mut values)
        .on_resource(resource)?;
    Ok(values)
}

/// Read the first `len` entries of a `u16` permutation file
pub fn read_permutation(path: impl AsRef<Path>, len: usize) -> Result<Permutation> {
    let values = read_u16s(path.as_ref(), len)?;
    Permutation::new(values.into_iter().map(usize::from).collect())
}

/// Write a permutation as little-endian `u16` values
pub fn write_permutation(path: impl AsRef<Path>, perm: &Permutation) -> Result<()> {
    let path = path.as_ref();
    if let Some(&too_big) = perm.as_slice().iter().find(|&&v| v > u16::MAX as usize) {
        return Err(Error::config(
            "permutation file",
            format!("column {} does not fit in 16 bits", too_big),
        ));
    }

    let resource = path.display().to_string();
    let mut out = BufWriter::new(File::create(path).on_resource(resource.clone())?);
    for &v in perm.as_slice() {
        out.write_u16::<LittleEndian>(v as u16)
            .on_resource(resource.clone())?;
    }
    out.flush().on_resource(resource)
}

/// Read the column permutation at the start of a secret key file
///
/// The raw key bytes are wiped once the permutation is extracted.
pub fn read_secret_permutation(path: impl AsRef<Path>, len: usize) -> Result<SecretPermutation> {
    let path = path.as_ref();
    let mut bytes = std::fs::read(path).on_resource(path.display().to_string())?;
    let result = if bytes.len() < 2 * len {
        Err(Error::InvalidLength {
            context: "secret key",
            expected: 2 * len,
            actual: bytes.len(),
        })
    } else {
        let mut values = vec![0u16; len];
        LittleEndian::read_u16_into(&bytes[..2 * len], &mut values);
        SecretPermutation::new(values)
    };
    bytes.zeroize();
    result
}
