//! Matched pair lists
//!
//! One line per column, `i partner`, in column order. Readers accept any
//! whitespace between the two numbers and skip blank lines.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use sigcorr_algorithms::PartnerMapping;
use sigcorr_api::{Error, IoResultExt, Result, ResultExt};

/// Write one `i partner` line per column
pub fn write_pairs(path: impl AsRef<Path>, mapping: &PartnerMapping) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, mapping.lines()).on_resource(path.display().to_string())
}

/// Read a pair list as a set of `(low, high)` pairs
pub fn read_pairs(path: impl AsRef<Path>) -> Result<BTreeSet<(usize, usize)>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).on_resource(path.display().to_string())?;
    parse_pairs(&text)
}

/// Parse pair lines into a set of `(low, high)` pairs
pub fn parse_pairs(text: &str) -> Result<BTreeSet<(usize, usize)>> {
    let mut pairs = BTreeSet::new();
    for (number, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let (a, b) = match (fields.next(), fields.next(), fields.next()) {
            (None, _, _) => continue,
            (Some(a), Some(b), None) => (a, b),
            _ => return Err(malformed(number + 1)),
        };
        let a = a.parse::<usize>().wrap_err(|| malformed(number + 1))?;
        let b = b.parse::<usize>().wrap_err(|| malformed(number + 1))?;
        pairs.insert((a.min(b), a.max(b)));
    }
    Ok(pairs)
}

fn malformed(line: usize) -> Error {
    Error::config(
        "pair list",
        format!("line {} is not two column indices", line),
    )
}
