//! Signature corpus files

use std::fs;
use std::path::Path;

use sigcorr_algorithms::SampleSet;
use sigcorr_api::{IoResultExt, Result};
use sigcorr_params::RecordLayout;
use tracing::info;

/// Load a whole corpus into memory
pub fn read_corpus(path: impl AsRef<Path>, layout: RecordLayout) -> Result<SampleSet> {
    let path = path.as_ref();
    let data = fs::read(path).on_resource(path.display().to_string())?;
    let bytes = data.len();
    let samples = SampleSet::from_bytes(data, layout)?;
    info!(
        path = %path.display(),
        bytes,
        records = samples.len(),
        stride = layout.stride(),
        "corpus loaded"
    );
    Ok(samples)
}

/// Store a corpus, records in order
pub fn write_corpus(path: impl AsRef<Path>, samples: &SampleSet) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, samples.as_bytes()).on_resource(path.display().to_string())
}
