//! End-to-end matched pair recovery

use sigcorr_algorithms::{
    apply_permutation, correlate_paths, CorrelationReducer, FoldPath, MatchedPairSolver,
    Normalization, PartnerMapping, PearsonMatrix, Permutation, ReducerConfig, SampleSet,
};
use sigcorr_api::Result;
use tracing::{info, warn};

/// Settings for [`matched_pairs`]
#[derive(Clone, Debug, Default)]
pub struct MatchedPairsOptions {
    /// Worker pool used for every reduction pass
    pub reducer: ReducerConfig,
    /// Write NaN for zero-variance columns instead of failing
    pub allow_degenerate: bool,
    /// Scaling of pair covariances
    pub normalization: Normalization,
    /// Permutation applied to every sample before anything else
    pub permutation: Option<Permutation>,
    /// Fold paths to start from; empty means no folding
    pub start_paths: Vec<FoldPath>,
    /// U-steps added to every start path
    pub extra_u: usize,
    /// V-steps added to every start path
    pub extra_v: usize,
}

impl MatchedPairsOptions {
    fn folds(&self) -> bool {
        !self.start_paths.is_empty() || self.extra_u > 0 || self.extra_v > 0
    }
}

/// Permute, fold, correlate and match a corpus
///
/// The corpus is consumed because the permutation is applied in place.
pub fn matched_pairs(
    mut samples: SampleSet,
    options: &MatchedPairsOptions,
) -> Result<PartnerMapping> {
    if let Some(perm) = &options.permutation {
        apply_permutation(&mut samples, perm)?;
        info!(columns = perm.len(), "permutation applied");
    }

    let reducer = CorrelationReducer::new(options.reducer)?;
    let table = if options.folds() {
        let starts = if options.start_paths.is_empty() {
            vec![FoldPath::empty()]
        } else {
            options.start_paths.clone()
        };
        correlate_paths(&samples, &starts, options.extra_u, options.extra_v, &reducer)?
    } else {
        reducer.reduce(&samples, samples.code_len())?
    };

    let pearson = if options.allow_degenerate {
        let pearson = PearsonMatrix::finish_lenient_with(&table, options.normalization)?;
        if !pearson.degenerate_columns().is_empty() {
            warn!(
                count = pearson.degenerate_columns().len(),
                "zero-variance columns excluded from matching"
            );
        }
        pearson
    } else {
        PearsonMatrix::finish_with(&table, options.normalization)?
    };

    Ok(MatchedPairSolver::solve(&pearson))
}
