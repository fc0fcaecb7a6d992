//! Hand-checked scenarios for the analysis core

use sigcorr_algorithms::{
    and_fold_half, apply_permutation, xor_fold_half, CorrelationTable, MatchedPairSolver,
    PearsonMatrix, Permutation, SampleSet,
};
use sigcorr_api::Error;

fn bits(set: &SampleSet) -> Vec<Vec<u8>> {
    set.iter().map(|s| s.iter().map(u8::from).collect()).collect()
}

#[test]
fn two_sample_table() {
    let set = SampleSet::from_bit_rows([[0u8, 0, 1, 1], [0, 1, 1, 0]], 4).unwrap();
    let mut table = CorrelationTable::new(4).unwrap();
    for sample in set.iter() {
        table.accumulate(sample).unwrap();
    }

    assert_eq!(table.samples(), 2);
    assert_eq!(table.sum_x(), &[2, 0, -2, 0]);
    // Packed as (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
    assert_eq!(table.sum_xy(), &[0, -2, 0, 0, -2, 0]);
}

#[test]
fn perfect_correlation_needs_varied_samples() {
    let repeated = vec![[1u8, 1, 0, 0]; 10];
    let set = SampleSet::from_bit_rows(&repeated, 4).unwrap();
    let mut table = CorrelationTable::new(4).unwrap();
    for sample in set.iter() {
        table.accumulate(sample).unwrap();
    }
    assert!(matches!(
        PearsonMatrix::finish(&table),
        Err(Error::DegenerateStatistics { column: 0, samples: 10 })
    ));

    let mut varied = repeated;
    varied.extend([[0u8, 0, 1, 1]; 6]);
    let set = SampleSet::from_bit_rows(&varied, 4).unwrap();
    let mut table = CorrelationTable::new(4).unwrap();
    for sample in set.iter() {
        table.accumulate(sample).unwrap();
    }
    let pearson = PearsonMatrix::finish(&table).unwrap();
    assert!((pearson.get(0, 1) - 1.0).abs() < 1e-12);
    assert!((pearson.get(2, 3) - 1.0).abs() < 1e-12);
    assert!((pearson.get(0, 2) + 1.0).abs() < 1e-12);
}

#[test]
fn pair_swap_is_an_involution() {
    let rows = [[1u8, 0, 1, 1], [0, 0, 1, 0], [1, 1, 0, 1]];
    let mut set = SampleSet::from_bit_rows(rows, 4).unwrap();
    let original = set.clone();
    let perm = Permutation::new(vec![1, 0, 3, 2]).unwrap();
    assert!(perm.is_involution());

    apply_permutation(&mut set, &perm).unwrap();
    assert_eq!(bits(&set), vec![vec![0, 1, 1, 1], vec![0, 0, 0, 1], vec![1, 1, 1, 0]]);
    apply_permutation(&mut set, &perm).unwrap();
    assert_eq!(set, original);
}

#[test]
fn clean_two_cycle_matrix() {
    let pearson = PearsonMatrix::from_rows(&[
        [0.0, 0.9, -0.2, -0.4],
        [0.9, 0.0, -0.1, 0.0],
        [-0.2, -0.1, 0.0, 0.8],
        [-0.4, 0.0, 0.8, 0.0],
    ])
    .unwrap();
    let mapping = MatchedPairSolver::solve(&pearson);
    assert_eq!(mapping.as_slice(), &[1, 0, 3, 2]);
    assert!(mapping.is_involution());
}

#[test]
fn negative_partner_row_selects_itself() {
    // Columns 0 and 1 are perfect opposites and column 2 is independent noise
    let rows = [[0u8, 1, 0], [1, 0, 0], [0, 1, 1], [1, 0, 1]];
    let set = SampleSet::from_bit_rows(rows, 3).unwrap();
    let mut table = CorrelationTable::new(3).unwrap();
    for sample in set.iter() {
        table.accumulate(sample).unwrap();
    }
    let pearson = PearsonMatrix::finish(&table).unwrap();
    let mapping = MatchedPairSolver::solve(&pearson);
    // Row 0 is [0, -1, 0]: the diagonal ties with column 2 and wins on index
    assert_eq!(mapping.partner(0), 0);
    assert_eq!(mapping.partner(1), 1);
    // Row 2 is all zeros, so the tie goes to column 0
    assert_eq!(mapping.partner(2), 0);
    assert_eq!(mapping.self_matched(), vec![0, 1]);
    assert!(!mapping.is_involution());
}

#[test]
fn folds_follow_their_formulas() {
    let mut xor = SampleSet::from_bit_rows([[1u8, 1, 0, 0, 1, 0, 1, 0]], 8).unwrap();
    xor_fold_half(&mut xor, 8).unwrap();
    assert_eq!(bits(&xor), vec![vec![0, 1, 1, 0, 1, 0, 1, 0]]);
    // Second pass reuses the untouched second half
    xor_fold_half(&mut xor, 8).unwrap();
    assert_eq!(bits(&xor), vec![vec![1, 1, 0, 0, 1, 0, 1, 0]]);

    let mut and = SampleSet::from_bit_rows([[1u8, 1, 0, 0, 1, 0, 1, 0]], 8).unwrap();
    and_fold_half(&mut and, 8).unwrap();
    assert_eq!(bits(&and), vec![vec![1, 0, 0, 0, 1, 0, 1, 0]]);

    // Folding only a prefix leaves later columns alone
    let mut prefix = SampleSet::from_bit_rows([[1u8, 1, 1, 0, 1, 1]], 6).unwrap();
    xor_fold_half(&mut prefix, 4).unwrap();
    assert_eq!(bits(&prefix), vec![vec![0, 1, 1, 0, 1, 1]]);

    assert!(matches!(and_fold_half(&mut and, 7), Err(Error::Config { .. })));
}
