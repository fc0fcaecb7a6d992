//! Property-based tests for correlation accumulation

use proptest::prelude::*;
use sigcorr_algorithms::{
    CorrelationReducer, CorrelationTable, PearsonMatrix, ReducerConfig, SampleSet,
};

const WIDTH: usize = 11;

fn rows(max: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(0u8..=1, WIDTH), 1..max)
}

fn table_of(rows: &[Vec<u8>]) -> CorrelationTable {
    let set = SampleSet::from_bit_rows(rows, WIDTH).unwrap();
    let mut table = CorrelationTable::new(WIDTH).unwrap();
    for sample in set.iter() {
        table.accumulate(sample).unwrap();
    }
    table
}

proptest! {
    #[test]
    fn merge_is_commutative(a in rows(20), b in rows(20)) {
        let mut ab = table_of(&a);
        ab.merge(&table_of(&b)).unwrap();
        let mut ba = table_of(&b);
        ba.merge(&table_of(&a)).unwrap();
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn merge_is_associative(a in rows(12), b in rows(12), c in rows(12)) {
        let mut left = table_of(&a);
        left.merge(&table_of(&b)).unwrap();
        left.merge(&table_of(&c)).unwrap();

        let mut bc = table_of(&b);
        bc.merge(&table_of(&c)).unwrap();
        let mut right = table_of(&a);
        right.merge(&bc).unwrap();

        prop_assert_eq!(left, right);
    }

    #[test]
    fn any_split_merges_to_the_whole(all in rows(40), cut in any::<prop::sample::Index>()) {
        let at = cut.index(all.len() + 1);
        let mut parts = table_of(&all[..at.min(all.len())]);
        if at < all.len() {
            parts.merge(&table_of(&all[at..])).unwrap();
        }
        prop_assert_eq!(parts, table_of(&all));
    }

    #[test]
    fn reduction_ignores_worker_layout(
        all in rows(300),
        workers in 1usize..9,
        chunk in 1usize..64,
    ) {
        let set = SampleSet::from_bit_rows(&all, WIDTH).unwrap();
        let reducer = CorrelationReducer::new(
            ReducerConfig::default().with_workers(workers).with_chunk_size(chunk),
        ).unwrap();
        prop_assert_eq!(reducer.reduce(&set, WIDTH).unwrap(), table_of(&all));
    }

    #[test]
    fn pearson_is_symmetric_and_bounded(all in rows(60)) {
        let pearson = PearsonMatrix::finish_lenient(&table_of(&all)).unwrap();
        prop_assert!(pearson.is_symmetric());
        for j in 0..WIDTH {
            prop_assert_eq!(pearson.get(j, j), 0.0);
            for k in 0..WIDTH {
                let m = pearson.get(j, k);
                prop_assert!(m.is_nan() || (-1.0..=1.0).contains(&m), "M[{}][{}] = {}", j, k, m);
            }
        }
        // NaN appears exactly on pairs touching a constant column
        for &j in pearson.degenerate_columns() {
            let column: Vec<u8> = all.iter().map(|r| r[j]).collect();
            prop_assert!(column.iter().all(|&b| b == column[0]));
        }
    }
}
