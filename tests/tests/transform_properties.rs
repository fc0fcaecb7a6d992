//! Property-based tests for permutations and half-folds

use proptest::prelude::*;
use sigcorr_algorithms::{and_fold_half, apply_permutation, xor_fold_half, Permutation, SampleSet};

fn permutation(len: usize) -> impl Strategy<Value = Permutation> {
    Just((0..len).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(|map| Permutation::new(map).unwrap())
}

fn corpus(width: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(0u8..=1, width), 1..16)
}

fn bits(set: &SampleSet) -> Vec<Vec<u8>> {
    set.iter().map(|s| s.iter().map(u8::from).collect()).collect()
}

proptest! {
    #[test]
    fn inverse_restores_dataset(rows in corpus(37), perm in permutation(37)) {
        let mut set = SampleSet::from_bit_rows(&rows, 37).unwrap();
        apply_permutation(&mut set, &perm).unwrap();
        apply_permutation(&mut set, &perm.inverse()).unwrap();
        prop_assert_eq!(bits(&set), rows);
    }

    #[test]
    fn permutation_moves_each_column(rows in corpus(20), perm in permutation(20)) {
        let mut set = SampleSet::from_bit_rows(&rows, 20).unwrap();
        apply_permutation(&mut set, &perm).unwrap();
        for (old, new) in rows.iter().zip(bits(&set)) {
            for j in 0..20 {
                prop_assert_eq!(new[perm.get(j)], old[j]);
            }
        }
    }

    #[test]
    fn composition_matches_sequential_application(
        rows in corpus(16),
        p in permutation(16),
        q in permutation(16),
    ) {
        let mut twice = SampleSet::from_bit_rows(&rows, 16).unwrap();
        apply_permutation(&mut twice, &p).unwrap();
        apply_permutation(&mut twice, &q).unwrap();

        let mut once = SampleSet::from_bit_rows(&rows, 16).unwrap();
        apply_permutation(&mut once, &p.then(&q).unwrap()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn identity_changes_nothing(rows in corpus(13)) {
        let mut set = SampleSet::from_bit_rows(&rows, 13).unwrap();
        apply_permutation(&mut set, &Permutation::identity(13)).unwrap();
        apply_permutation(&mut set, &Permutation::identity(13)).unwrap();
        prop_assert_eq!(bits(&set), rows);
    }

    #[test]
    fn folds_match_formulas(rows in corpus(24), half in 1usize..=12) {
        let len = 2 * half;
        let mut xor = SampleSet::from_bit_rows(&rows, 24).unwrap();
        let mut and = xor.clone();
        xor_fold_half(&mut xor, len).unwrap();
        and_fold_half(&mut and, len).unwrap();

        for ((old, x), a) in rows.iter().zip(bits(&xor)).zip(bits(&and)) {
            for j in 0..half {
                prop_assert_eq!(x[j], old[j] ^ old[j + half]);
                prop_assert_eq!(a[j], old[j] & old[j + half]);
            }
            prop_assert_eq!(&x[half..], &old[half..]);
            prop_assert_eq!(&a[half..], &old[half..]);
        }
    }

    #[test]
    fn from_pairs_places_pairs_in_halves(perm in permutation(12)) {
        let columns = perm.into_vec();
        let pairs: Vec<(usize, usize)> = (0..6).map(|i| (columns[i], columns[i + 6])).collect();
        let placed = Permutation::from_pairs(&pairs).unwrap();
        for (i, &(a, b)) in pairs.iter().enumerate() {
            prop_assert_eq!(placed.get(a), i);
            prop_assert_eq!(placed.get(b), i + 6);
        }
    }
}
