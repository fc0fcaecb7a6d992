//! End-to-end tests over corpus files

use sigcorr::pipeline::{matched_pairs, MatchedPairsOptions};
use sigcorr_algorithms::{
    count_good_pairs, verify_u_uv_permutation, FoldPath, Permutation, ReducerConfig,
    SecretPermutation,
};
use sigcorr_params::RecordLayout;
use sigcorr_tests::{planted_corpus, random_permutation};
use sigcorr_utils::{
    read_corpus, read_pairs, read_permutation, read_secret_permutation, write_pairs,
    write_permutation,
};

const CODE_LEN: usize = 64;
const MLEN: usize = 4;
const CRYPTO_BYTES: usize = 8 + CODE_LEN / 8 + 2;

fn secret_of(q: &Permutation) -> SecretPermutation {
    SecretPermutation::new(q.as_slice().iter().map(|&v| v as u16).collect()).unwrap()
}

#[test]
fn recovers_planted_pairs_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let q = random_permutation(11, CODE_LEN);
    let layout = RecordLayout::with_counter(MLEN, CRYPTO_BYTES, CODE_LEN).unwrap();
    let sigs = dir.path().join("sigs.bin");
    std::fs::write(&sigs, planted_corpus(12, 4000, &q, 0.1, layout)).unwrap();

    let samples = read_corpus(&sigs, layout).unwrap();
    assert_eq!(samples.len(), 4000);

    let options = MatchedPairsOptions {
        reducer: ReducerConfig::default().with_workers(4).with_chunk_size(97),
        ..Default::default()
    };
    let mapping = matched_pairs(samples, &options).unwrap();
    assert!(mapping.is_involution());

    let pairs_path = dir.path().join("pairs.txt");
    write_pairs(&pairs_path, &mapping).unwrap();
    let recovered = read_pairs(&pairs_path).unwrap();

    // Secret key: the permutation followed by unrelated key material
    let sk = dir.path().join("sk.bin");
    write_permutation(&sk, &q).unwrap();
    let mut key = std::fs::read(&sk).unwrap();
    key.extend_from_slice(&[0xa5; 16]);
    std::fs::write(&sk, key).unwrap();

    let secret = read_secret_permutation(&sk, CODE_LEN).unwrap();
    let score = count_good_pairs(&recovered, &secret);
    assert_eq!(score.total, CODE_LEN / 2);
    assert_eq!(score.found, score.total, "{}", score);
}

#[test]
fn wrong_layout_finds_nothing() {
    let q = random_permutation(21, CODE_LEN);
    let layout = RecordLayout::with_counter(MLEN, CRYPTO_BYTES, CODE_LEN).unwrap();
    let data = planted_corpus(22, 3000, &q, 0.1, layout);

    // Reading a counter-prefixed corpus without the counter shifts every field
    let shifted = RecordLayout::custom(layout.stride(), MLEN, CODE_LEN).unwrap();
    let samples = sigcorr_algorithms::SampleSet::from_bytes(data, shifted).unwrap();
    let options = MatchedPairsOptions {
        reducer: ReducerConfig::default().with_workers(2),
        ..Default::default()
    };
    let mapping = matched_pairs(samples, &options).unwrap();
    let score = count_good_pairs(&mapping.unordered_pairs(), &secret_of(&q));
    assert!(score.found < score.total / 2, "{}", score);
}

#[test]
fn oriented_pairs_verify_and_swaps_repair_orientation() {
    let dir = tempfile::tempdir().unwrap();
    let q = random_permutation(31, CODE_LEN);
    let secret = secret_of(&q);
    let inv = q.inverse();
    let half = CODE_LEN / 2;

    let oriented: Vec<(usize, usize)> = (0..half)
        .map(|i| (inv.get(i), inv.get(i + half)))
        .collect();
    let good = Permutation::from_pairs(&oriented).unwrap();
    assert!(verify_u_uv_permutation(&secret, &good).unwrap());

    // Flip pair 3 and the check fails until the swap puts it back
    let mut flipped = oriented.clone();
    flipped[3] = (flipped[3].1, flipped[3].0);
    let bad = Permutation::from_pairs(&flipped).unwrap();
    assert!(!verify_u_uv_permutation(&secret, &bad).unwrap());

    let mut swaps = vec![false; half];
    swaps[3] = true;
    let repaired = bad.apply_swaps(&swaps).unwrap();
    assert_eq!(repaired, good);

    let path = dir.path().join("perm.bin");
    write_permutation(&path, &repaired).unwrap();
    let reread = read_permutation(&path, CODE_LEN).unwrap();
    assert!(verify_u_uv_permutation(&secret, &reread).unwrap());
}

#[test]
fn folded_correlation_runs_on_half_width() {
    let q = random_permutation(41, CODE_LEN);
    let layout = RecordLayout::without_counter(MLEN, CRYPTO_BYTES, CODE_LEN).unwrap();
    let data = planted_corpus(42, 500, &q, 0.2, layout);
    let samples = sigcorr_algorithms::SampleSet::from_bytes(data, layout).unwrap();

    let options = MatchedPairsOptions {
        reducer: ReducerConfig::default().with_workers(3),
        start_paths: vec!["U".parse::<FoldPath>().unwrap(), "V".parse().unwrap()],
        ..Default::default()
    };
    let mapping = matched_pairs(samples, &options).unwrap();
    assert_eq!(mapping.len(), CODE_LEN / 2);
}
