//! Shared fixtures for the sigcorr integration tests
//!
//! Corpora are generated from a seeded ChaCha20 stream so every run sees the
//! same data.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sigcorr_algorithms::{Permutation, SampleSet};
use sigcorr_params::RecordLayout;

/// Uniformly random error vectors of `code_len` bits
pub fn random_corpus(seed: u64, count: usize, code_len: usize) -> SampleSet {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let vectors: Vec<Vec<u8>> = (0..count)
        .map(|_| {
            let mut v = vec![0u8; (code_len + 7) / 8];
            rng.fill_bytes(&mut v);
            v
        })
        .collect();
    SampleSet::from_error_vectors(vectors, code_len).expect("random corpus")
}

/// Corpus whose columns `q⁻¹(i)` and `q⁻¹(i + L/2)` agree with probability
/// `1 - noise`
///
/// Records follow `layout`; every byte outside the error field is random
/// too, so a wrong offset shows up as noise.
pub fn planted_corpus(
    seed: u64,
    count: usize,
    q: &Permutation,
    noise: f64,
    layout: RecordLayout,
) -> Vec<u8> {
    let code_len = q.len();
    assert_eq!(layout.code_len(), code_len);
    let half = code_len / 2;
    let inv = q.inverse();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let mut data = vec![0u8; count * layout.stride()];
    for record in data.chunks_exact_mut(layout.stride()) {
        rng.fill_bytes(record);
        let error = &mut record[layout.error_range()];
        error.iter_mut().for_each(|b| *b = 0);
        for i in 0..half {
            let x: bool = rng.gen();
            let y = x ^ rng.gen_bool(noise);
            for (column, bit) in [(inv.get(i), x), (inv.get(i + half), y)] {
                if bit {
                    error[column / 8] |= 1 << (column % 8);
                }
            }
        }
    }
    data
}

/// Random permutation of `0..len`
pub fn random_permutation(seed: u64, len: usize) -> Permutation {
    use rand::seq::SliceRandom;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut map: Vec<usize> = (0..len).collect();
    map.shuffle(&mut rng);
    Permutation::new(map).expect("shuffled permutation")
}
