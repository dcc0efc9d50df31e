use crate::perm::Permutation;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Draws a uniformly random permutation of `[0, n)` from `rng`.
pub fn random_permutation(n: usize, rng: &mut impl Rng) -> Permutation {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    Permutation::from_order_unchecked(order)
}

/// Seeded generator when a seed is given, the thread RNG otherwise.
pub(super) fn seeded_or_thread(n: usize, seed: Option<u64>) -> Permutation {
    match seed {
        Some(seed) => random_permutation(n, &mut StdRng::seed_from_u64(seed)),
        None => random_permutation(n, &mut rand::thread_rng()),
    }
}
