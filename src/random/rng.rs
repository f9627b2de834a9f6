//! Seedable random source handed to every sampler and transform.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random number generator used throughout the crate.
pub type TransformRng = ChaCha8Rng;

/// Random number generator with optional seeding for reproducibility.
#[allow(clippy::option_if_let_else)] // match is clearer than map_or_else here
pub fn get_rng(seed: Option<u64>) -> TransformRng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
