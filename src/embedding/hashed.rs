use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::hashing::embedding_seed;

use super::TextEmbedder;

/// Deterministic hash-seeded embedder.
///
/// Reduces the text to a 32-bit BLAKE3-derived seed, draws `dim` uniform
/// values in [-1, 1] from a seeded PRNG, and unit-normalizes the result.
/// Reproducible by construction, and obviously meaningless as a semantic
/// representation: a placeholder to be swapped for a real embedding model
/// behind [`TextEmbedder`] without touching any downstream contract.
#[derive(Debug, Clone)]
pub struct HashedEmbedder {
    dim: usize,
}

impl HashedEmbedder {
    /// Creates an embedder producing vectors of length `dim`.
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl TextEmbedder for HashedEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        if text.is_empty() {
            return vec![0.0; self.dim];
        }

        let seed = embedding_seed(text);
        let mut rng = StdRng::seed_from_u64(u64::from(seed));

        let mut vector: Vec<f32> = (0..self.dim)
            .map(|_| rng.gen_range(-1.0f32..=1.0))
            .collect();

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        vector
    }
}
