//! Feature-hashed term-frequency embeddings.
//!
//! Each token lands in one bucket with a sign taken from a second hash bit,
//! so colliding terms tend to cancel rather than pile up. Term counts are
//! damped with `1 + ln(tf)`.

use std::collections::HashMap;

use reasoningbank_core::errors::RbResult;
use reasoningbank_core::traits::IEmbeddingProvider;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hashed term-frequency embedder. Always available, fully deterministic.
#[derive(Debug, Clone, Copy)]
pub struct HashedTfEmbedder {
    dimensions: usize,
}

impl HashedTfEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn fnv1a(term: &str) -> u64 {
        term.bytes().fold(FNV_OFFSET, |h, b| (h ^ b as u64).wrapping_mul(FNV_PRIME))
    }

    /// Lowercase alphanumeric runs of at least two characters.
    fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| s.chars().count() >= 2)
            .map(str::to_lowercase)
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for token in Self::tokenize(text) {
            *counts.entry(token).or_default() += 1;
        }

        let mut vec = vec![0.0f32; self.dimensions];
        if counts.is_empty() {
            return vec;
        }

        for (term, tf) in &counts {
            let h = Self::fnv1a(term);
            let bucket = (h % self.dimensions as u64) as usize;
            let sign = if (h >> 63) & 1 == 0 { 1.0 } else { -1.0 };
            vec[bucket] += sign * (1.0 + (*tf as f32).ln());
        }

        let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            vec.iter_mut().for_each(|v| *v /= norm);
        }
        vec
    }
}

impl IEmbeddingProvider for HashedTfEmbedder {
    fn embed_documents(&self, texts: &[String]) -> RbResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn embed_query(&self, text: &str) -> RbResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-tf"
    }
}
