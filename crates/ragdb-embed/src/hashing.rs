use anyhow::Result;
use std::hash::Hasher;
use twox_hash::XxHash64;

use ragdb_core::traits::Embedder;

/// Deterministic feature-hashing embedder.
///
/// Each lowercased word and adjacent word pair is hashed into one of `dim`
/// buckets with a hash-derived sign, then the vector is L2-normalized. Texts
/// sharing vocabulary land close together, which is enough to exercise
/// retrieval without a model. Text with no words embeds to the zero vector.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
    seed: u64,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self { Self { dim, seed: 0 } }

    pub fn with_seed(dim: usize, seed: u64) -> Self { Self { dim, seed } }

    fn bucket(&self, feature: &str, weight: f32, v: &mut [f32]) {
        let mut hasher = XxHash64::with_seed(self.seed);
        hasher.write(feature.as_bytes());
        let h = hasher.finish();
        let idx = (h % self.dim as u64) as usize;
        let sign = if (h >> 63) == 0 { 1.0 } else { -1.0 };
        v[idx] += sign * weight;
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        for w in &words {
            self.bucket(w, 1.0, &mut v);
        }
        for pair in words.windows(2) {
            self.bucket(&format!("{} {}", pair[0], pair[1]), 0.5, &mut v);
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v { *x /= norm; }
        }
        v
    }
}

impl Embedder for HashingEmbedder {
    fn dim(&self) -> usize { self.dim }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if self.dim == 0 { anyhow::bail!("hashing embedder dimension must be positive"); }
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}
