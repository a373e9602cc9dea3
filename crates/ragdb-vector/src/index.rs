use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

use ragdb_core::types::{EmbeddedChunk, EntryId, SearchResult};
use ragdb_core::{Error, Result};

use crate::similarity::{cosine_with_norm, norm_f64};
use crate::store::DocumentStore;

/// Top-k nearest-neighbor search over a store's vectors.
///
/// Results are ordered by descending score; equal scores keep insertion
/// order. At most `min(k, store size)` results are returned.
pub trait SimilarityIndex: Send + Sync {
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>>;
}

/// Exact cosine search that scores every stored vector.
pub struct BruteForceIndex {
    store: Arc<DocumentStore>,
    parallel_threshold: usize,
}

impl BruteForceIndex {
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;

    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store, parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD }
    }

    /// Stores with at least `threshold` entries are scored on the rayon pool.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn store(&self) -> &Arc<DocumentStore> { &self.store }
}

impl SimilarityIndex for BruteForceIndex {
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if k == 0 {
            return Err(Error::invalid("k must be positive"));
        }
        if query.iter().any(|x| !x.is_finite()) {
            return Err(Error::invalid("query vector has non-finite components"));
        }
        let q_norm = norm_f64(query);

        self.store.read(|dim, entries| {
            let Some(dim) = dim else { return Ok(Vec::new()) };
            if query.len() != dim {
                return Err(Error::invalid(format!(
                    "query dimension {} does not match store dimension {}",
                    query.len(),
                    dim
                )));
            }

            let score = |e: &Arc<EmbeddedChunk>| cosine_with_norm(query, q_norm, &e.vector);
            let scored: Vec<(usize, f32)> = if entries.len() >= self.parallel_threshold {
                entries.par_iter().map(score).enumerate().collect()
            } else {
                entries.iter().map(score).enumerate().collect()
            };

            let top = select_top_k(scored, k);
            debug!(candidates = entries.len(), k, returned = top.len(), "brute-force search");
            Ok(top
                .into_iter()
                .map(|(pos, score)| SearchResult {
                    chunk: entries[pos].chunk.clone(),
                    score,
                    position: EntryId(pos),
                })
                .collect())
        })
    }
}

fn rank(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

/// Keep the `k` best `(position, score)` pairs, best first.
fn select_top_k(mut scored: Vec<(usize, f32)>, k: usize) -> Vec<(usize, f32)> {
    if k < scored.len() {
        scored.select_nth_unstable_by(k - 1, rank);
        scored.truncate(k);
    }
    scored.sort_unstable_by(rank);
    scored
}
