use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use ragdb_core::types::{Chunk, EmbeddedChunk, EntryId};
use ragdb_core::{Error, Result};

#[derive(Default)]
struct Inner {
    dim: Option<usize>,
    entries: Vec<Arc<EmbeddedChunk>>,
}

/// Append-only, insertion-ordered store of embedded chunks.
///
/// Writers are serialized by a lock and a batch becomes visible all at
/// once; readers holding [`DocumentStore::read`] see a fixed snapshot.
#[derive(Default)]
pub struct DocumentStore {
    inner: RwLock<Inner>,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    /// Dimension fixed by the first insert, if any.
    pub fn dimension(&self) -> Option<usize> { self.inner.read().dim }

    pub fn len(&self) -> usize { self.inner.read().entries.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Append one chunk. The first insert establishes the store dimension.
    pub fn add(&self, chunk: Chunk, vector: Vec<f32>) -> Result<EntryId> {
        let mut ids = self.add_batch(vec![(chunk, vector)])?;
        ids.pop().ok_or_else(|| Error::invalid("empty batch"))
    }

    /// Append a batch atomically: either every entry is stored, in order,
    /// or none is and the store is unchanged.
    pub fn add_batch(&self, batch: Vec<(Chunk, Vec<f32>)>) -> Result<Vec<EntryId>> {
        let mut inner = self.inner.write();
        let Some(first) = batch.first() else { return Ok(Vec::new()) };
        let dim = inner.dim.unwrap_or(first.1.len());
        for (chunk, vector) in &batch {
            validate_vector(vector, dim).map_err(|e| {
                debug!(chunk = %chunk.id, error = %e, "rejected vector");
                e
            })?;
        }

        inner.dim = Some(dim);
        let start = inner.entries.len();
        inner.entries.extend(batch.into_iter().map(|(chunk, vector)| Arc::new(EmbeddedChunk { chunk, vector })));
        let end = inner.entries.len();
        debug!(added = end - start, total = end, dim, "store append");
        Ok((start..end).map(EntryId).collect())
    }

    /// Snapshot of all entries in insertion order, as of this call.
    ///
    /// Restartable: every call begins from the first entry. Later inserts do
    /// not affect an iterator already returned.
    pub fn all(&self) -> std::vec::IntoIter<Arc<EmbeddedChunk>> {
        self.inner.read().entries.clone().into_iter()
    }

    pub fn get(&self, id: EntryId) -> Option<Arc<EmbeddedChunk>> {
        self.inner.read().entries.get(id.0).cloned()
    }

    /// Run `f` over the dimension and entries under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(Option<usize>, &[Arc<EmbeddedChunk>]) -> R) -> R {
        let inner = self.inner.read();
        f(inner.dim, &inner.entries)
    }
}

fn validate_vector(vector: &[f32], dim: usize) -> Result<()> {
    if vector.is_empty() {
        return Err(Error::invalid("embedding vector is empty"));
    }
    if vector.len() != dim {
        return Err(Error::DimensionMismatch { expected: dim, actual: vector.len() });
    }
    if let Some(i) = vector.iter().position(|x| !x.is_finite()) {
        return Err(Error::invalid(format!("embedding component {i} is not finite")));
    }
    Ok(())
}
