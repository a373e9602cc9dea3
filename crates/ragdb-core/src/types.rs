//! Domain types shared by the chunker, store, index and pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Source metadata attached to documents and their chunks.
///
/// Ordered so that rendering a metadata header is deterministic.
pub type Meta = BTreeMap<String, String>;

/// Metadata key that, when present on a document, names its chunks.
pub const DOC_ID_KEY: &str = "id";

/// Stable chunk identifier of the form `<doc_key>:<ordinal>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(String);

impl ChunkId {
    pub fn new(doc_key: &str, ordinal: usize) -> Self {
        Self(format!("{doc_key}:{ordinal}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Insertion position of an entry in a document store.
///
/// Positions are dense and start at zero; they double as the tie-break key
/// for equal similarity scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub usize);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A raw document handed to ingestion by an external corpus loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    #[serde(default)]
    pub metadata: Meta,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), metadata: Meta::new() }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Key used to build chunk ids: the `id` metadata value when present,
    /// otherwise a short content hash of the text.
    pub fn doc_key(&self) -> String {
        match self.metadata.get(DOC_ID_KEY) {
            Some(id) if !id.is_empty() => id.clone(),
            _ => {
                let hash = blake3::hash(self.text.as_bytes()).to_hex();
                hash.as_str()[..16].to_string()
            }
        }
    }
}

/// A bounded span of a source document, the unit of retrieval.
///
/// - `id`: `<doc_key>:<ordinal>`
/// - `text`: the chunk payload, including any provenance header
/// - `ordinal`/`of_total`: position within the parent document
/// - `source_metadata`: the parent document's metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    pub ordinal: usize,
    pub of_total: usize,
    pub source_metadata: Meta,
}

/// A chunk together with its embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    pub chunk: Chunk,
    pub vector: Vec<f32>,
}

/// A ranked retrieval hit.
///
/// `score` is the cosine similarity in `[-1, 1]`; higher is better.
/// `position` is the entry's insertion position in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk: Chunk,
    pub score: f32,
    pub position: EntryId,
}
