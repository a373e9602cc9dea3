use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use ragdb_core::config::{expand_path, RagConfig};
use ragdb_core::traits::{AnswerComposer, Embedder};
use ragdb_core::types::{Chunk, ChunkId, Document, SearchResult};
use ragdb_core::{Error, Result};
use ragdb_text::{tokenizer_for, ChunkParams, Chunker};
use ragdb_vector::{BruteForceIndex, DocumentStore, SimilarityIndex};

use crate::compose::{render_excerpts, render_metadata_header, Answer};

/// Chunk → embed → store at ingest; embed → search at query time.
///
/// The pipeline owns its store, so every vector in it comes from the same
/// embedder and shares one dimension.
pub struct RetrievalPipeline {
    embedder: Arc<dyn Embedder>,
    chunker: Chunker,
    store: Arc<DocumentStore>,
    index: Box<dyn SimilarityIndex>,
}

impl RetrievalPipeline {
    pub fn new(embedder: Arc<dyn Embedder>, chunker: Chunker) -> Self {
        let store = Arc::new(DocumentStore::new());
        let index = Box::new(BruteForceIndex::new(store.clone()));
        Self { embedder, chunker, store, index }
    }

    /// Build with the tokenizer and search settings from `config`.
    pub fn from_config(embedder: Arc<dyn Embedder>, config: &RagConfig) -> Result<Self> {
        let model_dir = config.embedding.model_dir.as_deref().map(expand_path);
        let tokenizer = tokenizer_for(config.chunking.tokenizer, model_dir.as_deref())?;
        let mut pipeline = Self::new(embedder, Chunker::new(tokenizer));
        pipeline.index = Box::new(
            BruteForceIndex::new(pipeline.store.clone()).with_parallel_threshold(config.search.parallel_threshold),
        );
        Ok(pipeline)
    }

    /// Replace the similarity index; `build` receives this pipeline's store.
    pub fn with_index<I, F>(mut self, build: F) -> Self
    where
        I: SimilarityIndex + 'static,
        F: FnOnce(Arc<DocumentStore>) -> I,
    {
        self.index = Box::new(build(self.store.clone()));
        self
    }

    pub fn store(&self) -> &DocumentStore { &self.store }

    pub fn chunker(&self) -> &Chunker { &self.chunker }

    /// Chunk, embed and store `documents`. Returns the number of chunks stored.
    ///
    /// All-or-nothing: if chunking or embedding fails for any document, or a
    /// vector is malformed, nothing from this call is stored.
    pub fn ingest(&self, documents: &[Document], max_tokens: usize, overlap_tokens: usize) -> Result<usize> {
        let params = ChunkParams::new(max_tokens, overlap_tokens)?;
        self.ingest_with_progress(documents, params, |_, _| {})
    }

    /// Like [`ingest`](Self::ingest), calling `on_document(done, total)`
    /// after each document is embedded.
    pub fn ingest_with_progress(
        &self,
        documents: &[Document],
        params: ChunkParams,
        mut on_document: impl FnMut(usize, usize),
    ) -> Result<usize> {
        let started = Instant::now();
        let dim = self.embedder.dim();
        let mut staged: Vec<(Chunk, Vec<f32>)> = Vec::new();

        for (i, doc) in documents.iter().enumerate() {
            let windows = self.chunker.windows(&doc.text, params)?;
            if !windows.is_empty() {
                let header = render_metadata_header(&doc.metadata);
                let doc_key = doc.doc_key();
                let of_total = windows.len();
                let texts: Vec<String> = windows.into_iter().map(|w| format!("{header}{}", w.text)).collect();

                let vectors = self.embedder.embed_batch(&texts).map_err(|e| Error::embedder(&e))?;
                if vectors.len() != texts.len() {
                    return Err(Error::Embedder(format!(
                        "returned {} vectors for {} texts",
                        vectors.len(),
                        texts.len()
                    )));
                }
                if let Some(bad) = vectors.iter().find(|v| v.len() != dim) {
                    return Err(Error::Embedder(format!("returned a {}-dimensional vector, declared {dim}", bad.len())));
                }
                debug!(doc = %doc_key, chunks = of_total, "embedded document");

                for (ordinal, (text, vector)) in texts.into_iter().zip(vectors).enumerate() {
                    let chunk = Chunk {
                        id: ChunkId::new(&doc_key, ordinal),
                        text,
                        ordinal,
                        of_total,
                        source_metadata: doc.metadata.clone(),
                    };
                    staged.push((chunk, vector));
                }
            }
            on_document(i + 1, documents.len());
        }

        let count = staged.len();
        self.store.add_batch(staged)?;
        info!(
            documents = documents.len(),
            chunks = count,
            total = self.store.len(),
            ms = started.elapsed().as_millis() as u64,
            "ingest complete"
        );
        Ok(count)
    }

    /// Embed `question` and return the `top_k` most similar chunks.
    pub fn query(&self, question: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        if top_k == 0 {
            return Err(Error::invalid("top_k must be positive"));
        }
        let q_vec = self.embedder.embed(question).map_err(|e| Error::embedder(&e))?;
        if q_vec.len() != self.embedder.dim() {
            return Err(Error::Embedder(format!(
                "returned a {}-dimensional query vector, declared {}",
                q_vec.len(),
                self.embedder.dim()
            )));
        }
        let results = self.index.search(&q_vec, top_k)?;
        info!(top_k, returned = results.len(), best = ?results.first().map(|r| r.score), "query");
        Ok(results)
    }

    /// Retrieve excerpts for `question` and hand them to `composer`.
    pub fn answer(&self, question: &str, top_k: usize, composer: &dyn AnswerComposer) -> Result<Answer> {
        let sources = self.query(question, top_k)?;
        let excerpts = render_excerpts(&sources);
        let text = composer.compose(question, &excerpts).map_err(|e| Error::composer(&e))?;
        Ok(Answer { text, sources })
    }
}
