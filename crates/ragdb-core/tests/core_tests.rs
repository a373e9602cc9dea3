use ragdb_core::types::{ChunkId, Document, EntryId};
use ragdb_core::Error;

#[test]
fn doc_key_prefers_id_metadata() {
    let doc = Document::new("Four score and seven years ago").with_meta("id", "gettysburg");
    assert_eq!(doc.doc_key(), "gettysburg");
    assert_eq!(ChunkId::new(&doc.doc_key(), 2).as_str(), "gettysburg:2");
}

#[test]
fn doc_key_falls_back_to_content_hash() {
    let a = Document::new("We choose to go to the Moon").with_meta("title", "Rice");
    let b = Document::new("We choose to go to the Moon");
    let c = Document::new("Ask not what your country can do for you");

    assert_eq!(a.doc_key().len(), 16);
    assert_eq!(a.doc_key(), b.doc_key(), "hash depends on text only");
    assert_ne!(a.doc_key(), c.doc_key());
}

#[test]
fn empty_id_metadata_is_ignored() {
    let doc = Document::new("text").with_meta("id", "");
    assert_eq!(doc.doc_key().len(), 16);
}

#[test]
fn error_messages_name_the_failure() {
    let err = Error::DimensionMismatch { expected: 384, actual: 300 };
    assert_eq!(err.to_string(), "Dimension mismatch: expected 384, got 300");

    let cause = anyhow::anyhow!("connection reset").context("embedding request failed");
    let err = Error::embedder(&cause);
    assert_eq!(err.to_string(), "Embedder failed: embedding request failed: connection reset");
}

#[test]
fn search_result_serializes_with_plain_ids() {
    let result = ragdb_core::types::SearchResult {
        chunk: ragdb_core::types::Chunk {
            id: ChunkId::new("A", 0),
            text: "hello".into(),
            ordinal: 0,
            of_total: 1,
            source_metadata: [("id".to_string(), "A".to_string())].into_iter().collect(),
        },
        score: 0.5,
        position: EntryId(7),
    };
    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["chunk"]["id"], "A:0");
    assert_eq!(json["position"], 7);
    assert_eq!(json["chunk"]["source_metadata"]["id"], "A");
}
