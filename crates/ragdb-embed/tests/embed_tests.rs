use ragdb_core::config::{EmbeddingConfig, EmbeddingProvider};
use ragdb_embed::{get_default_embedder, Embedder, HashingEmbedder};

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[test]
fn hashing_embedder_shapes_and_determinism() {
    let embedder = get_default_embedder(&EmbeddingConfig::default()).expect("embedder");
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(embedder.dim(), 384);
    assert_eq!(v1.len(), 384, "embedding dim follows config");

    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    assert_eq!(v1, v2, "deterministic for same input");
    assert_eq!(embedder.embed("hello world").expect("embed"), *v1);
}

#[test]
fn shared_vocabulary_scores_higher() {
    let embedder = HashingEmbedder::new(256);
    let q = embedder.embed("economic recovery and jobs").expect("embed");
    let near = embedder.embed("Jobs are returning as the economic recovery continues").expect("embed");
    let far = embedder.embed("We shall land a man on the moon").expect("embed");
    assert!(cosine(&q, &near) > cosine(&q, &far));
}

#[test]
fn case_and_punctuation_are_ignored() {
    let embedder = HashingEmbedder::new(64);
    assert_eq!(embedder.embed("Freedom, Liberty!").expect("embed"), embedder.embed("freedom liberty").expect("embed"));
}

#[test]
fn empty_text_embeds_to_zero_vector() {
    let embedder = HashingEmbedder::new(32);
    let v = embedder.embed("  ... ").expect("embed");
    assert_eq!(v.len(), 32);
    assert!(v.iter().all(|x| *x == 0.0));
}

#[test]
fn seeds_change_the_projection() {
    let a = HashingEmbedder::with_seed(128, 1).embed("state of the union").expect("embed");
    let b = HashingEmbedder::with_seed(128, 2).embed("state of the union").expect("embed");
    assert_ne!(a, b);
}

#[cfg(not(feature = "candle"))]
#[test]
fn model_provider_requires_candle_feature() {
    let cfg = EmbeddingConfig { provider: EmbeddingProvider::BgeM3, ..EmbeddingConfig::default() };
    if ragdb_embed::fake_embeddings_forced() { return; }
    let err = get_default_embedder(&cfg).err().expect("must fail without candle");
    assert!(err.to_string().contains("candle"), "{err}");
}
