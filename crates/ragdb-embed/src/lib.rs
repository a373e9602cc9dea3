#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! Concrete embedder collaborators.
//!
//! [`HashingEmbedder`] is always available and deterministic; the BGE-M3
//! model embedder is compiled with the `candle` feature.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use ragdb_core::config::{expand_path, EmbeddingConfig, EmbeddingProvider};
pub use ragdb_core::traits::Embedder;

mod hashing;
pub use hashing::HashingEmbedder;

#[cfg(feature = "candle")]
mod bge;
#[cfg(feature = "candle")]
mod device;
#[cfg(feature = "candle")]
mod pool;
#[cfg(feature = "candle")]
mod tokenize;
#[cfg(feature = "candle")]
pub use bge::BgeM3Embedder;
#[cfg(feature = "candle")]
pub use pool::masked_mean_l2;

/// `APP_USE_FAKE_EMBEDDINGS=1` forces the hashing embedder regardless of config.
pub fn fake_embeddings_forced() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

pub fn get_default_embedder(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
    if fake_embeddings_forced() || config.provider == EmbeddingProvider::Hashing {
        info!(dim = config.dim, "using hashing embedder");
        return Ok(Box::new(HashingEmbedder::new(config.dim)));
    }
    load_model_embedder(config)
}

#[cfg(feature = "candle")]
fn load_model_embedder(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
    let dir = resolve_model_dir(config.model_dir.as_deref())?;
    Ok(Box::new(BgeM3Embedder::load(&dir, config.max_len)?))
}

#[cfg(not(feature = "candle"))]
fn load_model_embedder(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
    Err(anyhow!("embedding provider {:?} requires building ragdb-embed with the `candle` feature", config.provider))
}

/// Locate the model directory: configured path, then `APP_MODEL_DIR`,
/// `MODEL_DIR`, then `../models/bge-m3` and `models/bge-m3`.
pub fn resolve_model_dir(configured: Option<&str>) -> Result<PathBuf> {
    let candidates = configured
        .map(expand_path)
        .into_iter()
        .chain(std::env::var("APP_MODEL_DIR").ok().map(PathBuf::from))
        .chain(std::env::var("MODEL_DIR").ok().map(PathBuf::from))
        .chain([Path::new("../models/bge-m3").to_path_buf(), Path::new("models/bge-m3").to_path_buf()]);
    for p in candidates {
        if p.exists() {
            info!(path = %p.display(), "using model dir");
            return Ok(p);
        }
    }
    Err(anyhow!("Could not locate BGE-M3 model directory"))
}
