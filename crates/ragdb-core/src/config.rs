//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (nested keys separated by `__`, e.g. `APP_CHUNKING__MAX_TOKENS=256`).
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
    base: PathBuf,
}

impl Config {
    /// Load from the current directory, selecting the overlay by `RUST_ENV` (default `dev`).
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    pub fn load_from(base: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::file(base.join("config.toml")));
        let overlay = match env_name {
            "dev" | "development" => Some("config.dev.toml"),
            "prod" | "production" => Some("config.prod.toml"),
            "test" | "testing" => Some("config.test.toml"),
            _ => None,
        };
        if let Some(file) = overlay {
            figment = figment.merge(Toml::file(base.join(file)));
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));
        debug!(base = %base.display(), env = env_name, overlay = ?overlay, "merged configuration");

        let config = Self { figment, base: base.to_path_buf() };
        config.settings()?;
        Ok(config)
    }

    /// Directory the configuration files were read from.
    pub fn base(&self) -> &Path { &self.base }

    /// `data.corpus_dir` expanded and resolved against [`Config::base`].
    pub fn corpus_dir(&self) -> Result<PathBuf> {
        Ok(resolve_with_base(&self.base, self.settings()?.data.corpus_dir))
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::Config(format!("Failed to get '{}': {}", key, e)))
    }

    /// Extract and validate the full typed configuration.
    pub fn settings(&self) -> Result<RagConfig> {
        let cfg: RagConfig = self
            .figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub data: DataConfig,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

impl RagConfig {
    pub fn validate(&self) -> Result<()> {
        let c = &self.chunking;
        if c.max_tokens == 0 {
            return Err(Error::Config("chunking.max_tokens must be positive".into()));
        }
        if c.overlap_tokens >= c.max_tokens {
            return Err(Error::Config(format!(
                "chunking.overlap_tokens ({}) must be smaller than chunking.max_tokens ({})",
                c.overlap_tokens, c.max_tokens
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::Config("retrieval.top_k must be positive".into()));
        }
        if self.embedding.dim == 0 {
            return Err(Error::Config("embedding.dim must be positive".into()));
        }
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            return Err(Error::Config(format!("logging.level {:?} is not a valid filter: {e}", self.logging.level)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub corpus_dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { corpus_dir: "./data/txt".to_string() }
    }
}

/// Which token boundary policy the chunker uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenizerKind {
    Whitespace,
    UnicodeWords,
    /// The HuggingFace tokenizer found in `embedding.model_dir`.
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub max_tokens: usize,
    pub overlap_tokens: usize,
    pub tokenizer: TokenizerKind,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_tokens: 450, overlap_tokens: 20, tokenizer: TokenizerKind::Whitespace }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbeddingProvider {
    Hashing,
    BgeM3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    /// Output dimension of the hashing embedder. Model providers report their own.
    pub dim: usize,
    pub model_dir: Option<String>,
    /// Maximum sequence length fed to a model embedder.
    pub max_len: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self { provider: EmbeddingProvider::Hashing, dim: 384, model_dir: None, max_len: 512 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Store size at which similarity scoring switches to the rayon thread pool.
    pub parallel_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { parallel_threshold: 2048 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `warn` or `info,ragdb_pipeline=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string() }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
