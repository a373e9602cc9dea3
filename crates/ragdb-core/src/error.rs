use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed parameters or vectors supplied by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A vector disagrees with the dimension already established by a store.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Embedder failed: {0}")]
    Embedder(String),

    #[error("Answer composer failed: {0}")]
    Composer(String),

    #[error("Tokenization failed: {0}")]
    Tokenizer(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Wrap a collaborator failure from the embedder, keeping the full context chain.
    pub fn embedder(err: &anyhow::Error) -> Self {
        Self::Embedder(format!("{err:#}"))
    }

    pub fn composer(err: &anyhow::Error) -> Self {
        Self::Composer(format!("{err:#}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
